//! Encoder/decoder properties and interoperability

use tlvkit::{
    decode, decode_all, decode_with, Asn1Error, Asn1Object, Content, DecodeOptions, Identifier,
    Kind, Length, TagClass, UniversalKind,
};

fn sample_objects() -> Vec<Asn1Object> {
    vec![
        Asn1Object::utf8_string("plain"),
        Asn1Object::utf8_string(""),
        Asn1Object::octet_string(vec![0u8; 300]),
        Asn1Object::new(UniversalKind::PrintableString, Some("Example CA".into())),
        Asn1Object::new(UniversalKind::BmpString, Some(vec![0x00, 0x41, 0x00, 0x42].into())),
        Asn1Object::data(2, TagClass::Universal, Content::Primitive(vec![0x01, 0x00])),
        Asn1Object::data(1234, TagClass::Application, Content::Primitive(b"app".to_vec())),
        Asn1Object::sequence(vec![
            Asn1Object::utf8_string("nested"),
            Asn1Object::set(vec![
                Asn1Object::octet_string([0xDE, 0xAD]),
                Asn1Object::with_tag(UniversalKind::Utf8String, Some("implicit".into()), Some(0)),
            ]),
            Asn1Object::data(5, TagClass::ContextSpecific, Content::Constructed(vec![])),
        ]),
    ]
}

fn assert_same_shape(expected: &Asn1Object, actual: &Asn1Object) {
    assert_eq!(expected.tag(), actual.tag());
    assert_eq!(expected.tag_class(), actual.tag_class());
    assert_eq!(expected.is_constructed(), actual.is_constructed());
    match (expected.value(), actual.value()) {
        (Some(Content::Primitive(a)), Some(Content::Primitive(b))) => assert_eq!(a, b),
        (Some(Content::Constructed(a)), Some(Content::Constructed(b))) => {
            assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b) {
                assert_same_shape(x, y);
            }
        }
        (a, b) => panic!("content mismatch: {:?} vs {:?}", a, b),
    }
}

#[test]
fn test_round_trip() {
    for object in sample_objects() {
        let der = object.to_der().unwrap();
        let decoded = decode(&der).unwrap();
        assert_same_shape(&object, &decoded);
        assert_eq!(decoded.to_der().unwrap(), der);
    }
}

#[test]
fn test_der_output_passes_strict_decoding() {
    let strict = DecodeOptions::strict_der();
    for object in sample_objects() {
        let der = object.to_der().unwrap();
        let decoded = decode_with(&der, &strict).unwrap();
        assert_same_shape(&object, &decoded);
    }
}

#[test]
fn test_round_trip_keeps_kind_for_universal_tags() {
    let decoded = decode(&Asn1Object::sequence(vec![]).to_der().unwrap()).unwrap();
    assert_eq!(decoded.kind(), Kind::Universal(UniversalKind::Sequence));

    let implicit = Asn1Object::with_tag(UniversalKind::Utf8String, Some("x".into()), Some(12));
    let decoded = decode(&implicit.to_der().unwrap()).unwrap();
    assert_eq!(decoded.kind(), Kind::Data);
}

#[test]
fn test_decode_all_matches_concatenation() {
    let objects = sample_objects();
    let mut stream = Vec::new();
    for object in &objects {
        stream.extend(object.to_der().unwrap());
    }
    let decoded = decode_all(&stream).unwrap();
    assert_eq!(decoded.len(), objects.len());
    for (expected, actual) in objects.iter().zip(&decoded) {
        assert_same_shape(expected, actual);
    }
}

#[test]
fn test_length_form_boundaries() {
    for (len, header) in [
        (0usize, vec![0x04, 0x00]),
        (127, vec![0x04, 0x7F]),
        (128, vec![0x04, 0x81, 0x80]),
        (8000, vec![0x04, 0x82, 0x1F, 0x40]),
        (70000, vec![0x04, 0x83, 0x01, 0x11, 0x70]),
    ] {
        let der = Asn1Object::octet_string(vec![0x5A; len]).to_der().unwrap();
        assert_eq!(&der[..header.len()], &header[..]);
        assert_eq!(der.len(), header.len() + len);

        let (length, consumed) = Length::decode(&der[1..]).unwrap();
        assert_eq!(length.value(), Some(len));
        assert_eq!(consumed, header.len() - 1);

        assert_eq!(decode(&der).unwrap().as_bytes().map(<[u8]>::len), Some(len));
    }
}

#[test]
fn test_identifier_sub_codec() {
    let id = Identifier::from_parts(Some(40), Some(TagClass::Application), true).unwrap();
    assert_eq!(id.encode(), vec![0x7F, 0x28]);
    assert_eq!(Identifier::decode(&[0x7F, 0x28]).unwrap(), (id, 2));
}

#[test]
fn test_every_prefix_is_rejected() {
    let der = sample_objects().pop().unwrap().to_der().unwrap();
    for end in 0..der.len() {
        assert!(
            matches!(decode(&der[..end]), Err(Asn1Error::MalformedEncoding(_))),
            "prefix of {} bytes was accepted",
            end
        );
    }
}

#[test]
fn test_huge_declared_length_is_rejected() {
    assert!(matches!(
        decode(&[0x04, 0x88, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]),
        Err(Asn1Error::MalformedEncoding(_))
    ));
    assert!(matches!(
        decode(&[0x30, 0x84, 0x7F, 0xFF, 0xFF, 0xFF, 0x04, 0x00]),
        Err(Asn1Error::MalformedEncoding(_))
    ));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let mut object = Asn1Object::utf8_string("leaf");
    for _ in 0..300 {
        object = Asn1Object::sequence(vec![object]);
    }
    let der = object.to_der().unwrap();

    assert!(matches!(decode(&der), Err(Asn1Error::MalformedEncoding(_))));
    assert!(decode_with(&der, &DecodeOptions::new().with_max_depth(301)).is_ok());
}

#[test]
fn test_indefinite_input_round_trips_through_ber() {
    let ber = [
        0x30, 0x80, // SEQUENCE, indefinite
        0x0C, 0x02, b'h', b'i', //
        0xA1, 0x80, // [1] constructed, indefinite
        0x04, 0x01, 0x2A, //
        0x00, 0x00, //
        0x00, 0x00,
    ];
    let object = decode(&ber).unwrap();
    assert!(object.infinite_length());
    assert_eq!(object.to_ber().unwrap(), ber);

    let der = object.to_der().unwrap();
    assert_eq!(
        der,
        vec![0x30, 0x09, 0x0C, 0x02, b'h', b'i', 0xA1, 0x03, 0x04, 0x01, 0x2A]
    );
    let reparsed = decode(&der).unwrap();
    assert!(!reparsed.infinite_length());
    assert_same_shape(&object, &reparsed);
}

mod rasn_interop {
    use super::*;
    use rasn::types::OctetString;

    #[test]
    fn test_utf8_string_matches_rasn() {
        let long = "abあい".repeat(1000);
        for text in ["", "hello", "こんにちは、世界", long.as_str()] {
            let ours = Asn1Object::utf8_string(text).to_der().unwrap();
            let theirs = rasn::der::encode(&text.to_string()).unwrap();
            assert_eq!(ours, theirs);
            assert_eq!(rasn::der::decode::<String>(&ours).unwrap(), text);
        }
    }

    #[test]
    fn test_octet_string_matches_rasn() {
        let bytes = vec![0xA5u8; 200];
        let ours = Asn1Object::octet_string(&bytes).to_der().unwrap();
        let theirs = rasn::der::encode(&OctetString::from(bytes.clone())).unwrap();
        assert_eq!(ours, theirs);
        assert_eq!(decode(&theirs).unwrap().as_bytes(), Some(&bytes[..]));
    }

    #[test]
    fn test_sequence_of_matches_rasn() {
        let items = vec!["one".to_string(), "two".to_string(), String::new()];
        let ours = Asn1Object::sequence(items.iter().map(Asn1Object::utf8_string).collect())
            .to_der()
            .unwrap();
        let theirs = rasn::der::encode(&items).unwrap();
        assert_eq!(ours, theirs);

        let decoded = decode(&theirs).unwrap();
        let texts: Vec<&str> = decoded
            .children()
            .unwrap()
            .iter()
            .filter_map(Asn1Object::as_text)
            .collect();
        assert_eq!(texts, ["one", "two", ""]);
    }
}
