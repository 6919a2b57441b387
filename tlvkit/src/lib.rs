//! tlvkit - ASN.1 DER/BER encoder and decoder
//!
//! This library converts in-memory tagged values into DER byte streams and
//! parses DER/BER byte streams back into typed values.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `tlvkit-core`: Error taxonomy, tag classes and universal tag numbers
//! - `tlvkit-asn1`: Identifier/length codecs, value model, type registry,
//!   encoder and decoder
//!
//! # Usage
//!
//! ```
//! use tlvkit::{decode, Asn1Object, TagClass, UniversalKind};
//!
//! let mut object = Asn1Object::empty(UniversalKind::Utf8String);
//! object.set_value(Some("hello".into()));
//! object.set_tag(Some(3));
//! object.set_tag_class(Some(TagClass::ContextSpecific));
//!
//! let der = object.to_der()?;
//! assert_eq!(der, b"\x83\x05hello");
//!
//! let decoded = decode(&der)?;
//! assert_eq!(decoded.tag(), Some(3));
//! assert_eq!(decoded.as_bytes(), Some(&b"hello"[..]));
//! # Ok::<(), tlvkit::Asn1Error>(())
//! ```

// Re-export core types
pub use tlvkit_core::{universal, Asn1Error, Asn1Result, TagClass};

// Re-export the codec
pub use tlvkit_asn1::{
    decode, decode_all, decode_with, Asn1Object, Content, ContentRule, DecodeOptions, DerDecoder,
    Encoder, Identifier, Kind, Length, Mode, TypeRegistry, UniversalKind,
};
