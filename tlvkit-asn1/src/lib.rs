//! ASN.1 TLV codec
//!
//! This crate converts [`Asn1Object`] values into DER byte streams and parses
//! DER/BER byte streams back into typed values.
//!
//! - `der`: identifier and length codecs, the encoder and the decoder
//! - `value`: the mutable value model and its content
//! - `registry`: universal tag number to value kind dispatch
//! - `options`: decoder configuration
//!
//! # Example
//!
//! ```
//! use tlvkit_asn1::{decode, Asn1Object, TagClass};
//!
//! let mut object = Asn1Object::utf8_string("hello");
//! assert_eq!(object.to_der().unwrap(), b"\x0C\x05hello");
//!
//! object.set_tag_class(Some(TagClass::Private));
//! let decoded = decode(&object.to_der().unwrap()).unwrap();
//! assert_eq!(decoded.tag_class(), Some(TagClass::Private));
//! ```

pub use tlvkit_core::error;
pub use tlvkit_core::universal;

pub mod der;
pub mod options;
pub mod registry;
pub mod value;

pub use der::{decode, decode_all, decode_with, DerDecoder, Encoder, Identifier, Length};
pub use error::{Asn1Error, Asn1Result};
pub use options::{DecodeOptions, Mode};
pub use registry::{ContentRule, TypeRegistry, UniversalKind};
pub use tlvkit_core::TagClass;
pub use value::{Asn1Object, Content, Kind};
