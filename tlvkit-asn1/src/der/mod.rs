//! DER/BER TLV codec
//!
//! Every ASN.1 value is encoded as a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Identifier] [Length] [Contents]
//! ```
//!
//! ## Identifier Octets
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//! - CC = Class (00=Universal, 01=Application, 10=Context-specific, 11=Private)
//! - P = Primitive (0) or Constructed (1)
//! - TTTTT = Tag number (0-30), or 11111 followed by base-128 continuation
//!   octets for tag numbers of 31 and above
//!
//! ## Length Octets
//!
//! - `0x00`-`0x7F`: short form
//! - `0x81`-`0xFE`: long form, the low 7 bits count the big-endian length octets
//! - `0x80`: indefinite, contents end with `00 00` (BER only)
//!
//! ## Rules
//!
//! [`Encoder::der`] always produces definite lengths with minimal identifier
//! and length octets. By default the decoder reads BER: non-minimal headers,
//! constructed strings and indefinite length are accepted. With
//! [`DecodeOptions::strict_der`](crate::DecodeOptions::strict_der) it runs in
//! [`Mode::Der`](crate::Mode::Der) and rejects all of them.

pub mod decoder;
pub mod encoder;
pub mod types;

pub use decoder::{decode, decode_all, decode_with, DerDecoder};
pub use encoder::Encoder;
pub use types::{Identifier, Length};
