//! TLV encoder for ASN.1 values
//!
//! # Usage Example
//!
//! ```
//! use tlvkit_asn1::{Asn1Object, Encoder};
//!
//! let mut encoder = Encoder::der();
//! encoder.encode_object(&Asn1Object::utf8_string("hi")).unwrap();
//! assert_eq!(encoder.into_bytes(), vec![0x0C, 0x02, b'h', b'i']);
//! ```

use crate::der::types::{Identifier, Length};
use crate::error::{Asn1Error, Asn1Result};
use crate::options::Mode;
use crate::registry::ContentRule;
use crate::value::{Asn1Object, Content};

/// End-of-contents marker closing an indefinite-length value
const END_OF_CONTENTS: [u8; 2] = [0x00, 0x00];

/// TLV encoder
///
/// The DER encoder always emits definite lengths. The BER encoder emits the
/// indefinite form for constructed values whose
/// [`infinite_length`](Asn1Object::infinite_length) flag is set and behaves
/// like DER otherwise.
///
/// If an encode call fails, the buffer is left as it was before the call.
///
/// # Why This Design?
/// A definite length has to be written before the contents it measures.
/// [`encode_object`](Self::encode_object) first walks the value once to
/// validate it and record the content length of every constructed level,
/// then writes each TLV straight into the output buffer. Nested values are
/// never staged in intermediate buffers, so encoding stays linear in the
/// output size however deep the value is nested.
#[derive(Debug)]
pub struct Encoder {
    buffer: Vec<u8>,
    mode: Mode,
}

impl Encoder {
    /// Create a DER encoder
    pub fn der() -> Self {
        Self::with_mode(Mode::Der)
    }

    /// Create a BER encoder
    pub fn ber() -> Self {
        Self::with_mode(Mode::Ber)
    }

    /// Create an encoder for the given encoding rules
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            buffer: Vec::new(),
            mode,
        }
    }

    /// DER encoder with `capacity` bytes preallocated
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            mode: Mode::Der,
        }
    }

    /// Encode a TLV triplet from already-encoded content octets
    ///
    /// This is the building block for universal types that are not part of
    /// the value model.
    ///
    /// # Arguments
    /// * `identifier` - Identifier octets to write
    /// * `value` - Content octets, written after a definite length
    pub fn encode_tlv(&mut self, identifier: &Identifier, value: &[u8]) {
        log::trace!("encoding {:?} with {} content bytes", identifier, value.len());
        identifier.encode_into(&mut self.buffer);
        Length::new(value.len()).encode_into(&mut self.buffer);
        self.buffer.extend_from_slice(value);
    }

    /// Encode an [`Asn1Object`] and everything nested in it
    ///
    /// Validation order is value, then tag, then tag class, so an absent
    /// value is reported as [`Asn1Error::InvalidValue`] whatever the state of
    /// the tag fields.
    pub fn encode_object(&mut self, object: &Asn1Object) -> Asn1Result<()> {
        let mut sizes = Vec::new();
        let total = self.measure(object, &mut sizes)?;
        self.buffer.reserve(total);

        let start = self.buffer.len();
        let mut next_size = 0;
        let result = self.write_object(object, &sizes, &mut next_size);
        if result.is_err() {
            self.buffer.truncate(start);
        }
        result
    }

    /// Validated identifier and content of `object`
    fn parts<'o>(object: &'o Asn1Object) -> Asn1Result<(Identifier, &'o Content)> {
        let value = object
            .value()
            .ok_or_else(|| Asn1Error::InvalidValue("value is absent".to_string()))?;
        let constructed = value.is_constructed();

        if object.kind().rule() == Some(ContentRule::Structured) && !constructed {
            return Err(Asn1Error::InvalidValue(
                "SEQUENCE and SET values must hold nested values".to_string(),
            ));
        }

        let identifier = Identifier::from_parts(object.tag(), object.tag_class(), constructed)?;
        Ok((identifier, value))
    }

    fn is_indefinite(&self, object: &Asn1Object) -> bool {
        self.mode == Mode::Ber && object.infinite_length()
    }

    /// Validate `object` and return its encoded size
    ///
    /// The content length of every constructed value is pushed onto `sizes`
    /// in pre-order, matching the order in which `write_object` visits them.
    fn measure(&self, object: &Asn1Object, sizes: &mut Vec<usize>) -> Asn1Result<usize> {
        let (identifier, value) = Self::parts(object)?;

        let (length, body_len) = match value {
            Content::Primitive(bytes) => (Length::new(bytes.len()), bytes.len()),
            Content::Constructed(children) => {
                let slot = sizes.len();
                sizes.push(0);
                let mut content_len = 0;
                for child in children {
                    content_len += self.measure(child, sizes)?;
                }
                sizes[slot] = content_len;

                if self.is_indefinite(object) {
                    (Length::Indefinite, content_len + END_OF_CONTENTS.len())
                } else {
                    (Length::new(content_len), content_len)
                }
            }
        };

        Ok(identifier.encoded_len() + length.encoded_len() + body_len)
    }

    /// Write a value already checked by `measure`
    fn write_object(
        &mut self,
        object: &Asn1Object,
        sizes: &[usize],
        next_size: &mut usize,
    ) -> Asn1Result<()> {
        let (identifier, value) = Self::parts(object)?;

        match value {
            Content::Primitive(bytes) => self.encode_tlv(&identifier, bytes),
            Content::Constructed(children) => {
                let content_len = sizes[*next_size];
                *next_size += 1;

                identifier.encode_into(&mut self.buffer);
                if self.is_indefinite(object) {
                    log::trace!("encoding {:?} with indefinite length", identifier);
                    Length::Indefinite.encode_into(&mut self.buffer);
                } else {
                    log::trace!("encoding {:?} with {} content bytes", identifier, content_len);
                    Length::new(content_len).encode_into(&mut self.buffer);
                }

                for child in children {
                    self.write_object(child, sizes, next_size)?;
                }

                if self.is_indefinite(object) {
                    self.buffer.extend_from_slice(&END_OF_CONTENTS);
                }
            }
        }
        Ok(())
    }

    /// Consume the encoder and return the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get the bytes encoded so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Discard the encoded bytes, keeping the allocation for reuse
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::der()
    }
}
