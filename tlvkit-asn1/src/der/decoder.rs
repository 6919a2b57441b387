//! TLV decoder for DER and BER input
//!
//! # Usage Example
//!
//! ```
//! use tlvkit_asn1::DerDecoder;
//!
//! let data = [0x0C, 0x01, b'a', 0x04, 0x00];
//! let mut decoder = DerDecoder::new(&data);
//! let first = decoder.decode_object().unwrap();
//! assert_eq!(first.as_text(), Some("a"));
//! assert_eq!(decoder.position(), 3);
//! ```

use crate::der::types::{Identifier, Length};
use crate::error::{Asn1Error, Asn1Result};
use crate::options::{DecodeOptions, Mode};
use crate::registry::{ContentRule, TypeRegistry};
use crate::universal;
use crate::value::{Asn1Object, Content, Kind};

/// TLV decoder over a byte buffer
///
/// # Position Tracking
///
/// The decoder keeps a position that advances past every decoded value, so
/// several values can be read from the same buffer one after another.
///
/// # Nesting
///
/// Constructed values are decoded recursively. Definite-length children are
/// decoded by a sub-decoder confined to the parent's declared content window,
/// so a child can never read past its parent. Recursion is bounded by
/// [`DecodeOptions::max_depth`].
///
/// # Why This Design?
/// The decoder borrows the input and the registry instead of owning them, so
/// sub-decoders for nested content cost a slice and a few words each. In
/// [`Mode::Der`] every header is checked against the shortest encoding of
/// what it decoded to, which is how DER forbids alternative encodings.
pub struct DerDecoder<'a> {
    buffer: &'a [u8],
    position: usize,
    options: DecodeOptions,
    registry: &'a TypeRegistry,
}

impl<'a> DerDecoder<'a> {
    /// Create a decoder with default options and the global registry
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_options(buffer, DecodeOptions::default())
    }

    /// Create a decoder with explicit options and the global registry
    ///
    /// # Arguments
    /// * `buffer` - Input holding one or more encoded values
    /// * `options` - Nesting limit and encoding rules to apply
    pub fn with_options(buffer: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            buffer,
            position: 0,
            options,
            registry: TypeRegistry::global(),
        }
    }

    /// Dispatch universal tags through `registry` instead of the global one
    pub fn with_registry(mut self, registry: &'a TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Start decoding at `offset` instead of the beginning of the buffer
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.position = offset.min(self.buffer.len());
        self
    }

    /// Get current position in buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get remaining bytes count
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Check if there are remaining bytes
    pub fn has_remaining(&self) -> bool {
        self.position < self.buffer.len()
    }

    fn read_bytes(&mut self, count: usize) -> Asn1Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Asn1Error::MalformedEncoding(format!(
                "content exceeds input: need {} bytes, have {}",
                count,
                self.remaining()
            )));
        }
        let start = self.position;
        self.position += count;
        Ok(&self.buffer[start..start + count])
    }

    /// Decode the identifier and length octets of the next value
    ///
    /// # Errors
    /// Returns [`Asn1Error::MalformedEncoding`] if the header is truncated or
    /// invalid, or, in [`Mode::Der`], if either part is not in its shortest
    /// form.
    pub fn decode_header(&mut self) -> Asn1Result<(Identifier, Length)> {
        let (identifier, id_len) = Identifier::decode(&self.buffer[self.position..])?;
        if self.is_der() && id_len != identifier.encoded_len() {
            return Err(Asn1Error::MalformedEncoding(format!(
                "identifier for tag {} is not minimal in DER",
                identifier.number()
            )));
        }
        self.position += id_len;

        let (length, len_len) = Length::decode(&self.buffer[self.position..])?;
        if self.is_der() && len_len != length.encoded_len() {
            return Err(Asn1Error::MalformedEncoding(format!(
                "length {:?} is not minimal in DER",
                length
            )));
        }
        self.position += len_len;

        log::trace!(
            "decoded header {:?} {:?} ending at offset {}",
            identifier,
            length,
            self.position
        );
        Ok((identifier, length))
    }

    fn is_der(&self) -> bool {
        self.options.mode() == Mode::Der
    }

    /// Decode the next complete value
    ///
    /// On error the position is left where decoding stopped; the decoder
    /// should not be used further.
    pub fn decode_object(&mut self) -> Asn1Result<Asn1Object> {
        self.decode_nested(1)
    }

    fn decode_nested(&mut self, depth: usize) -> Asn1Result<Asn1Object> {
        if depth > self.options.max_depth() {
            return Err(Asn1Error::MalformedEncoding(format!(
                "nesting deeper than {} levels",
                self.options.max_depth()
            )));
        }

        let (identifier, length) = self.decode_header()?;
        if identifier == Identifier::universal(false, universal::END_OF_CONTENTS) {
            return Err(Asn1Error::MalformedEncoding(
                "end-of-contents outside an indefinite-length value".to_string(),
            ));
        }

        let (content, infinite_length) = match length.value() {
            None => (self.decode_indefinite(&identifier, depth)?, true),
            Some(len) => {
                let window = self.read_bytes(len)?;
                if identifier.is_constructed() {
                    let mut inner = DerDecoder {
                        buffer: window,
                        position: 0,
                        options: self.options,
                        registry: self.registry,
                    };
                    let mut children = Vec::new();
                    while inner.has_remaining() {
                        children.push(inner.decode_nested(depth + 1)?);
                    }
                    (Content::Constructed(children), false)
                } else {
                    (Content::Primitive(window.to_vec()), false)
                }
            }
        };

        let kind = match self.registry.lookup(identifier.class(), identifier.number()) {
            Some(kind) => {
                let structured = kind.rule() == ContentRule::Structured;
                if structured && !identifier.is_constructed() {
                    return Err(Asn1Error::MalformedEncoding(format!(
                        "{} encoded as primitive",
                        kind.name()
                    )));
                }
                if !structured && identifier.is_constructed() && self.is_der() {
                    return Err(Asn1Error::MalformedEncoding(format!(
                        "constructed {} is not allowed in DER",
                        kind.name()
                    )));
                }
                Kind::Universal(kind)
            }
            None => Kind::Data,
        };

        Ok(Asn1Object::from_decoded(
            kind,
            identifier,
            content,
            infinite_length,
        ))
    }

    /// Decode children until the end-of-contents marker
    fn decode_indefinite(&mut self, identifier: &Identifier, depth: usize) -> Asn1Result<Content> {
        if !self.options.allow_indefinite() {
            return Err(Asn1Error::MalformedEncoding(
                "indefinite length is not allowed in DER".to_string(),
            ));
        }
        if !identifier.is_constructed() {
            return Err(Asn1Error::MalformedEncoding(
                "indefinite length primitive value".to_string(),
            ));
        }

        let mut children = Vec::new();
        loop {
            if self.buffer[self.position..].starts_with(&[0x00, 0x00]) {
                self.position += 2;
                return Ok(Content::Constructed(children));
            }
            if !self.has_remaining() {
                return Err(Asn1Error::MalformedEncoding(
                    "missing end-of-contents for indefinite length".to_string(),
                ));
            }
            children.push(self.decode_nested(depth + 1)?);
        }
    }
}

/// Decode exactly one value occupying the whole of `data`
///
/// # Errors
/// Returns [`Asn1Error::MalformedEncoding`] for any structural problem,
/// including bytes left over after the value.
pub fn decode(data: &[u8]) -> Asn1Result<Asn1Object> {
    decode_with(data, &DecodeOptions::default())
}

/// [`decode`] with explicit options
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Asn1Result<Asn1Object> {
    let mut decoder = DerDecoder::with_options(data, *options);
    let result = decoder.decode_object().and_then(|object| {
        if decoder.has_remaining() {
            Err(Asn1Error::MalformedEncoding(format!(
                "{} trailing bytes after value",
                decoder.remaining()
            )))
        } else {
            Ok(object)
        }
    });
    result.inspect_err(|e| log::debug!("rejected input at offset {}: {}", decoder.position(), e))
}

/// Decode consecutive values until `data` is exhausted
pub fn decode_all(data: &[u8]) -> Asn1Result<Vec<Asn1Object>> {
    let mut decoder = DerDecoder::new(data);
    let mut objects = Vec::new();
    while decoder.has_remaining() {
        let object = decoder
            .decode_object()
            .inspect_err(|e| log::debug!("rejected input at offset {}: {}", decoder.position(), e))?;
        objects.push(object);
    }
    Ok(objects)
}
