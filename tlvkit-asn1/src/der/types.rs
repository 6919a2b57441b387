//! Identifier and length octet codecs

use crate::error::{Asn1Error, Asn1Result};
use tlvkit_core::TagClass;

/// Marker in the low five bits of the first identifier octet announcing the
/// high-tag-number form
const HIGH_TAG_MARKER: u8 = 0x1F;
const CONSTRUCTED_BIT: u8 = 0x20;
const INDEFINITE_MARKER: u8 = 0x80;

/// ASN.1 identifier (the "T" of TLV)
///
/// An identifier consists of:
/// - **Class**: Universal, Application, Context-specific, or Private
/// - **Constructed/Primitive**: Whether the contents are nested TLVs
/// - **Tag Number**: 0-30 fit into the first octet, larger numbers use the
///   high-tag-number form
///
/// # Encoding Format
///
/// Low tag number form (0-30):
/// ```text
/// Bits: 8 7 6 5 4 3 2 1
///       C C P T T T T T
/// ```
///
/// High tag number form (31 and above):
/// ```text
/// First octet:     C C P 1 1 1 1 1
/// Following octets: 1 T T T T T T T ... 0 T T T T T T T
/// ```
/// The tag number is written base-128, most significant group first, with bit
/// 8 set on every octet except the last.
///
/// # Why This Design?
/// Fields are private so that [`encode`](Self::encode) always produces the
/// shortest form for the number held. The decoder compares the octets it
/// consumed against [`encoded_len`](Self::encoded_len) to spot non-minimal
/// input when running in DER mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Tag class
    class: TagClass,
    /// Whether the contents are nested TLVs
    constructed: bool,
    /// Tag number
    number: u32,
}

impl Identifier {
    /// Create a new identifier
    ///
    /// # Arguments
    /// * `class` - Tag class
    /// * `constructed` - Whether the contents are nested TLVs
    /// * `number` - Tag number, any `u32`
    pub fn new(class: TagClass, constructed: bool, number: u32) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Create a Universal class identifier
    pub fn universal(constructed: bool, number: u32) -> Self {
        Self::new(TagClass::Universal, constructed, number)
    }

    /// Create an Application class identifier
    pub fn application(constructed: bool, number: u32) -> Self {
        Self::new(TagClass::Application, constructed, number)
    }

    /// Create a Context-specific class identifier
    pub fn context_specific(constructed: bool, number: u32) -> Self {
        Self::new(TagClass::ContextSpecific, constructed, number)
    }

    /// Create a Private class identifier
    pub fn private(constructed: bool, number: u32) -> Self {
        Self::new(TagClass::Private, constructed, number)
    }

    /// Build an identifier from possibly absent parts
    ///
    /// This is the validating entry point used by the encoder: value objects
    /// may carry an absent tag or tag class between mutations, and only at
    /// encode time does that become an error.
    ///
    /// # Errors
    /// - [`Asn1Error::InvalidTag`] if `number` is absent
    /// - [`Asn1Error::InvalidTagClass`] if `class` is absent
    pub fn from_parts(
        number: Option<u32>,
        class: Option<TagClass>,
        constructed: bool,
    ) -> Asn1Result<Self> {
        let number =
            number.ok_or_else(|| Asn1Error::InvalidTag("tag number is absent".to_string()))?;
        let class = class
            .ok_or_else(|| Asn1Error::InvalidTagClass("tag class is absent".to_string()))?;
        Ok(Self::new(class, constructed, number))
    }

    /// Get tag class
    pub fn class(&self) -> TagClass {
        self.class
    }

    /// Check if the identifier is constructed
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get tag number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Number of octets [`encode`](Self::encode) produces
    pub fn encoded_len(&self) -> usize {
        if self.number < HIGH_TAG_MARKER as u32 {
            1
        } else {
            let bits = 32 - self.number.leading_zeros() as usize;
            1 + bits.div_ceil(7)
        }
    }

    /// Encode identifier to bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut result);
        result
    }

    /// Append the identifier octets to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        let constructed_bit = if self.constructed { CONSTRUCTED_BIT } else { 0x00 };
        let leading = self.class.to_bits() | constructed_bit;

        if self.number < HIGH_TAG_MARKER as u32 {
            out.push(leading | self.number as u8);
            return;
        }

        out.push(leading | HIGH_TAG_MARKER);
        let groups = self.encoded_len() - 1;
        for i in (0..groups).rev() {
            let group = ((self.number >> (i * 7)) & 0x7F) as u8;
            if i > 0 {
                out.push(group | 0x80);
            } else {
                out.push(group);
            }
        }
    }

    /// Decode identifier from the start of `data`
    ///
    /// Both forms are accepted for any number. A consumed count larger than
    /// [`encoded_len`](Self::encoded_len) means the input was not minimal.
    ///
    /// # Returns
    /// Returns `Ok((Identifier, bytes_consumed))` if successful
    ///
    /// # Errors
    /// Returns [`Asn1Error::MalformedEncoding`] if:
    /// - `data` is empty
    /// - the high-tag-number form is not terminated before the end of `data`
    /// - the tag number does not fit into 32 bits
    pub fn decode(data: &[u8]) -> Asn1Result<(Self, usize)> {
        let first = *data.first().ok_or_else(|| {
            Asn1Error::MalformedEncoding("empty buffer for identifier decoding".to_string())
        })?;

        let class = TagClass::from_bits(first);
        let constructed = (first & CONSTRUCTED_BIT) != 0;
        let low_bits = first & HIGH_TAG_MARKER;

        if low_bits != HIGH_TAG_MARKER {
            return Ok((Self::new(class, constructed, low_bits as u32), 1));
        }

        let mut number = 0u32;
        for (i, &byte) in data.iter().enumerate().skip(1) {
            if number > (u32::MAX >> 7) {
                return Err(Asn1Error::MalformedEncoding(
                    "tag number exceeds 32 bits".to_string(),
                ));
            }
            number = (number << 7) | (byte & 0x7F) as u32;
            if (byte & 0x80) == 0 {
                return Ok((Self::new(class, constructed, number), i + 1));
            }
        }

        Err(Asn1Error::MalformedEncoding(
            "unterminated high tag number".to_string(),
        ))
    }
}

/// ASN.1 length (the "L" of TLV)
///
/// - **Short form**: lengths 0-127 in a single octet with bit 8 clear
/// - **Long form**: `0x80 | k` followed by the length in `k` big-endian octets,
///   `k` minimal
/// - **Indefinite**: the single octet `0x80`, contents terminated by two zero
///   octets. BER only; DER never produces it.
///
/// `0xFF` as a first octet is reserved by X.690 and rejected on decode.
///
/// # Why This Design?
/// A definite length carries only its value. The short or long form is
/// picked when encoding, so no `Length` can be turned into octets that
/// [`decode`](Self::decode) rejects or that use a non-minimal long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    /// Definite length of the contents in octets
    Definite(usize),
    /// BER indefinite length
    Indefinite,
}

impl Length {
    /// Create a definite length
    pub fn new(length: usize) -> Self {
        Length::Definite(length)
    }

    /// The definite length, or `None` for the indefinite form
    pub fn value(&self) -> Option<usize> {
        match self {
            Length::Definite(length) => Some(*length),
            Length::Indefinite => None,
        }
    }

    /// Check if this is the indefinite form
    pub fn is_indefinite(&self) -> bool {
        matches!(self, Length::Indefinite)
    }

    /// Number of octets [`encode`](Self::encode) produces
    pub fn encoded_len(&self) -> usize {
        match *self {
            Length::Definite(length) if length >= 0x80 => 1 + long_form_octets(length),
            _ => 1,
        }
    }

    /// Encode length to bytes
    ///
    /// # Encoding Strategy
    /// - Indefinite: `0x80`
    /// - Below 128: short form (1 byte)
    /// - Otherwise: long form with the fewest length octets
    pub fn encode(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut result);
        result
    }

    /// Append the length octets to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match *self {
            Length::Indefinite => out.push(INDEFINITE_MARKER),
            Length::Definite(length) if length < 0x80 => out.push(length as u8),
            Length::Definite(length) => {
                let num_bytes = long_form_octets(length);
                out.push(0x80 | num_bytes as u8);
                for i in (0..num_bytes).rev() {
                    out.push(((length >> (i * 8)) & 0xFF) as u8);
                }
            }
        }
    }

    /// Decode length from the start of `data`
    ///
    /// Non-minimal long forms are accepted; compare the consumed count with
    /// [`encoded_len`](Self::encoded_len) to detect them.
    ///
    /// # Returns
    /// Returns `Ok((Length, bytes_consumed))` if successful
    ///
    /// # Errors
    /// Returns [`Asn1Error::MalformedEncoding`] if:
    /// - `data` is empty
    /// - the first octet is the reserved value `0xFF`
    /// - the long form needs more octets than `usize` holds
    /// - `data` is shorter than the long form announces
    pub fn decode(data: &[u8]) -> Asn1Result<(Self, usize)> {
        let first = *data.first().ok_or_else(|| {
            Asn1Error::MalformedEncoding("empty buffer for length decoding".to_string())
        })?;

        if (first & 0x80) == 0 {
            return Ok((Length::Definite(first as usize), 1));
        }
        if first == INDEFINITE_MARKER {
            return Ok((Length::Indefinite, 1));
        }
        if first == 0xFF {
            return Err(Asn1Error::MalformedEncoding(
                "reserved length octet 0xFF".to_string(),
            ));
        }

        let num_bytes = (first & 0x7F) as usize;
        if num_bytes > std::mem::size_of::<usize>() {
            return Err(Asn1Error::MalformedEncoding(format!(
                "length encoding too large: {} octets",
                num_bytes
            )));
        }
        if data.len() < 1 + num_bytes {
            return Err(Asn1Error::MalformedEncoding(format!(
                "buffer too short for long form length: need {} bytes, got {}",
                1 + num_bytes,
                data.len()
            )));
        }

        let length = data[1..=num_bytes]
            .iter()
            .fold(0usize, |acc, &byte| (acc << 8) | byte as usize);

        Ok((Length::Definite(length), 1 + num_bytes))
    }
}

/// Octets needed for `length` in the long form
fn long_form_octets(length: usize) -> usize {
    std::cmp::max(
        1,
        std::mem::size_of::<usize>() - (length.leading_zeros() as usize / 8),
    )
}
