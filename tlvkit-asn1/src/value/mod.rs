//! ASN.1 value model
//!
//! An [`Asn1Object`] is a plain record of kind, tag, tag class, content and
//! the indefinite-length flag. It keeps no cached encoding: every call to
//! [`Asn1Object::to_der`] derives the bytes from the current fields, so any
//! mutation is visible in the next encoding.
//!
//! Tag, tag class and value may each be absent. Setters accept that freely and
//! the encoder rejects it, which lets a caller start from an empty object and
//! fill the fields in any order.

pub mod content;

pub use content::Content;

use crate::der::{Encoder, Identifier};
use crate::error::Asn1Result;
use crate::registry::{ContentRule, UniversalKind};
use serde::{Deserialize, Serialize};
use tlvkit_core::TagClass;

/// What an object was created or decoded as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// A registered universal type
    Universal(UniversalKind),
    /// Untyped data: non-universal tags and unregistered universal tags
    Data,
}

impl Kind {
    pub fn rule(self) -> Option<ContentRule> {
        match self {
            Kind::Universal(kind) => Some(kind.rule()),
            Kind::Data => None,
        }
    }
}

/// A mutable ASN.1 value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asn1Object {
    kind: Kind,
    tag: Option<u32>,
    tag_class: Option<TagClass>,
    value: Option<Content>,
    infinite_length: bool,
}

impl Asn1Object {
    /// Create a value tagged with the kind's own universal tag
    pub fn new(kind: UniversalKind, value: Option<Content>) -> Self {
        Self::with_tag_class(
            kind,
            value,
            Some(kind.tag_number()),
            Some(TagClass::Universal),
        )
    }

    /// Create a value without content
    ///
    /// Tag and tag class take their defaults; the value must be set before
    /// encoding.
    pub fn empty(kind: UniversalKind) -> Self {
        Self::new(kind, None)
    }

    /// Create an implicitly tagged value
    ///
    /// A tag supplied without a class is taken as a context-specific `[n]`
    /// annotation.
    pub fn with_tag(kind: UniversalKind, value: Option<Content>, tag: Option<u32>) -> Self {
        Self::with_tag_class(kind, value, tag, Some(TagClass::ContextSpecific))
    }

    /// Create a value with exactly the supplied tag and class
    ///
    /// Nothing stops the pair from colliding with another universal type; the
    /// caller is responsible for choosing something its own decoder dispatches
    /// as intended.
    pub fn with_tag_class(
        kind: UniversalKind,
        value: Option<Content>,
        tag: Option<u32>,
        tag_class: Option<TagClass>,
    ) -> Self {
        Self {
            kind: Kind::Universal(kind),
            tag,
            tag_class,
            value,
            infinite_length: false,
        }
    }

    /// Create an untyped value
    pub fn data(tag: u32, tag_class: TagClass, value: Content) -> Self {
        Self {
            kind: Kind::Data,
            tag: Some(tag),
            tag_class: Some(tag_class),
            value: Some(value),
            infinite_length: false,
        }
    }

    /// UTF8String holding `text` verbatim
    ///
    /// The bytes are stored as given and never transcoded, so text in other
    /// character encodings passes through unchanged.
    pub fn utf8_string(text: impl AsRef<[u8]>) -> Self {
        Self::new(UniversalKind::Utf8String, Some(text.as_ref().into()))
    }

    pub fn octet_string(bytes: impl AsRef<[u8]>) -> Self {
        Self::new(UniversalKind::OctetString, Some(bytes.as_ref().into()))
    }

    pub fn sequence(children: Vec<Asn1Object>) -> Self {
        Self::new(UniversalKind::Sequence, Some(Content::Constructed(children)))
    }

    pub fn set(children: Vec<Asn1Object>) -> Self {
        Self::new(UniversalKind::Set, Some(Content::Constructed(children)))
    }

    /// Mark the value for BER indefinite-length output
    ///
    /// Only [`to_ber`](Self::to_ber) honors the flag, and only for constructed
    /// content.
    pub fn with_infinite_length(mut self, infinite_length: bool) -> Self {
        self.infinite_length = infinite_length;
        self
    }

    pub(crate) fn from_decoded(
        kind: Kind,
        identifier: Identifier,
        value: Content,
        infinite_length: bool,
    ) -> Self {
        Self {
            kind,
            tag: Some(identifier.number()),
            tag_class: Some(identifier.class()),
            value: Some(value),
            infinite_length,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn tag(&self) -> Option<u32> {
        self.tag
    }

    pub fn tag_class(&self) -> Option<TagClass> {
        self.tag_class
    }

    pub fn value(&self) -> Option<&Content> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<Content> {
        self.value
    }

    /// Whether the value was decoded from (or built for) indefinite length
    pub fn infinite_length(&self) -> bool {
        self.infinite_length
    }

    /// Whether the value encodes with the constructed bit set
    pub fn is_constructed(&self) -> bool {
        self.value.as_ref().is_some_and(Content::is_constructed)
    }

    /// Primitive content octets
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.value.as_ref().and_then(Content::as_bytes)
    }

    /// Primitive content of a text kind, if it happens to be valid UTF-8
    ///
    /// Decoding never validates text, so a `None` here says nothing about
    /// whether the value itself is usable.
    pub fn as_text(&self) -> Option<&str> {
        if self.kind.rule() != Some(ContentRule::Text) {
            return None;
        }
        self.as_bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn children(&self) -> Option<&[Asn1Object]> {
        self.value.as_ref().and_then(Content::children)
    }

    pub fn set_value(&mut self, value: Option<Content>) {
        self.value = value;
    }

    pub fn set_tag(&mut self, tag: Option<u32>) {
        self.tag = tag;
    }

    pub fn set_tag_class(&mut self, tag_class: Option<TagClass>) {
        self.tag_class = tag_class;
    }

    /// Encode as DER
    ///
    /// The output is always definite-length, whatever
    /// [`infinite_length`](Self::infinite_length) says.
    ///
    /// # Errors
    /// - [`InvalidValue`](crate::Asn1Error::InvalidValue) if this value or a
    ///   nested one has no content, or a SEQUENCE/SET holds primitive content
    /// - [`InvalidTag`](crate::Asn1Error::InvalidTag) if a tag is absent
    /// - [`InvalidTagClass`](crate::Asn1Error::InvalidTagClass) if a tag class
    ///   is absent
    pub fn to_der(&self) -> Asn1Result<Vec<u8>> {
        let mut encoder = Encoder::der();
        encoder.encode_object(self)?;
        Ok(encoder.into_bytes())
    }

    /// Encode as BER, keeping indefinite length where it is flagged
    pub fn to_ber(&self) -> Asn1Result<Vec<u8>> {
        let mut encoder = Encoder::ber();
        encoder.encode_object(self)?;
        Ok(encoder.into_bytes())
    }
}
