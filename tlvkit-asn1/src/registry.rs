//! Universal tag dispatch
//!
//! The decoder turns a universal tag number into a concrete [`UniversalKind`]
//! through a [`TypeRegistry`]. The default registry is built once on first use
//! and never mutated afterwards, so concurrent decoders read it without
//! synchronization. Callers needing different dispatch build their own
//! registry and hand it to the decoder by reference.

use crate::universal;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tlvkit_core::TagClass;

/// How the content octets of a kind are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentRule {
    /// Raw octets, kept verbatim
    Octets,
    /// Character data, kept verbatim with no charset conversion
    Text,
    /// Nested values; the encoding must be constructed
    Structured,
}

/// Universal types with a registered content rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniversalKind {
    OctetString,
    Utf8String,
    NumericString,
    PrintableString,
    T61String,
    VideotexString,
    Ia5String,
    GraphicString,
    VisibleString,
    GeneralString,
    UniversalString,
    BmpString,
    Sequence,
    Set,
}

impl UniversalKind {
    pub const ALL: [UniversalKind; 14] = [
        UniversalKind::OctetString,
        UniversalKind::Utf8String,
        UniversalKind::NumericString,
        UniversalKind::PrintableString,
        UniversalKind::T61String,
        UniversalKind::VideotexString,
        UniversalKind::Ia5String,
        UniversalKind::GraphicString,
        UniversalKind::VisibleString,
        UniversalKind::GeneralString,
        UniversalKind::UniversalString,
        UniversalKind::BmpString,
        UniversalKind::Sequence,
        UniversalKind::Set,
    ];

    /// The kind's own tag number in the Universal class
    pub fn tag_number(self) -> u32 {
        match self {
            UniversalKind::OctetString => universal::OCTET_STRING,
            UniversalKind::Utf8String => universal::UTF8_STRING,
            UniversalKind::NumericString => universal::NUMERIC_STRING,
            UniversalKind::PrintableString => universal::PRINTABLE_STRING,
            UniversalKind::T61String => universal::T61_STRING,
            UniversalKind::VideotexString => universal::VIDEOTEX_STRING,
            UniversalKind::Ia5String => universal::IA5_STRING,
            UniversalKind::GraphicString => universal::GRAPHIC_STRING,
            UniversalKind::VisibleString => universal::VISIBLE_STRING,
            UniversalKind::GeneralString => universal::GENERAL_STRING,
            UniversalKind::UniversalString => universal::UNIVERSAL_STRING,
            UniversalKind::BmpString => universal::BMP_STRING,
            UniversalKind::Sequence => universal::SEQUENCE,
            UniversalKind::Set => universal::SET,
        }
    }

    pub fn rule(self) -> ContentRule {
        match self {
            UniversalKind::OctetString => ContentRule::Octets,
            UniversalKind::Sequence | UniversalKind::Set => ContentRule::Structured,
            _ => ContentRule::Text,
        }
    }

    /// ASN.1 type name
    pub fn name(self) -> &'static str {
        match self {
            UniversalKind::OctetString => "OCTET STRING",
            UniversalKind::Utf8String => "UTF8String",
            UniversalKind::NumericString => "NumericString",
            UniversalKind::PrintableString => "PrintableString",
            UniversalKind::T61String => "T61String",
            UniversalKind::VideotexString => "VideotexString",
            UniversalKind::Ia5String => "IA5String",
            UniversalKind::GraphicString => "GraphicString",
            UniversalKind::VisibleString => "VisibleString",
            UniversalKind::GeneralString => "GeneralString",
            UniversalKind::UniversalString => "UniversalString",
            UniversalKind::BmpString => "BMPString",
            UniversalKind::Sequence => "SEQUENCE",
            UniversalKind::Set => "SET",
        }
    }
}

static STANDARD: Lazy<TypeRegistry> = Lazy::new(|| {
    let registry = TypeRegistry::standard();
    log::debug!("initialized universal type registry with {} kinds", registry.len());
    registry
});

/// Lookup table from universal tag number to [`UniversalKind`]
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    kinds: HashMap<u32, UniversalKind>,
}

impl TypeRegistry {
    /// A registry without any entries; everything decodes as generic data
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding every [`UniversalKind`] under its own tag number
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for kind in UniversalKind::ALL {
            registry.register(kind.tag_number(), kind);
        }
        registry
    }

    /// The shared process-wide registry
    pub fn global() -> &'static TypeRegistry {
        &STANDARD
    }

    /// Map a universal tag number to `kind`, returning the previous entry
    pub fn register(&mut self, tag: u32, kind: UniversalKind) -> Option<UniversalKind> {
        self.kinds.insert(tag, kind)
    }

    pub fn unregister(&mut self, tag: u32) -> Option<UniversalKind> {
        self.kinds.remove(&tag)
    }

    /// Resolve `(class, tag)` to a registered kind
    ///
    /// Only the Universal class is dispatched; any other class always yields
    /// `None`.
    pub fn lookup(&self, class: TagClass, tag: u32) -> Option<UniversalKind> {
        match class {
            TagClass::Universal => self.kinds.get(&tag).copied(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_maps_own_tags() {
        let registry = TypeRegistry::standard();
        assert_eq!(registry.len(), UniversalKind::ALL.len());
        for kind in UniversalKind::ALL {
            assert_eq!(registry.lookup(TagClass::Universal, kind.tag_number()), Some(kind));
        }
    }

    #[test]
    fn test_lookup_ignores_non_universal_classes() {
        let registry = TypeRegistry::global();
        assert_eq!(
            registry.lookup(TagClass::Universal, universal::UTF8_STRING),
            Some(UniversalKind::Utf8String)
        );
        for class in [TagClass::Application, TagClass::ContextSpecific, TagClass::Private] {
            assert_eq!(registry.lookup(class, universal::UTF8_STRING), None);
        }
    }

    #[test]
    fn test_unregistered_universal_tags() {
        let registry = TypeRegistry::global();
        assert_eq!(registry.lookup(TagClass::Universal, universal::INTEGER), None);
        assert_eq!(registry.lookup(TagClass::Universal, universal::OBJECT_ID), None);
        assert_eq!(registry.lookup(TagClass::Universal, 31), None);
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.register(universal::UTC_TIME, UniversalKind::VisibleString), None);
        assert_eq!(
            registry.lookup(TagClass::Universal, universal::UTC_TIME),
            Some(UniversalKind::VisibleString)
        );
        assert_eq!(
            registry.unregister(universal::UTC_TIME),
            Some(UniversalKind::VisibleString)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeRegistry>();
        assert_send_sync::<crate::value::Asn1Object>();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    TypeRegistry::global().lookup(TagClass::Universal, universal::SEQUENCE)
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(UniversalKind::Sequence));
        }
    }

    #[test]
    fn test_kind_rules() {
        assert_eq!(UniversalKind::OctetString.rule(), ContentRule::Octets);
        assert_eq!(UniversalKind::Utf8String.rule(), ContentRule::Text);
        assert_eq!(UniversalKind::BmpString.rule(), ContentRule::Text);
        assert_eq!(UniversalKind::Sequence.rule(), ContentRule::Structured);
        assert_eq!(UniversalKind::Set.rule(), ContentRule::Structured);
    }
}
