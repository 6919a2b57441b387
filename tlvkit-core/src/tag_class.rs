//! ASN.1 tag classes

use crate::error::{Asn1Error, Asn1Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ASN.1 Tag Class
///
/// ASN.1 defines four tag classes, stored in bits 8-7 of the identifier octet:
/// - **Universal** (00): Standard ASN.1 types (OCTET STRING, UTF8String, SEQUENCE, ...)
/// - **Application** (01): Application-specific types
/// - **Context-specific** (10): `[n]` annotations inside SEQUENCE/SET/CHOICE
/// - **Private** (11): Private/implementation-specific types
///
/// The same tag number means different things in different classes. Tag 12 in
/// the Universal class is UTF8String, while `[12]` in the Context-specific
/// class is whatever the enclosing structure says it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl TagClass {
    /// All tag classes in ordinal order
    pub const ALL: [TagClass; 4] = [
        TagClass::Universal,
        TagClass::Application,
        TagClass::ContextSpecific,
        TagClass::Private,
    ];

    /// Get tag class from the top two bits of an identifier octet
    pub fn from_bits(byte: u8) -> Self {
        match (byte >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    /// Convert tag class to the identifier octet bits (bits 8-7)
    pub fn to_bits(self) -> u8 {
        (self as u8) << 6
    }

    /// Canonical ordinal of the class (0-3)
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Symbolic name, as used by other ASN.1 toolkits
    pub fn as_str(self) -> &'static str {
        match self {
            TagClass::Universal => "UNIVERSAL",
            TagClass::Application => "APPLICATION",
            TagClass::ContextSpecific => "CONTEXT_SPECIFIC",
            TagClass::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagClass {
    type Err = Asn1Error;

    /// Parse a symbolic class name
    ///
    /// Only the four canonical symbols are accepted. Anything else fails with
    /// [`Asn1Error::InvalidTagClass`].
    fn from_str(s: &str) -> Asn1Result<Self> {
        match s {
            "UNIVERSAL" => Ok(TagClass::Universal),
            "APPLICATION" => Ok(TagClass::Application),
            "CONTEXT_SPECIFIC" => Ok(TagClass::ContextSpecific),
            "PRIVATE" => Ok(TagClass::Private),
            other => Err(Asn1Error::InvalidTagClass(format!(
                "unknown tag class symbol: {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_class_bits() {
        assert_eq!(TagClass::Universal.to_bits(), 0x00);
        assert_eq!(TagClass::Application.to_bits(), 0x40);
        assert_eq!(TagClass::ContextSpecific.to_bits(), 0x80);
        assert_eq!(TagClass::Private.to_bits(), 0xC0);
    }

    #[test]
    fn test_tag_class_from_bits_ignores_low_bits() {
        for class in TagClass::ALL {
            assert_eq!(TagClass::from_bits(class.to_bits() | 0x3F), class);
            assert_eq!(class.to_bits() >> 6, class.ordinal());
        }
    }

    #[test]
    fn test_tag_class_symbols() {
        for class in TagClass::ALL {
            assert_eq!(class.as_str().parse::<TagClass>().unwrap(), class);
            assert_eq!(class.to_string(), class.as_str());
        }
    }

    #[test]
    fn test_tag_class_unknown_symbol() {
        let err = "no_such_class".parse::<TagClass>().unwrap_err();
        assert!(matches!(err, Asn1Error::InvalidTagClass(_)));
        assert!("universal".parse::<TagClass>().is_err());
    }

    #[test]
    fn test_tag_class_serde_names() {
        let json = serde_json::to_string(&TagClass::ALL).unwrap();
        assert_eq!(
            json,
            r#"["UNIVERSAL","APPLICATION","CONTEXT_SPECIFIC","PRIVATE"]"#
        );
        let parsed: Vec<TagClass> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TagClass::ALL);
        for class in TagClass::ALL {
            assert_eq!(serde_json::to_string(&class).unwrap(), format!("\"{}\"", class));
        }
        assert!(serde_json::from_str::<TagClass>(r#""ContextSpecific""#).is_err());
    }
}
