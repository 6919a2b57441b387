//! Content octets of an ASN.1 value

use super::Asn1Object;
use serde::{Deserialize, Serialize};

/// The "V" of TLV
///
/// Byte content is carried verbatim, including text payloads in whatever
/// character encoding the caller supplied. Constructed content owns its
/// children in encoding order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    Primitive(#[serde(with = "serde_bytes")] Vec<u8>),
    Constructed(Vec<Asn1Object>),
}

impl Content {
    pub fn is_constructed(&self) -> bool {
        matches!(self, Content::Constructed(_))
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Content::Primitive(bytes) => Some(bytes),
            Content::Constructed(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[Asn1Object]> {
        match self {
            Content::Primitive(_) => None,
            Content::Constructed(children) => Some(children),
        }
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Primitive(bytes)
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        Content::Primitive(bytes.to_vec())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Primitive(text.into_bytes())
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Primitive(text.as_bytes().to_vec())
    }
}

impl From<Vec<Asn1Object>> for Content {
    fn from(children: Vec<Asn1Object>) -> Self {
        Content::Constructed(children)
    }
}
