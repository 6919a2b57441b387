use thiserror::Error;

/// Error type for all ASN.1 encoding and decoding operations
///
/// Every failure aborts the current encode/decode call. Malformed structure is
/// never transient, so none of these variants is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Asn1Error {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Invalid tag class: {0}")]
    InvalidTagClass(String),

    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),
}

/// Result type alias for ASN.1 operations
pub type Asn1Result<T> = Result<T, Asn1Error>;
