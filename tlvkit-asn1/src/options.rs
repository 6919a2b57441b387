//! Decoder configuration

use serde::{Deserialize, Serialize};

/// Nesting limit applied when no other is configured
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Encoding rules in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Basic Encoding Rules: indefinite lengths, non-minimal length and tag
    /// octets, and constructed strings are all accepted
    #[default]
    Ber,
    /// Distinguished Encoding Rules: definite lengths only, every identifier
    /// and length in its shortest form, strings primitive
    Der,
}

/// Options controlling how strictly input is decoded
///
/// The defaults decode in [`Mode::Ber`] and allow up to
/// [`DEFAULT_MAX_DEPTH`] levels of nesting. Deserializing from a partial
/// document fills the missing fields from the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    max_depth: usize,
    mode: Mode,
}

impl DecodeOptions {
    /// Default options, same as [`DecodeOptions::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that accept DER only
    ///
    /// Rejects the indefinite length, long-form lengths below 128 or with
    /// leading zero octets, the high-tag-number form for numbers below 31
    /// or with a leading `0x80` group, and constructed encodings of the
    /// registered string kinds.
    pub fn strict_der() -> Self {
        Self::default().with_mode(Mode::Der)
    }

    /// Maximum number of nested TLV levels, the outermost value counting as one
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the indefinite length is accepted
    pub fn allow_indefinite(&self) -> bool {
        self.mode == Mode::Ber
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            mode: Mode::Ber,
        }
    }
}
