//! Error type shared by every codec operation.

use thiserror::Error;

/// Errors reported by the Huffman codec.
///
/// All variants are recoverable: callers are expected to report them and retry
/// with corrected input.
#[derive(Debug, Error)]
pub enum Error {
    /// A tree cannot be built from a frequency table with no entries.
    #[error("cannot build a Huffman tree from an empty frequency table")]
    EmptyInput,

    /// Decoding was attempted before any encode or tree load.
    #[error("no Huffman tree available, encode text first")]
    NoTreeAvailable,

    /// A textual bit string contained something other than `0` or `1`.
    #[error("invalid bit string: found {found:?} at position {position}")]
    InvalidBitString { position: usize, found: char },

    /// The input exceeds the configured symbol limit.
    #[error("input too large: {len} symbols exceeds the limit of {max}")]
    InputTooLarge { len: usize, max: usize },

    /// Compressed data, a code table or decoded output is inconsistent.
    #[error("corrupt input: {0}")]
    CorruptInput(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The code table could not be serialized or parsed.
    #[error("code table serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt<S: Into<String>>(message: S) -> Self {
        Error::CorruptInput(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
