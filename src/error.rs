//! Error types for the KLV codec
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using KlvError
pub type Result<T> = std::result::Result<T, KlvError>;

/// Unified error type for KLV operations
#[derive(Debug, Error)]
pub enum KlvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // BER Length Errors
    // -------------------------------------------------------------------------
    #[error("empty input")]
    EmptyInput,

    #[error("incorrect input length: expected {expected} bytes, got {actual}")]
    IncorrectInputLength { expected: usize, actual: usize },

    #[error("length field declares {octets} octets (max 8)")]
    LengthOverflow { octets: usize },

    #[error("length field truncated after {} bytes: {source}", .consumed.len())]
    TruncatedLength {
        consumed: Vec<u8>,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    #[error("incorrect key length: expected {expected} bytes, got {actual}")]
    KeyLength { expected: usize, actual: usize },

    #[error("incorrect value length: expected {expected} bytes, got {actual}")]
    ValueLength { expected: u64, actual: u64 },

    #[error("value too large: {length} bytes (max {max})")]
    ValueTooLarge { length: u64, max: u64 },

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("key is too long: {len} bytes (max {max})")]
    KeyTooLong { len: usize, max: usize },

    #[error("partial write: {written} of {expected} bytes")]
    PartialWrite { written: usize, expected: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KlvError {
    /// Whether the error means the source ran out of data.
    ///
    /// True for a bare end-of-file from the source as well as for a length
    /// field cut short by one.
    pub fn is_eof(&self) -> bool {
        match self {
            KlvError::Io(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            KlvError::TruncatedLength { source, .. } => {
                source.kind() == std::io::ErrorKind::UnexpectedEof
            }
            _ => false,
        }
    }
}
