//! Error types for SDM operations.

use thiserror::Error;

/// Errors surfaced by store construction and the write/read paths.
///
/// All variants are raised synchronously before any mutation takes place,
/// so a failed call leaves the store exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdmError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("{vector} vector has length {actual}, expected {expected}")]
    DimensionMismatch {
        vector: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{vector} vector contains non-binary value {value} at position {position}")]
    NotBinary {
        vector: &'static str,
        position: usize,
        value: u8,
    },
}
