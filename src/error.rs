//! Error handling for Keccak-256 hashing.
//!
//! The engine and the synchronous one-shot API are infallible. Errors only
//! arise at the edges: stream I/O and cancellation, configuration and hex
//! parsing.

use std::io;
use thiserror::Error;

/// Result alias used across the crate.
pub type HashResult<T> = Result<T, HashError>;

/// All errors surfaced by this crate.
#[derive(Debug, Error)]
pub enum HashError {
    /// The caller cancelled a stream hash before it completed. No partial
    /// digest exists; hashing must restart from the beginning of the source.
    #[error("hashing cancelled")]
    Cancelled,

    /// The byte source failed. Propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stream chunk size of zero or above the maximum was configured.
    #[error("invalid chunk size {0}, must be between 1 and {}", crate::config::MAX_CHUNK_SIZE)]
    InvalidChunkSize(usize),

    /// Text that should have been hex was not.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Hex text has the wrong number of digits (after any `0x` prefix).
    #[error("wrong length: expected {expected} hex digits, got {actual}")]
    WrongLength {
        /// Expected number of hex digits
        expected: usize,
        /// Actual number of hex digits
        actual: usize,
    },
}

impl HashError {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            HashError::Cancelled => 100,
            HashError::Io(_) => 200,
            HashError::InvalidChunkSize(_) => 300,
            HashError::InvalidHex(_) => 400,
            HashError::WrongLength { .. } => 401,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            HashError::Cancelled => "Cancelled",
            HashError::Io(_) => "Io",
            HashError::InvalidChunkSize(_) => "InvalidChunkSize",
            HashError::InvalidHex(_) => "InvalidHex",
            HashError::WrongLength { .. } => "WrongLength",
        }
    }

    /// True for [`HashError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HashError::Cancelled)
    }
}
