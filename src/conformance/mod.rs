//! Conformance checking against published Keccak-256 test vectors.
//!
//! Vectors live in a JSON corpus so that the same file can be checked from
//! tests and from the `verify-corpus` CLI command.

pub mod corpus;

pub use corpus::{Corpus, CorpusManifest, CorpusResults, CorpusRunner, TestResult, TestVector};

use thiserror::Error;

/// Result type for corpus loading.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can occur while loading a corpus.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// Corpus file could not be read
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    /// Corpus file is not valid corpus JSON
    #[error("failed to parse corpus JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
