//! Stream hashing configuration.

use crate::error::{HashError, HashResult};
use serde::Deserialize;

/// Default read size for stream hashing (8 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Largest accepted read size (16 MiB); the read buffer is allocated up front.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Tuning for [`StreamHasher`](crate::stream::StreamHasher).
///
/// The chunk size only affects how many bytes are requested per read; the
/// digest is identical for any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
    /// Bytes requested from the source per read.
    pub chunk_size: usize,
}

impl StreamConfig {
    /// Config with the given chunk size.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Reject a chunk size of zero or above [`MAX_CHUNK_SIZE`].
    pub fn validate(&self) -> HashResult<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(HashError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
