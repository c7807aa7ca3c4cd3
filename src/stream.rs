//! Hashing byte sources.
//!
//! Sources are read in fixed-size chunks until a zero-length read. The only
//! suspension point is the read itself; each chunk is absorbed without
//! yielding. Every stream hash uses its own engine, never the shared pool
//! slot, so cancellation cannot leave shared state half-written.

use crate::config::StreamConfig;
use crate::digest::{encode_hex, Digest};
use crate::error::{HashError, HashResult};
use crate::keccak::Keccak256;
use std::io::{self, Read};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Hash an async source with the default configuration.
///
/// Fails with [`HashError::Cancelled`] if `cancel` fires before end of data,
/// including while a read is pending.
pub async fn hash_stream<R>(reader: R, cancel: &CancellationToken) -> HashResult<Digest>
where
    R: AsyncRead + Unpin,
{
    StreamHasher::default().hash(reader, cancel).await
}

/// Hex form of [`hash_stream`].
pub async fn hash_stream_hex<R>(
    reader: R,
    with_prefix: bool,
    cancel: &CancellationToken,
) -> HashResult<String>
where
    R: AsyncRead + Unpin,
{
    let digest = hash_stream(reader, cancel).await?;
    Ok(encode_hex(digest.as_bytes(), with_prefix))
}

/// Hash a blocking source, checking `cancel` between reads.
///
/// Reads interrupted by a signal are retried.
pub fn hash_reader<R: Read>(reader: R, cancel: &CancellationToken) -> HashResult<Digest> {
    StreamHasher::default().hash_blocking(reader, cancel)
}

/// Stream hasher with a configurable read size.
#[derive(Debug, Clone, Default)]
pub struct StreamHasher {
    config: StreamConfig,
}

impl StreamHasher {
    /// Create a hasher, validating `config`.
    pub fn new(config: StreamConfig) -> HashResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Read `reader` to the end and return its digest.
    pub async fn hash<R>(&self, mut reader: R, cancel: &CancellationToken) -> HashResult<Digest>
    where
        R: AsyncRead + Unpin,
    {
        let mut engine = Keccak256::new();
        let mut buffer = vec![0u8; self.config.chunk_size];
        let mut chunks = 0u64;

        loop {
            let read = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(bytes = engine.absorbed_len(), chunks, "stream hash cancelled");
                    return Err(HashError::Cancelled);
                }
                read = reader.read(&mut buffer) => read?,
            };

            if read == 0 {
                break;
            }
            engine.update(&buffer[..read]);
            chunks += 1;
        }

        debug!(bytes = engine.absorbed_len(), chunks, "stream hashed");
        Ok(engine.finalize())
    }

    /// Hex form of [`hash`](Self::hash).
    pub async fn hash_hex<R>(
        &self,
        reader: R,
        with_prefix: bool,
        cancel: &CancellationToken,
    ) -> HashResult<String>
    where
        R: AsyncRead + Unpin,
    {
        let digest = self.hash(reader, cancel).await?;
        Ok(encode_hex(digest.as_bytes(), with_prefix))
    }

    /// Blocking counterpart of [`hash`](Self::hash).
    pub fn hash_blocking<R: Read>(
        &self,
        mut reader: R,
        cancel: &CancellationToken,
    ) -> HashResult<Digest> {
        let mut engine = Keccak256::new();
        let mut buffer = vec![0u8; self.config.chunk_size];

        loop {
            if cancel.is_cancelled() {
                debug!(bytes = engine.absorbed_len(), "blocking hash cancelled");
                return Err(HashError::Cancelled);
            }

            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            engine.update(&buffer[..read]);
        }

        Ok(engine.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oneshot::hash;

    fn data(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[tokio::test]
    async fn test_stream_matches_oneshot() {
        let bytes = data(20_000);
        let token = CancellationToken::new();
        let digest = hash_stream(bytes.as_slice(), &token).await.unwrap();
        assert_eq!(digest, hash(&bytes));
    }

    #[tokio::test]
    async fn test_small_chunks() {
        let bytes = data(1_000);
        let token = CancellationToken::new();
        let hasher = StreamHasher::new(StreamConfig::with_chunk_size(7)).unwrap();
        let digest = hasher.hash(bytes.as_slice(), &token).await.unwrap();
        assert_eq!(digest, hash(&bytes));
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let err = hash_stream(&b"abc"[..], &token).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = StreamHasher::new(StreamConfig::with_chunk_size(0)).unwrap_err();
        assert_eq!(err.code(), 300);
    }

    #[test]
    fn test_huge_chunk_size_rejected_before_allocation() {
        let err = StreamHasher::new(StreamConfig::with_chunk_size(usize::MAX)).unwrap_err();
        assert!(matches!(err, HashError::InvalidChunkSize(usize::MAX)));
    }

    #[test]
    fn test_blocking_reader() {
        let bytes = data(9_000);
        let token = CancellationToken::new();
        let digest = hash_reader(bytes.as_slice(), &token).unwrap();
        assert_eq!(digest, hash(&bytes));
    }

    #[test]
    fn test_blocking_reader_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let err = hash_reader(&b"abc"[..], &token).unwrap_err();
        assert!(err.is_cancelled());
    }

    struct Interrupting {
        inner: &'static [u8],
        interrupted: bool,
    }

    impl Read for Interrupting {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            Read::read(&mut self.inner, buf)
        }
    }

    #[test]
    fn test_blocking_reader_retries_interrupted() {
        let token = CancellationToken::new();
        let reader = Interrupting {
            inner: b"abc",
            interrupted: false,
        };
        let digest = hash_reader(reader, &token).unwrap();
        assert_eq!(digest, hash("abc"));
    }
}
