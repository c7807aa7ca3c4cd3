//! Keccak-256 Oracle - incremental Keccak-256 with the original Keccak padding.
//!
//! This is the pre-standard Keccak used by Ethereum, not FIPS 202 SHA3-256:
//! the two differ only in the padding domain byte (`0x01` here, `0x06` for
//! SHA3) and therefore produce different digests.
//!
//! # Architecture
//!
//! - [`keccak`] - Keccak-f[1600] permutation and the [`Keccak256`] sponge
//! - [`oneshot`] - [`hash`], [`hash_hex`] and ABI [`function_selector`]
//! - [`pool`] - single-slot shared engine used by the one-shot API
//! - [`stream`] - hashing of async and blocking byte sources with cancellation
//! - [`digest`] - [`Digest`] and [`Selector`] with hex encoding
//! - [`conformance`] - JSON test-vector corpus runner
//! - [`error`] - [`HashError`]
//!
//! # Example
//!
//! ```
//! use keccak256_oracle::{function_selector, hash, Keccak256};
//!
//! let mut engine = Keccak256::new();
//! engine.update(b"ab");
//! engine.update(b"c");
//! assert_eq!(engine.finalize(), hash("abc"));
//!
//! assert_eq!(function_selector("transfer(address,uint256)", true), "0xa9059cbb");
//! ```

// Library code propagates errors instead of panicking.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod config;
pub mod conformance;
pub mod digest;
pub mod error;
pub mod keccak;
pub mod oneshot;
pub mod pool;
pub mod stream;

// Re-export commonly used types
pub use config::{StreamConfig, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use digest::{Digest, Selector};
pub use error::{HashError, HashResult};
pub use keccak::Keccak256;
pub use oneshot::{function_selector, function_selector_hex, hash, hash_hex, selector};
pub use pool::EnginePool;
pub use stream::{hash_reader, hash_stream, hash_stream_hex, StreamHasher};
pub use tokio_util::sync::CancellationToken;
