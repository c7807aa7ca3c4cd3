//! Keccak-256 sponge over the Keccak-f[1600] permutation.
//!
//! Uses the original Keccak multi-rate padding (domain byte `0x01`), not the
//! FIPS 202 SHA3 padding (`0x06`).
//!
//! - [`permute`] - the 24-round permutation and its step functions
//! - [`Keccak256`] - the incremental absorb/squeeze engine
//!
//! Round constants and rotation offsets are generated by `build.rs` from
//! their defining recurrences.

mod permute;
mod sponge;

pub use permute::{chi, iota, permute, permute_with_trace, pi, rho, theta};
pub use sponge::Keccak256;

/// Permutation width in bits.
pub const WIDTH_BITS: usize = 1600;

/// Number of 64-bit lanes in the state (5 x 5).
pub const LANES: usize = 25;

/// Rounds of Keccak-f[1600].
pub const ROUNDS: usize = 24;

/// Sponge rate in bytes (1088 bits).
pub const RATE: usize = 136;

/// Sponge capacity in bytes (512 bits).
pub const CAPACITY: usize = WIDTH_BITS / 8 - RATE;

/// Digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// First padding byte: Keccak domain separation plus the leading `1` bit.
pub const PAD_DOMAIN: u8 = 0x01;

/// Bit OR-ed into the last byte of the final block.
pub const PAD_FINAL: u8 = 0x80;

/// The 1600-bit permutation state; lane `(x, y)` lives at index `x + 5 * y`.
pub type State = [u64; LANES];

// Include generated tables
include!(concat!(env!("OUT_DIR"), "/params_generated.rs"));
