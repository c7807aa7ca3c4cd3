//! Keccak-256 sponge construction.
//!
//! Buffers input into rate-sized blocks, XORs each full block into the
//! state (little-endian lanes) and permutes. Finalization appends the
//! original Keccak pad10*1 padding and squeezes 32 bytes from the first
//! four lanes; no extra permutation is needed since the digest fits in
//! one rate.

use super::{permute, State, DIGEST_LEN, LANES, PAD_DOMAIN, PAD_FINAL, RATE};
use crate::digest::Digest;
use std::io;

/// Incremental Keccak-256 hasher.
///
/// Lifecycle: a new or reset instance is fresh; [`update`](Self::update)
/// absorbs any number of chunks; [`finalize`](Self::finalize) consumes the
/// instance, while [`finalize_reset`](Self::finalize_reset) returns the
/// digest and leaves the instance fresh for the next message.
#[derive(Debug, Clone)]
pub struct Keccak256 {
    /// Permutation state (25 lanes)
    state: State,
    /// Partial block not yet absorbed
    buffer: [u8; RATE],
    /// Number of valid bytes in `buffer`, always < RATE between calls
    buffered: usize,
    /// Total bytes absorbed since creation or reset
    absorbed: u64,
}

impl Keccak256 {
    /// Create a fresh hasher with zeroed state.
    pub fn new() -> Self {
        Self {
            state: [0u64; LANES],
            buffer: [0u8; RATE],
            buffered: 0,
            absorbed: 0,
        }
    }

    /// Absorb `input`.
    ///
    /// Splitting a message across any number of calls yields the same digest
    /// as a single call with the concatenation.
    pub fn update(&mut self, input: &[u8]) {
        let mut input = input;
        self.absorbed += input.len() as u64;

        // Top up a pending partial block first
        if self.buffered > 0 {
            let take = (RATE - self.buffered).min(input.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];

            if self.buffered < RATE {
                return;
            }
            absorb_block(&mut self.state, &self.buffer);
            self.buffered = 0;
        }

        // Full blocks straight from the caller's slice
        let mut blocks = input.chunks_exact(RATE);
        for block in &mut blocks {
            absorb_block(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Pad, absorb the final block and return the digest.
    pub fn finalize(mut self) -> Digest {
        self.pad_and_squeeze()
    }

    /// Like [`finalize`](Self::finalize), but resets the instance in place
    /// so it can hash another message.
    pub fn finalize_reset(&mut self) -> Digest {
        let digest = self.pad_and_squeeze();
        self.reset();
        digest
    }

    /// Discard absorbed input and zero the state without reallocating.
    pub fn reset(&mut self) {
        self.state.fill(0);
        self.buffer.fill(0);
        self.buffered = 0;
        self.absorbed = 0;
    }

    /// True if nothing has been absorbed since creation or the last reset.
    pub fn is_fresh(&self) -> bool {
        self.absorbed == 0
    }

    /// Bytes currently held in the partial-block buffer.
    pub fn buffered_len(&self) -> usize {
        self.buffered
    }

    /// Total bytes absorbed since creation or the last reset.
    pub fn absorbed_len(&self) -> u64 {
        self.absorbed
    }

    fn pad_and_squeeze(&mut self) -> Digest {
        // pad10*1: 0x01, zeros, then 0x80 OR-ed into the last byte of the block.
        // With one free byte left both land in the same byte (0x81).
        let len = self.buffered;
        self.buffer[len..].fill(0);
        self.buffer[len] = PAD_DOMAIN;
        self.buffer[RATE - 1] |= PAD_FINAL;
        absorb_block(&mut self.state, &self.buffer);
        self.buffered = 0;

        let mut out = [0u8; DIGEST_LEN];
        for (chunk, lane) in out.chunks_exact_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
        Digest::from(out)
    }
}

impl Default for Keccak256 {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for Keccak256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// XOR one rate-sized block into the state and permute.
fn absorb_block(state: &mut State, block: &[u8]) {
    debug_assert_eq!(block.len(), RATE);
    for (lane, bytes) in state.iter_mut().zip(block.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        *lane ^= u64::from_le_bytes(word);
    }
    permute(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EMPTY_DIGEST: &str = "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";
    const ABC_DIGEST: &str = "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45";

    fn reference(input: &[u8]) -> [u8; 32] {
        use tiny_keccak::Hasher;
        let mut hasher = tiny_keccak::Keccak::v256();
        hasher.update(input);
        let mut out = [0u8; 32];
        hasher.finalize(&mut out);
        out
    }

    fn message(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 + 7) as u8).collect()
    }

    #[test]
    fn test_empty_input() {
        let digest = Keccak256::new().finalize();
        assert_eq!(digest.to_hex(false), EMPTY_DIGEST);
    }

    #[test]
    fn test_abc() {
        let mut hasher = Keccak256::new();
        hasher.update(b"abc");
        assert_eq!(hasher.finalize().to_hex(false), ABC_DIGEST);
    }

    #[test]
    fn test_every_split_point() {
        let data = message(2 * RATE + 17);
        let expected = reference(&data);
        for split in 0..=data.len() {
            let mut hasher = Keccak256::new();
            hasher.update(&data[..split]);
            hasher.update(&data[split..]);
            assert_eq!(*hasher.finalize().as_bytes(), expected, "split at {}", split);
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let data = message(3 * RATE + 1);
        let mut hasher = Keccak256::new();
        for byte in &data {
            hasher.update(std::slice::from_ref(byte));
            assert!(hasher.buffered_len() < RATE);
        }
        assert_eq!(hasher.absorbed_len(), data.len() as u64);
        assert_eq!(*hasher.finalize().as_bytes(), reference(&data));
    }

    #[test]
    fn test_padding_fits_in_last_byte() {
        // RATE - 1 bytes leaves a single byte for both padding bits.
        let data = message(RATE - 1);
        let mut hasher = Keccak256::new();
        hasher.update(&data);
        assert_eq!(hasher.buffered_len(), RATE - 1);
        assert_eq!(*hasher.finalize().as_bytes(), reference(&data));
    }

    #[test]
    fn test_exact_rate_needs_extra_block() {
        let data = message(RATE);
        let mut hasher = Keccak256::new();
        hasher.update(&data);
        assert_eq!(hasher.buffered_len(), 0);
        assert_eq!(*hasher.finalize().as_bytes(), reference(&data));
    }

    #[test]
    fn test_finalize_reset_reuse() {
        let mut hasher = Keccak256::new();
        hasher.update(b"first message that is discarded");
        let first = hasher.finalize_reset();
        assert!(hasher.is_fresh());

        hasher.update(b"abc");
        let second = hasher.finalize_reset();

        assert_eq!(first.as_bytes(), &reference(b"first message that is discarded"));
        assert_eq!(second.to_hex(false), ABC_DIGEST);
    }

    #[test]
    fn test_reset_discards_pending_input() {
        let mut hasher = Keccak256::new();
        hasher.update(&message(RATE + 5));
        hasher.reset();
        assert!(hasher.is_fresh());
        assert_eq!(hasher.buffered_len(), 0);
        assert_eq!(hasher.finalize().to_hex(false), EMPTY_DIGEST);
    }

    #[test]
    fn test_clone_shares_prefix() {
        let mut prefix = Keccak256::new();
        prefix.update(b"ab");
        let mut fork = prefix.clone();
        prefix.update(b"c");
        fork.update(b"d");
        assert_eq!(prefix.finalize().to_hex(false), ABC_DIGEST);
        assert_eq!(*fork.finalize().as_bytes(), reference(b"abd"));
    }

    #[test]
    fn test_io_write() {
        let data = message(1000);
        let mut hasher = Keccak256::new();
        std::io::copy(&mut data.as_slice(), &mut hasher).unwrap();
        hasher.flush().unwrap();
        assert_eq!(*hasher.finalize().as_bytes(), reference(&data));
    }
}
