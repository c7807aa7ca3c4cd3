//! Single-slot engine pool for one-shot hashing.
//!
//! One pre-allocated [`Keccak256`] is shared process-wide. A caller takes it
//! only if it is free right now; otherwise a private engine is allocated for
//! that call. Acquisition never blocks, and both paths give the same digest.

use crate::digest::Digest;
use crate::keccak::Keccak256;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use tracing::trace;

/// Counters for how one-shot calls were served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Calls served by the shared instance.
    pub shared: u64,
    /// Calls that found the shared instance busy and allocated their own.
    pub fallback: u64,
}

/// A pool owning one reusable engine behind a try-lock.
#[derive(Debug, Default)]
pub struct EnginePool {
    slot: Mutex<Keccak256>,
    shared: AtomicU64,
    fallback: AtomicU64,
}

impl EnginePool {
    /// Create a pool with a fresh engine in its slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide pool, constructed on first use.
    pub fn global() -> &'static EnginePool {
        static POOL: OnceLock<EnginePool> = OnceLock::new();
        POOL.get_or_init(EnginePool::new)
    }

    /// Hash `input` in one shot.
    pub fn hash(&self, input: &[u8]) -> Digest {
        if let Some(mut engine) = self.slot.try_lock() {
            self.shared.fetch_add(1, Ordering::Relaxed);
            // Holders leave it fresh unless they unwound mid-update
            engine.reset();
            engine.update(input);
            return engine.finalize_reset();
        }

        self.fallback.fetch_add(1, Ordering::Relaxed);
        trace!(len = input.len(), "shared keccak engine busy, allocating");
        let mut engine = Keccak256::new();
        engine.update(input);
        engine.finalize()
    }

    /// Snapshot of the usage counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            shared: self.shared.load(Ordering::Relaxed),
            fallback: self.fallback.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const ABC: &str = "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45";

    #[test]
    fn test_uses_shared_instance_when_free() {
        let pool = EnginePool::new();
        assert_eq!(pool.hash(b"abc").to_hex(false), ABC);
        assert_eq!(pool.hash(b"abc").to_hex(false), ABC);
        assert_eq!(
            pool.stats(),
            PoolStats {
                shared: 2,
                fallback: 0
            }
        );
    }

    #[test]
    fn test_falls_back_when_busy() {
        let pool = EnginePool::new();
        let held = pool.slot.lock();
        let digest = pool.hash(b"abc");
        drop(held);

        assert_eq!(digest.to_hex(false), ABC);
        assert_eq!(pool.stats().fallback, 1);
        assert_eq!(pool.stats().shared, 0);
    }

    #[test]
    fn test_stale_slot_is_reset() {
        let pool = EnginePool::new();
        pool.slot.lock().update(b"leftover");
        assert_eq!(pool.hash(b"abc").to_hex(false), ABC);
    }

    #[test]
    fn test_concurrent_callers_agree() {
        let pool = Arc::new(EnginePool::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    (0..200)
                        .map(|_| pool.hash(b"abc").to_hex(false))
                        .all(|hex| hex == ABC)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        let stats = pool.stats();
        assert_eq!(stats.shared + stats.fallback, 8 * 200);
    }

    #[test]
    fn test_global_is_singleton() {
        assert!(std::ptr::eq(EnginePool::global(), EnginePool::global()));
    }
}
