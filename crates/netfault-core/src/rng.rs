//! Seedable randomness for injection decisions.
//!
//! The RNG sits behind a mutex that is locked per draw only, so no lock is
//! ever held across a delegated (possibly blocking) real syscall. Seeding is
//! explicit in tests and comes from `NETFAULT_SEED` (or pid/time entropy) for
//! the process-wide instance.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::env;

pub struct SharedRng {
    inner: Mutex<ChaCha20Rng>,
}

impl SharedRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    /// Uniform draw in `[0, bound)`. `bound` of 0 or 1 always yields 0.
    pub fn draw(&self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let mut rng = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        rng.next_u32() % bound
    }
}

static PROCESS_RNG: Lazy<SharedRng> = Lazy::new(|| {
    let seed = env::seed_from_env().unwrap_or_else(|| {
        let pid = std::process::id() as u64;
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as u64)
            .unwrap_or(0);
        pid.wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ nanos
    });
    SharedRng::seeded(seed)
});

/// The process-wide RNG used by the shim's wrappers.
pub fn process_rng() -> &'static SharedRng {
    &PROCESS_RNG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let a = SharedRng::seeded(1234);
        let b = SharedRng::seeded(1234);
        for _ in 0..64 {
            assert_eq!(a.draw(1000), b.draw(1000));
        }
    }

    #[test]
    fn draw_respects_bound() {
        let rng = SharedRng::seeded(5);
        for _ in 0..256 {
            assert!(rng.draw(7) < 7);
        }
        assert_eq!(rng.draw(0), 0);
        assert_eq!(rng.draw(1), 0);
    }
}
