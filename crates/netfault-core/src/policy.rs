//! Per-syscall fault state and the injection decision procedure.

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

use crate::rng::SharedRng;

/// Number of calls that pass through untouched after a hook is armed, before
/// injection becomes possible. Lets connection setup run unaffected.
pub const DEFAULT_RAMP: i64 = 500;

/// A synthetic failure, named by the errno it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    ConnectionAborted,
    TooManyOpenFiles,
    ConnectionReset,
    ConnectionRefused,
    TimedOut,
    BrokenPipe,
}

impl FaultKind {
    pub fn errno(self) -> i32 {
        match self {
            FaultKind::ConnectionAborted => libc::ECONNABORTED,
            FaultKind::TooManyOpenFiles => libc::EMFILE,
            FaultKind::ConnectionReset => libc::ECONNRESET,
            FaultKind::ConnectionRefused => libc::ECONNREFUSED,
            FaultKind::TimedOut => libc::ETIMEDOUT,
            FaultKind::BrokenPipe => libc::EPIPE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FaultKind::ConnectionAborted => "ECONNABORTED",
            FaultKind::TooManyOpenFiles => "EMFILE",
            FaultKind::ConnectionReset => "ECONNRESET",
            FaultKind::ConnectionRefused => "ECONNREFUSED",
            FaultKind::TimedOut => "ETIMEDOUT",
            FaultKind::BrokenPipe => "EPIPE",
        }
    }
}

/// Result of one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Inject(FaultKind),
}

/// Mutable injection state for one hooked syscall.
///
/// `frequency == 0` means disabled. `countdown` is decremented on every
/// non-recursive invocation and may go negative; injection is gated until it
/// has fallen below zero. Counters are atomics: concurrent callers may
/// occasionally skip or double-count a decrement, which is fine for a
/// probabilistic test aid, but the state never tears.
pub struct FaultState {
    frequency: AtomicU32,
    countdown: AtomicI64,
}

impl FaultState {
    pub const fn new() -> Self {
        Self {
            frequency: AtomicU32::new(0),
            countdown: AtomicI64::new(DEFAULT_RAMP),
        }
    }

    /// Arm or disarm injection. Disarming zeroes both counters so a later
    /// re-arm starts from a clean ramp.
    pub fn configure(&self, enabled: bool, frequency: u32, not_until: i64) {
        if enabled {
            self.frequency.store(frequency, Ordering::Release);
            self.countdown.store(not_until, Ordering::Release);
        } else {
            self.frequency.store(0, Ordering::Release);
            self.countdown.store(0, Ordering::Release);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.frequency.load(Ordering::Acquire) != 0
    }

    pub fn frequency(&self) -> u32 {
        self.frequency.load(Ordering::Acquire)
    }

    /// One policy evaluation. Called once per non-recursive invocation.
    ///
    /// Decrements the countdown, then: disabled or still ramping up => pass;
    /// otherwise inject with probability 1/frequency, picking the kind
    /// uniformly among `kinds`.
    pub fn decide(&self, kinds: &'static [FaultKind], rng: &SharedRng) -> Outcome {
        let after = self.countdown.fetch_sub(1, Ordering::AcqRel) - 1;
        let frequency = self.frequency.load(Ordering::Acquire);
        if frequency == 0 || after >= 0 {
            return Outcome::Pass;
        }
        if kinds.is_empty() || rng.draw(frequency) != 0 {
            return Outcome::Pass;
        }
        let kind = kinds[rng.draw(kinds.len() as u32) as usize];
        Outcome::Inject(kind)
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: &[FaultKind] = &[FaultKind::ConnectionAborted, FaultKind::TooManyOpenFiles];

    #[test]
    fn disabled_never_injects() {
        let state = FaultState::new();
        let rng = SharedRng::seeded(1);
        state.configure(false, 0, 0);
        for _ in 0..1000 {
            assert_eq!(state.decide(KINDS, &rng), Outcome::Pass);
        }
    }

    #[test]
    fn disable_overrides_stale_countdown() {
        let state = FaultState::new();
        let rng = SharedRng::seeded(1);
        state.configure(true, 1, 0);
        assert!(matches!(state.decide(KINDS, &rng), Outcome::Inject(_)));
        state.configure(false, 0, 0);
        for _ in 0..100 {
            assert_eq!(state.decide(KINDS, &rng), Outcome::Pass);
        }
    }

    #[test]
    fn ramp_gates_injection() {
        let state = FaultState::new();
        let rng = SharedRng::seeded(7);
        // frequency 1 injects on every eligible call, so the first injection
        // marks exactly where the ramp ended.
        state.configure(true, 1, 10);
        for _ in 0..10 {
            assert_eq!(state.decide(KINDS, &rng), Outcome::Pass);
        }
        assert!(matches!(state.decide(KINDS, &rng), Outcome::Inject(_)));
    }

    #[test]
    fn injected_kind_comes_from_configured_set() {
        let state = FaultState::new();
        let rng = SharedRng::seeded(99);
        state.configure(true, 1, 0);
        for _ in 0..200 {
            match state.decide(KINDS, &rng) {
                Outcome::Inject(kind) => assert!(KINDS.contains(&kind)),
                Outcome::Pass => unreachable!("frequency 1 past the ramp always injects"),
            }
        }
    }

    #[test]
    fn long_run_rate_approaches_one_over_frequency() {
        let state = FaultState::new();
        let rng = SharedRng::seeded(42);
        state.configure(true, 5, 0);
        let injected = (0..1000)
            .filter(|_| matches!(state.decide(KINDS, &rng), Outcome::Inject(_)))
            .count();
        // Binomial(1000, 0.2): mean 200, sigma ~12.6. A wide band keeps the
        // assertion stable across rand_chacha point releases.
        assert!(
            (140..=260).contains(&injected),
            "expected ~200 injections, got {injected}"
        );
    }

    #[test]
    fn errno_mapping_is_stable() {
        assert_eq!(FaultKind::ConnectionAborted.errno(), libc::ECONNABORTED);
        assert_eq!(FaultKind::TooManyOpenFiles.errno(), libc::EMFILE);
        assert_eq!(FaultKind::BrokenPipe.errno(), libc::EPIPE);
    }
}
