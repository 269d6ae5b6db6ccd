//! Per-invocation interception flow, shared by every hooked syscall.
//!
//! The real operation is a closure and descriptor cleanup is a trait, so the
//! whole flow runs under test with mocks and no symbol override. The shim's
//! wrappers call [`intercept`] with the resolved real function and a
//! libc-backed [`SocketOps`].

use std::os::unix::io::RawFd;

use tracing::debug;

use crate::guard::ReentryGuard;
use crate::policy::{FaultKind, FaultState, Outcome};
use crate::rng::SharedRng;

/// Return-value convention of a hooked syscall: the sentinel reported
/// alongside errno on failure.
pub trait SyscallReturn {
    fn failure() -> Self;
}

impl SyscallReturn for i32 {
    fn failure() -> Self {
        -1
    }
}

// ssize_t-returning syscalls (recv, send).
impl SyscallReturn for isize {
    fn failure() -> Self {
        -1
    }
}

/// Platform-level side effects of an injected failure.
pub trait SocketOps {
    /// Shut down and close `fd`, as a real mid-call failure would have
    /// invalidated it. Called exactly once per injection.
    fn abort_connection(&self, fd: RawFd);

    /// Report `errno` through the platform's error channel.
    fn set_errno(&self, errno: i32);
}

/// Run one hooked invocation: guard check, policy evaluation, then either a
/// synthesized failure or delegation to `real` with the guard held.
///
/// A nested call (guard already active on this thread) is delegated straight
/// through with no policy evaluation and no countdown decrement.
pub fn intercept<T: SyscallReturn>(
    name: &'static str,
    state: &FaultState,
    kinds: &'static [FaultKind],
    rng: &SharedRng,
    ops: &impl SocketOps,
    fd: RawFd,
    real: impl FnOnce() -> T,
) -> T {
    let _guard = match ReentryGuard::enter() {
        Some(guard) => guard,
        None => return real(),
    };
    match state.decide(kinds, rng) {
        Outcome::Pass => real(),
        Outcome::Inject(kind) => {
            debug!(syscall = name, fd, kind = kind.label(), "injecting synthetic failure");
            ops.abort_connection(fd);
            ops.set_errno(kind.errno());
            T::failure()
        }
    }
}
