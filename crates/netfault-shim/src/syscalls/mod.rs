//! Hooked syscall wrappers.
//!
//! Each wrapper is pure glue: resolve the real entry point through its
//! [`Hook`](crate::hook::Hook), pass straight through during early boot, then
//! hand the call to the core interception flow with a libc-backed cleanup.

pub mod accept;
pub mod connect;
pub mod stream;

use libc::c_int;
use netfault_core::{intercept, process_rng, SocketOps, SyscallReturn};

use crate::hook::Hook;

/// Real side effects of an injected failure: the descriptor is shut down and
/// closed so the caller's table does not keep a half-open resource, and the
/// synthetic errno goes through the normal channel. `shutdown`/`close` are
/// not hooked, so no recursion is possible here.
pub(crate) struct LibcSocketOps;

impl SocketOps for LibcSocketOps {
    fn abort_connection(&self, fd: c_int) {
        unsafe {
            libc::shutdown(fd, libc::SHUT_RDWR);
            libc::close(fd);
        }
    }

    fn set_errno(&self, errno: i32) {
        unsafe {
            *errno_location() = errno;
        }
    }
}

#[cfg(target_os = "linux")]
unsafe fn errno_location() -> *mut c_int {
    libc::__errno_location()
}

#[cfg(target_os = "macos")]
unsafe fn errno_location() -> *mut c_int {
    libc::__error()
}

pub(crate) fn dispatch<T: SyscallReturn>(
    hook: &'static Hook,
    fd: c_int,
    real: impl FnOnce() -> T,
) -> T {
    intercept(
        hook.label(),
        hook.fault(),
        hook.kinds(),
        process_rng(),
        &LibcSocketOps,
        fd,
        real,
    )
}
