//! # netfault-shim
//!
//! LD_PRELOAD shim that interposes socket syscalls and injects synthetic
//! failures according to the policy in `netfault-core`.
//!
//! Load it ahead of libc (`LD_PRELOAD=libnetfault_shim.so`), arm a hook via
//! `NETFAULT_ACCEPT=5` (inject on roughly one call in five once the ramp-up
//! has passed) or via the `netfault_set_*` entry points, and the application
//! observes ordinary syscall failures it cannot tell from real ones.

// Unsafe FFI entry points with C ABI; safety docs would only restate the
// syscall contracts.
#![allow(clippy::missing_safety_doc)]

#[macro_use]
pub mod diag;

pub mod config;
pub mod hook;
pub mod state;
pub mod syscalls;

/// Static constructor for Linux: signals that the library has been loaded
/// via LD_PRELOAD and dynamic-loader bootstrap is over, enabling the hooks.
#[cfg(target_os = "linux")]
#[link_section = ".init_array"]
#[used]
pub static SET_READY_LINUX: unsafe extern "C" fn() = {
    unsafe extern "C" fn ready() {
        crate::state::INITIALIZING.store(false, std::sync::atomic::Ordering::SeqCst);
    }
    ready
};

/// Same signal for macOS (DYLD_INSERT_LIBRARIES).
#[cfg(target_os = "macos")]
#[link_section = "__DATA,__mod_init_func"]
#[used]
pub static SET_READY: unsafe extern "C" fn() = {
    unsafe extern "C" fn ready() {
        crate::state::INITIALIZING.store(false, std::sync::atomic::Ordering::SeqCst);
    }
    ready
};
