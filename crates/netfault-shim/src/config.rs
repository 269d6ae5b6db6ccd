//! C-ABI configuration entry points for test harnesses.
//!
//! Called by the harness loaded alongside the intercepted application, never
//! by the application itself. `netfault_set_*` arms or disarms one hook;
//! `netfault_is_*` reports whether it is currently armed. Both force symbol
//! resolution first so arming is deterministic regardless of whether the
//! syscall has been issued yet.

use libc::c_int;

use crate::hook::Hook;
use crate::syscalls::accept::{ACCEPT, ACCEPT4};
use crate::syscalls::connect::CONNECT;
use crate::syscalls::stream::{RECV, SEND};

fn set(hook: &'static Hook, enabled: bool, frequency: c_int, not_until: c_int) {
    hook.ensure_resolved();
    hook.fault()
        .configure(enabled, frequency.max(0) as u32, not_until as i64);
}

fn is_armed(hook: &'static Hook) -> bool {
    hook.ensure_resolved();
    hook.fault().is_armed()
}

#[no_mangle]
pub extern "C" fn netfault_set_accept(enabled: bool, frequency: c_int, not_until: c_int) {
    set(&ACCEPT, enabled, frequency, not_until);
}

#[no_mangle]
pub extern "C" fn netfault_is_accept() -> bool {
    is_armed(&ACCEPT)
}

#[no_mangle]
pub extern "C" fn netfault_set_accept4(enabled: bool, frequency: c_int, not_until: c_int) {
    set(&ACCEPT4, enabled, frequency, not_until);
}

#[no_mangle]
pub extern "C" fn netfault_is_accept4() -> bool {
    is_armed(&ACCEPT4)
}

#[no_mangle]
pub extern "C" fn netfault_set_connect(enabled: bool, frequency: c_int, not_until: c_int) {
    set(&CONNECT, enabled, frequency, not_until);
}

#[no_mangle]
pub extern "C" fn netfault_is_connect() -> bool {
    is_armed(&CONNECT)
}

#[no_mangle]
pub extern "C" fn netfault_set_recv(enabled: bool, frequency: c_int, not_until: c_int) {
    set(&RECV, enabled, frequency, not_until);
}

#[no_mangle]
pub extern "C" fn netfault_is_recv() -> bool {
    is_armed(&RECV)
}

#[no_mangle]
pub extern "C" fn netfault_set_send(enabled: bool, frequency: c_int, not_until: c_int) {
    set(&SEND, enabled, frequency, not_until);
}

#[no_mangle]
pub extern "C" fn netfault_is_send() -> bool {
    is_armed(&SEND)
}
