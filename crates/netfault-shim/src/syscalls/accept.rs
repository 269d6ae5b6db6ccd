use std::mem;

use libc::{c_int, c_void, sockaddr, socklen_t};
use netfault_core::FaultKind;

use crate::hook::Hook;
use crate::state;
use crate::syscalls::dispatch;

/// What a genuinely overloaded accept path reports: the pending connection
/// was torn down, or the process ran out of descriptors.
const ACCEPT_KINDS: &[FaultKind] = &[FaultKind::ConnectionAborted, FaultKind::TooManyOpenFiles];

pub(crate) static ACCEPT: Hook = Hook::new("accept\0", "accept", "NETFAULT_ACCEPT", ACCEPT_KINDS);
pub(crate) static ACCEPT4: Hook =
    Hook::new("accept4\0", "accept4", "NETFAULT_ACCEPT4", ACCEPT_KINDS);

type AcceptFn = unsafe extern "C" fn(c_int, *mut sockaddr, *mut socklen_t) -> c_int;
type Accept4Fn = unsafe extern "C" fn(c_int, *mut sockaddr, *mut socklen_t, c_int) -> c_int;

#[no_mangle]
pub unsafe extern "C" fn accept(
    sockfd: c_int,
    addr: *mut sockaddr,
    addrlen: *mut socklen_t,
) -> c_int {
    let real = mem::transmute::<*mut c_void, AcceptFn>(ACCEPT.real_ptr());
    if state::early_boot() {
        return real(sockfd, addr, addrlen);
    }
    dispatch(&ACCEPT, sockfd, || unsafe { real(sockfd, addr, addrlen) })
}

#[no_mangle]
pub unsafe extern "C" fn accept4(
    sockfd: c_int,
    addr: *mut sockaddr,
    addrlen: *mut socklen_t,
    flags: c_int,
) -> c_int {
    let real = mem::transmute::<*mut c_void, Accept4Fn>(ACCEPT4.real_ptr());
    if state::early_boot() {
        return real(sockfd, addr, addrlen, flags);
    }
    dispatch(&ACCEPT4, sockfd, || unsafe {
        real(sockfd, addr, addrlen, flags)
    })
}
