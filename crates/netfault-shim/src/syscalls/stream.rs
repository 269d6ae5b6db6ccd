use std::mem;

use libc::{c_int, c_void, size_t, ssize_t};
use netfault_core::FaultKind;

use crate::hook::Hook;
use crate::state;
use crate::syscalls::dispatch;

const RECV_KINDS: &[FaultKind] = &[FaultKind::ConnectionReset];
const SEND_KINDS: &[FaultKind] = &[FaultKind::BrokenPipe, FaultKind::ConnectionReset];

pub(crate) static RECV: Hook = Hook::new("recv\0", "recv", "NETFAULT_RECV", RECV_KINDS);
pub(crate) static SEND: Hook = Hook::new("send\0", "send", "NETFAULT_SEND", SEND_KINDS);

type RecvFn = unsafe extern "C" fn(c_int, *mut c_void, size_t, c_int) -> ssize_t;
type SendFn = unsafe extern "C" fn(c_int, *const c_void, size_t, c_int) -> ssize_t;

#[no_mangle]
pub unsafe extern "C" fn recv(
    sockfd: c_int,
    buf: *mut c_void,
    len: size_t,
    flags: c_int,
) -> ssize_t {
    let real = mem::transmute::<*mut c_void, RecvFn>(RECV.real_ptr());
    if state::early_boot() {
        return real(sockfd, buf, len, flags);
    }
    dispatch(&RECV, sockfd, || unsafe { real(sockfd, buf, len, flags) })
}

#[no_mangle]
pub unsafe extern "C" fn send(
    sockfd: c_int,
    buf: *const c_void,
    len: size_t,
    flags: c_int,
) -> ssize_t {
    let real = mem::transmute::<*mut c_void, SendFn>(SEND.real_ptr());
    if state::early_boot() {
        return real(sockfd, buf, len, flags);
    }
    dispatch(&SEND, sockfd, || unsafe { real(sockfd, buf, len, flags) })
}
