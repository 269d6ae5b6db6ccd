use std::mem;

use libc::{c_int, c_void, sockaddr, socklen_t};
use netfault_core::FaultKind;

use crate::hook::Hook;
use crate::state;
use crate::syscalls::dispatch;

const CONNECT_KINDS: &[FaultKind] = &[FaultKind::ConnectionRefused, FaultKind::TimedOut];

pub(crate) static CONNECT: Hook =
    Hook::new("connect\0", "connect", "NETFAULT_CONNECT", CONNECT_KINDS);

type ConnectFn = unsafe extern "C" fn(c_int, *const sockaddr, socklen_t) -> c_int;

#[no_mangle]
pub unsafe extern "C" fn connect(
    sockfd: c_int,
    addr: *const sockaddr,
    addrlen: socklen_t,
) -> c_int {
    let real = mem::transmute::<*mut c_void, ConnectFn>(CONNECT.real_ptr());
    if state::early_boot() {
        return real(sockfd, addr, addrlen);
    }
    dispatch(&CONNECT, sockfd, || unsafe { real(sockfd, addr, addrlen) })
}
