//! Zero-allocation stderr diagnostics.
//!
//! The tracing stack allocates and takes locks, which is unusable during
//! dynamic-loader bootstrap and in the fatal-abort path. These paths format
//! into a fixed stack buffer and write the whole line to fd 2 in one call.
//! Anything past the buffer is dropped: a truncated diagnostic beats an
//! allocation here.

use std::sync::atomic::AtomicBool;

pub static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

const LINE_BUF: usize = 256;

/// Fixed-size line assembler for the raw stderr channel. `write_str` never
/// fails; overflow is silently discarded, including the trailing newline if
/// the line fills the buffer exactly.
struct LineBuf {
    buf: [u8; LINE_BUF],
    len: usize,
}

impl LineBuf {
    const fn new() -> Self {
        Self {
            buf: [0; LINE_BUF],
            len: 0,
        }
    }
}

impl std::fmt::Write for LineBuf {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        let take = s.len().min(LINE_BUF - self.len);
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

/// Format a line onto the stack and write it to stderr, gated on
/// `NETFAULT_DEBUG`.
#[macro_export]
macro_rules! shim_log {
    ($($arg:tt)*) => {{
        if $crate::diag::DEBUG_ENABLED.load(std::sync::atomic::Ordering::Relaxed) {
            $crate::diag::write_stderr(format_args!($($arg)*));
        }
    }};
}

pub fn write_stderr(args: std::fmt::Arguments<'_>) {
    use std::fmt::Write;
    let mut line = LineBuf::new();
    let _ = line.write_fmt(args);
    let _ = line.write_str("\n");
    unsafe {
        libc::write(2, line.buf.as_ptr() as *const libc::c_void, line.len);
    }
}
