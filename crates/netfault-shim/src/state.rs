//! Process-wide initialization.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use netfault_core::registry;

use crate::diag::DEBUG_ENABLED;

/// True until the `.init_array` constructor has run. While set, every wrapper
/// passes straight through: other preloaded constructors may issue socket
/// calls before our state is safe to touch.
pub static INITIALIZING: AtomicBool = AtomicBool::new(true);

static INIT: Once = Once::new();

#[inline]
pub fn early_boot() -> bool {
    INITIALIZING.load(Ordering::Relaxed)
}

/// Idempotent diagnostics setup, invoked by every wrapper ahead of anything
/// else. `NETFAULT_DEBUG` turns on the raw stderr channel; `NETFAULT_LOG`
/// installs a tracing subscriber with that filter for the core's decision
/// logs.
pub fn ensure_initialized() {
    INIT.call_once(|| {
        if std::env::var_os("NETFAULT_DEBUG").is_some() {
            DEBUG_ENABLED.store(true, Ordering::Relaxed);
        }
        if let Ok(filter) = std::env::var("NETFAULT_LOG") {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
        shim_log!("netfault: shim initialized, hooks: {:?}", registry().hooks());
    });
}
