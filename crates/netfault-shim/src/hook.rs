//! One-time binding of a wrapper to the real syscall it shadows.

use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Once;

use libc::{c_char, c_void};
use netfault_core::{env, registry, FaultKind, FaultState, DEFAULT_RAMP};

use crate::diag::write_stderr;
use crate::state;

/// A hooked syscall: its name (for `dlsym`), its configuration variable, the
/// failure kinds it may synthesize, the cached real entry point, and the
/// injection state. One static instance per wrapper.
pub struct Hook {
    /// Nul-terminated symbol name for dlsym.
    name: &'static str,
    /// Symbol name without the nul, for the registry and diagnostics.
    label: &'static str,
    env_var: &'static str,
    kinds: &'static [FaultKind],
    resolve: Once,
    real: AtomicPtr<c_void>,
    fault: FaultState,
}

impl Hook {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        env_var: &'static str,
        kinds: &'static [FaultKind],
    ) -> Self {
        Self {
            name,
            label,
            env_var,
            kinds,
            resolve: Once::new(),
            real: AtomicPtr::new(std::ptr::null_mut()),
            fault: FaultState::new(),
        }
    }

    pub fn fault(&self) -> &FaultState {
        &self.fault
    }

    pub fn kinds(&self) -> &'static [FaultKind] {
        self.kinds
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Resolve the real entry point, exactly once per process even under
    /// concurrent first callers. Also arms the fault state from the hook's
    /// environment variable and registers it with the process registry.
    ///
    /// Resolution failure is fatal: forwarding to a null pointer would crash
    /// indeterminately, so abort here with a message instead.
    pub fn real_ptr(&'static self) -> *mut c_void {
        // Skip diagnostics setup while other preloaded constructors may still
        // be running; resolution itself is only a dlsym.
        if !state::early_boot() {
            state::ensure_initialized();
        }
        self.resolve.call_once(|| {
            let ptr = unsafe { libc::dlsym(libc::RTLD_NEXT, self.name.as_ptr() as *const c_char) };
            if ptr.is_null() {
                write_stderr(format_args!(
                    "netfault: cannot resolve real `{}`, aborting",
                    self.label
                ));
                unsafe { libc::abort() };
            }
            self.real.store(ptr, Ordering::Release);

            let frequency = env::frequency_from_env(self.env_var);
            if frequency > 0 {
                self.fault.configure(true, frequency, DEFAULT_RAMP);
                shim_log!(
                    "netfault: {} armed from {} (frequency {frequency})",
                    self.label,
                    self.env_var
                );
            }
            registry().register(self.label, &self.fault);
        });
        self.real.load(Ordering::Acquire)
    }

    /// Force resolution without caring about the pointer; used by the
    /// configuration entry points so arming is deterministic regardless of
    /// whether the syscall has been called yet.
    pub fn ensure_resolved(&'static self) {
        let _ = self.real_ptr();
    }
}
