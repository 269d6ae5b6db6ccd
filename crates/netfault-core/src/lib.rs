//! # netfault-core
//!
//! Policy engine for the netfault LD_PRELOAD shim.
//!
//! Everything that can be tested without overriding a process-wide symbol
//! lives here: the per-syscall fault state and decision procedure, the
//! thread-local recursion guard, the seedable RNG, the per-invocation
//! interception flow, and the process-wide hook registry. The `netfault-shim`
//! cdylib only adds symbol resolution and the `extern "C"` glue.

pub mod env;
pub mod guard;
pub mod intercept;
pub mod policy;
pub mod registry;
pub mod rng;

pub use guard::ReentryGuard;
pub use intercept::{intercept, SocketOps, SyscallReturn};
pub use policy::{FaultKind, FaultState, Outcome, DEFAULT_RAMP};
pub use registry::{registry, Registry, RegistryError};
pub use rng::{process_rng, SharedRng};
