//! Process-wide registry of hooked syscalls.
//!
//! Each hook registers its `FaultState` once, at symbol resolution time.
//! Harness code can then arm, disarm, and inspect hooks by name without
//! reaching into per-hook statics.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::policy::FaultState;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no hooked syscall named `{0}`")]
    UnknownHook(String),
}

pub struct Registry {
    hooks: RwLock<HashMap<&'static str, &'static FaultState>>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry {
    hooks: RwLock::new(HashMap::new()),
});

pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    /// Idempotent per name; the first registration wins.
    pub fn register(&self, name: &'static str, state: &'static FaultState) {
        let mut hooks = self.hooks.write().unwrap_or_else(|e| e.into_inner());
        hooks.entry(name).or_insert(state);
    }

    pub fn configure(
        &self,
        name: &str,
        enabled: bool,
        frequency: u32,
        not_until: i64,
    ) -> Result<(), RegistryError> {
        let state = self.lookup(name)?;
        state.configure(enabled, frequency, not_until);
        debug!(syscall = name, enabled, frequency, not_until, "hook reconfigured");
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> Result<bool, RegistryError> {
        Ok(self.lookup(name)?.is_armed())
    }

    /// Names of all registered hooks, sorted for stable diagnostics.
    pub fn hooks(&self) -> Vec<&'static str> {
        let hooks = self.hooks.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<_> = hooks.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn lookup(&self, name: &str) -> Result<&'static FaultState, RegistryError> {
        let hooks = self.hooks.read().unwrap_or_else(|e| e.into_inner());
        hooks
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownHook(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static STATE: FaultState = FaultState::new();

    #[test]
    fn register_configure_and_query() {
        let reg = registry();
        reg.register("fake_accept", &STATE);
        assert!(!reg.is_enabled("fake_accept").unwrap());

        reg.configure("fake_accept", true, 5, 0).unwrap();
        assert!(reg.is_enabled("fake_accept").unwrap());
        assert_eq!(STATE.frequency(), 5);

        reg.configure("fake_accept", false, 0, 0).unwrap();
        assert!(!reg.is_enabled("fake_accept").unwrap());

        assert!(reg.hooks().contains(&"fake_accept"));
    }

    #[test]
    fn unknown_hook_is_an_error() {
        let err = registry().configure("no_such_syscall", true, 1, 0).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownHook(_)));
    }
}
