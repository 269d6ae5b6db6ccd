//! Environment-derived configuration.
//!
//! Each hooked syscall has an associated variable (`NETFAULT_ACCEPT`,
//! `NETFAULT_CONNECT`, ...) holding an injection frequency; a value above
//! zero arms the hook at symbol resolution time. `NETFAULT_SEED` fixes the
//! process RNG for reproducible runs.

use tracing::warn;

pub const SEED_VAR: &str = "NETFAULT_SEED";

/// Injection frequency from `var`: unset, empty, or unparsable means 0
/// (disabled).
pub fn frequency_from_env(var: &str) -> u32 {
    let Ok(value) = std::env::var(var) else {
        return 0;
    };
    if value.is_empty() {
        return 0;
    }
    match value.parse::<u32>() {
        Ok(freq) => freq,
        Err(_) => {
            warn!(var, value = %value, "ignoring unparsable injection frequency");
            0
        }
    }
}

pub fn seed_from_env() -> Option<u64> {
    std::env::var(SEED_VAR).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var mutation is process-global, so each test uses its own variable.

    #[test]
    fn missing_and_garbage_values_disable() {
        std::env::remove_var("NETFAULT_TEST_MISSING");
        assert_eq!(frequency_from_env("NETFAULT_TEST_MISSING"), 0);

        std::env::set_var("NETFAULT_TEST_GARBAGE", "often");
        assert_eq!(frequency_from_env("NETFAULT_TEST_GARBAGE"), 0);
    }

    #[test]
    fn numeric_value_arms() {
        std::env::set_var("NETFAULT_TEST_FREQ", "25");
        assert_eq!(frequency_from_env("NETFAULT_TEST_FREQ"), 25);
    }
}
