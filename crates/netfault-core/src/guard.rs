//! Thread-local recursion guard.
//!
//! Some real implementations route back through the dynamic symbol table when
//! invoked (internal retries, signal paths), which would re-enter the hooked
//! entry point. While a guard is held on a thread, nested interceptions on
//! that thread skip policy evaluation and delegate straight through. The
//! guard is scoped: it is released on every exit path, so a failing real
//! syscall can never leave the thread locked out of injection.

use std::cell::Cell;

thread_local! {
    static IN_HOOK: Cell<bool> = const { Cell::new(false) };
}

pub struct ReentryGuard {
    _priv: (),
}

impl ReentryGuard {
    /// Acquire the guard for this thread, or `None` if a wrapper on this
    /// thread is already inside one.
    pub fn enter() -> Option<Self> {
        IN_HOOK.with(|flag| {
            if flag.get() {
                None
            } else {
                flag.set(true);
                Some(ReentryGuard { _priv: () })
            }
        })
    }

    pub fn is_active() -> bool {
        IN_HOOK.with(Cell::get)
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        IN_HOOK.with(|flag| flag.set(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_enter_fails_and_drop_releases() {
        assert!(!ReentryGuard::is_active());
        {
            let _outer = ReentryGuard::enter().unwrap();
            assert!(ReentryGuard::is_active());
            assert!(ReentryGuard::enter().is_none());
        }
        assert!(!ReentryGuard::is_active());
        assert!(ReentryGuard::enter().is_some());
    }

    #[test]
    fn guard_is_per_thread() {
        let _held = ReentryGuard::enter().unwrap();
        std::thread::spawn(|| {
            assert!(!ReentryGuard::is_active());
            assert!(ReentryGuard::enter().is_some());
        })
        .join()
        .unwrap();
    }
}
