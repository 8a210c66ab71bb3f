//! Warn-once registry.
//!
//! Best-effort code paths (capability probes, event pumps, window raising)
//! must not spam a log from inside a tick loop. Each warning is keyed; a
//! key produces at most one `tracing::warn!` per registry.
//!
//! The process-wide registry returned by [`global`] starts empty, only
//! grows, and is never cleared in production. Tests that need isolation
//! build their own [`WarnRegistry`].

use std::collections::HashSet;
use std::fmt::Display;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Set of warning keys that have already been emitted.
#[derive(Debug, Default)]
pub struct WarnRegistry {
    emitted: Mutex<HashSet<String>>,
}

impl WarnRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `message` unless `key` was already used.
    ///
    /// Returns `true` when the warning was emitted by this call.
    pub fn warn_once(&self, key: &str, message: &str, cause: Option<&dyn Display>) -> bool {
        {
            let mut emitted = self.emitted.lock().unwrap_or_else(PoisonError::into_inner);
            if !emitted.insert(key.to_owned()) {
                return false;
            }
        }
        match cause {
            Some(cause) => tracing::warn!(key, %cause, "{message}"),
            None => tracing::warn!(key, "{message}"),
        }
        true
    }

    /// Returns whether `key` has been emitted.
    pub fn contains(&self, key: &str) -> bool {
        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Number of distinct warnings emitted so far.
    pub fn len(&self) -> usize {
        self.emitted.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns whether nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every emitted key.
    #[doc(hidden)]
    pub fn reset(&self) {
        self.emitted.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

static GLOBAL: OnceLock<WarnRegistry> = OnceLock::new();

/// The process-wide registry.
pub fn global() -> &'static WarnRegistry {
    GLOBAL.get_or_init(WarnRegistry::new)
}

/// Emits through the process-wide registry.
pub fn warn_once(key: &str, message: &str, cause: Option<&dyn Display>) -> bool {
    global().warn_once(key, message, cause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_emits_once() {
        let reg = WarnRegistry::new();
        assert!(reg.warn_once("k", "first", None));
        assert!(!reg.warn_once("k", "second", None));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn distinct_keys_each_emit() {
        let reg = WarnRegistry::new();
        let cause = std::io::Error::other("boom");
        assert!(reg.warn_once("a", "one", Some(&cause)));
        assert!(reg.warn_once("b", "two", None));
        assert!(reg.contains("a") && reg.contains("b"));
    }

    #[test]
    fn reset_allows_reemission() {
        let reg = WarnRegistry::new();
        assert!(reg.warn_once("k", "msg", None));
        reg.reset();
        assert!(reg.is_empty());
        assert!(reg.warn_once("k", "msg", None));
    }

    #[test]
    fn global_registry_is_shared() {
        assert!(warn_once("warn::tests::global", "msg", None));
        assert!(!global().warn_once("warn::tests::global", "msg", None));
    }
}
