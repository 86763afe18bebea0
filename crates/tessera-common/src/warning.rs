//! Configuration warnings.
//!
//! Layout configuration is resilient: malformed margins, anchors or enum
//! values degrade to a default instead of failing the pass. Each degradation
//! is reported once through the `log` facade so a layout that runs on every
//! resize does not flood the log.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Messages already reported, keyed by `[component] message`.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about degraded configuration (logged once per unique message).
///
/// Returns `true` when the message was logged by this call.
///
/// # Example
/// ```
/// use tessera_common::warning::warn_once;
///
/// let first = warn_once("Sides", "ignoring non-numeric token 'auto'");
/// let second = warn_once("Sides", "ignoring non-numeric token 'auto'");
/// assert!(first);
/// assert!(!second);
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: "tessera", "[{component}] {message}");
    }
    should_log
}

/// Forget every recorded warning (call when loading a new layout description).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates_per_component() {
        assert!(warn_once("Test", "dedup-a"));
        assert!(!warn_once("Test", "dedup-a"));
        assert!(warn_once("Other", "dedup-a"));
    }
}
