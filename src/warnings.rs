//! One-time warnings.
//!
//! A [`WarningRegistry`] remembers which warning texts it has already
//! emitted so repeated conditions (the same unresolved repository seen in a
//! hundred paths, say) are reported once. The registry is an ordinary owned
//! value; components that warn hold or borrow one, and tests get a fresh one.

use std::collections::HashSet;
use std::sync::Mutex;

use log::warn;

#[derive(Debug, Default)]
pub struct WarningRegistry {
    shown: Mutex<HashSet<String>>,
}

impl WarningRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `text` at warn level unless it has been logged before.
    ///
    /// Returns `true` if the warning was emitted by this call.
    pub fn warn_once(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        // A poisoned set still holds valid strings
        let mut shown = self.shown.lock().unwrap_or_else(|e| e.into_inner());
        if shown.contains(&text) {
            return false;
        }
        warn!("{}", text);
        shown.insert(text);
        true
    }

    pub fn has_warned(&self, text: &str) -> bool {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(text)
    }

    /// Number of distinct warnings emitted so far.
    pub fn len(&self) -> usize {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
