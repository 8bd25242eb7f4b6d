//! In-process cache of fetched repository checkouts

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Error, Result};

/// Cache key combining repository URL and branch
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub url: String,
    pub branch: String,
}

impl CacheKey {
    pub fn new(url: &str, branch: &str) -> Self {
        Self {
            url: url.to_string(),
            branch: branch.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.url, self.branch)
    }
}

/// A cache slot; `None` until a fetch for its key succeeds.
type Slot = Arc<Mutex<Option<PathBuf>>>;

/// Maps `(url, branch)` to the directory holding its checkout.
///
/// Each key has its own lock, so concurrent requests for the same key are
/// serialized (only the first one fetches) while requests for different keys
/// run in parallel. Entries are never updated or evicted once populated.
#[derive(Debug, Clone, Default)]
pub struct RepoCache {
    slots: Arc<Mutex<HashMap<CacheKey, Slot>>>,
}

fn poisoned(context: &str) -> Error {
    Error::LockPoisoned {
        context: context.to_string(),
    }
}

impl RepoCache {
    /// Create a new empty repository cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached path for `key`, or runs `fetch` and caches its
    /// result.
    ///
    /// A failed fetch records nothing; the next request for the key fetches
    /// again.
    pub fn get_or_fetch<F>(&self, key: CacheKey, fetch: F) -> Result<PathBuf>
    where
        F: FnOnce() -> Result<PathBuf>,
    {
        let slot = {
            let mut slots = self.slots.lock().map_err(|_| poisoned("repository cache"))?;
            Arc::clone(slots.entry(key.clone()).or_default())
        };

        // Held across the fetch so other callers for this key wait for it.
        // A slot is only written on success, so one poisoned by a panicking
        // fetch is still empty and safe to retry.
        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = entry.as_ref() {
            return Ok(path.clone());
        }

        match fetch() {
            Ok(path) => {
                *entry = Some(path.clone());
                Ok(path)
            }
            Err(e) => {
                self.discard_empty_slot(&key, &slot)?;
                Err(e)
            }
        }
    }

    /// Drops the map's reference to an unpopulated slot after a failed
    /// fetch, unless another caller is already waiting on it.
    fn discard_empty_slot(&self, key: &CacheKey, slot: &Slot) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| poisoned("repository cache"))?;
        // New references are only taken under the map lock: ours plus the
        // map's means nobody else holds this slot.
        let unshared = slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && Arc::strong_count(slot) == 2);
        if unshared {
            slots.remove(key);
        }
        Ok(())
    }

    /// Get a cached path without fetching
    pub fn get(&self, key: &CacheKey) -> Result<Option<PathBuf>> {
        let slot = {
            let slots = self.slots.lock().map_err(|_| poisoned("repository cache"))?;
            match slots.get(key) {
                Some(slot) => Arc::clone(slot),
                None => return Ok(None),
            }
        };
        let entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entry.clone())
    }

    /// Check if a key has a cached checkout
    pub fn contains(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// All populated entries, sorted by key
    pub fn entries(&self) -> Result<Vec<(CacheKey, PathBuf)>> {
        let slots: Vec<(CacheKey, Slot)> = {
            let slots = self.slots.lock().map_err(|_| poisoned("repository cache"))?;
            slots
                .iter()
                .map(|(key, slot)| (key.clone(), Arc::clone(slot)))
                .collect()
        };

        let mut entries = Vec::with_capacity(slots.len());
        for (key, slot) in slots {
            let entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(path) = entry.as_ref() {
                entries.push((key, path.clone()));
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// Get the number of cached checkouts
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
