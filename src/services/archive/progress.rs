//! Per-operation unpack progress.
//!
//! An entry exists while an archive is being extracted. Once the extractor
//! finishes (successfully or not) the entry is removed, and an absent entry
//! is what the poller reads as "done".

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct UnpackProgress {
    entries: Arc<Mutex<HashMap<String, (u64, u64)>>>,
}

/// Anything the poller can ask "is this archive done yet?".
pub trait ProgressSource: Send + Sync {
    /// `Ok(None)` once the archive is done, `Ok(Some((done, total)))` while
    /// work is in flight.
    fn query(&self, key: &str) -> Result<Option<(u64, u64)>, String>;
}

impl UnpackProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic on the extraction thread must not leave the entry stuck, so a
    /// poisoned map is recovered rather than skipped.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, (u64, u64)>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register an archive as in flight with unknown size.
    pub fn begin(&self, key: &str) {
        self.entries().insert(key.to_string(), (0, 0));
    }

    pub fn set_total(&self, key: &str, total: u64) {
        if let Some(entry) = self.entries().get_mut(key) {
            entry.1 = total;
        }
    }

    pub fn advance(&self, key: &str, count: u64) {
        if let Some(entry) = self.entries().get_mut(key) {
            entry.0 = entry.0.saturating_add(count);
        }
    }

    pub fn finish(&self, key: &str) {
        self.entries().remove(key);
    }

    pub fn query(&self, key: &str) -> Result<Option<(u64, u64)>, String> {
        match self.entries().get(key) {
            Some(&(done, total)) if total > 0 && done >= total => Ok(None),
            Some(&entry) => Ok(Some(entry)),
            None => Ok(None),
        }
    }
}

impl ProgressSource for UnpackProgress {
    fn query(&self, key: &str) -> Result<Option<(u64, u64)>, String> {
        UnpackProgress::query(self, key)
    }
}

/// Clears the progress entry when dropped, so a failed or panicking
/// extraction still ends the poll loop. The entry itself is registered with
/// `begin` before the extraction task is spawned.
pub struct ProgressGuard<'a> {
    progress: &'a UnpackProgress,
    key: &'a str,
}

impl<'a> ProgressGuard<'a> {
    pub fn new(progress: &'a UnpackProgress, key: &'a str) -> Self {
        Self { progress, key }
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.progress.finish(self.key);
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
