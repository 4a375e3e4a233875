//! Process-wide lock for destructive game-folder operations.
//!
//! Install and uninstall both move the live game folder; running two at once
//! would leave it in an undefined state. The lock is acquired at the command
//! layer so services stay reusable.

use crate::types::errors::{CommandError, CommandResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

const ACQUIRE_TIMEOUT: Duration = Duration::from_millis(50);

pub struct OperationLock {
    lock: Arc<Mutex<()>>,
}

impl OperationLock {
    pub fn new() -> Self {
        Self {
            lock: Arc::new(Mutex::new(())),
        }
    }
}

impl Default for OperationLock {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationLock {
    /// Try to acquire the lock, failing fast with `CommandError::Busy` if
    /// another operation holds it.
    pub async fn acquire(&self) -> CommandResult<OwnedMutexGuard<()>> {
        match tokio::time::timeout(ACQUIRE_TIMEOUT, self.lock.clone().lock_owned()).await {
            Ok(guard) => Ok(guard),
            Err(_) => {
                log::warn!("Rejected operation: another operation is in progress");
                Err(CommandError::Busy)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/operation_lock_tests.rs"]
mod tests;
