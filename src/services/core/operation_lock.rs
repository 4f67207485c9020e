//! Guard against overlapping runs of the same operation kind.
//!
//! At most one copy run and at most one build run may be in flight. A second
//! start of the same kind is rejected immediately, never queued, so a shell
//! button mashed twice cannot stack operations.

use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, TryLockError};

/// Single-holder lock for a long-running operation.
///
/// Held at the job layer; the underlying services stay lock-free and
/// reusable. The guard releases the lock on drop, including on early
/// returns and panics.
pub struct OperationLock {
    inner: Arc<Mutex<()>>,
}

impl OperationLock {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(())),
        }
    }

    /// Claim the lock for one run, or report that a run is already active.
    pub fn try_acquire(&self) -> Result<OwnedMutexGuard<()>, String> {
        self.inner
            .clone()
            .try_lock_owned()
            .map_err(|_: TryLockError| "Operation in progress. Please wait.".to_string())
    }
}

impl Default for OperationLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/operation_lock_tests.rs"]
mod tests;
