//! Per-column lock registry.

use crate::task::domain::{OwnerId, TaskStatus};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type ColumnKey = (OwnerId, TaskStatus);

/// Serializes read-modify-write sequences on the same `(owner, status)`
/// column within a process.
#[derive(Debug, Default)]
pub(crate) struct ColumnLocks {
    columns: Mutex<HashMap<ColumnKey, Arc<AsyncMutex<()>>>>,
}

/// Exclusive access to one or more columns, released on drop.
#[derive(Debug)]
pub(crate) struct ColumnGuard {
    _held: Vec<OwnedMutexGuard<()>>,
}

impl ColumnLocks {
    /// Locks every listed column of the owner.
    ///
    /// Columns are always acquired in status order so that two moves in
    /// opposite directions cannot deadlock.
    pub(crate) async fn lock(&self, owner: OwnerId, statuses: &[TaskStatus]) -> ColumnGuard {
        let mut ordered = statuses.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let mut held = Vec::with_capacity(ordered.len());
        for status in ordered {
            let mutex = self.mutex_for(owner, status);
            held.push(mutex.lock_owned().await);
        }
        ColumnGuard { _held: held }
    }

    fn mutex_for(&self, owner: OwnerId, status: TaskStatus) -> Arc<AsyncMutex<()>> {
        let mut columns = self.columns.lock();
        // Entries referenced only by the map are idle.
        columns.retain(|_, mutex| Arc::strong_count(mutex) > 1);
        Arc::clone(columns.entry((owner, status)).or_default())
    }
}
