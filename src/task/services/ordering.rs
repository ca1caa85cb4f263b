//! Ordering engine keeping every column at positions `0..n`.

use super::{
    TaskServiceError, TaskServiceResult,
    bounded::BoundedStore,
    locks::{ColumnGuard, ColumnLocks},
};
use crate::config::ServiceConfig;
use crate::task::{
    domain::{Column, OwnerId, Position, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError},
};
use std::sync::Arc;

/// Attempts at locking a task's column before giving up on a task that keeps
/// moving between columns.
const MAX_LOCK_ATTEMPTS: usize = 3;

/// Computes and persists task positions within `(owner, status)` columns.
///
/// Every column rewrite runs under that column's lock and is written through
/// [`TaskStore::write_column`], which rejects the layout if the column's
/// membership changed in the meantime.
pub struct OrderingEngine<S: TaskStore> {
    store: BoundedStore<S>,
    locks: Arc<ColumnLocks>,
}

impl<S: TaskStore> Clone for OrderingEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: TaskStore> OrderingEngine<S> {
    /// Creates an engine with its own column lock registry.
    #[must_use]
    pub fn new(store: Arc<S>, config: &ServiceConfig) -> Self {
        Self {
            store: BoundedStore::new(store, config.operation_timeout()),
            locks: Arc::new(ColumnLocks::default()),
        }
    }

    /// Moves a task to `new_position` within its column and rewrites the
    /// whole column.
    ///
    /// Targets past the end of the column place the task last. Re-running
    /// the same reorder yields the same column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] without writing anything when
    /// the task is not in the owner's `status` column, or
    /// [`TaskServiceError::Storage`] when the store fails.
    pub async fn reorder(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        status: TaskStatus,
        new_position: usize,
    ) -> TaskServiceResult<Vec<Task>> {
        let _guard = self.locks.lock(owner, &[status]).await;
        let mut column = self.load_column(owner, status).await?;
        if !column.move_task(task_id, new_position) {
            tracing::warn!(%owner, %task_id, %status, "reorder target is not in column");
            return Err(TaskServiceError::NotFound(task_id));
        }

        let layout = column.renumber()?;
        self.store.write_column(&layout).await?;
        tracing::info!(
            %owner,
            %task_id,
            %status,
            new_position,
            column_len = layout.len(),
            "column reordered"
        );
        Ok(column.into_tasks())
    }

    /// Returns the position a task appended to the column would take: the
    /// column's current size. Writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Storage`] when the column cannot be read.
    pub async fn append_to_column(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskServiceResult<Position> {
        let column = self.load_column(owner, status).await?;
        Ok(column.next_position()?)
    }

    /// Rewrites the column's positions to `0..n` in their current order.
    ///
    /// Already compact columns are returned without writing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Storage`] when the store fails.
    pub async fn compact_after_removal(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskServiceResult<Vec<Task>> {
        let _guard = self.locks.lock(owner, &[status]).await;
        self.compact_locked(owner, status).await
    }

    pub(crate) const fn store(&self) -> &BoundedStore<S> {
        &self.store
    }

    pub(crate) async fn lock_columns(
        &self,
        owner: OwnerId,
        statuses: &[TaskStatus],
    ) -> ColumnGuard {
        self.locks.lock(owner, statuses).await
    }

    /// Locks the column currently holding the task, plus every column in
    /// `also`.
    ///
    /// The task is re-read under the lock; if it moved meanwhile the lock is
    /// released and acquisition starts over.
    pub(crate) async fn lock_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        also: &[TaskStatus],
    ) -> TaskServiceResult<(Task, ColumnGuard)> {
        let mut observed = self.find_owned(owner, task_id).await?;
        for _ in 0..MAX_LOCK_ATTEMPTS {
            let mut statuses = vec![observed.status()];
            statuses.extend_from_slice(also);
            let guard = self.locks.lock(owner, &statuses).await;
            let current = self.find_owned(owner, task_id).await?;
            if current.status() == observed.status() {
                return Ok((current, guard));
            }
            observed = current;
        }
        tracing::warn!(%owner, %task_id, "task kept moving while locking its column");
        Err(TaskServiceError::Storage(TaskStoreError::ColumnChanged {
            owner,
            status: observed.status(),
        }))
    }

    pub(crate) async fn find_owned(&self, owner: OwnerId, task_id: TaskId) -> TaskServiceResult<Task> {
        self.store.find_task(owner, task_id).await?.ok_or_else(|| {
            tracing::warn!(%owner, %task_id, "task not found for owner");
            TaskServiceError::NotFound(task_id)
        })
    }

    /// Compacts the column; the caller must hold its lock.
    pub(crate) async fn compact_locked(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskServiceResult<Vec<Task>> {
        let mut column = self.load_column(owner, status).await?;
        if column.is_compact() {
            return Ok(column.into_tasks());
        }
        let layout = column.renumber()?;
        self.store.write_column(&layout).await?;
        tracing::info!(%owner, %status, column_len = layout.len(), "column compacted");
        Ok(column.into_tasks())
    }

    /// Returns the append position of a column, compacting it first so the
    /// new slot cannot collide with a stale position. The caller must hold
    /// the column's lock.
    pub(crate) async fn reserve_slot_locked(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskServiceResult<Position> {
        let tasks = self.compact_locked(owner, status).await?;
        Ok(Position::from_index(tasks.len())?)
    }

    async fn load_column(&self, owner: OwnerId, status: TaskStatus) -> TaskServiceResult<Column> {
        let tasks = self.store.find_column(owner, status).await?;
        Ok(Column::from_tasks(owner, status, tasks))
    }
}
