//! Store port for owner-scoped task persistence.

use crate::task::domain::{ColumnLayout, NewTask, OwnerId, Task, TaskId, TaskPatch, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Every call is scoped by owner: a task identifier belonging to another
/// owner behaves exactly like an identifier that does not exist.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task of the owner, in no particular order.
    async fn find_by_owner(&self, owner: OwnerId) -> TaskStoreResult<Vec<Task>>;

    /// Returns the owner's tasks in one column, ordered by position and then
    /// by ascending identifier.
    async fn find_by_owner_and_status(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Finds one of the owner's tasks.
    ///
    /// Returns `None` when the task does not exist or belongs to someone
    /// else.
    async fn find_by_owner_and_id(
        &self,
        owner: OwnerId,
        id: TaskId,
    ) -> TaskStoreResult<Option<Task>>;

    /// Persists a new task and returns its generated identifier.
    async fn insert(&self, task: &NewTask) -> TaskStoreResult<TaskId>;

    /// Applies a partial update and returns the number of rows affected.
    ///
    /// Returns `0` when no task matches both owner and identifier.
    async fn update_fields(
        &self,
        owner: OwnerId,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskStoreResult<u64>;

    /// Rewrites the positions of a whole column atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::ColumnChanged`] without writing anything
    /// when the column's current members differ from the layout's tasks.
    async fn write_column(&self, layout: &ColumnLayout) -> TaskStoreResult<u64>;

    /// Deletes one of the owner's tasks and returns the number of rows
    /// removed.
    async fn delete_by_id(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<u64>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The column gained or lost tasks between reading and rewriting it.
    #[error("column {status} of owner {owner} changed during rewrite")]
    ColumnChanged {
        /// Column owner.
        owner: OwnerId,
        /// Column status.
        status: TaskStatus,
    },

    /// A store call did not complete in time.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// Store operation that was abandoned.
        operation: &'static str,
        /// Time limit that elapsed.
        after: Duration,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
