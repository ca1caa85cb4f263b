//! Service-level error taxonomy.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskStoreError,
};
use thiserror::Error;

/// Errors reported by task services.
///
/// The variants are distinct so the request layer can map them to different
/// responses: validation failures and missing tasks never touch storage,
/// storage failures are reported as-is and never retried.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The task does not exist or belongs to another owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store failed, timed out, or rejected a write.
    #[error(transparent)]
    Storage(#[from] TaskStoreError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
