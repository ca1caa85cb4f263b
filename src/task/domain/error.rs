//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or validating domain task values.
///
/// Every variant is a validation failure: callers can correct the input and
/// retry without any storage having been touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task content is empty after trimming.
    #[error("task content must not be empty")]
    EmptyContent,

    /// The workflow status value is not one of `todo`, `in_progress`, `done`.
    #[error("invalid task status: {0}")]
    InvalidStatus(String),

    /// The priority value is not one of `low`, `medium`, `high`.
    #[error("invalid task priority: {0}")]
    InvalidPriority(String),

    /// The due date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// A target position was negative.
    #[error("invalid position {0}, expected a non-negative integer")]
    NegativePosition(i64),

    /// A required request field was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A column grew beyond the representable position range.
    #[error("column of {0} tasks exceeds the maximum position")]
    ColumnTooLarge(usize),
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

impl From<ParseTaskStatusError> for TaskDomainError {
    fn from(err: ParseTaskStatusError) -> Self {
        Self::InvalidStatus(err.0)
    }
}

impl From<ParsePriorityError> for TaskDomainError {
    fn from(err: ParsePriorityError) -> Self {
        Self::InvalidPriority(err.0)
    }
}
