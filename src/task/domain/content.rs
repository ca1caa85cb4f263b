//! Validated free-text and date values attached to a task.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed task text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskContent(String);

impl TaskContent {
    /// Creates validated task content, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyContent`] when nothing remains after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyContent);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the content as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskContent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses an optional `YYYY-MM-DD` due date from request input.
///
/// Absent and blank values mean "no due date".
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDueDate`] when the value is not a valid
/// calendar date.
pub fn parse_due_date(value: Option<&str>) -> Result<Option<NaiveDate>, TaskDomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| TaskDomainError::InvalidDueDate(raw.to_owned())),
    }
}
