//! Request payloads accepted from the request layer.
//!
//! Payloads carry raw user input; services validate it before touching
//! storage.

use crate::task::domain::{
    Priority, TaskContent, TaskDomainError, TaskId, TaskStatus, parse_due_date,
};
use chrono::NaiveDate;
use serde::Deserialize;

/// Validated task details shared by create and edit.
pub(crate) struct TaskDetails {
    pub(crate) content: TaskContent,
    pub(crate) priority: Priority,
    pub(crate) due_date: Option<NaiveDate>,
}

fn validate_details(
    content: &str,
    priority: Option<&str>,
    due_date: Option<&str>,
) -> Result<TaskDetails, TaskDomainError> {
    Ok(TaskDetails {
        content: TaskContent::new(content)?,
        priority: Priority::from_input(priority)?,
        due_date: parse_due_date(due_date)?,
    })
}

/// Request payload for adding a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    content: String,
    priority: Option<String>,
    due_date: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            priority: None,
            due_date: None,
        }
    }

    /// Sets the raw priority value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the raw `YYYY-MM-DD` due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<TaskDetails, TaskDomainError> {
        validate_details(
            &self.content,
            self.priority.as_deref(),
            self.due_date.as_deref(),
        )
    }
}

/// Request payload for editing a task's details.
///
/// Omitting the priority resets it to medium; omitting the due date clears
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    task_id: TaskId,
    content: String,
    priority: Option<String>,
    due_date: Option<String>,
}

impl EditTaskRequest {
    /// Creates a request replacing the task's content.
    #[must_use]
    pub fn new(task_id: TaskId, content: impl Into<String>) -> Self {
        Self {
            task_id,
            content: content.into(),
            priority: None,
            due_date: None,
        }
    }

    /// Sets the raw priority value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the raw `YYYY-MM-DD` due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Returns the targeted task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub(crate) fn validate(&self) -> Result<TaskDetails, TaskDomainError> {
        validate_details(
            &self.content,
            self.priority.as_deref(),
            self.due_date.as_deref(),
        )
    }
}

/// Request payload for moving a task to another workflow column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetStatusRequest {
    task_id: TaskId,
    status: String,
}

impl SetStatusRequest {
    /// Creates a request with the raw target status.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }

    /// Returns the targeted task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub(crate) fn validate(&self) -> Result<TaskStatus, TaskDomainError> {
        Ok(TaskStatus::try_from(self.status.as_str())?)
    }
}

/// Drag-and-drop payload repositioning a task within a column.
///
/// Fields are optional on the wire so that a missing field is reported as a
/// validation error rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReorderTaskRequest {
    /// Task being moved.
    #[serde(default, alias = "taskId")]
    pub task_id: Option<TaskId>,
    /// Column the task is moved within.
    #[serde(default)]
    pub status: Option<String>,
    /// Zero-based target slot.
    #[serde(default, alias = "newPosition")]
    pub new_position: Option<i64>,
}

/// Reorder payload after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValidReorder {
    pub(crate) task_id: TaskId,
    pub(crate) status: TaskStatus,
    pub(crate) new_position: usize,
}

impl ReorderTaskRequest {
    /// Creates a complete request.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>, new_position: i64) -> Self {
        Self {
            task_id: Some(task_id),
            status: Some(status.into()),
            new_position: Some(new_position),
        }
    }

    pub(crate) fn validate(&self) -> Result<ValidReorder, TaskDomainError> {
        let task_id = self
            .task_id
            .ok_or(TaskDomainError::MissingField("task_id"))?;
        let raw_status = self
            .status
            .as_deref()
            .ok_or(TaskDomainError::MissingField("status"))?;
        let raw_position = self
            .new_position
            .ok_or(TaskDomainError::MissingField("new_position"))?;

        let status = TaskStatus::try_from(raw_status)?;
        if raw_position < 0 {
            return Err(TaskDomainError::NegativePosition(raw_position));
        }
        // Targets beyond the column are clamped to its end by the engine.
        let new_position = usize::try_from(raw_position).unwrap_or(usize::MAX);
        Ok(ValidReorder {
            task_id,
            status,
            new_position,
        })
    }
}
