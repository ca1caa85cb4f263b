//! Task aggregate and the values used to create and modify it.

use super::{OwnerId, Position, Priority, TaskContent, TaskId, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::Serialize;

/// A task owned by a single user.
///
/// Completion is not stored: it is derived from [`Task::status`], so the
/// status and the completion flag cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner: OwnerId,
    content: TaskContent,
    priority: Priority,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    position: Position,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner: OwnerId,
    /// Persisted content.
    pub content: TaskContent,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted column position.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            content: data.content,
            priority: data.priority,
            due_date: data.due_date,
            status: data.status,
            position: data.position,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the task content.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Returns the position within the task's column.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies every field present in `patch`.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
    }

    pub(crate) const fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

/// A task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    owner: OwnerId,
    content: TaskContent,
    priority: Priority,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    position: Position,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a `todo` task at the head of its column with medium priority
    /// and no due date.
    #[must_use]
    pub fn new(owner: OwnerId, content: TaskContent, clock: &impl Clock) -> Self {
        Self {
            owner,
            content,
            priority: Priority::default(),
            due_date: None,
            status: TaskStatus::Todo,
            position: Position::FIRST,
            created_at: clock.utc(),
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial column position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the task content.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the initial position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Combines the pending record with its store-assigned identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            owner: self.owner,
            content: self.content,
            priority: self.priority,
            due_date: self.due_date,
            status: self.status,
            position: self.position,
            created_at: self.created_at,
        }
    }
}

/// Partial update of a task's mutable fields.
///
/// `None` leaves a field untouched. For the due date, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement content.
    pub content: Option<TaskContent>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement column position.
    pub position: Option<Position>,
}

impl TaskPatch {
    /// Patch overwriting the user-editable details of a task.
    #[must_use]
    pub const fn details(
        content: TaskContent,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            content: Some(content),
            priority: Some(priority),
            due_date: Some(due_date),
            status: None,
            position: None,
        }
    }

    /// Patch moving a task into a column slot.
    #[must_use]
    pub const fn placement(status: TaskStatus, position: Position) -> Self {
        Self {
            content: None,
            priority: None,
            due_date: None,
            status: Some(status),
            position: Some(position),
        }
    }

    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.position.is_none()
    }
}

/// Serializable view of a task for renderers and JSON responses.
///
/// This is the only place the `completed` flag appears, always derived from
/// the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Task content.
    pub content: String,
    /// Task priority.
    pub priority: Priority,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Whether the task is completed.
    pub completed: bool,
    /// Position within the status column.
    pub order_position: Position,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            content: task.content().as_str().to_owned(),
            priority: task.priority(),
            due_date: task.due_date(),
            status: task.status(),
            completed: task.is_completed(),
            order_position: task.position(),
            created_at: task.created_at(),
        }
    }
}
