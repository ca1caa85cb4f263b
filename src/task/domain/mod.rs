//! Domain model for personal task tracking.
//!
//! Tasks live in one of three workflow columns per owner. The domain keeps
//! the column ordering rules and the status-derived completion flag free of
//! any infrastructure concern.

mod column;
mod content;
mod error;
mod ids;
mod status;
mod task;

pub use column::{Column, ColumnLayout, PositionAssignment};
pub use content::{TaskContent, parse_due_date};
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{OwnerId, Position, TaskId};
pub use status::{Priority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch, TaskSummary};
