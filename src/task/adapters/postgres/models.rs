//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Task text.
    pub content: String,
    /// Task priority.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Workflow status.
    pub status: String,
    /// Column position.
    pub order_position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Task text.
    pub content: String,
    /// Task priority.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Workflow status.
    pub status: String,
    /// Column position.
    pub order_position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Partial update model; `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement task text.
    pub content: Option<String>,
    /// Replacement priority.
    pub priority: Option<String>,
    /// Replacement due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement status.
    pub status: Option<String>,
    /// Replacement column position.
    pub order_position: Option<i32>,
}
