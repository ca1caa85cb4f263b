//! Shared test helpers for in-memory store integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskflow::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{OwnerId, Task, TaskStatus},
    services::{CreateTaskRequest, SetStatusRequest, TaskService, ViewMode},
};

/// Service type exercised by the in-memory tests.
pub type TestService = TaskService<InMemoryTaskStore, DefaultClock>;

/// Provides a service over a fresh in-memory store.
#[fixture]
pub fn service() -> TestService {
    TaskService::new(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock))
}

/// Provides an owner for tests.
#[fixture]
pub fn owner() -> OwnerId {
    OwnerId::new()
}

/// Creates one task per content string and returns them in creation order.
///
/// # Errors
///
/// Returns an error if any creation fails.
pub async fn create_all(
    service: &TestService,
    owner: OwnerId,
    contents: &[&str],
) -> Result<Vec<Task>, eyre::Report> {
    let mut created = Vec::with_capacity(contents.len());
    for content in contents {
        created.push(service.create(owner, CreateTaskRequest::new(*content)).await?);
    }
    Ok(created)
}

/// Moves a task into `status` through the façade.
///
/// # Errors
///
/// Returns an error if the move fails.
pub async fn move_to(
    service: &TestService,
    owner: OwnerId,
    task: &Task,
    status: TaskStatus,
) -> Result<Task, eyre::Report> {
    Ok(service
        .set_status(owner, SetStatusRequest::new(task.id(), status.as_str()))
        .await?)
}

/// Returns a column's contents in display order.
///
/// # Errors
///
/// Returns an error if the board cannot be read.
pub async fn column_contents(
    service: &TestService,
    owner: OwnerId,
    status: TaskStatus,
) -> Result<Vec<String>, eyre::Report> {
    let board = service.board(owner).await?;
    Ok(board
        .column(status)
        .iter()
        .map(|task| task.content().as_str().to_owned())
        .collect())
}

/// Checks that every column of the owner holds positions `0..n` and that
/// completion agrees with status.
///
/// # Errors
///
/// Returns an error describing the first violated column.
pub async fn ensure_board_consistent(
    service: &TestService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let listed = service.list(owner, ViewMode::Kanban).await?;
    for status in TaskStatus::ALL {
        let column_positions: Vec<u32> = listed
            .iter()
            .filter(|task| task.status() == status)
            .map(|task| task.position().value())
            .collect();
        let expected: Vec<u32> = (0..).take(column_positions.len()).collect();
        eyre::ensure!(
            column_positions == expected,
            "column {status} is not contiguous: {column_positions:?}"
        );
    }
    for task in &listed {
        eyre::ensure!(
            task.is_completed() == (task.status() == TaskStatus::Done),
            "task {} has completion out of sync with status",
            task.id()
        );
    }
    Ok(())
}
