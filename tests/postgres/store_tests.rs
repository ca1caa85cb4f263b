//! Store port operations against `PostgreSQL`.

use super::helpers::{connect, read_column, seed};
use chrono::NaiveDate;
use mockable::DefaultClock;
use taskflow::task::{
    domain::{
        Column, NewTask, OwnerId, Position, Priority, TaskContent, TaskId, TaskPatch,
        TaskStatus,
    },
    ports::{TaskStore, TaskStoreError},
};

#[tokio::test(flavor = "multi_thread")]
async fn insert_and_find_round_trip() -> Result<(), eyre::Report> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let owner = OwnerId::new();
    let due = NaiveDate::from_ymd_opt(2026, 12, 1);
    let new_task = NewTask::new(owner, TaskContent::new("renew passport")?, &DefaultClock)
        .with_priority(Priority::High)
        .with_due_date(due);

    let id = store.insert(&new_task).await?;
    let found = store
        .find_by_owner_and_id(owner, id)
        .await?
        .ok_or_else(|| eyre::eyre!("inserted task not found"))?;

    eyre::ensure!(found.id() == id);
    eyre::ensure!(found.owner() == owner);
    eyre::ensure!(found.content().as_str() == "renew passport");
    eyre::ensure!(found.priority() == Priority::High);
    eyre::ensure!(found.due_date() == due);
    eyre::ensure!(found.status() == TaskStatus::Todo);
    eyre::ensure!(found.position().value() == 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn lookups_are_scoped_to_owner() -> Result<(), eyre::Report> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let owner = OwnerId::new();
    let stranger = OwnerId::new();
    let id = seed(&store, owner, "mine", TaskStatus::Todo, 0).await?;

    eyre::ensure!(store.find_by_owner_and_id(stranger, id).await?.is_none());
    eyre::ensure!(store.find_by_owner(stranger).await?.is_empty());
    eyre::ensure!(store.delete_by_id(stranger, id).await? == 0);
    eyre::ensure!(
        store
            .update_fields(stranger, id, &TaskPatch::placement(TaskStatus::Done, Position::FIRST))
            .await?
            == 0
    );
    eyre::ensure!(store.find_by_owner(owner).await?.len() == 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn column_reads_are_ordered_by_position_then_id() -> Result<(), eyre::Report> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let owner = OwnerId::new();
    seed(&store, owner, "third", TaskStatus::InProgress, 7).await?;
    seed(&store, owner, "first", TaskStatus::InProgress, 1).await?;
    seed(&store, owner, "second", TaskStatus::InProgress, 4).await?;
    seed(&store, owner, "elsewhere", TaskStatus::Done, 0).await?;

    let column = read_column(&store, owner, TaskStatus::InProgress).await?;

    eyre::ensure!(
        column
            == [
                ("first".to_owned(), 1),
                ("second".to_owned(), 4),
                ("third".to_owned(), 7),
            ],
        "unexpected column {column:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_fields_applies_only_given_fields() -> Result<(), eyre::Report> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let owner = OwnerId::new();
    let id = seed(&store, owner, "draft", TaskStatus::InProgress, 0).await?;
    let patch = TaskPatch::details(TaskContent::new("final")?, Priority::Low, None);

    let affected = store.update_fields(owner, id, &patch).await?;
    let empty = store.update_fields(owner, id, &TaskPatch::default()).await?;
    let task = store
        .find_by_owner_and_id(owner, id)
        .await?
        .ok_or_else(|| eyre::eyre!("task missing after update"))?;

    eyre::ensure!(affected == 1);
    eyre::ensure!(empty == 1);
    eyre::ensure!(task.content().as_str() == "final");
    eyre::ensure!(task.priority() == Priority::Low);
    eyre::ensure!(task.status() == TaskStatus::InProgress);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn write_column_swaps_positions_in_one_transaction() -> Result<(), eyre::Report> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let owner = OwnerId::new();
    seed(&store, owner, "A", TaskStatus::Todo, 0).await?;
    let b = seed(&store, owner, "B", TaskStatus::Todo, 1).await?;
    let tasks = store.find_by_owner_and_status(owner, TaskStatus::Todo).await?;
    let mut column = Column::from_tasks(owner, TaskStatus::Todo, tasks);
    eyre::ensure!(column.move_task(b, 0));

    let layout = column.renumber()?;
    let written = store.write_column(&layout).await?;

    eyre::ensure!(written == 2);
    eyre::ensure!(
        read_column(&store, owner, TaskStatus::Todo).await?
            == [("B".to_owned(), 0), ("A".to_owned(), 1)]
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stale_layout_is_rejected_without_writing() -> Result<(), eyre::Report> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let owner = OwnerId::new();
    seed(&store, owner, "A", TaskStatus::Todo, 0).await?;
    seed(&store, owner, "B", TaskStatus::Todo, 2).await?;
    let tasks = store.find_by_owner_and_status(owner, TaskStatus::Todo).await?;
    let layout = Column::from_tasks(owner, TaskStatus::Todo, tasks).renumber()?;
    seed(&store, owner, "late", TaskStatus::Todo, 3).await?;

    let result = store.write_column(&layout).await;

    eyre::ensure!(
        matches!(result, Err(TaskStoreError::ColumnChanged { status: TaskStatus::Todo, .. })),
        "expected ColumnChanged, got {result:?}"
    );
    eyre::ensure!(
        read_column(&store, owner, TaskStatus::Todo).await?
            == [
                ("A".to_owned(), 0),
                ("B".to_owned(), 2),
                ("late".to_owned(), 3),
            ]
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_affected_rows() -> Result<(), eyre::Report> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let owner = OwnerId::new();
    let id = seed(&store, owner, "gone", TaskStatus::Done, 0).await?;

    eyre::ensure!(store.delete_by_id(owner, id).await? == 1);
    eyre::ensure!(store.delete_by_id(owner, id).await? == 0);
    eyre::ensure!(store.delete_by_id(owner, TaskId::new(i64::MAX)).await? == 0);
    Ok(())
}
