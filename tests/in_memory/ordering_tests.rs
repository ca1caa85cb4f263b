//! In-memory integration tests for drag-and-drop ordering.

use super::helpers::{
    TestService, column_contents, create_all, ensure_board_consistent, move_to, owner, service,
};
use rstest::rstest;
use taskflow::task::{
    domain::{OwnerId, TaskId, TaskStatus},
    services::{ReorderTaskRequest, TaskServiceError},
};

#[rstest]
#[case(0, &["C", "A", "B"])]
#[case(1, &["A", "C", "B"])]
#[case(2, &["A", "B", "C"])]
#[case(50, &["A", "B", "C"])]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_places_dragged_task(
    service: TestService,
    owner: OwnerId,
    #[case] target: i64,
    #[case] expected: &[&str],
) -> Result<(), eyre::Report> {
    let tasks = create_all(&service, owner, &["A", "B", "C"]).await?;
    let c = tasks.get(2).ok_or_else(|| eyre::eyre!("missing C"))?;

    let column = service
        .reorder(owner, &ReorderTaskRequest::new(c.id(), "todo", target))
        .await?;

    let order: Vec<&str> = column.iter().map(|task| task.content().as_str()).collect();
    eyre::ensure!(order == expected, "unexpected order {order:?}");
    eyre::ensure!(column_contents(&service, owner, TaskStatus::Todo).await? == expected);
    ensure_board_consistent(&service, owner).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_reorder_is_idempotent(
    service: TestService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let tasks = create_all(&service, owner, &["A", "B", "C", "D"]).await?;
    let b = tasks.get(1).ok_or_else(|| eyre::eyre!("missing B"))?;
    let request = ReorderTaskRequest::new(b.id(), "todo", 3);

    let first = service.reorder(owner, &request).await?;
    let second = service.reorder(owner, &request).await?;

    eyre::ensure!(first == second);
    eyre::ensure!(column_contents(&service, owner, TaskStatus::Todo).await? == ["A", "C", "D", "B"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_within_one_column_leaves_others_alone(
    service: TestService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let tasks = create_all(&service, owner, &["A", "B", "X", "Y"]).await?;
    for task in tasks.iter().skip(2) {
        move_to(&service, owner, task, TaskStatus::InProgress).await?;
    }
    let b = tasks.get(1).ok_or_else(|| eyre::eyre!("missing B"))?;

    service
        .reorder(owner, &ReorderTaskRequest::new(b.id(), "todo", 0))
        .await?;

    eyre::ensure!(column_contents(&service, owner, TaskStatus::Todo).await? == ["B", "A"]);
    eyre::ensure!(
        column_contents(&service, owner, TaskStatus::InProgress).await? == ["X", "Y"]
    );
    ensure_board_consistent(&service, owner).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_in_wrong_column_is_not_found(
    service: TestService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let tasks = create_all(&service, owner, &["A", "B"]).await?;
    let a = tasks.first().ok_or_else(|| eyre::eyre!("missing A"))?;

    let wrong_column = service
        .reorder(owner, &ReorderTaskRequest::new(a.id(), "done", 0))
        .await;
    let missing = service
        .reorder(owner, &ReorderTaskRequest::new(TaskId::new(4242), "todo", 0))
        .await;

    eyre::ensure!(matches!(wrong_column, Err(TaskServiceError::NotFound(id)) if id == a.id()));
    eyre::ensure!(matches!(missing, Err(TaskServiceError::NotFound(_))));
    eyre::ensure!(column_contents(&service, owner, TaskStatus::Todo).await? == ["A", "B"]);
    Ok(())
}
