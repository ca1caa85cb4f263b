//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use rstest_bdd_macros::when;
use taskflow::task::{
    domain::TaskId,
    services::{CreateTaskRequest, ReorderTaskRequest},
};

#[when(r#"task "{content}" is dragged to position {position:i64} in "{status}""#)]
fn drag_task(
    world: &mut TaskBoardWorld,
    content: String,
    position: i64,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&content)?;
    let request = ReorderTaskRequest::new(task_id, status, position);
    let result = run_async(world.service.reorder(world.owner, &request));
    world.record(result);
    Ok(())
}

#[when(r#"an unknown task is dragged to position {position:i64} in "{status}""#)]
fn drag_unknown_task(world: &mut TaskBoardWorld, position: i64, status: String) {
    let request = ReorderTaskRequest::new(TaskId::new(i64::MAX), status, position);
    let result = run_async(world.service.reorder(world.owner, &request));
    world.record(result);
}

#[when(r#"task "{content}" is toggled"#)]
fn toggle_task(world: &mut TaskBoardWorld, content: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&content)?;
    let result = run_async(world.service.toggle(world.owner, task_id));
    world.record(result);
    Ok(())
}

#[when(r#"a task with content "{content}" is created"#)]
fn create_task(world: &mut TaskBoardWorld, content: String) {
    let result = run_async(
        world
            .service
            .create(world.owner, CreateTaskRequest::new(content)),
    );
    world.record(result);
}
