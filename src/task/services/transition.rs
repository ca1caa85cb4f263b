//! Status transitions and cross-column moves.

use super::{OrderingEngine, TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{OwnerId, Task, TaskId, TaskPatch, TaskStatus},
    ports::TaskStore,
};

/// Moves tasks between workflow columns.
///
/// A move appends the task to the end of its new column and compacts the
/// column it left, both under the locks of the two columns.
pub struct StatusTransitionManager<S: TaskStore> {
    ordering: OrderingEngine<S>,
}

impl<S: TaskStore> Clone for StatusTransitionManager<S> {
    fn clone(&self) -> Self {
        Self {
            ordering: self.ordering.clone(),
        }
    }
}

impl<S: TaskStore> StatusTransitionManager<S> {
    /// Creates a manager sharing the engine's store and column locks.
    #[must_use]
    pub const fn new(ordering: OrderingEngine<S>) -> Self {
        Self { ordering }
    }

    /// Moves a task into `new_status`.
    ///
    /// Setting the status a task already has changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the owner has no such
    /// task, or [`TaskServiceError::Storage`] when the store fails. A failure
    /// after the task was moved can leave the old column uncompacted until
    /// the next compaction of that column.
    pub async fn set_status(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        new_status: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let (task, _guard) = self
            .ordering
            .lock_task(owner, task_id, &[new_status])
            .await?;
        self.move_locked(task, new_status).await
    }

    /// Flips a task's completion.
    ///
    /// Completing moves the task to `done`; un-completing always returns it
    /// to `todo`. The target is chosen from the task as read under the
    /// column locks, so concurrent toggles each flip once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the owner has no such
    /// task, or [`TaskServiceError::Storage`] when the store fails.
    pub async fn toggle_completion(
        &self,
        owner: OwnerId,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        let (task, _guard) = self
            .ordering
            .lock_task(owner, task_id, &[TaskStatus::Todo, TaskStatus::Done])
            .await?;
        let target = TaskStatus::from_completion(!task.is_completed());
        self.move_locked(task, target).await
    }

    /// Moves an already re-read task; the caller must hold the locks of its
    /// current column and of `new_status`.
    async fn move_locked(&self, mut task: Task, new_status: TaskStatus) -> TaskServiceResult<Task> {
        let owner = task.owner();
        let task_id = task.id();
        let old_status = task.status();
        if old_status == new_status {
            tracing::debug!(%owner, %task_id, status = %new_status, "status unchanged");
            return Ok(task);
        }

        let position = self
            .ordering
            .reserve_slot_locked(owner, new_status)
            .await?;
        let patch = TaskPatch::placement(new_status, position);
        let affected = self
            .ordering
            .store()
            .update_fields(owner, task_id, &patch)
            .await?;
        if affected == 0 {
            tracing::warn!(%owner, %task_id, "task vanished before its status was updated");
            return Err(TaskServiceError::NotFound(task_id));
        }
        task.apply(&patch);

        self.ordering.compact_locked(owner, old_status).await?;
        tracing::info!(
            %owner,
            %task_id,
            from = %old_status,
            to = %new_status,
            %position,
            "task status changed"
        );
        Ok(task)
    }
}
