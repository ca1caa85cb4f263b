//! Task CRUD façade consumed by the request layer.

use super::{
    OrderingEngine, StatusTransitionManager, TaskServiceError, TaskServiceResult,
    bounded::BoundedStore,
    requests::{CreateTaskRequest, EditTaskRequest, ReorderTaskRequest, SetStatusRequest},
    view::{TaskBoard, ViewMode},
};
use crate::config::ServiceConfig;
use crate::task::{
    domain::{NewTask, OwnerId, Task, TaskId, TaskPatch, TaskStatus},
    ports::TaskStore,
};
use mockable::Clock;
use std::sync::Arc;

/// Task orchestration service.
///
/// Validates and normalizes input, then delegates column bookkeeping to the
/// [`OrderingEngine`] and [`StatusTransitionManager`]. All operations are
/// scoped to the given owner.
pub struct TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    ordering: OrderingEngine<S>,
    transitions: StatusTransitionManager<S>,
}

impl<S, C> Clone for TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            ordering: self.ordering.clone(),
            transitions: self.transitions.clone(),
        }
    }
}

impl<S, C> TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with default settings.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_config(store, clock, &ServiceConfig::default())
    }

    /// Creates a service with explicit settings.
    #[must_use]
    pub fn with_config(store: Arc<S>, clock: Arc<C>, config: &ServiceConfig) -> Self {
        let ordering = OrderingEngine::new(store, config);
        let transitions = StatusTransitionManager::new(ordering.clone());
        Self {
            clock,
            ordering,
            transitions,
        }
    }

    /// Returns the ordering engine shared by this service.
    #[must_use]
    pub const fn ordering(&self) -> &OrderingEngine<S> {
        &self.ordering
    }

    /// Returns the status transition manager shared by this service.
    #[must_use]
    pub const fn transitions(&self) -> &StatusTransitionManager<S> {
        &self.transitions
    }

    const fn store(&self) -> &BoundedStore<S> {
        self.ordering.store()
    }

    /// Adds a task at the end of the owner's `todo` column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for blank content or an
    /// invalid priority or due date, before anything is written.
    pub async fn create(
        &self,
        owner: OwnerId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let details = request.validate()?;
        let _guard = self.ordering.lock_columns(owner, &[TaskStatus::Todo]).await;
        let position = self
            .ordering
            .reserve_slot_locked(owner, TaskStatus::Todo)
            .await?;

        let new_task = NewTask::new(owner, details.content, &*self.clock)
            .with_priority(details.priority)
            .with_due_date(details.due_date)
            .with_position(position);
        let id = self.store().insert(&new_task).await?;
        tracing::info!(%owner, task_id = %id, %position, "task created");
        Ok(new_task.into_task(id))
    }

    /// Replaces a task's content, priority, and due date.
    ///
    /// Status and position are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for invalid input, leaving
    /// the existing content in place, or [`TaskServiceError::NotFound`] when
    /// the owner has no such task.
    pub async fn edit(&self, owner: OwnerId, request: EditTaskRequest) -> TaskServiceResult<Task> {
        let task_id = request.task_id();
        let details = request.validate()?;
        let patch = TaskPatch::details(details.content, details.priority, details.due_date);

        let affected = self.store().update_fields(owner, task_id, &patch).await?;
        if affected == 0 {
            tracing::warn!(%owner, %task_id, "edit target not found");
            return Err(TaskServiceError::NotFound(task_id));
        }
        tracing::info!(%owner, %task_id, "task edited");
        self.ordering.find_owned(owner, task_id).await
    }

    /// Deletes a task and compacts the column it leaves.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the owner has no such
    /// task, or [`TaskServiceError::Storage`] when the store fails.
    pub async fn delete(&self, owner: OwnerId, task_id: TaskId) -> TaskServiceResult<u64> {
        let (task, _guard) = self.ordering.lock_task(owner, task_id, &[]).await?;
        let removed = self.store().delete(owner, task_id).await?;
        if removed == 0 {
            tracing::warn!(%owner, %task_id, "delete target not found");
            return Err(TaskServiceError::NotFound(task_id));
        }
        self.ordering.compact_locked(owner, task.status()).await?;
        tracing::info!(%owner, %task_id, status = %task.status(), "task deleted");
        Ok(removed)
    }

    /// Flips a task's completion; see
    /// [`StatusTransitionManager::toggle_completion`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the owner has no such
    /// task.
    pub async fn toggle(&self, owner: OwnerId, task_id: TaskId) -> TaskServiceResult<Task> {
        self.transitions.toggle_completion(owner, task_id).await
    }

    /// Moves a task to the requested workflow column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an unknown status, or
    /// [`TaskServiceError::NotFound`] when the owner has no such task.
    pub async fn set_status(
        &self,
        owner: OwnerId,
        request: SetStatusRequest,
    ) -> TaskServiceResult<Task> {
        let status = request.validate()?;
        self.transitions
            .set_status(owner, request.task_id(), status)
            .await
    }

    /// Repositions a task within a column and returns the rewritten column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for a missing field, unknown
    /// status, or negative position, or [`TaskServiceError::NotFound`] when
    /// the task is not in that column.
    pub async fn reorder(
        &self,
        owner: OwnerId,
        request: &ReorderTaskRequest,
    ) -> TaskServiceResult<Vec<Task>> {
        let valid = request.validate()?;
        self.ordering
            .reorder(owner, valid.task_id, valid.status, valid.new_position)
            .await
    }

    /// Lists the owner's tasks in the requested view order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Storage`] when the store fails.
    pub async fn list(&self, owner: OwnerId, view: ViewMode) -> TaskServiceResult<Vec<Task>> {
        let mut tasks = self.store().find_by_owner(owner).await?;
        view.sort(&mut tasks);
        tracing::debug!(%owner, ?view, count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Returns the owner's tasks grouped into workflow columns.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Storage`] when the store fails.
    pub async fn board(&self, owner: OwnerId) -> TaskServiceResult<TaskBoard> {
        let tasks = self.store().find_by_owner(owner).await?;
        Ok(TaskBoard::from_tasks(tasks))
    }
}
