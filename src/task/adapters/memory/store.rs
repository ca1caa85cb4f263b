//! In-memory task store for tests and single-process embedding.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{ColumnLayout, NewTask, OwnerId, Task, TaskId, TaskPatch, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Identifiers are allocated from a counter starting at `1`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskState {
    fn owned_mut(&mut self, owner: OwnerId, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(&id).filter(|task| task.owner() == owner)
    }

    fn column_ids(&self, owner: OwnerId, status: TaskStatus) -> BTreeSet<TaskId> {
        self.tasks
            .values()
            .filter(|task| task.owner() == owner && task.status() == status)
            .map(Task::id)
            .collect()
    }
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored tasks across all owners.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn len(&self) -> TaskStoreResult<usize> {
        Ok(self.read()?.tasks.len())
    }

    /// Returns whether the store holds no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn is_empty(&self) -> TaskStoreResult<bool> {
        Ok(self.read()?.tasks.is_empty())
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_by_owner(&self, owner: OwnerId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.owner() == owner)
            .cloned()
            .collect())
    }

    async fn find_by_owner_and_status(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        let mut column: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.owner() == owner && task.status() == status)
            .cloned()
            .collect();
        column.sort_by_key(|task| (task.position(), task.id()));
        Ok(column)
    }

    async fn find_by_owner_and_id(
        &self,
        owner: OwnerId,
        id: TaskId,
    ) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| task.owner() == owner)
            .cloned())
    }

    async fn insert(&self, task: &NewTask) -> TaskStoreResult<TaskId> {
        let mut state = self.write()?;
        let next = state.last_id.checked_add(1).ok_or_else(|| {
            TaskStoreError::persistence(std::io::Error::other("task identifiers exhausted"))
        })?;
        state.last_id = next;
        let id = TaskId::new(next);
        state.tasks.insert(id, task.clone().into_task(id));
        Ok(id)
    }

    async fn update_fields(
        &self,
        owner: OwnerId,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        let Some(task) = state.owned_mut(owner, id) else {
            return Ok(0);
        };
        task.apply(patch);
        Ok(1)
    }

    async fn write_column(&self, layout: &ColumnLayout) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        let expected: BTreeSet<TaskId> = layout.task_ids().collect();
        if expected.len() != layout.len()
            || state.column_ids(layout.owner(), layout.status()) != expected
        {
            return Err(TaskStoreError::ColumnChanged {
                owner: layout.owner(),
                status: layout.status(),
            });
        }

        let mut affected = 0_u64;
        for assignment in layout.assignments() {
            if let Some(task) = state.owned_mut(layout.owner(), assignment.task_id) {
                task.set_position(assignment.position);
                affected = affected.saturating_add(1);
            }
        }
        Ok(affected)
    }

    async fn delete_by_id(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        if state.owned_mut(owner, id).is_none() {
            return Ok(0);
        }
        state.tasks.remove(&id);
        Ok(1)
    }
}
