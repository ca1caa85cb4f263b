//! Time-bounded access to a task store.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{ColumnLayout, NewTask, OwnerId, Task, TaskId, TaskPatch, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Task store wrapper that bounds every call by a timeout and logs failures.
pub(crate) struct BoundedStore<S> {
    store: Arc<S>,
    timeout: Duration,
}

impl<S> Clone for BoundedStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            timeout: self.timeout,
        }
    }
}

impl<S: TaskStore> BoundedStore<S> {
    pub(crate) const fn new(store: Arc<S>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        pending: impl Future<Output = TaskStoreResult<T>>,
    ) -> TaskServiceResult<T> {
        let outcome = tokio::time::timeout(self.timeout, pending)
            .await
            .unwrap_or_else(|_| {
                Err(TaskStoreError::Timeout {
                    operation,
                    after: self.timeout,
                })
            });
        outcome.map_err(|err| {
            tracing::error!(operation, error = %err, "task store call failed");
            TaskServiceError::Storage(err)
        })
    }

    pub(crate) async fn find_by_owner(&self, owner: OwnerId) -> TaskServiceResult<Vec<Task>> {
        self.call("find_by_owner", self.store.find_by_owner(owner))
            .await
    }

    pub(crate) async fn find_column(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskServiceResult<Vec<Task>> {
        self.call(
            "find_by_owner_and_status",
            self.store.find_by_owner_and_status(owner, status),
        )
        .await
    }

    pub(crate) async fn find_task(
        &self,
        owner: OwnerId,
        id: TaskId,
    ) -> TaskServiceResult<Option<Task>> {
        self.call("find_by_owner_and_id", self.store.find_by_owner_and_id(owner, id))
            .await
    }

    pub(crate) async fn insert(&self, task: &NewTask) -> TaskServiceResult<TaskId> {
        self.call("insert", self.store.insert(task)).await
    }

    pub(crate) async fn update_fields(
        &self,
        owner: OwnerId,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskServiceResult<u64> {
        self.call("update_fields", self.store.update_fields(owner, id, patch))
            .await
    }

    pub(crate) async fn write_column(&self, layout: &ColumnLayout) -> TaskServiceResult<u64> {
        self.call("write_column", self.store.write_column(layout))
            .await
    }

    pub(crate) async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskServiceResult<u64> {
        self.call("delete_by_id", self.store.delete_by_id(owner, id))
            .await
    }
}
