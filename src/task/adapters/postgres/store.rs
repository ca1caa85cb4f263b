//! `PostgreSQL` store implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::config::StorageConfig;
use crate::task::{
    domain::{
        ColumnLayout, NewTask, OwnerId, PersistedTaskData, Position, Priority, Task, TaskContent,
        TaskId, TaskPatch, TaskStatus,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from storage settings.
///
/// # Errors
///
/// Returns [`TaskStoreError::Persistence`] when the pool cannot establish
/// its initial connections within the configured timeout.
pub fn build_pool(config: &StorageConfig) -> TaskStoreResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_idle))
        .connection_timeout(config.connect_timeout())
        .build(manager)
        .map_err(TaskStoreError::persistence)
}

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn find_by_owner(&self, owner: OwnerId) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_owner_and_status(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .filter(tasks::status.eq(status.as_str()))
                .order((tasks::order_position.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_owner_and_id(
        &self,
        owner: OwnerId,
        id: TaskId,
    ) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn insert(&self, task: &NewTask) -> TaskStoreResult<TaskId> {
        let new_row = to_new_row(task)?;
        self.run_blocking(move |connection| {
            let id = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(tasks::id)
                .get_result::<i64>(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(TaskId::new(id))
        })
        .await
    }

    async fn update_fields(
        &self,
        owner: OwnerId,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskStoreResult<u64> {
        let changeset = to_changeset(patch)?;
        let is_empty = patch.is_empty();
        self.run_blocking(move |connection| {
            let target = tasks::table
                .filter(tasks::id.eq(id.value()))
                .filter(tasks::owner_id.eq(owner.into_inner()));
            // Diesel rejects an update without columns; report the match count.
            let affected = if is_empty {
                target
                    .count()
                    .get_result::<i64>(connection)
                    .map_err(TaskStoreError::persistence)
                    .map(|count| usize::try_from(count).unwrap_or_default())?
            } else {
                diesel::update(target)
                    .set(&changeset)
                    .execute(connection)
                    .map_err(TaskStoreError::persistence)?
            };
            Ok(rows_to_u64(affected))
        })
        .await
    }

    async fn write_column(&self, layout: &ColumnLayout) -> TaskStoreResult<u64> {
        let owner = layout.owner();
        let status = layout.status();
        let assignments = layout
            .assignments()
            .iter()
            .map(|assignment| {
                position_to_sql(assignment.position)
                    .map(|position| (assignment.task_id.value(), position))
            })
            .collect::<TaskStoreResult<Vec<(i64, i32)>>>()?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<u64, ColumnWriteError, _>(|tx| {
                    rewrite_column(tx, owner, status, &assignments)
                })
                .map_err(|err| match err {
                    ColumnWriteError::Changed => TaskStoreError::ColumnChanged { owner, status },
                    ColumnWriteError::Database(db_err) => TaskStoreError::persistence(db_err),
                })
        })
        .await
    }

    async fn delete_by_id(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .execute(connection)
            .map_err(TaskStoreError::persistence)?;
            Ok(rows_to_u64(affected))
        })
        .await
    }
}

/// Failure inside the column rewrite transaction.
#[derive(Debug)]
enum ColumnWriteError {
    Changed,
    Database(DieselError),
}

impl From<DieselError> for ColumnWriteError {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

/// Locks the column rows, checks membership, then writes every position.
///
/// Positions are unique per column through a deferred constraint, so the
/// intermediate states of the loop are never checked.
fn rewrite_column(
    tx: &mut PgConnection,
    owner: OwnerId,
    status: TaskStatus,
    assignments: &[(i64, i32)],
) -> Result<u64, ColumnWriteError> {
    let mut current = tasks::table
        .filter(tasks::owner_id.eq(owner.into_inner()))
        .filter(tasks::status.eq(status.as_str()))
        .select(tasks::id)
        .for_update()
        .load::<i64>(tx)?;
    current.sort_unstable();

    let mut expected: Vec<i64> = assignments.iter().map(|(id, _)| *id).collect();
    expected.sort_unstable();
    if current != expected {
        return Err(ColumnWriteError::Changed);
    }

    let mut affected = 0_usize;
    for (id, position) in assignments {
        affected = affected.saturating_add(
            diesel::update(
                tasks::table
                    .filter(tasks::id.eq(*id))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .set(tasks::order_position.eq(*position))
            .execute(tx)?,
        );
    }
    Ok(rows_to_u64(affected))
}

fn rows_to_u64(rows: usize) -> u64 {
    u64::try_from(rows).unwrap_or(u64::MAX)
}

fn position_to_sql(position: Position) -> TaskStoreResult<i32> {
    i32::try_from(position.value()).map_err(TaskStoreError::persistence)
}

fn to_new_row(task: &NewTask) -> TaskStoreResult<NewTaskRow> {
    Ok(NewTaskRow {
        owner_id: task.owner().into_inner(),
        content: task.content().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        status: task.status().as_str().to_owned(),
        order_position: position_to_sql(task.position())?,
        created_at: task.created_at(),
    })
}

fn to_changeset(patch: &TaskPatch) -> TaskStoreResult<TaskChangeset> {
    Ok(TaskChangeset {
        content: patch
            .content
            .as_ref()
            .map(|content| content.as_str().to_owned()),
        priority: patch.priority.map(|priority| priority.as_str().to_owned()),
        due_date: patch.due_date,
        status: patch.status.map(|status| status.as_str().to_owned()),
        order_position: patch.position.map(position_to_sql).transpose()?,
    })
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        owner_id,
        content: persisted_content,
        priority: persisted_priority,
        due_date,
        status: persisted_status,
        order_position,
        created_at,
    } = row;

    let content = TaskContent::new(persisted_content).map_err(TaskStoreError::persistence)?;
    let priority =
        Priority::try_from(persisted_priority.as_str()).map_err(TaskStoreError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskStoreError::persistence)?;
    let position = u32::try_from(order_position)
        .map(Position::new)
        .map_err(TaskStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        owner: OwnerId::from_uuid(owner_id),
        content,
        priority,
        due_date,
        status,
        position,
        created_at,
    }))
}
