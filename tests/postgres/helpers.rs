//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::{Arc, OnceLock};

use diesel::connection::SimpleConnection;
use mockable::DefaultClock;
use taskflow::config::StorageConfig;
use taskflow::task::{
    adapters::postgres::{PostgresTaskStore, build_pool},
    domain::{NewTask, OwnerId, Position, TaskContent, TaskId, TaskStatus},
    ports::TaskStore,
    services::TaskService,
};

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_ENV: &str = "TASKFLOW_TEST_DATABASE_URL";

/// SQL creating the tasks table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Service type exercised by the `PostgreSQL` tests.
pub type PgService = TaskService<PostgresTaskStore, DefaultClock>;

static MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();

/// Connects to the test database and applies the schema once per process.
///
/// Returns `Ok(None)` when no test database is configured.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the schema cannot be
/// applied.
pub async fn connect() -> Result<Option<PostgresTaskStore>, eyre::Report> {
    let Some(database_url) = std::env::var(TEST_DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
    else {
        eprintln!("skipping: {TEST_DATABASE_URL_ENV} is not set");
        return Ok(None);
    };

    let store = tokio::task::spawn_blocking(move || -> Result<_, eyre::Report> {
        let config = StorageConfig {
            database_url,
            max_connections: 4,
            min_idle: 1,
            ..StorageConfig::default()
        };
        let pool = build_pool(&config)?;
        let migrated = MIGRATED.get_or_init(|| {
            let mut connection = pool.get().map_err(|err| err.to_string())?;
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(|err| err.to_string())
        });
        migrated
            .clone()
            .map_err(|err| eyre::eyre!("apply tasks schema: {err}"))?;
        Ok(PostgresTaskStore::new(pool))
    })
    .await??;
    Ok(Some(store))
}

/// Connects and wraps the store in a service.
///
/// # Errors
///
/// Returns an error if [`connect`] fails.
pub async fn connect_service() -> Result<Option<(Arc<PostgresTaskStore>, PgService)>, eyre::Report>
{
    Ok(connect().await?.map(|store| {
        let store = Arc::new(store);
        let service = TaskService::new(Arc::clone(&store), Arc::new(DefaultClock));
        (store, service)
    }))
}

/// Inserts a task directly through the store.
///
/// # Errors
///
/// Returns an error if the content is blank or the insert fails.
pub async fn seed(
    store: &PostgresTaskStore,
    owner: OwnerId,
    content: &str,
    status: TaskStatus,
    position: u32,
) -> Result<TaskId, eyre::Report> {
    let task = NewTask::new(owner, TaskContent::new(content)?, &DefaultClock)
        .with_status(status)
        .with_position(Position::new(position));
    Ok(store.insert(&task).await?)
}

/// Reads a column's contents and positions in display order.
///
/// # Errors
///
/// Returns an error if the column cannot be read.
pub async fn read_column(
    store: &PostgresTaskStore,
    owner: OwnerId,
    status: TaskStatus,
) -> Result<Vec<(String, u32)>, eyre::Report> {
    let tasks = store.find_by_owner_and_status(owner, status).await?;
    Ok(tasks
        .iter()
        .map(|task| (task.content().as_str().to_owned(), task.position().value()))
        .collect())
}
