//! Shared helpers for `PostgreSQL` integration tests.

use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use std::sync::Arc;
use tasklane::task::{
    adapters::postgres::{PostgresCategoryRepository, PostgresTaskRepository, TaskPgPool},
    domain::ProjectId,
    services::{CreateTaskRequest, TaskService},
};
use tokio::runtime::Runtime;

/// Boxed error used by the setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service wired to the `PostgreSQL` adapters.
pub type PgService = TaskService<PostgresTaskRepository, PostgresCategoryRepository, DefaultClock>;

/// SQL creating the task and category tables.
pub const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-18-000000_create_task_tables/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "tasklane_test_template";

/// Creates a multi-threaded runtime so blocking queries run in parallel.
#[must_use]
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_TABLES_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Test database cloned from the template and dropped on scope exit.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
}

impl TestDatabase {
    /// Clones the template into a fresh database.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the clone cannot be created.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> Result<Self, BoxError> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| Box::new(e) as BoxError)?;
        Ok(Self { cluster, name })
    }

    /// Builds a connection pool of `max_size` connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn pool(&self, max_size: u32) -> Result<TaskPgPool, BoxError> {
        let url = self.cluster.connection().database_url(&self.name);
        Pool::builder()
            .max_size(max_size)
            .build(ConnectionManager::<PgConnection>::new(url))
            .map_err(|e| Box::new(e) as BoxError)
    }

    /// Wires a service over a single-connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn service(&self) -> Result<PgService, BoxError> {
        Ok(service_over(self.pool(1)?))
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.name.as_str()) {
            tracing::warn!(database = %self.name, error = %e, "failed to drop test database");
        }
    }
}

/// Wires a service over both `PostgreSQL` repositories sharing `pool`.
#[must_use]
pub fn service_over(pool: TaskPgPool) -> PgService {
    TaskService::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresCategoryRepository::new(pool)),
        Arc::new(DefaultClock),
    )
}

/// Builds a calendar date.
///
/// # Panics
///
/// Panics when the date does not exist.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Builds a create request planned for 1 to 10 February 2025.
#[must_use]
pub fn planned(project_id: ProjectId, title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(project_id, title, date(2025, 2, 1), date(2025, 2, 10))
}
