//! Shared test helpers for in-memory integration tests.

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use tasklane::task::{
    adapters::memory::{InMemoryCategoryRepository, InMemoryTaskRepository},
    domain::ProjectId,
    services::{CreateTaskRequest, TaskService},
};

/// Service wired to in-memory adapters.
pub type MemoryService =
    TaskService<InMemoryTaskRepository, InMemoryCategoryRepository, DefaultClock>;

/// Bundles a service with the task repository it writes to.
pub struct Harness {
    /// Service under test.
    pub service: Arc<MemoryService>,
    /// Repository shared with the service.
    pub repository: Arc<InMemoryTaskRepository>,
}

/// Provides a fresh service and repository for each test.
#[fixture]
pub fn harness() -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = TaskService::new(
        Arc::clone(&repository),
        Arc::new(InMemoryCategoryRepository::new()),
        Arc::new(DefaultClock),
    );
    Harness {
        service: Arc::new(service),
        repository,
    }
}

/// Provides a project identifier for tests.
#[fixture]
pub fn project() -> ProjectId {
    ProjectId::new()
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
