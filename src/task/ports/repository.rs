//! Repository port for task persistence, numbering, and hierarchy lookup.

use crate::task::domain::{
    NumberingPolicy, ParentLinks, ProjectId, Task, TaskDependency, TaskId, TaskNumber,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Soft-deleted tasks stay in storage. They are returned by
/// [`TaskRepository::find_by_id`] and [`TaskRepository::parent_links`] but
/// excluded from number scans, number lookups, and project listings.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task that already carries a caller-supplied number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::MissingTaskNumber`] when the task is
    /// unnumbered, [`TaskRepositoryError::DuplicateTask`] when the ID exists,
    /// or [`TaskRepositoryError::DuplicateTaskNumber`] when a live task in the
    /// project already uses the number.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Numbers and stores a new task in one exclusive per-project scope.
    ///
    /// Implementations read the project's current maximum number among
    /// non-deleted tasks, derive the next number with `policy`, and insert
    /// the task before any other numbering request for the same project can
    /// read the maximum. Returns the stored task carrying its number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the ID exists or
    /// [`TaskRepositoryError::Persistence`] when the scope cannot be
    /// acquired.
    async fn store_numbered(
        &self,
        task: Task,
        policy: NumberingPolicy,
    ) -> TaskRepositoryResult<Task>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier, including soft-deleted tasks.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a live task by its project-scoped number.
    async fn find_by_number(
        &self,
        project_id: ProjectId,
        number: &TaskNumber,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Lists live tasks of a project ordered by number.
    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Loads the parent adjacency for `start` and all of its ancestors.
    ///
    /// Loops already present in storage terminate the load rather than
    /// recursing forever.
    async fn parent_links(&self, start: TaskId) -> TaskRepositoryResult<ParentLinks>;

    /// Stores a dependency between two tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateDependency`] when the pair is
    /// already linked.
    async fn store_dependency(&self, dependency: &TaskDependency) -> TaskRepositoryResult<()>;

    /// Returns dependencies in which the task is predecessor or successor.
    async fn find_dependencies(&self, task_id: TaskId)
    -> TaskRepositoryResult<Vec<TaskDependency>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A live task in the project already uses the number.
    #[error("task number {number} already used in project {project_id}")]
    DuplicateTaskNumber {
        /// Project scope of the number.
        project_id: ProjectId,
        /// Conflicting number.
        number: TaskNumber,
    },

    /// A task reached explicit storage without a number.
    #[error("task {0} has no task number")]
    MissingTaskNumber(TaskId),

    /// The pair of tasks is already linked.
    #[error("dependency {predecessor} -> {successor} already exists")]
    DuplicateDependency {
        /// Predecessor task.
        predecessor: TaskId,
        /// Successor task.
        successor: TaskId,
    },

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
