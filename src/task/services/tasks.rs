//! Task service: runs the rule engine on every write and persists the result.

use super::requests::{AddDependencyRequest, CreateTaskRequest, UpdateTaskRequest};
use crate::task::{
    domain::{
        CategoryAssignment, CategoryLabel, Effort, MajorCategory, MajorCategoryId, MinorCategory,
        MinorCategoryId, ParentLinks, ProjectId, ResolvedCategories, Schedule, SystemCategory,
        SystemCategoryId, Task, TaskDependency, TaskDomainError, TaskId, TaskNumber, TaskStatus,
        TaskTitle, TaskValidationError, WbsCode,
    },
    ports::{CategoryRepository, CategoryRepositoryError, TaskRepository, TaskRepositoryError},
    rules::{StatusDerivation, StatusRule, TaskRuleEngine, ValidationContext},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input could not be turned into domain values.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A structural rule rejected the write.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Category repository operation failed.
    #[error(transparent)]
    CategoryRepository(#[from] CategoryRepositoryError),

    /// The task does not exist or has been deleted.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The referenced parent task does not exist or has been deleted.
    #[error("parent task not found: {0}")]
    ParentNotFound(TaskId),

    /// The referenced system category does not exist.
    #[error("unknown system category: {0}")]
    UnknownSystemCategory(SystemCategoryId),

    /// The referenced major category does not exist.
    #[error("unknown major category: {0}")]
    UnknownMajorCategory(MajorCategoryId),

    /// The referenced minor category does not exist.
    #[error("unknown minor category: {0}")]
    UnknownMinorCategory(MinorCategoryId),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Orchestrates numbering, derivation, validation, and persistence.
///
/// Every create and update passes through [`TaskRuleEngine::prepare`]
/// before anything is written, so a rejected task never reaches storage.
#[derive(Clone)]
pub struct TaskService<R, K, C>
where
    R: TaskRepository,
    K: CategoryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    categories: Arc<K>,
    clock: Arc<C>,
    engine: TaskRuleEngine,
}

impl<R, K, C> TaskService<R, K, C>
where
    R: TaskRepository,
    K: CategoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service using the default rule configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, categories: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            repository,
            categories,
            clock,
            engine: TaskRuleEngine::new(),
        }
    }

    /// Replaces the rule engine.
    #[must_use]
    pub const fn with_engine(mut self, engine: TaskRuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Returns the rule engine in use.
    #[must_use]
    pub const fn engine(&self) -> &TaskRuleEngine {
        &self.engine
    }

    /// Creates and stores a task.
    ///
    /// A caller-supplied number is kept as given; otherwise the repository
    /// assigns the next number for the project while holding its numbering
    /// lock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when input is malformed, a referenced
    /// parent or category is missing, a structural rule fails, or the
    /// repository rejects the write.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let schedule = Schedule::planned(request.planned_start, request.planned_end)
            .with_actual_start(request.actual_start)
            .with_actual_end(request.actual_end);
        let wbs_code = request.wbs_code.map(WbsCode::new).transpose()?;
        let mut task = Task::new(request.project_id, title, schedule, &*self.clock)
            .with_description(request.description)
            .with_parent(request.parent_id)
            .with_categories(request.categories)
            .with_assignee(request.assignee)
            .with_status(request.status)
            .with_priority(request.priority)
            .with_progress(request.progress)
            .with_effort(Effort {
                estimated: request.estimated_hours,
                actual: request.actual_hours,
            })
            .with_wbs(wbs_code, request.level);
        if let Some(raw) = request.number {
            task = task.with_number(TaskNumber::new(raw)?);
        }

        let context = self.load_context(&task, None).await?;
        self.prepare(&mut task, None, &context)?;

        if task.number().is_some() {
            self.repository.store(&task).await?;
        } else {
            task = self
                .repository
                .store_numbered(task, self.engine.config().numbering)
                .await?;
        }
        info!(
            task_id = %task.id(),
            project_id = %task.project_id(),
            task_number = task.number().map(TaskNumber::as_str),
            status = task.status().as_str(),
            "task created"
        );
        Ok(task)
    }

    /// Applies a partial update to a live task.
    ///
    /// The persisted status before the update feeds status derivation, so
    /// clearing the actual end date of a completed task reopens it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for missing or deleted tasks
    /// and the same failures as [`Self::create`] otherwise.
    pub async fn update(
        &self,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let mut task = self.load_live(task_id).await?;
        let previous = task.status();
        let stored_parent = task.parent_id();
        apply_update(&mut task, request)?;

        let context = self.load_context(&task, stored_parent).await?;
        self.prepare(&mut task, Some(previous), &context)?;
        task.touch(&*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Soft-deletes a live task.
    ///
    /// The row is retained but leaves number scans, so its number is never
    /// reused while a higher number exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for missing or already deleted
    /// tasks, or [`TaskServiceError::Repository`] when the write fails.
    pub async fn delete(&self, task_id: TaskId) -> TaskServiceResult<()> {
        let mut task = self.load_live(task_id).await?;
        task.mark_deleted(&*self.clock);
        self.repository.update(&task).await?;
        info!(
            task_id = %task.id(),
            project_id = %task.project_id(),
            task_number = task.number().map(TaskNumber::as_str),
            "task soft-deleted"
        );
        Ok(())
    }

    /// Finds a live task by identifier.
    ///
    /// Returns `Ok(None)` for unknown or deleted tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskServiceResult<Option<Task>> {
        let task = self.repository.find_by_id(task_id).await?;
        Ok(task.filter(|found| !found.is_deleted()))
    }

    /// Finds a live task by its project-scoped number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn find_by_number(
        &self,
        project_id: ProjectId,
        number: &TaskNumber,
    ) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_number(project_id, number).await?)
    }

    /// Lists live tasks of a project ordered by number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_by_project(project_id).await?)
    }

    /// Links two live tasks with a scheduling dependency.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when either task is missing,
    /// [`TaskServiceError::Validation`] for cross-project or self links, or
    /// [`TaskServiceError::Repository`] when the pair is already linked.
    pub async fn add_dependency(
        &self,
        request: AddDependencyRequest,
    ) -> TaskServiceResult<TaskDependency> {
        let predecessor = self.load_live(request.predecessor).await?;
        let successor = self.load_live(request.successor).await?;
        if let Err(err) = self.engine.validate_dependency(&predecessor, &successor) {
            warn!(
                predecessor = %predecessor.id(),
                successor = %successor.id(),
                error = %err,
                "dependency rejected"
            );
            return Err(err.into());
        }

        let dependency = TaskDependency::new(
            predecessor.id(),
            successor.id(),
            request.kind,
            request.lag_days,
        );
        self.repository.store_dependency(&dependency).await?;
        Ok(dependency)
    }

    /// Registers a system category for a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid label or
    /// [`TaskServiceError::CategoryRepository`] for a duplicate code.
    pub async fn register_system_category(
        &self,
        project_id: ProjectId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> TaskServiceResult<SystemCategory> {
        let category = SystemCategory::new(project_id, CategoryLabel::new(code, name)?);
        self.categories.store_system(&category).await?;
        Ok(category)
    }

    /// Registers a major category under an existing system category.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UnknownSystemCategory`] when the parent
    /// does not exist, plus the failures of
    /// [`Self::register_system_category`].
    pub async fn register_major_category(
        &self,
        system_category_id: SystemCategoryId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> TaskServiceResult<MajorCategory> {
        let label = CategoryLabel::new(code, name)?;
        self.categories
            .find_system(system_category_id)
            .await?
            .ok_or(TaskServiceError::UnknownSystemCategory(system_category_id))?;
        let category = MajorCategory::new(system_category_id, label);
        self.categories.store_major(&category).await?;
        Ok(category)
    }

    /// Registers a minor category under an existing major category.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UnknownMajorCategory`] when the parent
    /// does not exist, plus the failures of
    /// [`Self::register_system_category`].
    pub async fn register_minor_category(
        &self,
        major_category_id: MajorCategoryId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> TaskServiceResult<MinorCategory> {
        let label = CategoryLabel::new(code, name)?;
        self.categories
            .find_major(major_category_id)
            .await?
            .ok_or(TaskServiceError::UnknownMajorCategory(major_category_id))?;
        let category = MinorCategory::new(major_category_id, label);
        self.categories.store_minor(&category).await?;
        Ok(category)
    }

    async fn load_live(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))
    }

    async fn load_context(
        &self,
        task: &Task,
        stored_parent: Option<TaskId>,
    ) -> TaskServiceResult<ValidationContext> {
        Ok(ValidationContext {
            categories: self.resolve_categories(task.categories()).await?,
            parents: self.load_parent_links(task.parent_id(), stored_parent).await?,
        })
    }

    async fn resolve_categories(
        &self,
        assignment: CategoryAssignment,
    ) -> TaskServiceResult<ResolvedCategories> {
        let mut resolved = ResolvedCategories::default();
        if let Some(id) = assignment.system {
            let found = self.categories.find_system(id).await?;
            resolved.system = Some(found.ok_or(TaskServiceError::UnknownSystemCategory(id))?);
        }
        if let Some(id) = assignment.major {
            let found = self.categories.find_major(id).await?;
            resolved.major = Some(found.ok_or(TaskServiceError::UnknownMajorCategory(id))?);
        }
        if let Some(id) = assignment.minor {
            let found = self.categories.find_minor(id).await?;
            resolved.minor = Some(found.ok_or(TaskServiceError::UnknownMinorCategory(id))?);
        }
        Ok(resolved)
    }

    /// Loads the ancestor chain of `parent_id`.
    ///
    /// A newly chosen parent must be live. A parent kept from the stored
    /// record only has to exist, so children of a soft-deleted task stay
    /// editable.
    async fn load_parent_links(
        &self,
        parent_id: Option<TaskId>,
        stored_parent: Option<TaskId>,
    ) -> TaskServiceResult<ParentLinks> {
        let Some(parent_id) = parent_id else {
            return Ok(ParentLinks::new());
        };
        let parent = self.repository.find_by_id(parent_id).await?;
        let acceptable = if stored_parent == Some(parent_id) {
            parent.is_some()
        } else {
            parent.is_some_and(|found| !found.is_deleted())
        };
        if !acceptable {
            return Err(TaskServiceError::ParentNotFound(parent_id));
        }
        Ok(self.repository.parent_links(parent_id).await?)
    }

    fn prepare(
        &self,
        task: &mut Task,
        previous: Option<TaskStatus>,
        context: &ValidationContext,
    ) -> TaskServiceResult<StatusDerivation> {
        let derivation = self
            .engine
            .prepare(task, previous, context)
            .inspect_err(|err| {
                warn!(
                    task_id = %task.id(),
                    project_id = %task.project_id(),
                    error = %err,
                    "task write rejected"
                );
            })?;
        debug!(
            task_id = %task.id(),
            rule = derivation.rule.map(StatusRule::as_str),
            status_before = derivation.status_before.as_str(),
            status_after = derivation.status_after.as_str(),
            progress_after = derivation.progress_after.hundredths(),
            "status derived"
        );
        Ok(derivation)
    }
}

fn apply_update(task: &mut Task, request: UpdateTaskRequest) -> Result<(), TaskDomainError> {
    if let Some(title) = request.title {
        task.set_title(TaskTitle::new(title)?);
    }
    if let Some(description) = request.description {
        task.set_description(description);
    }
    if let Some(parent_id) = request.parent_id {
        task.set_parent(parent_id);
    }
    if let Some(categories) = request.categories {
        task.set_categories(categories);
    }
    if let Some(status) = request.status {
        task.set_status(status);
    }
    if let Some(priority) = request.priority {
        task.set_priority(priority);
    }
    if let Some(progress) = request.progress {
        task.set_progress(progress);
    }
    if let Some(assignee) = request.assignee {
        task.set_assignee(assignee);
    }
    if let Some(wbs_code) = request.wbs_code {
        task.set_wbs_code(wbs_code.map(WbsCode::new).transpose()?);
    }
    if let Some(level) = request.level {
        task.set_level(level);
    }
    let effort = task.effort();
    task.set_effort(Effort {
        estimated: request.estimated_hours.unwrap_or(effort.estimated),
        actual: request.actual_hours.unwrap_or(effort.actual),
    });

    let current = *task.schedule();
    let (planned_start, planned_end) = request
        .planned
        .unwrap_or((current.planned_start(), current.planned_end()));
    let schedule = Schedule::planned(planned_start, planned_end)
        .with_actual_start(request.actual_start.unwrap_or(current.actual_start()))
        .with_actual_end(request.actual_end.unwrap_or(current.actual_end()));
    task.set_schedule(schedule);
    Ok(())
}
