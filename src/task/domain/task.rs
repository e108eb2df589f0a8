//! Task aggregate root.

use super::{
    CategoryAssignment, Effort, ProgressRate, ProjectId, Schedule, TaskDomainError, TaskId,
    TaskNumber, TaskPriority, TaskStatus, UserId, WbsCode, text::bounded_text,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum title length, matching `VARCHAR(200)`.
const MAX_TITLE_LENGTH: usize = 200;

/// Validated task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyField`] or
    /// [`TaskDomainError::FieldTooLong`] for blank or overlong titles.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        bounded_text("task title", value.into(), MAX_TITLE_LENGTH).map(Self)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    number: Option<TaskNumber>,
    title: TaskTitle,
    description: String,
    parent_id: Option<TaskId>,
    categories: CategoryAssignment,
    assignee: Option<UserId>,
    status: TaskStatus,
    priority: TaskPriority,
    progress: ProgressRate,
    schedule: Schedule,
    effort: Effort,
    wbs_code: Option<WbsCode>,
    level: u16,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted task number.
    pub number: TaskNumber,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted parent reference.
    pub parent_id: Option<TaskId>,
    /// Persisted category references.
    pub categories: CategoryAssignment,
    /// Persisted assignee.
    pub assignee: Option<UserId>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted progress.
    pub progress: ProgressRate,
    /// Persisted dates.
    pub schedule: Schedule,
    /// Persisted estimated and actual hours.
    pub effort: Effort,
    /// Persisted WBS code.
    pub wbs_code: Option<WbsCode>,
    /// Persisted hierarchy level.
    pub level: u16,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an unsaved task with default status, priority, and progress.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        schedule: Schedule,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id,
            number: None,
            title,
            description: String::new(),
            parent_id: None,
            categories: CategoryAssignment::default(),
            assignee: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            progress: ProgressRate::ZERO,
            schedule,
            effort: Effort::default(),
            wbs_code: None,
            level: 0,
            is_deleted: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            number: Some(data.number),
            title: data.title,
            description: data.description,
            parent_id: data.parent_id,
            categories: data.categories,
            assignee: data.assignee,
            status: data.status,
            priority: data.priority,
            progress: data.progress,
            schedule: data.schedule,
            effort: data.effort,
            wbs_code: data.wbs_code,
            level: data.level,
            is_deleted: data.is_deleted,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task number, absent until first save.
    #[must_use]
    pub const fn number(&self) -> Option<&TaskNumber> {
        self.number.as_ref()
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parent task, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns the category references.
    #[must_use]
    pub const fn categories(&self) -> CategoryAssignment {
        self.categories
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the progress rate.
    #[must_use]
    pub const fn progress(&self) -> ProgressRate {
        self.progress
    }

    /// Returns the planned and actual dates.
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the estimated and actual hours.
    #[must_use]
    pub const fn effort(&self) -> Effort {
        self.effort
    }

    /// Returns the WBS code, if any.
    #[must_use]
    pub const fn wbs_code(&self) -> Option<&WbsCode> {
        self.wbs_code.as_ref()
    }

    /// Returns the depth recorded in the work breakdown.
    #[must_use]
    pub const fn level(&self) -> u16 {
        self.level
    }

    /// Returns `true` once the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets a caller-chosen task number before first save.
    #[must_use]
    pub fn with_number(mut self, number: TaskNumber) -> Self {
        self.number = Some(number);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the parent task.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: Option<TaskId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Sets the category references.
    #[must_use]
    pub const fn with_categories(mut self, categories: CategoryAssignment) -> Self {
        self.categories = categories;
        self
    }

    /// Sets the caller-supplied status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the progress rate.
    #[must_use]
    pub const fn with_progress(mut self, progress: ProgressRate) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the assigned user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: Option<UserId>) -> Self {
        self.assignee = assignee;
        self
    }

    /// Sets the estimated and actual hours.
    #[must_use]
    pub const fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }

    /// Places the task in the work breakdown.
    #[must_use]
    pub fn with_wbs(mut self, wbs_code: Option<WbsCode>, level: u16) -> Self {
        self.wbs_code = wbs_code;
        self.level = level;
        self
    }

    /// Assigns the generated number at first save.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NumberAlreadyAssigned`] when the task is
    /// already numbered; explicit numbers are never replaced.
    pub fn assign_number(&mut self, number: TaskNumber) -> Result<(), TaskDomainError> {
        if let Some(existing) = &self.number {
            return Err(TaskDomainError::NumberAlreadyAssigned {
                task_id: self.id,
                number: existing.clone(),
            });
        }
        self.number = Some(number);
        Ok(())
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: TaskTitle) {
        self.title = title;
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the parent reference.
    pub const fn set_parent(&mut self, parent_id: Option<TaskId>) {
        self.parent_id = parent_id;
    }

    /// Replaces the category references.
    pub const fn set_categories(&mut self, categories: CategoryAssignment) {
        self.categories = categories;
    }

    /// Replaces or clears the assigned user.
    pub const fn set_assignee(&mut self, assignee: Option<UserId>) {
        self.assignee = assignee;
    }

    /// Replaces the estimated and actual hours.
    pub const fn set_effort(&mut self, effort: Effort) {
        self.effort = effort;
    }

    /// Replaces or clears the WBS code.
    pub fn set_wbs_code(&mut self, wbs_code: Option<WbsCode>) {
        self.wbs_code = wbs_code;
    }

    /// Replaces the hierarchy level.
    pub const fn set_level(&mut self, level: u16) {
        self.level = level;
    }

    /// Replaces the status; derivation may still override it on save.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Replaces the progress rate.
    pub const fn set_progress(&mut self, progress: ProgressRate) {
        self.progress = progress;
    }

    /// Replaces the planned and actual dates.
    pub const fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }

    /// Flags the task as deleted; the row is retained.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        self.is_deleted = true;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
