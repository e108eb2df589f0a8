//! Request payloads accepted by the task service.

use crate::task::domain::{
    CategoryAssignment, DependencyKind, ProgressRate, ProjectId, TaskId, TaskPriority, TaskStatus,
    UserId, WorkHours,
};
use chrono::NaiveDate;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) project_id: ProjectId,
    pub(super) title: String,
    pub(super) planned_start: NaiveDate,
    pub(super) planned_end: NaiveDate,
    pub(super) number: Option<String>,
    pub(super) description: String,
    pub(super) parent_id: Option<TaskId>,
    pub(super) categories: CategoryAssignment,
    pub(super) assignee: Option<UserId>,
    pub(super) status: TaskStatus,
    pub(super) priority: TaskPriority,
    pub(super) progress: ProgressRate,
    pub(super) actual_start: Option<NaiveDate>,
    pub(super) actual_end: Option<NaiveDate>,
    pub(super) estimated_hours: WorkHours,
    pub(super) actual_hours: WorkHours,
    pub(super) wbs_code: Option<String>,
    pub(super) level: u16,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        planned_start: NaiveDate,
        planned_end: NaiveDate,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            planned_start,
            planned_end,
            number: None,
            description: String::new(),
            parent_id: None,
            categories: CategoryAssignment::default(),
            assignee: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            progress: ProgressRate::ZERO,
            actual_start: None,
            actual_end: None,
            estimated_hours: WorkHours::ZERO,
            actual_hours: WorkHours::ZERO,
            wbs_code: None,
            level: 0,
        }
    }

    /// Supplies an explicit task number instead of generating one.
    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
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
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the category references.
    #[must_use]
    pub const fn with_categories(mut self, categories: CategoryAssignment) -> Self {
        self.categories = categories;
        self
    }

    /// Sets the initial status, subject to derivation.
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

    /// Sets the actual start date.
    #[must_use]
    pub const fn with_actual_start(mut self, date: NaiveDate) -> Self {
        self.actual_start = Some(date);
        self
    }

    /// Sets the actual end date.
    #[must_use]
    pub const fn with_actual_end(mut self, date: NaiveDate) -> Self {
        self.actual_end = Some(date);
        self
    }

    /// Assigns the task to a user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets estimated and actual hours.
    #[must_use]
    pub const fn with_hours(mut self, estimated: WorkHours, actual: WorkHours) -> Self {
        self.estimated_hours = estimated;
        self.actual_hours = actual;
        self
    }

    /// Places the task in the work breakdown.
    #[must_use]
    pub fn with_wbs(mut self, code: impl Into<String>, level: u16) -> Self {
        self.wbs_code = Some(code.into());
        self.level = level;
        self
    }
}

/// Partial update for an existing task.
///
/// Fields left unset keep their stored value. Nullable fields take an
/// `Option` so they can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) parent_id: Option<Option<TaskId>>,
    pub(super) categories: Option<CategoryAssignment>,
    pub(super) status: Option<TaskStatus>,
    pub(super) priority: Option<TaskPriority>,
    pub(super) progress: Option<ProgressRate>,
    pub(super) planned: Option<(NaiveDate, NaiveDate)>,
    pub(super) actual_start: Option<Option<NaiveDate>>,
    pub(super) actual_end: Option<Option<NaiveDate>>,
    pub(super) assignee: Option<Option<UserId>>,
    pub(super) estimated_hours: Option<WorkHours>,
    pub(super) actual_hours: Option<WorkHours>,
    pub(super) wbs_code: Option<Option<String>>,
    pub(super) level: Option<u16>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces or clears the parent task.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: Option<TaskId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Replaces the category references.
    #[must_use]
    pub const fn with_categories(mut self, categories: CategoryAssignment) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Replaces the status, subject to derivation.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the progress rate.
    #[must_use]
    pub const fn with_progress(mut self, progress: ProgressRate) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Replaces both planned dates.
    #[must_use]
    pub const fn with_planned_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.planned = Some((start, end));
        self
    }

    /// Replaces or clears the actual start date.
    #[must_use]
    pub const fn with_actual_start(mut self, date: Option<NaiveDate>) -> Self {
        self.actual_start = Some(date);
        self
    }

    /// Replaces or clears the actual end date.
    #[must_use]
    pub const fn with_actual_end(mut self, date: Option<NaiveDate>) -> Self {
        self.actual_end = Some(date);
        self
    }

    /// Replaces or clears the assigned user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: Option<UserId>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Replaces the estimated hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: WorkHours) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Replaces the actual hours.
    #[must_use]
    pub const fn with_actual_hours(mut self, hours: WorkHours) -> Self {
        self.actual_hours = Some(hours);
        self
    }

    /// Replaces or clears the WBS code.
    #[must_use]
    pub fn with_wbs_code(mut self, code: Option<String>) -> Self {
        self.wbs_code = Some(code);
        self
    }

    /// Replaces the hierarchy level.
    #[must_use]
    pub const fn with_level(mut self, level: u16) -> Self {
        self.level = Some(level);
        self
    }
}

/// Request payload for linking two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddDependencyRequest {
    pub(super) predecessor: TaskId,
    pub(super) successor: TaskId,
    pub(super) kind: DependencyKind,
    pub(super) lag_days: i32,
}

impl AddDependencyRequest {
    /// Creates a finish-to-start dependency with no lag.
    #[must_use]
    pub const fn new(predecessor: TaskId, successor: TaskId) -> Self {
        Self {
            predecessor,
            successor,
            kind: DependencyKind::FinishToStart,
            lag_days: 0,
        }
    }

    /// Sets the dependency kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the lag in days; negative values express lead time.
    #[must_use]
    pub const fn with_lag_days(mut self, lag_days: i32) -> Self {
        self.lag_days = lag_days;
        self
    }
}
