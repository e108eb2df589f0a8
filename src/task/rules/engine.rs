//! Rule engine applied to every task write.

use super::{
    config::TaskRulesConfig,
    derivation::{StatusDerivation, derive_status},
    validation::{
        ValidationContext, validate_actual_dates, validate_category_chain, validate_dependency,
        validate_parent_chain, validate_planned_dates,
    },
};
use crate::task::domain::{Task, TaskNumber, TaskStatus, TaskValidationError};

/// Numbering, status derivation, and structural validation for tasks.
///
/// The engine is stateless apart from its configuration and is safe to
/// share across threads.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mockable::DefaultClock;
/// use tasklane::task::domain::{ProjectId, Schedule, Task, TaskStatus, TaskTitle};
/// use tasklane::task::rules::{TaskRuleEngine, ValidationContext};
///
/// let engine = TaskRuleEngine::new();
/// let start = NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date");
/// let end = NaiveDate::from_ymd_opt(2025, 2, 10).expect("valid date");
/// let schedule = Schedule::planned(start, end).with_actual_end(Some(end));
/// let mut task = Task::new(
///     ProjectId::new(),
///     TaskTitle::new("Write release notes").expect("valid title"),
///     schedule,
///     &DefaultClock,
/// );
///
/// engine
///     .prepare(&mut task, None, &ValidationContext::default())
///     .expect("valid task");
/// assert_eq!(task.status(), TaskStatus::Completed);
/// assert!(task.progress().is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskRuleEngine {
    config: TaskRulesConfig,
}

impl TaskRuleEngine {
    /// Creates an engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with custom configuration.
    #[must_use]
    pub const fn with_config(config: TaskRulesConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskRulesConfig {
        &self.config
    }

    /// Derives the number that follows the project's current maximum.
    ///
    /// Callers must hold the project's numbering lock between reading
    /// `current_max` and persisting the result.
    #[must_use]
    pub fn next_number(&self, current_max: Option<&TaskNumber>) -> TaskNumber {
        self.config.numbering.next_after(current_max)
    }

    /// Applies the status derivation rules to `task`.
    pub fn derive_status(&self, task: &mut Task, previous: Option<TaskStatus>) -> StatusDerivation {
        derive_status(task, previous)
    }

    /// Runs every structural check against `task`.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskValidationError`] encountered, checking dates,
    /// then categories, then the parent chain.
    pub fn validate(
        &self,
        task: &Task,
        context: &ValidationContext,
    ) -> Result<(), TaskValidationError> {
        validate_planned_dates(task.schedule())?;
        validate_actual_dates(task.schedule())?;
        validate_category_chain(task, &context.categories)?;
        validate_parent_chain(task, &context.parents)
    }

    /// Validates `task`, then derives its status.
    ///
    /// Nothing on `task` changes when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when any structural check fails.
    pub fn prepare(
        &self,
        task: &mut Task,
        previous: Option<TaskStatus>,
        context: &ValidationContext,
    ) -> Result<StatusDerivation, TaskValidationError> {
        self.validate(task, context)?;
        Ok(self.derive_status(task, previous))
    }

    /// Validates a dependency between two loaded tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] for cross-project or self
    /// dependencies.
    pub fn validate_dependency(
        &self,
        predecessor: &Task,
        successor: &Task,
    ) -> Result<(), TaskValidationError> {
        validate_dependency(predecessor, successor)
    }
}
