//! Error types for task domain construction, parsing, and rule validation.

use super::{MajorCategoryId, MinorCategoryId, ProjectId, SystemCategoryId, TaskId, TaskNumber};
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A required text field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A text field exceeds its storage length.
    #[error("{field} is {actual} characters long, limit is {max}")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },

    /// The progress rate lies outside 0–100 percent.
    #[error("progress rate {0} hundredths of a percent is outside 0..=10000")]
    InvalidProgressRate(u32),

    /// Hours lie outside 0.00 to 9999.99.
    #[error("{0} hundredths of an hour is outside 0..=999999")]
    InvalidWorkHours(u32),

    /// The task already carries a number.
    #[error("task {task_id} is already numbered {number}")]
    NumberAlreadyAssigned {
        /// Task being numbered.
        task_id: TaskId,
        /// Number already present.
        number: TaskNumber,
    },

    /// The numbering width cannot produce a task number.
    #[error("task number width {0} is outside 1..=20")]
    InvalidNumberingWidth(usize),
}

/// Error returned while parsing enumerated task fields from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field}: {value}")]
pub struct ParseTaskFieldError {
    /// Field being parsed.
    pub field: &'static str,
    /// Rejected raw value.
    pub value: String,
}

/// Date pair checked for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRangeKind {
    /// Planned start and end dates.
    Planned,
    /// Actual start and end dates.
    Actual,
}

impl DateRangeKind {
    /// Returns the label used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Actual => "actual",
        }
    }
}

impl fmt::Display for DateRangeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Describes which link of the System → Major → Minor chain disagrees.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HierarchyMismatch {
    /// The minor category belongs to a different major category.
    #[error("minor category {minor} belongs to major category {owner}, task uses {assigned}")]
    MinorOutsideMajor {
        /// Minor category on the task.
        minor: MinorCategoryId,
        /// Major category that owns the minor category.
        owner: MajorCategoryId,
        /// Major category assigned on the task.
        assigned: MajorCategoryId,
    },

    /// The major category belongs to a different system category.
    #[error("major category {major} belongs to system category {owner}, task uses {assigned}")]
    MajorOutsideSystem {
        /// Major category on the task.
        major: MajorCategoryId,
        /// System category that owns the major category.
        owner: SystemCategoryId,
        /// System category assigned on the task.
        assigned: SystemCategoryId,
    },

    /// The system category belongs to a different project.
    #[error("system category {system} belongs to project {owner}, task is in {assigned}")]
    SystemOutsideProject {
        /// System category on the task.
        system: SystemCategoryId,
        /// Project that owns the system category.
        owner: ProjectId,
        /// Project of the task.
        assigned: ProjectId,
    },
}

/// Structural rule violations that reject a task write.
///
/// Every variant is recoverable by correcting the input and resubmitting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// A start date falls after its end date.
    #[error("{range} start date {start} is after {range} end date {end}")]
    DateOrder {
        /// Which date pair is out of order.
        range: DateRangeKind,
        /// Offending start date.
        start: NaiveDate,
        /// Offending end date.
        end: NaiveDate,
    },

    /// The category chain does not nest consistently.
    #[error("category hierarchy mismatch: {0}")]
    HierarchyMismatch(HierarchyMismatch),

    /// The parent chain loops.
    #[error("parent chain of task {task_id} revisits task {revisited}")]
    ParentCycle {
        /// Task being validated.
        task_id: TaskId,
        /// First identifier seen twice during the walk.
        revisited: TaskId,
    },

    /// A dependency links tasks from different projects.
    #[error("dependency {predecessor} -> {successor} crosses project boundaries")]
    CrossProjectDependency {
        /// Predecessor task.
        predecessor: TaskId,
        /// Successor task.
        successor: TaskId,
    },

    /// A dependency links a task to itself.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),
}

impl From<HierarchyMismatch> for TaskValidationError {
    fn from(mismatch: HierarchyMismatch) -> Self {
        Self::HierarchyMismatch(mismatch)
    }
}
