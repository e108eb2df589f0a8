//! Domain model for task identity, status, and hierarchy.
//!
//! The task domain models project-scoped numbering, status and progress,
//! category masters, parent links, and dependencies while keeping all
//! infrastructure concerns outside of the domain boundary.

mod category;
mod dependency;
mod effort;
mod error;
mod hierarchy;
mod ids;
mod number;
mod schedule;
mod status;
mod task;
mod text;

pub use category::{
    CategoryAssignment, CategoryLabel, MajorCategory, MinorCategory, ResolvedCategories,
    SystemCategory,
};
pub use dependency::{DependencyKind, TaskDependency};
pub use effort::{Effort, WbsCode, WorkHours};
pub use error::{
    DateRangeKind, HierarchyMismatch, ParseTaskFieldError, TaskDomainError, TaskValidationError,
};
pub use hierarchy::ParentLinks;
pub use ids::{MajorCategoryId, MinorCategoryId, ProjectId, SystemCategoryId, TaskId, UserId};
pub use number::{DEFAULT_NUMBER_WIDTH, NumberingPolicy, TaskNumber};
pub use schedule::Schedule;
pub use status::{ProgressRate, TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskTitle};
