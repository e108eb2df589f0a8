//! Diesel row models for task and category persistence.

use super::schema::{
    major_categories, minor_categories, system_categories, task_dependencies, tasks,
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Project-scoped task number.
    pub task_number: String,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Optional parent task.
    pub parent_id: Option<uuid::Uuid>,
    /// Optional system category.
    pub system_category_id: Option<uuid::Uuid>,
    /// Optional major category.
    pub major_category_id: Option<uuid::Uuid>,
    /// Optional minor category.
    pub minor_category_id: Option<uuid::Uuid>,
    /// Optional assigned user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Task status.
    pub status: String,
    /// Task priority.
    pub priority: String,
    /// Progress in hundredths of a percent.
    pub progress_hundredths: i16,
    /// Planned start date.
    pub planned_start_date: NaiveDate,
    /// Planned end date.
    pub planned_end_date: NaiveDate,
    /// Actual start date.
    pub actual_start_date: Option<NaiveDate>,
    /// Actual end date.
    pub actual_end_date: Option<NaiveDate>,
    /// Estimated hours in hundredths.
    pub estimated_hours_hundredths: i32,
    /// Actual hours in hundredths.
    pub actual_hours_hundredths: i32,
    /// WBS code, empty when unset.
    pub wbs_code: String,
    /// Hierarchy level in the work breakdown.
    pub level: i32,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for task records.
///
/// `None` values are written as `NULL` so clearing an actual date or parent
/// reaches storage.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRecord {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Project-scoped task number.
    pub task_number: String,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Optional parent task.
    pub parent_id: Option<uuid::Uuid>,
    /// Optional system category.
    pub system_category_id: Option<uuid::Uuid>,
    /// Optional major category.
    pub major_category_id: Option<uuid::Uuid>,
    /// Optional minor category.
    pub minor_category_id: Option<uuid::Uuid>,
    /// Optional assigned user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Task status.
    pub status: String,
    /// Task priority.
    pub priority: String,
    /// Progress in hundredths of a percent.
    pub progress_hundredths: i16,
    /// Planned start date.
    pub planned_start_date: NaiveDate,
    /// Planned end date.
    pub planned_end_date: NaiveDate,
    /// Actual start date.
    pub actual_start_date: Option<NaiveDate>,
    /// Actual end date.
    pub actual_end_date: Option<NaiveDate>,
    /// Estimated hours in hundredths.
    pub estimated_hours_hundredths: i32,
    /// Actual hours in hundredths.
    pub actual_hours_hundredths: i32,
    /// WBS code, empty when unset.
    pub wbs_code: String,
    /// Hierarchy level in the work breakdown.
    pub level: i32,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One edge of the parent hierarchy returned by the ancestor query.
#[derive(Debug, Clone, QueryableByName)]
pub struct ParentLinkRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Parent of the task.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub parent_id: Option<uuid::Uuid>,
}

/// Row model for task dependencies.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_dependencies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DependencyRow {
    /// Predecessor task.
    pub predecessor_id: uuid::Uuid,
    /// Successor task.
    pub successor_id: uuid::Uuid,
    /// Dependency kind code.
    pub kind: String,
    /// Lag in days.
    pub lag_days: i32,
}

/// Row model for system categories.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = system_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SystemCategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Category code.
    pub code: String,
    /// Category name.
    pub name: String,
}

/// Row model for major categories.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = major_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MajorCategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Owning system category.
    pub system_category_id: uuid::Uuid,
    /// Category code.
    pub code: String,
    /// Category name.
    pub name: String,
}

/// Row model for minor categories.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = minor_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MinorCategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Owning major category.
    pub major_category_id: uuid::Uuid,
    /// Category code.
    pub code: String,
    /// Category name.
    pub name: String,
}
