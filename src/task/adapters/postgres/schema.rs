//! Diesel schema for task and category persistence.

diesel::table! {
    /// Task records with project-scoped numbers.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Project-scoped task number.
        #[max_length = 20]
        task_number -> Varchar,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Optional parent task.
        parent_id -> Nullable<Uuid>,
        /// Optional system category.
        system_category_id -> Nullable<Uuid>,
        /// Optional major category.
        major_category_id -> Nullable<Uuid>,
        /// Optional minor category.
        minor_category_id -> Nullable<Uuid>,
        /// Optional assigned user.
        assignee_id -> Nullable<Uuid>,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Task priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Progress in hundredths of a percent.
        progress_hundredths -> Int2,
        /// Planned start date.
        planned_start_date -> Date,
        /// Planned end date.
        planned_end_date -> Date,
        /// Actual start date.
        actual_start_date -> Nullable<Date>,
        /// Actual end date.
        actual_end_date -> Nullable<Date>,
        /// Estimated hours in hundredths.
        estimated_hours_hundredths -> Int4,
        /// Actual hours in hundredths.
        actual_hours_hundredths -> Int4,
        /// WBS code, empty when unset.
        #[max_length = 50]
        wbs_code -> Varchar,
        /// Hierarchy level in the work breakdown.
        level -> Int4,
        /// Soft-delete flag.
        is_deleted -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Scheduling dependencies between tasks.
    task_dependencies (predecessor_id, successor_id) {
        /// Predecessor task.
        predecessor_id -> Uuid,
        /// Successor task.
        successor_id -> Uuid,
        /// Dependency kind code.
        #[max_length = 2]
        kind -> Varchar,
        /// Lag in days.
        lag_days -> Int4,
    }
}

diesel::table! {
    /// System-level category masters.
    system_categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Category code.
        #[max_length = 20]
        code -> Varchar,
        /// Category name.
        #[max_length = 100]
        name -> Varchar,
    }
}

diesel::table! {
    /// Major category masters.
    major_categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Owning system category.
        system_category_id -> Uuid,
        /// Category code.
        #[max_length = 20]
        code -> Varchar,
        /// Category name.
        #[max_length = 100]
        name -> Varchar,
    }
}

diesel::table! {
    /// Minor category masters.
    minor_categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Owning major category.
        major_category_id -> Uuid,
        /// Category code.
        #[max_length = 20]
        code -> Varchar,
        /// Category name.
        #[max_length = 100]
        name -> Varchar,
    }
}

diesel::joinable!(major_categories -> system_categories (system_category_id));
diesel::joinable!(minor_categories -> major_categories (major_category_id));

diesel::allow_tables_to_appear_in_same_query!(
    tasks,
    task_dependencies,
    system_categories,
    major_categories,
    minor_categories,
);
