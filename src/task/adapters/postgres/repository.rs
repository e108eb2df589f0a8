//! `PostgreSQL` repository implementation for task storage.

use super::{
    blocking::{TaskPgPool, with_connection},
    models::{DependencyRow, ParentLinkRow, TaskRecord, TaskRow},
    schema::{task_dependencies, tasks},
};
use crate::task::{
    domain::{
        CategoryAssignment, DependencyKind, Effort, MajorCategoryId, MinorCategoryId,
        NumberingPolicy, ParentLinks, PersistedTaskData, ProgressRate, ProjectId, Schedule,
        SystemCategoryId, Task, TaskDependency, TaskId, TaskNumber, TaskPriority, TaskStatus,
        TaskTitle, UserId, WbsCode, WorkHours,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Integer, Text};

/// Partial unique index over `(project_id, task_number)` for live tasks.
const LIVE_NUMBER_CONSTRAINT: &str = "idx_tasks_project_number_live";

/// Ancestor walk that stops on loops because `UNION` drops repeated rows.
const PARENT_CHAIN_SQL: &str = concat!(
    "WITH RECURSIVE chain(id, parent_id) AS (",
    "SELECT id, parent_id FROM tasks WHERE id = $1 ",
    "UNION ",
    "SELECT t.id, t.parent_id FROM tasks t JOIN chain c ON t.id = c.parent_id",
    ") SELECT id, parent_id FROM chain",
);

/// `PostgreSQL`-backed task repository.
///
/// Numbering takes a transaction-scoped advisory lock keyed on the project
/// and row-locks the current maximum, so concurrent creations across
/// processes are serialized per project.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &TaskPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        with_connection(
            &self.pool,
            f,
            TaskRepositoryError::persistence,
            TaskRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let record = to_record(task)?;
        self.run_blocking(move |connection| insert_task(connection, &record))
            .await
    }

    async fn store_numbered(
        &self,
        mut task: Task,
        policy: NumberingPolicy,
    ) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                lock_project_numbering(tx, task.project_id())?;
                let current_max = current_max_number(tx, task.project_id())?;
                task.assign_number(policy.next_after(current_max.as_ref()))
                    .map_err(TaskRepositoryError::persistence)?;
                insert_task(tx, &to_record(&task)?)?;
                Ok(task)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(record.id))
                .set(&record)
                .execute(connection)
                .map_err(|err| map_task_write_error(err, &record))?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_number(
        &self,
        project_id: ProjectId,
        number: &TaskNumber,
    ) -> TaskRepositoryResult<Option<Task>> {
        let lookup = number.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .filter(tasks::task_number.eq(lookup))
                .filter(tasks::is_deleted.eq(false))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .filter(tasks::is_deleted.eq(false))
                .order((
                    sql::<Integer>("char_length(task_number)").asc(),
                    tasks::task_number.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn parent_links(&self, start: TaskId) -> TaskRepositoryResult<ParentLinks> {
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(PARENT_CHAIN_SQL)
                .bind::<diesel::sql_types::Uuid, _>(start.into_inner())
                .load::<ParentLinkRow>(connection)?;
            Ok(rows
                .into_iter()
                .map(|row| {
                    (
                        TaskId::from_uuid(row.id),
                        row.parent_id.map(TaskId::from_uuid),
                    )
                })
                .collect())
        })
        .await
    }

    async fn store_dependency(&self, dependency: &TaskDependency) -> TaskRepositoryResult<()> {
        let predecessor = dependency.predecessor();
        let successor = dependency.successor();
        let row = DependencyRow {
            predecessor_id: predecessor.into_inner(),
            successor_id: successor.into_inner(),
            kind: dependency.kind().as_str().to_owned(),
            lag_days: dependency.lag_days(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(task_dependencies::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateDependency {
                            predecessor,
                            successor,
                        }
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_dependencies(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<TaskDependency>> {
        self.run_blocking(move |connection| {
            let id = task_id.into_inner();
            let rows = task_dependencies::table
                .filter(
                    task_dependencies::predecessor_id
                        .eq(id)
                        .or(task_dependencies::successor_id.eq(id)),
                )
                .select(DependencyRow::as_select())
                .load::<DependencyRow>(connection)?;
            rows.into_iter().map(row_to_dependency).collect()
        })
        .await
    }
}

/// Serializes numbering for one project until the transaction ends.
///
/// The advisory lock also covers projects that have no rows to lock yet.
fn lock_project_numbering(
    connection: &mut PgConnection,
    project_id: ProjectId,
) -> TaskRepositoryResult<()> {
    diesel::sql_query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind::<Text, _>(project_id.to_string())
        .execute(connection)?;
    Ok(())
}

fn current_max_number(
    connection: &mut PgConnection,
    project_id: ProjectId,
) -> TaskRepositoryResult<Option<TaskNumber>> {
    let raw = tasks::table
        .filter(tasks::project_id.eq(project_id.into_inner()))
        .filter(tasks::is_deleted.eq(false))
        .order((
            sql::<Integer>("char_length(task_number)").desc(),
            tasks::task_number.desc(),
        ))
        .select(tasks::task_number)
        .for_update()
        .first::<String>(connection)
        .optional()?;
    Ok(raw.and_then(|value| TaskNumber::new(value).ok()))
}

fn insert_task(connection: &mut PgConnection, record: &TaskRecord) -> TaskRepositoryResult<()> {
    diesel::insert_into(tasks::table)
        .values(record)
        .execute(connection)
        .map_err(|err| map_task_write_error(err, record))?;
    Ok(())
}

fn map_task_write_error(err: DieselError, record: &TaskRecord) -> TaskRepositoryError {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err else {
        return TaskRepositoryError::persistence(err);
    };
    if is_constraint(info.as_ref(), LIVE_NUMBER_CONSTRAINT) {
        return match TaskNumber::new(record.task_number.clone()) {
            Ok(number) => TaskRepositoryError::DuplicateTaskNumber {
                project_id: ProjectId::from_uuid(record.project_id),
                number,
            },
            Err(_) => TaskRepositoryError::persistence(err),
        };
    }
    if is_constraint(info.as_ref(), "tasks_pkey") {
        return TaskRepositoryError::DuplicateTask(TaskId::from_uuid(record.id));
    }
    TaskRepositoryError::persistence(err)
}

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == name)
}

fn to_record(task: &Task) -> TaskRepositoryResult<TaskRecord> {
    let number = task
        .number()
        .ok_or_else(|| TaskRepositoryError::MissingTaskNumber(task.id()))?;
    let progress_hundredths =
        i16::try_from(task.progress().hundredths()).map_err(TaskRepositoryError::persistence)?;
    let effort = task.effort();
    let estimated_hours_hundredths = i32::try_from(effort.estimated.hundredths())
        .map_err(TaskRepositoryError::persistence)?;
    let actual_hours_hundredths =
        i32::try_from(effort.actual.hundredths()).map_err(TaskRepositoryError::persistence)?;
    let categories = task.categories();
    let schedule = task.schedule();

    Ok(TaskRecord {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        task_number: number.as_str().to_owned(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        parent_id: task.parent_id().map(TaskId::into_inner),
        system_category_id: categories.system.map(SystemCategoryId::into_inner),
        major_category_id: categories.major.map(MajorCategoryId::into_inner),
        minor_category_id: categories.minor.map(MinorCategoryId::into_inner),
        assignee_id: task.assignee().map(UserId::into_inner),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        progress_hundredths,
        planned_start_date: schedule.planned_start(),
        planned_end_date: schedule.planned_end(),
        actual_start_date: schedule.actual_start(),
        actual_end_date: schedule.actual_end(),
        estimated_hours_hundredths,
        actual_hours_hundredths,
        wbs_code: task
            .wbs_code()
            .map_or_else(String::new, |code| code.as_str().to_owned()),
        level: i32::from(task.level()),
        is_deleted: task.is_deleted(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let hundredths =
        u16::try_from(row.progress_hundredths).map_err(TaskRepositoryError::persistence)?;
    let progress =
        ProgressRate::from_hundredths(hundredths).map_err(TaskRepositoryError::persistence)?;
    let effort = Effort {
        estimated: hours_from_column(row.estimated_hours_hundredths)?,
        actual: hours_from_column(row.actual_hours_hundredths)?,
    };
    let wbs_code = if row.wbs_code.is_empty() {
        None
    } else {
        Some(WbsCode::new(row.wbs_code).map_err(TaskRepositoryError::persistence)?)
    };
    let level = u16::try_from(row.level).map_err(TaskRepositoryError::persistence)?;
    let number = TaskNumber::new(row.task_number).map_err(TaskRepositoryError::persistence)?;
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let schedule = Schedule::planned(row.planned_start_date, row.planned_end_date)
        .with_actual_start(row.actual_start_date)
        .with_actual_end(row.actual_end_date);

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        number,
        title,
        description: row.description,
        parent_id: row.parent_id.map(TaskId::from_uuid),
        categories: CategoryAssignment {
            system: row.system_category_id.map(SystemCategoryId::from_uuid),
            major: row.major_category_id.map(MajorCategoryId::from_uuid),
            minor: row.minor_category_id.map(MinorCategoryId::from_uuid),
        },
        assignee: row.assignee_id.map(UserId::from_uuid),
        status,
        priority,
        progress,
        schedule,
        effort,
        wbs_code,
        level,
        is_deleted: row.is_deleted,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn hours_from_column(hundredths: i32) -> TaskRepositoryResult<WorkHours> {
    let raw = u32::try_from(hundredths).map_err(TaskRepositoryError::persistence)?;
    WorkHours::from_hundredths(raw).map_err(TaskRepositoryError::persistence)
}

fn row_to_dependency(row: DependencyRow) -> TaskRepositoryResult<TaskDependency> {
    let kind =
        DependencyKind::try_from(row.kind.as_str()).map_err(TaskRepositoryError::persistence)?;
    Ok(TaskDependency::new(
        TaskId::from_uuid(row.predecessor_id),
        TaskId::from_uuid(row.successor_id),
        kind,
        row.lag_days,
    ))
}
