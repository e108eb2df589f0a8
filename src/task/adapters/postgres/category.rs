//! `PostgreSQL` repository for category masters.

use super::{
    blocking::{TaskPgPool, with_connection},
    models::{MajorCategoryRow, MinorCategoryRow, SystemCategoryRow},
    schema::{major_categories, minor_categories, system_categories},
};
use crate::task::{
    domain::{
        CategoryLabel, MajorCategory, MajorCategoryId, MinorCategory, MinorCategoryId, ProjectId,
        SystemCategory, SystemCategoryId,
    },
    ports::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed category repository.
#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pool: TaskPgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CategoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CategoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        with_connection(
            &self.pool,
            f,
            CategoryRepositoryError::persistence,
            CategoryRepositoryError::persistence,
        )
        .await
    }
}

fn map_insert_error(err: DieselError, code: &str) -> CategoryRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            CategoryRepositoryError::DuplicateCode(code.to_owned())
        }
        other => CategoryRepositoryError::persistence(other),
    }
}

fn label_from_row(code: String, name: String) -> CategoryRepositoryResult<CategoryLabel> {
    CategoryLabel::new(code, name).map_err(CategoryRepositoryError::persistence)
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn store_system(&self, category: &SystemCategory) -> CategoryRepositoryResult<()> {
        let row = SystemCategoryRow {
            id: category.id().into_inner(),
            project_id: category.project_id().into_inner(),
            code: category.label().code().to_owned(),
            name: category.label().name().to_owned(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(system_categories::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, &row.code))?;
            Ok(())
        })
        .await
    }

    async fn store_major(&self, category: &MajorCategory) -> CategoryRepositoryResult<()> {
        let row = MajorCategoryRow {
            id: category.id().into_inner(),
            system_category_id: category.system_category_id().into_inner(),
            code: category.label().code().to_owned(),
            name: category.label().name().to_owned(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(major_categories::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, &row.code))?;
            Ok(())
        })
        .await
    }

    async fn store_minor(&self, category: &MinorCategory) -> CategoryRepositoryResult<()> {
        let row = MinorCategoryRow {
            id: category.id().into_inner(),
            major_category_id: category.major_category_id().into_inner(),
            code: category.label().code().to_owned(),
            name: category.label().name().to_owned(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(minor_categories::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, &row.code))?;
            Ok(())
        })
        .await
    }

    async fn find_system(
        &self,
        id: SystemCategoryId,
    ) -> CategoryRepositoryResult<Option<SystemCategory>> {
        self.run_blocking(move |connection| {
            let row = system_categories::table
                .find(id.into_inner())
                .select(SystemCategoryRow::as_select())
                .first::<SystemCategoryRow>(connection)
                .optional()
                .map_err(CategoryRepositoryError::persistence)?;
            row.map(|row| {
                Ok(SystemCategory::from_parts(
                    SystemCategoryId::from_uuid(row.id),
                    ProjectId::from_uuid(row.project_id),
                    label_from_row(row.code, row.name)?,
                ))
            })
            .transpose()
        })
        .await
    }

    async fn find_major(
        &self,
        id: MajorCategoryId,
    ) -> CategoryRepositoryResult<Option<MajorCategory>> {
        self.run_blocking(move |connection| {
            let row = major_categories::table
                .find(id.into_inner())
                .select(MajorCategoryRow::as_select())
                .first::<MajorCategoryRow>(connection)
                .optional()
                .map_err(CategoryRepositoryError::persistence)?;
            row.map(|row| {
                Ok(MajorCategory::from_parts(
                    MajorCategoryId::from_uuid(row.id),
                    SystemCategoryId::from_uuid(row.system_category_id),
                    label_from_row(row.code, row.name)?,
                ))
            })
            .transpose()
        })
        .await
    }

    async fn find_minor(
        &self,
        id: MinorCategoryId,
    ) -> CategoryRepositoryResult<Option<MinorCategory>> {
        self.run_blocking(move |connection| {
            let row = minor_categories::table
                .find(id.into_inner())
                .select(MinorCategoryRow::as_select())
                .first::<MinorCategoryRow>(connection)
                .optional()
                .map_err(CategoryRepositoryError::persistence)?;
            row.map(|row| {
                Ok(MinorCategory::from_parts(
                    MinorCategoryId::from_uuid(row.id),
                    MajorCategoryId::from_uuid(row.major_category_id),
                    label_from_row(row.code, row.name)?,
                ))
            })
            .transpose()
        })
        .await
    }
}
