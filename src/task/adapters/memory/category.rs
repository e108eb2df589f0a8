//! In-memory repository for category masters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{
        MajorCategory, MajorCategoryId, MinorCategory, MinorCategoryId, SystemCategory,
        SystemCategoryId,
    },
    ports::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult},
};

/// Thread-safe in-memory category repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    state: Arc<RwLock<InMemoryCategoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryCategoryState {
    systems: HashMap<SystemCategoryId, SystemCategory>,
    majors: HashMap<MajorCategoryId, MajorCategory>,
    minors: HashMap<MinorCategoryId, MinorCategory>,
}

impl InMemoryCategoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CategoryRepositoryError {
    CategoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn store_system(&self, category: &SystemCategory) -> CategoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let duplicate = state.systems.values().any(|existing| {
            existing.project_id() == category.project_id()
                && existing.label().code() == category.label().code()
        });
        if duplicate {
            return Err(CategoryRepositoryError::DuplicateCode(
                category.label().code().to_owned(),
            ));
        }
        state.systems.insert(category.id(), category.clone());
        Ok(())
    }

    async fn store_major(&self, category: &MajorCategory) -> CategoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let duplicate = state.majors.values().any(|existing| {
            existing.system_category_id() == category.system_category_id()
                && existing.label().code() == category.label().code()
        });
        if duplicate {
            return Err(CategoryRepositoryError::DuplicateCode(
                category.label().code().to_owned(),
            ));
        }
        state.majors.insert(category.id(), category.clone());
        Ok(())
    }

    async fn store_minor(&self, category: &MinorCategory) -> CategoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let duplicate = state.minors.values().any(|existing| {
            existing.major_category_id() == category.major_category_id()
                && existing.label().code() == category.label().code()
        });
        if duplicate {
            return Err(CategoryRepositoryError::DuplicateCode(
                category.label().code().to_owned(),
            ));
        }
        state.minors.insert(category.id(), category.clone());
        Ok(())
    }

    async fn find_system(
        &self,
        id: SystemCategoryId,
    ) -> CategoryRepositoryResult<Option<SystemCategory>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.systems.get(&id).cloned())
    }

    async fn find_major(
        &self,
        id: MajorCategoryId,
    ) -> CategoryRepositoryResult<Option<MajorCategory>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.majors.get(&id).cloned())
    }

    async fn find_minor(
        &self,
        id: MinorCategoryId,
    ) -> CategoryRepositoryResult<Option<MinorCategory>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.minors.get(&id).cloned())
    }
}
