//! Repository port for the System → Major → Minor category masters.

use crate::task::domain::{
    MajorCategory, MajorCategoryId, MinorCategory, MinorCategoryId, SystemCategory,
    SystemCategoryId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for category repository operations.
pub type CategoryRepositoryResult<T> = Result<T, CategoryRepositoryError>;

/// Category master persistence contract.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Stores a system category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::DuplicateCode`] when the project
    /// already has a system category with the same code.
    async fn store_system(&self, category: &SystemCategory) -> CategoryRepositoryResult<()>;

    /// Stores a major category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::DuplicateCode`] when the system
    /// category already has a major category with the same code.
    async fn store_major(&self, category: &MajorCategory) -> CategoryRepositoryResult<()>;

    /// Stores a minor category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::DuplicateCode`] when the major
    /// category already has a minor category with the same code.
    async fn store_minor(&self, category: &MinorCategory) -> CategoryRepositoryResult<()>;

    /// Finds a system category.
    async fn find_system(
        &self,
        id: SystemCategoryId,
    ) -> CategoryRepositoryResult<Option<SystemCategory>>;

    /// Finds a major category.
    async fn find_major(
        &self,
        id: MajorCategoryId,
    ) -> CategoryRepositoryResult<Option<MajorCategory>>;

    /// Finds a minor category.
    async fn find_minor(
        &self,
        id: MinorCategoryId,
    ) -> CategoryRepositoryResult<Option<MinorCategory>>;
}

/// Errors returned by category repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CategoryRepositoryError {
    /// The code is already used under the same parent.
    #[error("duplicate category code: {0}")]
    DuplicateCode(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CategoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
