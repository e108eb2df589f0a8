//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod category;
pub mod repository;

pub use category::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
