//! `PostgreSQL` adapters for task and category persistence.

mod blocking;
mod category;
mod models;
mod repository;
mod schema;

pub use blocking::TaskPgPool;
pub use category::PostgresCategoryRepository;
pub use repository::PostgresTaskRepository;
