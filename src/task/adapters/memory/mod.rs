//! In-memory adapters for task and category persistence.

mod category;
mod task;

pub use category::InMemoryCategoryRepository;
pub use task::InMemoryTaskRepository;
