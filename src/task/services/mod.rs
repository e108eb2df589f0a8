//! Application services for task creation, update, and deletion.

mod requests;
mod tasks;

pub use requests::{AddDependencyRequest, CreateTaskRequest, UpdateTaskRequest};
pub use tasks::{TaskService, TaskServiceError, TaskServiceResult};
