//! In-memory repository for task persistence tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{
        NumberingPolicy, ParentLinks, ProjectId, Task, TaskDependency, TaskId, TaskNumber,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// The write lock doubles as the numbering scope: scanning for the current
/// maximum and inserting the numbered task happen under one guard.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    dependencies: Vec<TaskDependency>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryTaskState {
    fn live_tasks(&self, project_id: ProjectId) -> impl Iterator<Item = &Task> {
        self.tasks
            .values()
            .filter(move |task| task.project_id() == project_id && !task.is_deleted())
    }

    fn current_max_number(&self, project_id: ProjectId) -> Option<&TaskNumber> {
        self.live_tasks(project_id)
            .filter_map(Task::number)
            .max_by(|left, right| left.scan_key().cmp(&right.scan_key()))
    }

    /// Rejects `task` when another live task in its project uses its number.
    fn ensure_number_free(&self, task: &Task) -> TaskRepositoryResult<()> {
        if task.is_deleted() {
            return Ok(());
        }
        let Some(number) = task.number() else {
            return Ok(());
        };
        let taken = self
            .live_tasks(task.project_id())
            .any(|other| other.id() != task.id() && other.number() == Some(number));
        if taken {
            return Err(TaskRepositoryError::DuplicateTaskNumber {
                project_id: task.project_id(),
                number: number.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        if task.number().is_none() {
            return Err(TaskRepositoryError::MissingTaskNumber(task.id()));
        }
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.ensure_number_free(task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn store_numbered(
        &self,
        mut task: Task,
        policy: NumberingPolicy,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let next = policy.next_after(state.current_max_number(task.project_id()));
        task.assign_number(next)
            .map_err(TaskRepositoryError::persistence)?;
        state.ensure_number_free(&task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.ensure_number_free(task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_number(
        &self,
        project_id: ProjectId,
        number: &TaskNumber,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        let task = state
            .live_tasks(project_id)
            .find(|task| task.number() == Some(number))
            .cloned();
        Ok(task)
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state.live_tasks(project_id).cloned().collect();
        tasks.sort_by(|left, right| {
            left.number()
                .map(TaskNumber::scan_key)
                .cmp(&right.number().map(TaskNumber::scan_key))
        });
        Ok(tasks)
    }

    async fn parent_links(&self, start: TaskId) -> TaskRepositoryResult<ParentLinks> {
        let state = self.read()?;
        let mut links = ParentLinks::new();
        let mut cursor = Some(start);
        while let Some(current) = cursor {
            if links.contains(current) {
                break;
            }
            let Some(task) = state.tasks.get(&current) else {
                break;
            };
            links.insert(current, task.parent_id());
            cursor = task.parent_id();
        }
        Ok(links)
    }

    async fn store_dependency(&self, dependency: &TaskDependency) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let exists = state.dependencies.iter().any(|existing| {
            existing.predecessor() == dependency.predecessor()
                && existing.successor() == dependency.successor()
        });
        if exists {
            return Err(TaskRepositoryError::DuplicateDependency {
                predecessor: dependency.predecessor(),
                successor: dependency.successor(),
            });
        }
        state.dependencies.push(*dependency);
        Ok(())
    }

    async fn find_dependencies(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<TaskDependency>> {
        let state = self.read()?;
        Ok(state
            .dependencies
            .iter()
            .filter(|dependency| {
                dependency.predecessor() == task_id || dependency.successor() == task_id
            })
            .copied()
            .collect())
    }
}
