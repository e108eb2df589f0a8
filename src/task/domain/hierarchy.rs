//! Adjacency view of the task parent hierarchy.

use super::TaskId;
use std::collections::HashMap;

/// Lookup from task identifier to its parent identifier.
///
/// Loaded from storage ahead of validation so the cycle walk never touches
/// the store one row at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentLinks {
    links: HashMap<TaskId, Option<TaskId>>,
}

impl ParentLinks {
    /// Creates an empty adjacency map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the parent of `task_id`.
    pub fn insert(&mut self, task_id: TaskId, parent_id: Option<TaskId>) {
        self.links.insert(task_id, parent_id);
    }

    /// Returns the recorded parent of `task_id`.
    ///
    /// Unknown tasks and roots both yield `None`.
    #[must_use]
    pub fn parent_of(&self, task_id: TaskId) -> Option<TaskId> {
        self.links.get(&task_id).copied().flatten()
    }

    /// Returns `true` when `task_id` has an entry.
    #[must_use]
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.links.contains_key(&task_id)
    }

    /// Number of recorded tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` when nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl FromIterator<(TaskId, Option<TaskId>)> for ParentLinks {
    fn from_iter<I: IntoIterator<Item = (TaskId, Option<TaskId>)>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}
