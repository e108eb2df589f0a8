//! Scheduling dependencies between tasks of the same project.

use super::{ParseTaskFieldError, TaskId};
use serde::{Deserialize, Serialize};

/// How the successor's schedule is tied to the predecessor's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Successor starts after predecessor finishes.
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    /// Successor starts after predecessor starts.
    #[serde(rename = "SS")]
    StartToStart,
    /// Successor finishes after predecessor finishes.
    #[serde(rename = "FF")]
    FinishToFinish,
    /// Successor finishes after predecessor starts.
    #[serde(rename = "SF")]
    StartToFinish,
}

impl DependencyKind {
    /// Returns the two-letter storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FinishToStart => "FS",
            Self::StartToStart => "SS",
            Self::FinishToFinish => "FF",
            Self::StartToFinish => "SF",
        }
    }
}

impl TryFrom<&str> for DependencyKind {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FS" => Ok(Self::FinishToStart),
            "SS" => Ok(Self::StartToStart),
            "FF" => Ok(Self::FinishToFinish),
            "SF" => Ok(Self::StartToFinish),
            _ => Err(ParseTaskFieldError {
                field: "dependency kind",
                value: value.to_owned(),
            }),
        }
    }
}

/// Directed dependency from a predecessor task to a successor task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDependency {
    predecessor: TaskId,
    successor: TaskId,
    kind: DependencyKind,
    lag_days: i32,
}

impl TaskDependency {
    /// Creates a dependency record.
    ///
    /// Project membership and self-reference are checked by the rule engine
    /// once both tasks are loaded.
    #[must_use]
    pub const fn new(
        predecessor: TaskId,
        successor: TaskId,
        kind: DependencyKind,
        lag_days: i32,
    ) -> Self {
        Self {
            predecessor,
            successor,
            kind,
            lag_days,
        }
    }

    /// Task that must progress first.
    #[must_use]
    pub const fn predecessor(&self) -> TaskId {
        self.predecessor
    }

    /// Task that waits on the predecessor.
    #[must_use]
    pub const fn successor(&self) -> TaskId {
        self.successor
    }

    /// Dependency kind.
    #[must_use]
    pub const fn kind(&self) -> DependencyKind {
        self.kind
    }

    /// Delay in days applied after the predecessor milestone.
    #[must_use]
    pub const fn lag_days(&self) -> i32 {
        self.lag_days
    }
}
