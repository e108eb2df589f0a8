//! Status and progress derivation from actual dates.
//!
//! Rules are held in an explicit precedence list. The first rule whose
//! condition matches decides the outcome; when none match, the
//! caller-supplied status stands.

use crate::task::domain::{ProgressRate, Task, TaskStatus};
use chrono::NaiveDate;

/// A single derivation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusRule {
    /// An actual end date completes the task at 100 percent.
    ActualEndCompletes,
    /// Clearing the end date of a completed task reopens it.
    ClearedEndReopens,
    /// An actual start date moves a not-started task into progress.
    ActualStartBegins,
}

/// Derivation rules in precedence order.
pub const STATUS_RULES: [StatusRule; 3] = [
    StatusRule::ActualEndCompletes,
    StatusRule::ClearedEndReopens,
    StatusRule::ActualStartBegins,
];

/// Facts a rule inspects.
#[derive(Debug, Clone, Copy)]
struct DerivationFacts {
    current: TaskStatus,
    previous: Option<TaskStatus>,
    actual_start: Option<NaiveDate>,
    actual_end: Option<NaiveDate>,
}

/// Status and optional forced progress chosen by a rule.
#[derive(Debug, Clone, Copy)]
struct RuleOutcome {
    status: TaskStatus,
    progress: Option<ProgressRate>,
}

impl StatusRule {
    /// Stable rule name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActualEndCompletes => "actual_end_completes",
            Self::ClearedEndReopens => "cleared_end_reopens",
            Self::ActualStartBegins => "actual_start_begins",
        }
    }

    fn evaluate(self, facts: DerivationFacts) -> Option<RuleOutcome> {
        match self {
            Self::ActualEndCompletes => facts.actual_end.map(|_| RuleOutcome {
                status: TaskStatus::Completed,
                progress: Some(ProgressRate::COMPLETE),
            }),
            Self::ClearedEndReopens => {
                let reopened = facts.actual_end.is_none()
                    && facts.previous == Some(TaskStatus::Completed);
                reopened.then(|| RuleOutcome {
                    status: if facts.actual_start.is_some() {
                        TaskStatus::InProgress
                    } else {
                        TaskStatus::NotStarted
                    },
                    progress: None,
                })
            }
            Self::ActualStartBegins => {
                let begins = facts.actual_start.is_some()
                    && facts.actual_end.is_none()
                    && facts.current == TaskStatus::NotStarted;
                begins.then_some(RuleOutcome {
                    status: TaskStatus::InProgress,
                    progress: None,
                })
            }
        }
    }
}

/// Report of one derivation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDerivation {
    /// Rule that fired, if any.
    pub rule: Option<StatusRule>,
    /// Status before derivation.
    pub status_before: TaskStatus,
    /// Status after derivation.
    pub status_after: TaskStatus,
    /// Progress before derivation.
    pub progress_before: ProgressRate,
    /// Progress after derivation.
    pub progress_after: ProgressRate,
}

impl StatusDerivation {
    /// Returns `true` when the task was mutated.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.status_before != self.status_after || self.progress_before != self.progress_after
    }
}

/// Applies the first matching rule to `task`.
///
/// `previous` is the status currently persisted for the task, or `None` when
/// the task has never been saved.
pub fn derive_status(task: &mut Task, previous: Option<TaskStatus>) -> StatusDerivation {
    let status_before = task.status();
    let progress_before = task.progress();
    let facts = DerivationFacts {
        current: status_before,
        previous,
        actual_start: task.schedule().actual_start(),
        actual_end: task.schedule().actual_end(),
    };

    let fired = STATUS_RULES
        .iter()
        .find_map(|rule| rule.evaluate(facts).map(|outcome| (*rule, outcome)));

    if let Some((_, outcome)) = fired {
        task.set_status(outcome.status);
        if let Some(progress) = outcome.progress {
            task.set_progress(progress);
        }
    }

    StatusDerivation {
        rule: fired.map(|(rule, _)| rule),
        status_before,
        status_after: task.status(),
        progress_before,
        progress_after: task.progress(),
    }
}
