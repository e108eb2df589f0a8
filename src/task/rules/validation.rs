//! Structural validation rules.
//!
//! Each rule is a pure function over the in-memory task and its
//! pre-loaded relations. Rules return `Ok(())` on success or the specific
//! [`TaskValidationError`] describing the first violation.

use crate::task::domain::{
    DateRangeKind, HierarchyMismatch, ParentLinks, ResolvedCategories, Schedule, Task,
    TaskValidationError,
};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Relations loaded for validating one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Category masters referenced by the task.
    pub categories: ResolvedCategories,
    /// Parent adjacency covering the task's ancestor chain.
    pub parents: ParentLinks,
}

fn check_order(
    range: DateRangeKind,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), TaskValidationError> {
    if start > end {
        return Err(TaskValidationError::DateOrder { range, start, end });
    }
    Ok(())
}

/// Validates that the planned start does not follow the planned end.
///
/// # Errors
///
/// Returns [`TaskValidationError::DateOrder`] for the planned range.
pub fn validate_planned_dates(schedule: &Schedule) -> Result<(), TaskValidationError> {
    check_order(
        DateRangeKind::Planned,
        schedule.planned_start(),
        schedule.planned_end(),
    )
}

/// Validates actual date order when both actual dates are present.
///
/// # Errors
///
/// Returns [`TaskValidationError::DateOrder`] for the actual range.
pub fn validate_actual_dates(schedule: &Schedule) -> Result<(), TaskValidationError> {
    match (schedule.actual_start(), schedule.actual_end()) {
        (Some(start), Some(end)) => check_order(DateRangeKind::Actual, start, end),
        _ => Ok(()),
    }
}

/// Validates that the category chain nests consistently.
///
/// Each link is compared only when both sides are present: minor against the
/// task's major, major against the task's system, and system against the
/// task's project.
///
/// # Errors
///
/// Returns [`TaskValidationError::HierarchyMismatch`] naming the first
/// inconsistent link.
pub fn validate_category_chain(
    task: &Task,
    resolved: &ResolvedCategories,
) -> Result<(), TaskValidationError> {
    let assigned = task.categories();

    if let (Some(minor), Some(major_id)) = (&resolved.minor, assigned.major)
        && minor.major_category_id() != major_id
    {
        return Err(HierarchyMismatch::MinorOutsideMajor {
            minor: minor.id(),
            owner: minor.major_category_id(),
            assigned: major_id,
        }
        .into());
    }

    if let (Some(major), Some(system_id)) = (&resolved.major, assigned.system)
        && major.system_category_id() != system_id
    {
        return Err(HierarchyMismatch::MajorOutsideSystem {
            major: major.id(),
            owner: major.system_category_id(),
            assigned: system_id,
        }
        .into());
    }

    if let Some(system) = &resolved.system
        && system.project_id() != task.project_id()
    {
        return Err(HierarchyMismatch::SystemOutsideProject {
            system: system.id(),
            owner: system.project_id(),
            assigned: task.project_id(),
        }
        .into());
    }

    Ok(())
}

/// Validates that walking up from the task's parent never loops.
///
/// The walk is iterative and records every visited identifier, so a
/// pre-existing loop above the task is reported as well as one passing
/// through the task itself.
///
/// # Errors
///
/// Returns [`TaskValidationError::ParentCycle`] with the first identifier
/// reached twice.
pub fn validate_parent_chain(task: &Task, links: &ParentLinks) -> Result<(), TaskValidationError> {
    let Some(mut current) = task.parent_id() else {
        return Ok(());
    };
    let mut visited = HashSet::new();

    loop {
        if current == task.id() || !visited.insert(current) {
            return Err(TaskValidationError::ParentCycle {
                task_id: task.id(),
                revisited: current,
            });
        }
        match links.parent_of(current) {
            Some(next) => current = next,
            None => return Ok(()),
        }
    }
}

/// Validates a dependency between two loaded tasks.
///
/// # Errors
///
/// Returns [`TaskValidationError::CrossProjectDependency`] when the tasks
/// belong to different projects or [`TaskValidationError::SelfDependency`]
/// when they are the same task.
pub fn validate_dependency(
    predecessor: &Task,
    successor: &Task,
) -> Result<(), TaskValidationError> {
    if predecessor.project_id() != successor.project_id() {
        return Err(TaskValidationError::CrossProjectDependency {
            predecessor: predecessor.id(),
            successor: successor.id(),
        });
    }
    if predecessor.id() == successor.id() {
        return Err(TaskValidationError::SelfDependency(predecessor.id()));
    }
    Ok(())
}
