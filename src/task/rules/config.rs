//! Configuration for the task rule engine.

use crate::task::domain::{NumberingPolicy, TaskDomainError};

/// Configuration for task rules.
///
/// # Examples
///
/// ```
/// use tasklane::task::rules::TaskRulesConfig;
///
/// let config = TaskRulesConfig::default();
/// assert_eq!(config.numbering.width(), 3);
///
/// let wide = TaskRulesConfig::default()
///     .with_number_width(5)
///     .expect("valid width");
/// assert_eq!(wide.numbering.width(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskRulesConfig {
    /// Policy for generated task numbers.
    pub numbering: NumberingPolicy,
}

impl TaskRulesConfig {
    /// Returns a copy using zero-padded numbers of `width` digits.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidNumberingWidth`] for unusable
    /// widths.
    pub fn with_number_width(self, width: usize) -> Result<Self, TaskDomainError> {
        NumberingPolicy::new(width).map(|numbering| Self { numbering })
    }
}
