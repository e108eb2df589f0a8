//! Project-scoped task numbers and the sequential numbering policy.

use super::{TaskDomainError, text::bounded_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum task number length, matching `VARCHAR(20)`.
const MAX_TASK_NUMBER_LENGTH: usize = 20;

/// Default zero-padded width of generated task numbers.
pub const DEFAULT_NUMBER_WIDTH: usize = 3;

/// Short code identifying a task within its project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskNumber(String);

impl TaskNumber {
    /// Creates a validated task number.
    ///
    /// Caller-supplied numbers need not be numeric; they are stored verbatim
    /// after trimming.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyField`] or
    /// [`TaskDomainError::FieldTooLong`] when the value is blank or exceeds
    /// the storage limit.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        bounded_text("task number", value.into(), MAX_TASK_NUMBER_LENGTH).map(Self)
    }

    /// Returns the number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the decimal value when the number consists only of digits.
    #[must_use]
    pub fn numeric_value(&self) -> Option<u64> {
        if self.0.bytes().all(|byte| byte.is_ascii_digit()) {
            self.0.parse().ok()
        } else {
            None
        }
    }

    /// Ordering key used to pick the current maximum in a project.
    ///
    /// Longer numbers sort first so that zero-padded sequences remain in
    /// numeric order once they outgrow their padding ("1000" > "999").
    #[must_use]
    pub fn scan_key(&self) -> (usize, &str) {
        (self.0.chars().count(), self.0.as_str())
    }
}

impl AsRef<str> for TaskNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskNumber {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Rule for deriving the next task number from the current maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingPolicy {
    width: usize,
}

impl NumberingPolicy {
    /// Creates a policy producing numbers zero-padded to `width` digits.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidNumberingWidth`] when `width` is
    /// zero or too wide to fit a stored task number.
    pub const fn new(width: usize) -> Result<Self, TaskDomainError> {
        if width == 0 || width > MAX_TASK_NUMBER_LENGTH {
            return Err(TaskDomainError::InvalidNumberingWidth(width));
        }
        Ok(Self { width })
    }

    /// Returns the zero-padded width.
    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    /// Returns the first number of a fresh project ("001" by default).
    #[must_use]
    pub fn first(self) -> TaskNumber {
        self.format(1)
    }

    /// Derives the number following `current_max`.
    ///
    /// An absent or non-numeric maximum restarts the sequence at
    /// [`Self::first`].
    #[must_use]
    pub fn next_after(self, current_max: Option<&TaskNumber>) -> TaskNumber {
        current_max
            .and_then(TaskNumber::numeric_value)
            .and_then(|value| value.checked_add(1))
            .map_or_else(|| self.first(), |next| self.format(next))
    }

    fn format(self, value: u64) -> TaskNumber {
        TaskNumber(format!("{value:0width$}", width = self.width))
    }
}

impl Default for NumberingPolicy {
    fn default() -> Self {
        Self {
            width: DEFAULT_NUMBER_WIDTH,
        }
    }
}
