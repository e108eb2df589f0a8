//! Effort estimates and work breakdown placement.

use super::{TaskDomainError, text::bounded_text};
use serde::{Deserialize, Serialize};

/// Maximum WBS code length, matching `VARCHAR(50)`.
const MAX_WBS_CODE_LENGTH: usize = 50;

/// Worked or estimated hours, held in hundredths of an hour.
///
/// Values mirror a `NUMERIC(6, 2)` column, so the range is 0.00 to 9999.99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WorkHours(u32);

impl WorkHours {
    const MAX_HUNDREDTHS: u32 = 999_999;

    /// No hours.
    pub const ZERO: Self = Self(0);

    /// Creates a value from whole hours.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidWorkHours`] above 9999 hours.
    pub fn from_hours(hours: u16) -> Result<Self, TaskDomainError> {
        Self::from_hundredths(u32::from(hours) * 100)
    }

    /// Creates a value from hundredths of an hour.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidWorkHours`] above 999999.
    pub const fn from_hundredths(hundredths: u32) -> Result<Self, TaskDomainError> {
        if hundredths > Self::MAX_HUNDREDTHS {
            return Err(TaskDomainError::InvalidWorkHours(hundredths));
        }
        Ok(Self(hundredths))
    }

    /// Returns the value in hundredths of an hour.
    #[must_use]
    pub const fn hundredths(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for WorkHours {
    type Error = TaskDomainError;

    fn try_from(hundredths: u32) -> Result<Self, Self::Error> {
        Self::from_hundredths(hundredths)
    }
}

impl From<WorkHours> for u32 {
    fn from(hours: WorkHours) -> Self {
        hours.0
    }
}

/// Estimated and actual hours recorded against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Effort {
    /// Hours planned for the task.
    pub estimated: WorkHours,
    /// Hours booked so far.
    pub actual: WorkHours,
}

/// Work breakdown structure code such as `1.2.3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WbsCode(String);

impl WbsCode {
    /// Creates a validated WBS code.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyField`] or
    /// [`TaskDomainError::FieldTooLong`] for blank or overlong codes.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        bounded_text("WBS code", value.into(), MAX_WBS_CODE_LENGTH).map(Self)
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
