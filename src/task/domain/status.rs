//! Task status, priority, and progress value types.

use super::{ParseTaskFieldError, TaskDomainError};
use serde::{Deserialize, Serialize};

/// Task work status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    NotStarted,
    /// Work is under way.
    InProgress,
    /// Work has finished.
    Completed,
    /// Work is parked by the caller; no derivation rule enters or leaves it.
    OnHold,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::OnHold => "ON_HOLD",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "ON_HOLD" => Ok(Self::OnHold),
            _ => Err(ParseTaskFieldError {
                field: "task status",
                value: value.to_owned(),
            }),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Urgent work.
    High,
    /// Normal work.
    #[default]
    Medium,
    /// Work that can wait.
    Low,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(ParseTaskFieldError {
                field: "task priority",
                value: value.to_owned(),
            }),
        }
    }
}

/// Completion percentage held in hundredths of a percent (0..=10000).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ProgressRate(u16);

impl ProgressRate {
    const MAX_HUNDREDTHS: u16 = 10_000;

    /// No progress.
    pub const ZERO: Self = Self(0);

    /// Full completion.
    pub const COMPLETE: Self = Self(Self::MAX_HUNDREDTHS);

    /// Creates a progress rate from a whole percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidProgressRate`] above 100.
    pub fn from_percent(percent: u8) -> Result<Self, TaskDomainError> {
        Self::from_hundredths(u16::from(percent) * 100)
    }

    /// Creates a progress rate from hundredths of a percent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidProgressRate`] above 10000.
    pub fn from_hundredths(hundredths: u16) -> Result<Self, TaskDomainError> {
        if hundredths > Self::MAX_HUNDREDTHS {
            return Err(TaskDomainError::InvalidProgressRate(u32::from(hundredths)));
        }
        Ok(Self(hundredths))
    }

    /// Returns the rate in hundredths of a percent.
    #[must_use]
    pub const fn hundredths(self) -> u16 {
        self.0
    }

    /// Returns `true` at 100 percent.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 == Self::MAX_HUNDREDTHS
    }
}

impl TryFrom<u16> for ProgressRate {
    type Error = TaskDomainError;

    fn try_from(hundredths: u16) -> Result<Self, Self::Error> {
        Self::from_hundredths(hundredths)
    }
}

impl From<ProgressRate> for u16 {
    fn from(rate: ProgressRate) -> Self {
        rate.0
    }
}
