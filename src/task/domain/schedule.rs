//! Planned and actual task dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Planned window plus optional actual start and end dates.
///
/// Construction does not check date order; the rule engine reports ordering
/// problems as validation errors so callers can surface them as form errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    planned_start: NaiveDate,
    planned_end: NaiveDate,
    actual_start: Option<NaiveDate>,
    actual_end: Option<NaiveDate>,
}

impl Schedule {
    /// Creates a schedule with planned dates and no actuals.
    #[must_use]
    pub const fn planned(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            planned_start: start,
            planned_end: end,
            actual_start: None,
            actual_end: None,
        }
    }

    /// Sets the actual start date.
    #[must_use]
    pub const fn with_actual_start(mut self, date: Option<NaiveDate>) -> Self {
        self.actual_start = date;
        self
    }

    /// Sets the actual end date.
    #[must_use]
    pub const fn with_actual_end(mut self, date: Option<NaiveDate>) -> Self {
        self.actual_end = date;
        self
    }

    /// Planned start date.
    #[must_use]
    pub const fn planned_start(&self) -> NaiveDate {
        self.planned_start
    }

    /// Planned end date.
    #[must_use]
    pub const fn planned_end(&self) -> NaiveDate {
        self.planned_end
    }

    /// Actual start date, if work has started.
    #[must_use]
    pub const fn actual_start(&self) -> Option<NaiveDate> {
        self.actual_start
    }

    /// Actual end date, if work has finished.
    #[must_use]
    pub const fn actual_end(&self) -> Option<NaiveDate> {
        self.actual_end
    }
}
