//! Reporting periods.
//!
//! A period is a half-open date range `[start, end_exclusive)`. Monthly
//! periods run from the first of the month to the first of the next month.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reports::ReportError;

/// Half-open date range used to select journal entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First day included.
    pub start: NaiveDate,
    /// First day no longer included.
    pub end_exclusive: NaiveDate,
}

impl Period {
    /// Creates a period from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `start` is after `end_exclusive`.
    pub fn new(start: NaiveDate, end_exclusive: NaiveDate) -> Result<Self, ReportError> {
        if start > end_exclusive {
            return Err(ReportError::InvalidDateRange {
                start,
                end: end_exclusive,
            });
        }
        Ok(Self {
            start,
            end_exclusive,
        })
    }

    /// The calendar month `year-month`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for a month outside 1..=12 or a year chrono
    /// cannot represent.
    pub fn month(year: i32, month: u32) -> Result<Self, ReportError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ReportError::InvalidMonth { year, month })?;
        let end_exclusive = start
            .checked_add_months(Months::new(1))
            .ok_or(ReportError::InvalidMonth { year, month })?;
        Ok(Self {
            start,
            end_exclusive,
        })
    }

    /// The calendar month containing `date`.
    ///
    /// # Errors
    ///
    /// Only fails at the far end of chrono's date range.
    pub fn month_of(date: NaiveDate) -> Result<Self, ReportError> {
        Self::month(date.year(), date.month())
    }

    /// Returns true if `date` falls inside the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end_exclusive
    }

    /// Returns true if the period covers exactly one calendar month.
    #[must_use]
    pub fn is_calendar_month(&self) -> bool {
        self.start.day() == 1 && self.start.checked_add_months(Months::new(1)) == Some(self.end_exclusive)
    }

    /// The month after this one (for monthly periods).
    ///
    /// # Errors
    ///
    /// Only fails at the far end of chrono's date range.
    pub fn next_month(&self) -> Result<Self, ReportError> {
        Self::month_of(self.end_exclusive)
    }

    /// The month before this one (for monthly periods).
    ///
    /// # Errors
    ///
    /// Only fails at the far end of chrono's date range.
    pub fn previous_month(&self) -> Result<Self, ReportError> {
        let day_before = self
            .start
            .pred_opt()
            .ok_or_else(|| ReportError::InvalidPeriod(self.to_string()))?;
        Self::month_of(day_before)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_calendar_month() {
            write!(f, "{:04}-{:02}", self.start.year(), self.start.month())
        } else {
            write!(f, "{}..{}", self.start, self.end_exclusive)
        }
    }
}

impl std::str::FromStr for Period {
    type Err = ReportError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::month(year, month)
    }
}
