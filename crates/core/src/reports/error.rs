//! Report error types.

use chrono::NaiveDate;
use tally_shared::AppError;
use thiserror::Error;

/// Errors that can occur while building a report period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date (exclusive).
        end: NaiveDate,
    },

    /// Month outside 1..=12 or an unrepresentable year.
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth {
        /// Year.
        year: i32,
        /// Month number.
        month: u32,
    },

    /// Period text could not be parsed.
    #[error("Invalid period '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::Validation(err.to_string())
    }
}
