//! Book error types.

use tally_shared::AppError;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::snapshot::SnapshotError;

/// Errors returned by book operations.
#[derive(Debug, Error)]
pub enum BookError {
    /// The operation broke a ledger rule. Nothing changed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The change could not be saved and was rolled back.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl BookError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(err) => err.error_code(),
            Self::Snapshot(err) => err.error_code(),
        }
    }
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Ledger(err) => err.into(),
            BookError::Snapshot(err) => err.into(),
        }
    }
}
