//! Snapshot error types.

use std::path::PathBuf;

use tally_shared::AppError;
use thiserror::Error;

/// Snapshot persistence errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Saved bytes are not a valid snapshot document.
    #[error("snapshot could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// Snapshot could not be serialized.
    #[error("snapshot could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    /// Snapshot decoded but violates a ledger invariant.
    #[error("snapshot is invalid: {0}")]
    Invalid(String),

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    /// Create an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid snapshot error.
    #[must_use]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "SNAPSHOT_DECODE",
            Self::Encode(_) => "SNAPSHOT_ENCODE",
            Self::Invalid(_) => "SNAPSHOT_INVALID",
            Self::Io { .. } => "SNAPSHOT_IO",
        }
    }

    /// Returns true if the saved data itself is unusable.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Invalid(_))
    }
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        Self::Storage(err.to_string())
    }
}
