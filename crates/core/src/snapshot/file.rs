//! File-backed snapshot store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tally_shared::config::StorageConfig;
use tally_shared::types::AccountId;
use tempfile::NamedTempFile;
use tracing::debug;

use super::codec::{self, Snapshot};
use super::error::SnapshotError;
use super::store::SnapshotStore;

/// Stores the snapshot and account order as two JSON files in one directory.
///
/// Writes go to a temporary file in the target directory which is synced
/// and then renamed over the target, so a crash never leaves a half-written
/// snapshot behind.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    snapshot_path: PathBuf,
    order_path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store from explicit file paths.
    #[must_use]
    pub fn new(snapshot_path: impl Into<PathBuf>, order_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            order_path: order_path.into(),
        }
    }

    /// Create a store from storage configuration.
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.snapshot_path(), config.order_path())
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Path of the account order file.
    #[must_use]
    pub fn order_path(&self) -> &Path {
        &self.order_path
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, SnapshotError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(SnapshotError::io(path, err)),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|err| SnapshotError::io(dir, err))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|err| SnapshotError::io(dir, err))?;
    file.write_all(bytes)
        .map_err(|err| SnapshotError::io(file.path(), err))?;
    file.as_file()
        .sync_all()
        .map_err(|err| SnapshotError::io(file.path(), err))?;
    file.persist(path)
        .map_err(|err| SnapshotError::io(path, err.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        read_optional(&self.snapshot_path)?
            .as_deref()
            .map(codec::decode)
            .transpose()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        write_atomic(&self.snapshot_path, &codec::encode(snapshot)?)
    }

    fn load_account_order(&self) -> Result<Option<Vec<AccountId>>, SnapshotError> {
        read_optional(&self.order_path)?
            .as_deref()
            .map(codec::decode_order)
            .transpose()
    }

    fn save_account_order(&mut self, order: &[AccountId]) -> Result<(), SnapshotError> {
        write_atomic(&self.order_path, &codec::encode_order(order)?)
    }
}
