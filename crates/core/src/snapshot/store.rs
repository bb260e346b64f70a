//! Snapshot store abstraction.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_shared::types::AccountId;

use super::codec::{self, Snapshot};
use super::error::SnapshotError;

/// Where the book persists its state.
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait SnapshotStore: Send + Sync {
    /// Loads the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if saved data exists but cannot be read or decoded.
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError>;

    /// Replaces the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or written.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError>;

    /// Loads the saved account order.
    ///
    /// # Errors
    ///
    /// Returns an error if saved data exists but cannot be read or decoded.
    fn load_account_order(&self) -> Result<Option<Vec<AccountId>>, SnapshotError>;

    /// Replaces the saved account order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be written.
    fn save_account_order(&mut self, order: &[AccountId]) -> Result<(), SnapshotError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    snapshot: Option<Vec<u8>>,
    order: Option<Vec<u8>>,
    saves: usize,
}

/// In-memory store holding encoded bytes.
///
/// Clones share the same state, so a caller can keep a handle to inspect
/// what the book saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with raw snapshot bytes.
    #[must_use]
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::default();
        store.lock().snapshot = Some(bytes.into());
        store
    }

    /// Raw snapshot bytes, if any were saved.
    #[must_use]
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.lock().snapshot.clone()
    }

    /// Number of successful snapshot saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        self.lock()
            .snapshot
            .as_deref()
            .map(codec::decode)
            .transpose()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let bytes = codec::encode(snapshot)?;
        let mut state = self.lock();
        state.snapshot = Some(bytes);
        state.saves += 1;
        Ok(())
    }

    fn load_account_order(&self) -> Result<Option<Vec<AccountId>>, SnapshotError> {
        self.lock()
            .order
            .as_deref()
            .map(codec::decode_order)
            .transpose()
    }

    fn save_account_order(&mut self, order: &[AccountId]) -> Result<(), SnapshotError> {
        let bytes = codec::encode_order(order)?;
        self.lock().order = Some(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::AccountRegistry;

    #[test]
    fn test_empty_store_loads_nothing() {
        let store = MemorySnapshotStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(store.load_account_order().unwrap().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let handle = MemorySnapshotStore::new();
        let mut store = handle.clone();
        let snapshot = Snapshot {
            accounts: AccountRegistry::with_default_seed().accounts().to_vec(),
            journal_entries: Vec::new(),
        };

        store.save(&snapshot).unwrap();

        assert_eq!(handle.save_count(), 1);
        assert_eq!(handle.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_corrupt_bytes_fail_to_load() {
        let store = MemorySnapshotStore::with_bytes("garbage");
        assert!(store.load().unwrap_err().is_decode_error());
    }

    #[test]
    fn test_account_order_round_trip() {
        let mut store = MemorySnapshotStore::new();
        let order = AccountRegistry::with_default_seed().order();
        store.save_account_order(&order).unwrap();
        assert_eq!(store.load_account_order().unwrap(), Some(order));
        assert_eq!(store.save_count(), 0);
    }
}
