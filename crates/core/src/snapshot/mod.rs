//! Snapshot persistence.
//!
//! The whole ledger (accounts and journal entries) is saved as one JSON
//! document. The account display order is kept in a separate side-channel
//! file and reapplied on open.
//!
//! - [`codec`] - encode/decode with integrity checks
//! - [`SnapshotStore`] - persistence collaborator used by the book
//! - [`FileSnapshotStore`] - atomic on-disk store
//! - [`MemorySnapshotStore`] - in-memory store for tests and dry runs

pub mod codec;
mod error;
mod file;
mod store;

pub use codec::Snapshot;
pub use error::SnapshotError;
pub use file::FileSnapshotStore;
pub use store::{MemorySnapshotStore, SnapshotStore};
