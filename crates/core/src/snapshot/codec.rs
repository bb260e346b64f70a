//! Snapshot document format.
//!
//! ```json
//! { "accounts": [...], "journalEntries": [...] }
//! ```
//!
//! Decoding is strict: every entry must pass the store's balance gate and
//! ids and sequence numbers must be unique, so a decoded snapshot can be
//! restored as is.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

use super::error::SnapshotError;
use crate::ledger::{Account, JournalEntry, validate_balance};

/// Full ledger state as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Accounts in registry order.
    pub accounts: Vec<Account>,
    /// Journal entries in store order.
    #[serde(rename = "journalEntries")]
    pub journal_entries: Vec<JournalEntry>,
}

/// Serializes a snapshot.
///
/// # Errors
///
/// Returns `Encode` if serialization fails.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec_pretty(snapshot).map_err(SnapshotError::Encode)
}

/// Deserializes and checks a snapshot.
///
/// # Errors
///
/// Returns `Decode` for malformed JSON and `Invalid` for duplicate ids,
/// duplicate or exhausted sequence numbers, or an entry that fails the
/// balance gate.
pub fn decode(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_slice(bytes).map_err(SnapshotError::Decode)?;
    check(&snapshot)?;
    Ok(snapshot)
}

fn check(snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let mut account_ids = HashSet::with_capacity(snapshot.accounts.len());
    for account in &snapshot.accounts {
        if !account_ids.insert(account.id) {
            return Err(SnapshotError::invalid(format!("duplicate account id {}", account.id)));
        }
    }

    let mut entry_ids = HashSet::with_capacity(snapshot.journal_entries.len());
    let mut sequences = HashSet::with_capacity(snapshot.journal_entries.len());
    let mut unnumbered: u64 = 0;
    for entry in &snapshot.journal_entries {
        if !entry_ids.insert(entry.id) {
            return Err(SnapshotError::invalid(format!("duplicate entry id {}", entry.id)));
        }
        if entry.sequence == 0 {
            unnumbered += 1;
        } else if !sequences.insert(entry.sequence) {
            return Err(SnapshotError::invalid(format!(
                "duplicate entry sequence {}",
                entry.sequence
            )));
        }
        validate_balance(&entry.debit_lines, &entry.credit_lines)
            .map_err(|err| SnapshotError::invalid(format!("entry {}: {err}", entry.id)))?;
    }

    // Legacy entries and the next new one are numbered after the highest sequence.
    let highest = sequences.iter().copied().max().unwrap_or(0);
    if highest.checked_add(unnumbered).and_then(|n| n.checked_add(1)).is_none() {
        return Err(SnapshotError::invalid(format!(
            "entry sequence {highest} leaves no room for new entries"
        )));
    }

    Ok(())
}

/// Serializes the account order side-channel.
///
/// # Errors
///
/// Returns `Encode` if serialization fails.
pub fn encode_order(order: &[AccountId]) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(order).map_err(SnapshotError::Encode)
}

/// Deserializes the account order side-channel.
///
/// # Errors
///
/// Returns `Decode` if the bytes are not a JSON array of ids.
pub fn decode_order(bytes: &[u8]) -> Result<Vec<AccountId>, SnapshotError> {
    serde_json::from_slice(bytes).map_err(SnapshotError::Decode)
}
