//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Chart of accounts and its archival lifecycle
//! - Journal entries (debit and credit lines)
//! - Balance validation rules
//! - The ordered journal entry store and its sorted views
//! - Error types for ledger operations

pub mod account;
pub mod entry;
pub mod error;
pub mod registry;
pub mod sort;
pub mod store;
pub mod validation;

#[cfg(test)]
mod sort_props;
#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountType, DisplayAmount};
pub use entry::{EntryDraft, EntryType, JournalEntry, Posting};
pub use error::LedgerError;
pub use registry::AccountRegistry;
pub use sort::{SortKey, sorted_view};
pub use store::JournalStore;
pub use validation::{PostingPolicy, validate_balance};
