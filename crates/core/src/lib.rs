//! Core business logic for Tally.
//!
//! This crate contains the ledger engine with ZERO user-interface
//! dependencies. All domain types, validation rules, aggregation and
//! snapshot persistence live here.
//!
//! # Modules
//!
//! - `ledger` - Chart of accounts, journal entries and balance validation
//! - `fiscal` - Reporting periods
//! - `reports` - Period summaries, balance sheet and income statement
//! - `snapshot` - Snapshot codec and stores
//! - `book` - The single source of truth tying the above together

pub mod book;
pub mod fiscal;
pub mod ledger;
pub mod reports;
pub mod snapshot;

pub use book::{Book, BookError, BookEvent, LoadOutcome};
