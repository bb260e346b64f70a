//! The book: single source of truth for accounts and journal entries.
//!
//! Every mutation goes through [`Book`], which validates it against the
//! ledger rules, saves the resulting snapshot and then notifies
//! subscribers. A failed save rolls the in-memory change back.

mod error;
mod events;
mod service;


pub use error::BookError;
pub use events::BookEvent;
pub use service::{Book, LoadOutcome};
