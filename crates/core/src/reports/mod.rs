//! Financial report generation.
//!
//! This module provides pure business logic for period reports:
//! - Per-account period summary
//! - Balance Sheet
//! - Income Statement

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
