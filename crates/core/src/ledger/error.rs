//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur while mutating the chart of
//! accounts or the journal: balance violations, amount errors, account errors
//! and missing-entry errors. None of them is fatal; every rejected operation
//! leaves the ledger unchanged.

use tally_shared::AppError;
use tally_shared::types::{AccountId, JournalEntryId};
use thiserror::Error;

use super::account::AccountType;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Sum of the debit lines.
        debit: i64,
        /// Sum of the credit lines.
        credit: i64,
    },

    /// A line amount is negative.
    #[error("Line amount cannot be negative: {0}")]
    NegativeAmount(i64),

    /// The common debit/credit total must be strictly positive.
    #[error("Journal entry total must be greater than zero")]
    NonPositiveTotal,

    /// A journal entry needs at least one debit and one credit line.
    #[error("Journal entry must have at least one debit line and one credit line")]
    MissingLines,

    /// Line totals do not fit in 64 bits.
    #[error("Journal entry total overflows")]
    AmountOverflow,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account is archived and cannot receive new postings.
    #[error("Account {0} is archived")]
    AccountArchived(AccountId),

    /// Only archived accounts may be deleted.
    #[error("Account {0} must be archived before it can be deleted")]
    AccountNotArchived(AccountId),

    /// An account with the same name and type already exists.
    #[error("Account '{name}' ({account_type}) already exists")]
    DuplicateAccount {
        /// The colliding name.
        name: String,
        /// The colliding type.
        account_type: AccountType,
    },

    /// Account names must not be blank.
    #[error("Account name cannot be empty")]
    EmptyAccountName,

    // ========== Entry Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),
}

impl LedgerError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::NonPositiveTotal => "NON_POSITIVE_TOTAL",
            Self::MissingLines => "MISSING_LINES",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountArchived(_) => "ACCOUNT_ARCHIVED",
            Self::AccountNotArchived(_) => "ACCOUNT_NOT_ARCHIVED",
            Self::DuplicateAccount { .. } => "DUPLICATE_ACCOUNT",
            Self::EmptyAccountName => "EMPTY_ACCOUNT_NAME",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
        }
    }

    /// Returns true if this is a double-entry balance violation.
    #[must_use]
    pub fn is_balance_error(&self) -> bool {
        matches!(
            self,
            Self::Unbalanced { .. } | Self::NonPositiveTotal | Self::MissingLines
        )
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(_) | LedgerError::EntryNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            LedgerError::DuplicateAccount { .. } => Self::Conflict(err.to_string()),
            LedgerError::NegativeAmount(_)
            | LedgerError::AmountOverflow
            | LedgerError::EmptyAccountName => Self::Validation(err.to_string()),
            LedgerError::Unbalanced { .. }
            | LedgerError::NonPositiveTotal
            | LedgerError::MissingLines
            | LedgerError::AccountArchived(_)
            | LedgerError::AccountNotArchived(_) => Self::BusinessRule(err.to_string()),
        }
    }
}
