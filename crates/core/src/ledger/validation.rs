//! Business rule validation for journal entries.
//!
//! Two layers:
//! - [`validate_balance`] is the store's hard gate: no negative amounts and
//!   debits equal credits. Everything in the store, including data restored
//!   from a snapshot, satisfies it.
//! - [`PostingPolicy::Strict`] is what user-facing add/edit paths apply on
//!   top: both sides present and a strictly positive total.

use super::entry::Posting;
use super::error::LedgerError;

/// Caller-level posting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostingPolicy {
    /// Store gate only. Zero-total and empty entries pass.
    Lenient,
    /// Store gate plus non-empty sides and a positive total.
    #[default]
    Strict,
}

impl PostingPolicy {
    /// Validates lines under this policy and returns the common total.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(self, debit_lines: &[Posting], credit_lines: &[Posting]) -> Result<i64, LedgerError> {
        if self == Self::Strict && (debit_lines.is_empty() || credit_lines.is_empty()) {
            return Err(LedgerError::MissingLines);
        }

        let total = validate_balance(debit_lines, credit_lines)?;

        if self == Self::Strict && total <= 0 {
            return Err(LedgerError::NonPositiveTotal);
        }

        Ok(total)
    }
}

/// Validates that debit and credit lines balance.
///
/// Returns the common total on success.
///
/// # Errors
///
/// Returns `NegativeAmount` for any negative line, `AmountOverflow` if a
/// side's total does not fit in `i64`, and `Unbalanced` when the totals
/// differ.
pub fn validate_balance(debit_lines: &[Posting], credit_lines: &[Posting]) -> Result<i64, LedgerError> {
    let debit = side_total(debit_lines)?;
    let credit = side_total(credit_lines)?;

    if debit != credit {
        return Err(LedgerError::Unbalanced { debit, credit });
    }

    Ok(debit)
}

fn side_total(lines: &[Posting]) -> Result<i64, LedgerError> {
    lines.iter().try_fold(0i64, |total, line| {
        if line.amount < 0 {
            return Err(LedgerError::NegativeAmount(line.amount));
        }
        total
            .checked_add(line.amount)
            .ok_or(LedgerError::AmountOverflow)
    })
}
