//! Journal entry domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, JournalEntryId, PostingId};

/// Side of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Debit line (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit line (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

/// A single debit or credit line.
///
/// The posting references its account by id only; name and type are looked
/// up in the registry whenever they are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Unique identifier for this line.
    pub id: PostingId,
    /// The account affected by this line.
    pub account_id: AccountId,
    /// Amount in minor currency units.
    pub amount: i64,
}

impl Posting {
    /// Creates a posting with a fresh id.
    #[must_use]
    pub fn new(account_id: AccountId, amount: i64) -> Self {
        Self {
            id: PostingId::new(),
            account_id,
            amount,
        }
    }
}

/// A balanced journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Creation sequence number assigned by the store (1-based).
    ///
    /// `0` only appears in snapshots written before sequence numbers existed;
    /// the store renumbers those on restore.
    #[serde(default)]
    pub sequence: u64,
    /// Booking date.
    pub date: NaiveDate,
    /// Debit lines, in entry order.
    pub debit_lines: Vec<Posting>,
    /// Credit lines, in entry order.
    pub credit_lines: Vec<Posting>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl JournalEntry {
    /// Iterates every line with its side.
    pub fn lines(&self) -> impl Iterator<Item = (EntryType, &Posting)> {
        self.debit_lines
            .iter()
            .map(|p| (EntryType::Debit, p))
            .chain(self.credit_lines.iter().map(|p| (EntryType::Credit, p)))
    }

    /// Returns true if the account appears on either side.
    #[must_use]
    pub fn touches_account(&self, account_id: AccountId) -> bool {
        self.lines().any(|(_, p)| p.account_id == account_id)
    }

    /// Sum of the debit lines.
    #[must_use]
    pub fn debit_total(&self) -> i64 {
        self.debit_lines.iter().map(|p| p.amount).sum()
    }

    /// Sum of the credit lines.
    #[must_use]
    pub fn credit_total(&self) -> i64 {
        self.credit_lines.iter().map(|p| p.amount).sum()
    }
}

/// User input for creating or replacing a journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// Booking date.
    pub date: NaiveDate,
    /// Debit lines.
    pub debit_lines: Vec<Posting>,
    /// Credit lines.
    pub credit_lines: Vec<Posting>,
    /// Free-text description.
    pub description: String,
}

impl EntryDraft {
    /// Starts an empty draft for the given date.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            debit_lines: Vec::new(),
            credit_lines: Vec::new(),
            description: String::new(),
        }
    }

    /// Adds a debit line.
    #[must_use]
    pub fn debit(mut self, account_id: AccountId, amount: i64) -> Self {
        self.debit_lines.push(Posting::new(account_id, amount));
        self
    }

    /// Adds a credit line.
    #[must_use]
    pub fn credit(mut self, account_id: AccountId, amount: i64) -> Self {
        self.credit_lines.push(Posting::new(account_id, amount));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Every account referenced by the draft.
    pub fn account_ids(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.debit_lines
            .iter()
            .chain(&self.credit_lines)
            .map(|p| p.account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_lines_and_totals() {
        let cash = AccountId::new();
        let salary = AccountId::new();
        let draft = EntryDraft::new(date())
            .debit(cash, 600)
            .debit(cash, 400)
            .credit(salary, 1000);

        let entry = JournalEntry {
            id: JournalEntryId::new(),
            sequence: 1,
            date: draft.date,
            debit_lines: draft.debit_lines,
            credit_lines: draft.credit_lines,
            description: String::new(),
        };

        assert_eq!(entry.debit_total(), 1000);
        assert_eq!(entry.credit_total(), 1000);
        assert_eq!(entry.lines().count(), 3);
        assert!(entry.touches_account(salary));
        assert!(!entry.touches_account(AccountId::new()));
    }

    #[test]
    fn test_sequence_defaults_when_missing() {
        let json = format!(
            r#"{{"id":"{}","date":"2024-06-15","debit_lines":[],"credit_lines":[]}}"#,
            JournalEntryId::new()
        );
        let entry: JournalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry.sequence, 0);
        assert!(entry.description.is_empty());
    }
}
