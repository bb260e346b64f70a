//! Journal entry store.
//!
//! The store owns the ordered entry collection and is the only place entries
//! are created, replaced or removed. Every entry it accepts passes
//! [`validate_balance`]; the stricter user-facing rules are applied by the
//! caller (see [`super::validation::PostingPolicy`]).

use std::collections::HashSet;

use chrono::NaiveDate;
use tally_shared::types::{AccountId, JournalEntryId};

use super::entry::{JournalEntry, Posting};
use super::error::LedgerError;
use super::validation::validate_balance;

/// Ordered collection of posted journal entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalStore {
    entries: Vec<JournalEntry>,
    next_sequence: u64,
}

impl Default for JournalStore {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 1,
        }
    }
}

impl JournalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from saved entries, keeping their order.
    ///
    /// Entries without a sequence number (sequence 0) are numbered in store
    /// order after the highest existing one. Existing numbers are never
    /// changed, so under [`SortKey::CreatedAsc`](super::SortKey) a legacy
    /// entry sorts after every numbered entry even when it is stored before
    /// them. Store order itself is unchanged.
    ///
    /// Numbering saturates at `u64::MAX`; snapshot decoding rejects data
    /// that would get there.
    #[must_use]
    pub fn restore(mut entries: Vec<JournalEntry>) -> Self {
        let highest = entries.iter().map(|e| e.sequence).max().unwrap_or(0);
        let mut next_sequence = highest.saturating_add(1);
        for entry in entries.iter_mut().filter(|e| e.sequence == 0) {
            entry.sequence = next_sequence;
            next_sequence = next_sequence.saturating_add(1);
        }

        Self {
            entries,
            next_sequence,
        }
    }

    /// Validates and appends a new entry.
    ///
    /// # Errors
    ///
    /// Returns the balance violation; the store is left unchanged.
    pub fn add_entry(
        &mut self,
        date: NaiveDate,
        debit_lines: Vec<Posting>,
        credit_lines: Vec<Posting>,
        description: String,
    ) -> Result<JournalEntry, LedgerError> {
        validate_balance(&debit_lines, &credit_lines)?;

        let entry = JournalEntry {
            id: JournalEntryId::new(),
            sequence: self.next_sequence,
            date,
            debit_lines,
            credit_lines,
            description,
        };
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.entries.push(entry.clone());

        Ok(entry)
    }

    /// Validates and replaces an existing entry in place.
    ///
    /// The entry keeps its id, sequence number and position.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` for an unknown id, or the balance violation.
    pub fn replace_entry(
        &mut self,
        id: JournalEntryId,
        date: NaiveDate,
        debit_lines: Vec<Posting>,
        credit_lines: Vec<Posting>,
        description: String,
    ) -> Result<JournalEntry, LedgerError> {
        let index = self
            .position(id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        validate_balance(&debit_lines, &credit_lines)?;

        let slot = &mut self.entries[index];
        *slot = JournalEntry {
            id,
            sequence: slot.sequence,
            date,
            debit_lines,
            credit_lines,
            description,
        };

        Ok(slot.clone())
    }

    /// Removes an entry. Unknown ids are a no-op.
    pub fn delete_entry(&mut self, id: JournalEntryId) -> Option<JournalEntry> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Removes every listed entry, skipping unknown ids.
    ///
    /// Returns the number of entries removed.
    pub fn delete_entries(&mut self, ids: &HashSet<JournalEntryId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        before - self.entries.len()
    }

    /// Entries that post to the account on either side, in store order.
    #[must_use]
    pub fn filter_by_account(&self, account_id: AccountId) -> Vec<&JournalEntry> {
        self.entries
            .iter()
            .filter(|e| e.touches_account(account_id))
            .collect()
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: JournalEntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn position(&self, id: JournalEntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// All entries in store order.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn add(store: &mut JournalStore, debit: AccountId, credit: AccountId, amount: i64) -> JournalEntry {
        store
            .add_entry(
                date(1),
                vec![Posting::new(debit, amount)],
                vec![Posting::new(credit, amount)],
                String::new(),
            )
            .unwrap()
    }

    #[test]
    fn test_add_assigns_increasing_sequence() {
        let mut store = JournalStore::new();
        let (cash, salary) = (AccountId::new(), AccountId::new());

        let first = add(&mut store, cash, salary, 100);
        let second = add(&mut store, cash, salary, 200);

        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_rejected_entry_leaves_store_size_unchanged() {
        let mut store = JournalStore::new();
        let (cash, salary) = (AccountId::new(), AccountId::new());
        add(&mut store, cash, salary, 100);

        let err = store
            .add_entry(
                date(2),
                vec![Posting::new(cash, 500)],
                vec![Posting::new(salary, 400)],
                "typo".to_string(),
            )
            .unwrap_err();

        assert_eq!(err, LedgerError::Unbalanced { debit: 500, credit: 400 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sequence_not_consumed_by_rejection() {
        let mut store = JournalStore::new();
        let (cash, salary) = (AccountId::new(), AccountId::new());
        let _ = store.add_entry(
            date(1),
            vec![Posting::new(cash, 1)],
            vec![Posting::new(salary, 2)],
            String::new(),
        );
        assert_eq!(add(&mut store, cash, salary, 5).sequence, 1);
    }

    #[test]
    fn test_replace_keeps_position_id_and_sequence() {
        let mut store = JournalStore::new();
        let (cash, salary, food) = (AccountId::new(), AccountId::new(), AccountId::new());
        let first = add(&mut store, cash, salary, 100);
        let second = add(&mut store, cash, salary, 200);

        let replaced = store
            .replace_entry(
                first.id,
                date(20),
                vec![Posting::new(food, 300)],
                vec![Posting::new(cash, 300)],
                "groceries".to_string(),
            )
            .unwrap();

        assert_eq!(replaced.id, first.id);
        assert_eq!(replaced.sequence, first.sequence);
        assert_eq!(store.entries()[0], replaced);
        assert_eq!(store.entries()[1], second);
        assert_eq!(store.entries()[0].description, "groceries");
    }

    #[test]
    fn test_replace_unknown_id_fails() {
        let mut store = JournalStore::new();
        let id = JournalEntryId::new();
        assert_eq!(
            store.replace_entry(id, date(1), vec![], vec![], String::new()),
            Err(LedgerError::EntryNotFound(id))
        );
    }

    #[test]
    fn test_replace_rejects_unbalanced_and_keeps_original() {
        let mut store = JournalStore::new();
        let (cash, salary) = (AccountId::new(), AccountId::new());
        let entry = add(&mut store, cash, salary, 100);
        let before = store.clone();

        let result = store.replace_entry(
            entry.id,
            date(3),
            vec![Posting::new(cash, 100)],
            vec![Posting::new(salary, 90)],
            String::new(),
        );

        assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete_entry() {
        let mut store = JournalStore::new();
        let (cash, salary) = (AccountId::new(), AccountId::new());
        let entry = add(&mut store, cash, salary, 100);

        assert_eq!(store.delete_entry(entry.id), Some(entry.clone()));
        assert!(store.is_empty());
        assert_eq!(store.delete_entry(entry.id), None);
    }

    #[test]
    fn test_batch_delete_skips_unknown_ids() {
        let mut store = JournalStore::new();
        let (cash, salary) = (AccountId::new(), AccountId::new());
        let keep = add(&mut store, cash, salary, 100);
        let drop = add(&mut store, cash, salary, 200);

        let ids = HashSet::from([drop.id, JournalEntryId::new()]);
        assert_eq!(store.delete_entries(&ids), 1);
        assert_eq!(store.entries(), &[keep]);
    }

    #[test]
    fn test_filter_by_account_preserves_order() {
        let mut store = JournalStore::new();
        let (cash, salary, food) = (AccountId::new(), AccountId::new(), AccountId::new());
        let first = add(&mut store, cash, salary, 100);
        add(&mut store, food, salary, 50);
        let third = add(&mut store, food, cash, 25);

        let ids: Vec<_> = store.filter_by_account(cash).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[test]
    fn test_restore_numbers_legacy_entries() {
        let mut source = JournalStore::new();
        let (cash, salary) = (AccountId::new(), AccountId::new());
        add(&mut source, cash, salary, 1);
        add(&mut source, cash, salary, 2);
        add(&mut source, cash, salary, 3);

        let mut entries = source.entries().to_vec();
        entries[0].sequence = 0;
        entries[2].sequence = 0;

        let mut restored = JournalStore::restore(entries);
        let sequences: Vec<_> = restored.entries().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![3, 2, 4]);

        let created: Vec<i64> = crate::ledger::sorted_view(restored.entries(), crate::ledger::SortKey::CreatedAsc)
            .iter()
            .map(|e| e.debit_lines[0].amount)
            .collect();
        assert_eq!(created, vec![2, 1, 3]);

        assert_eq!(add(&mut restored, cash, salary, 4).sequence, 5);
    }

    #[test]
    fn test_restore_at_sequence_limit_does_not_panic() {
        let mut source = JournalStore::new();
        let (cash, salary) = (AccountId::new(), AccountId::new());
        add(&mut source, cash, salary, 1);
        add(&mut source, cash, salary, 2);

        let mut entries = source.entries().to_vec();
        entries[0].sequence = u64::MAX;
        entries[1].sequence = 0;

        let restored = JournalStore::restore(entries);
        let sequences: Vec<_> = restored.entries().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![u64::MAX, u64::MAX]);
    }
}
