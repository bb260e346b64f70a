//! Book service implementation.

use std::collections::HashSet;
use std::sync::mpsc;

use tally_shared::types::{AccountId, JournalEntryId};
use tracing::{debug, info, warn};

use super::error::BookError;
use super::events::{BookEvent, EventHub};
use crate::fiscal::Period;
use crate::ledger::{
    Account, AccountRegistry, AccountType, EntryDraft, JournalEntry, JournalStore, LedgerError,
    PostingPolicy, SortKey, sorted_view,
};
use crate::reports::{BalanceSheet, IncomeStatement, PeriodSummary, ReportService};
use crate::snapshot::{MemorySnapshotStore, Snapshot, SnapshotError, SnapshotStore};

/// How the book obtained its initial state.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A saved snapshot was restored.
    Loaded {
        /// Accounts restored.
        accounts: usize,
        /// Journal entries restored.
        entries: usize,
    },
    /// Nothing was saved yet; the default accounts were created.
    Seeded,
    /// Saved data could not be used; the default accounts were created.
    Recovered(SnapshotError),
}

impl LoadOutcome {
    /// Returns true if saved data was discarded.
    #[must_use]
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }
}

/// Accounts, journal and their persistence behind one API.
pub struct Book {
    accounts: AccountRegistry,
    journal: JournalStore,
    store: Box<dyn SnapshotStore>,
    events: EventHub,
}

impl std::fmt::Debug for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Book")
            .field("accounts", &self.accounts.len())
            .field("entries", &self.journal.len())
            .finish_non_exhaustive()
    }
}

impl Book {
    /// Opens a book from a snapshot store.
    ///
    /// Never fails: when nothing is saved, or the saved data cannot be
    /// used, the book starts from the default accounts and the outcome
    /// says so.
    #[must_use]
    pub fn open(store: Box<dyn SnapshotStore>) -> (Self, LoadOutcome) {
        let (mut accounts, journal, outcome) = match store.load() {
            Ok(Some(snapshot)) => {
                let outcome = LoadOutcome::Loaded {
                    accounts: snapshot.accounts.len(),
                    entries: snapshot.journal_entries.len(),
                };
                (
                    AccountRegistry::from_accounts(snapshot.accounts),
                    JournalStore::restore(snapshot.journal_entries),
                    outcome,
                )
            }
            Ok(None) => {
                info!("No saved snapshot, starting with default accounts");
                (
                    AccountRegistry::with_default_seed(),
                    JournalStore::new(),
                    LoadOutcome::Seeded,
                )
            }
            Err(err) => {
                warn!(error = %err, "Saved snapshot unusable, starting with default accounts");
                (
                    AccountRegistry::with_default_seed(),
                    JournalStore::new(),
                    LoadOutcome::Recovered(err),
                )
            }
        };

        match store.load_account_order() {
            Ok(Some(order)) => accounts.reorder(&order),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "Account order unusable, keeping snapshot order"),
        }

        if let LoadOutcome::Loaded { accounts, entries } = &outcome {
            info!(accounts, entries, "Book loaded");
        }

        let book = Self {
            accounts,
            journal,
            store,
            events: EventHub::default(),
        };
        (book, outcome)
    }

    /// A seeded book backed by memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemorySnapshotStore::new())).0
    }

    /// Subscribes to change notifications.
    ///
    /// Events arrive after the change has been saved. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> mpsc::Receiver<BookEvent> {
        self.events.subscribe()
    }

    /// Current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            accounts: self.accounts.accounts().to_vec(),
            journal_entries: self.journal.entries().to_vec(),
        }
    }

    // ========== Accounts ==========

    /// All accounts in display order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        self.accounts.accounts()
    }

    /// Active accounts in display order.
    #[must_use]
    pub fn active_accounts(&self) -> Vec<&Account> {
        self.accounts.list_active()
    }

    /// Archived accounts in display order.
    #[must_use]
    pub fn archived_accounts(&self) -> Vec<&Account> {
        self.accounts.list_archived()
    }

    /// Looks up an account by id.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `EmptyAccountName` or `DuplicateAccount`, or the save error.
    pub fn add_account(
        &mut self,
        name: &str,
        account_type: AccountType,
        memo: Option<String>,
    ) -> Result<Account, BookError> {
        let before = self.accounts.clone();
        let account = self.accounts.add(name, account_type, memo)?;
        self.save_accounts(before)?;

        info!(
            account_id = %account.id,
            name = %account.name,
            account_type = %account.account_type,
            "Account added"
        );
        self.events.publish(&BookEvent::AccountAdded(account.id));
        Ok(account)
    }

    /// Replaces an account memo. Returns false if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns the save error.
    pub fn update_account_memo(&mut self, id: AccountId, memo: Option<String>) -> Result<bool, BookError> {
        let before = self.accounts.clone();
        if !self.accounts.update_memo(id, memo) || self.accounts == before {
            return Ok(false);
        }
        self.save_accounts(before)?;

        info!(account_id = %id, "Account memo updated");
        self.events.publish(&BookEvent::AccountMemoUpdated(id));
        Ok(true)
    }

    /// Archives an account. Returns false if it was unknown or already archived.
    ///
    /// # Errors
    ///
    /// Returns the save error.
    pub fn archive_account(&mut self, id: AccountId) -> Result<bool, BookError> {
        let before = self.accounts.clone();
        if !self.accounts.archive(id) {
            return Ok(false);
        }
        self.save_accounts(before)?;

        info!(account_id = %id, "Account archived");
        self.events.publish(&BookEvent::AccountArchived(id));
        Ok(true)
    }

    /// Unarchives an account. Returns false if it was unknown or already active.
    ///
    /// # Errors
    ///
    /// Returns the save error.
    pub fn unarchive_account(&mut self, id: AccountId) -> Result<bool, BookError> {
        let before = self.accounts.clone();
        if !self.accounts.unarchive(id) {
            return Ok(false);
        }
        self.save_accounts(before)?;

        info!(account_id = %id, "Account unarchived");
        self.events.publish(&BookEvent::AccountUnarchived(id));
        Ok(true)
    }

    /// Deletes an archived account.
    ///
    /// Entries that post to it are kept; their lines show up as unresolved
    /// in period summaries. Returns `None` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotArchived` for an active account, or the save error.
    pub fn delete_account(&mut self, id: AccountId) -> Result<Option<Account>, BookError> {
        match self.accounts.get(id) {
            None => return Ok(None),
            Some(account) if account.is_active() => {
                return Err(LedgerError::AccountNotArchived(id).into());
            }
            Some(_) => {}
        }

        let before = self.accounts.clone();
        let removed = self.accounts.delete(id);
        self.save_accounts(before)?;

        let references = self.journal.filter_by_account(id).len();
        info!(account_id = %id, references, "Account deleted");
        self.events.publish(&BookEvent::AccountDeleted(id));
        Ok(removed)
    }

    /// Moves the listed accounts to the front of the display order.
    ///
    /// Returns false if the order did not change.
    ///
    /// # Errors
    ///
    /// Returns the save error.
    pub fn reorder_accounts(&mut self, order: &[AccountId]) -> Result<bool, BookError> {
        let before = self.accounts.clone();
        self.accounts.reorder(order);
        if self.accounts == before {
            return Ok(false);
        }
        self.save_accounts(before)?;

        info!(listed = order.len(), "Accounts reordered");
        self.events.publish(&BookEvent::AccountsReordered);
        Ok(true)
    }

    // ========== Journal entries ==========

    /// All entries in store order.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        self.journal.entries()
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn entry(&self, id: JournalEntryId) -> Option<&JournalEntry> {
        self.journal.get(id)
    }

    /// Entries that post to the account, in store order.
    #[must_use]
    pub fn entries_for_account(&self, id: AccountId) -> Vec<&JournalEntry> {
        self.journal.filter_by_account(id)
    }

    /// Entries, optionally limited to one account, in the requested order.
    #[must_use]
    pub fn sorted_entries(&self, account: Option<AccountId>, key: SortKey) -> Vec<&JournalEntry> {
        match account {
            Some(id) => sorted_view(self.journal.filter_by_account(id), key),
            None => sorted_view(self.journal.entries(), key),
        }
    }

    /// Records a new journal entry.
    ///
    /// # Errors
    ///
    /// Returns the violated posting rule, `AccountNotFound` or
    /// `AccountArchived` for a bad account reference, or the save error.
    pub fn post_entry(&mut self, draft: EntryDraft) -> Result<JournalEntry, BookError> {
        PostingPolicy::Strict.validate(&draft.debit_lines, &draft.credit_lines)?;
        self.check_accounts(&draft, None)?;

        let before = self.journal.clone();
        let EntryDraft {
            date,
            debit_lines,
            credit_lines,
            description,
        } = draft;
        let entry = self
            .journal
            .add_entry(date, debit_lines, credit_lines, description)?;
        self.save_journal(before)?;

        info!(
            entry_id = %entry.id,
            sequence = entry.sequence,
            date = %entry.date,
            total = entry.debit_total(),
            "Journal entry posted"
        );
        self.events.publish(&BookEvent::EntryPosted(entry.id));
        Ok(entry)
    }

    /// Replaces an existing entry, keeping its id and creation order.
    ///
    /// Archived accounts already on the entry may stay on it.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, the violated posting rule, a bad account
    /// reference, or the save error.
    pub fn edit_entry(&mut self, id: JournalEntryId, draft: EntryDraft) -> Result<JournalEntry, BookError> {
        let existing = self.journal.get(id).ok_or(LedgerError::EntryNotFound(id))?;
        PostingPolicy::Strict.validate(&draft.debit_lines, &draft.credit_lines)?;
        self.check_accounts(&draft, Some(existing))?;

        let before = self.journal.clone();
        let EntryDraft {
            date,
            debit_lines,
            credit_lines,
            description,
        } = draft;
        let entry = self
            .journal
            .replace_entry(id, date, debit_lines, credit_lines, description)?;
        self.save_journal(before)?;

        info!(entry_id = %id, date = %entry.date, total = entry.debit_total(), "Journal entry edited");
        self.events.publish(&BookEvent::EntryEdited(id));
        Ok(entry)
    }

    /// Deletes one entry. Returns `None` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns the save error.
    pub fn delete_entry(&mut self, id: JournalEntryId) -> Result<Option<JournalEntry>, BookError> {
        if self.journal.get(id).is_none() {
            return Ok(None);
        }

        let before = self.journal.clone();
        let removed = self.journal.delete_entry(id);
        self.save_journal(before)?;

        info!(entry_id = %id, "Journal entry deleted");
        self.events.publish(&BookEvent::EntriesDeleted(vec![id]));
        Ok(removed)
    }

    /// Deletes every listed entry, skipping unknown ids.
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns the save error; no entry is removed in that case.
    pub fn delete_entries(&mut self, ids: &[JournalEntryId]) -> Result<usize, BookError> {
        let wanted: HashSet<JournalEntryId> = ids.iter().copied().collect();
        let found: Vec<JournalEntryId> = self
            .journal
            .entries()
            .iter()
            .filter(|e| wanted.contains(&e.id))
            .map(|e| e.id)
            .collect();
        if found.is_empty() {
            return Ok(0);
        }

        let before = self.journal.clone();
        let removed = self.journal.delete_entries(&wanted);
        self.save_journal(before)?;

        info!(requested = ids.len(), removed, "Journal entries deleted");
        self.events.publish(&BookEvent::EntriesDeleted(found));
        Ok(removed)
    }

    // ========== Reports ==========

    /// Per-account totals for a period.
    #[must_use]
    pub fn summary(&self, period: &Period) -> PeriodSummary {
        ReportService::summarize(self.journal.entries(), &self.accounts, period)
    }

    /// Balance sheet for a period.
    #[must_use]
    pub fn balance_sheet(&self, period: &Period) -> BalanceSheet {
        ReportService::balance_sheet(&self.summary(period))
    }

    /// Income statement for a period.
    #[must_use]
    pub fn income_statement(&self, period: &Period) -> IncomeStatement {
        ReportService::income_statement(&self.summary(period))
    }

    // ========== Internals ==========

    fn check_accounts(&self, draft: &EntryDraft, existing: Option<&JournalEntry>) -> Result<(), LedgerError> {
        for id in draft.account_ids() {
            let account = self.accounts.get(id).ok_or(LedgerError::AccountNotFound(id))?;
            let already_posted = existing.is_some_and(|entry| entry.touches_account(id));
            if account.archived && !already_posted {
                return Err(LedgerError::AccountArchived(id));
            }
        }
        Ok(())
    }

    fn save_accounts(&mut self, before: AccountRegistry) -> Result<(), BookError> {
        let snapshot = self.snapshot();
        if let Err(err) = self.store.save(&snapshot) {
            warn!(error = %err, "Save failed, account change rolled back");
            self.accounts = before;
            return Err(err.into());
        }

        if let Err(err) = self.store.save_account_order(&self.accounts.order()) {
            warn!(error = %err, "Account order save failed, account change rolled back");
            self.accounts = before;
            // The new snapshot is already on disk; put the previous one back.
            if let Err(restore_err) = self.store.save(&self.snapshot()) {
                warn!(error = %restore_err, "Previous snapshot could not be restored");
            }
            return Err(err.into());
        }
        debug!(accounts = snapshot.accounts.len(), "Snapshot saved with account order");
        Ok(())
    }

    fn save_journal(&mut self, before: JournalStore) -> Result<(), BookError> {
        let snapshot = self.snapshot();
        if let Err(err) = self.store.save(&snapshot) {
            warn!(error = %err, "Save failed, journal change rolled back");
            self.journal = before;
            return Err(err.into());
        }
        debug!(entries = snapshot.journal_entries.len(), "Snapshot saved");
        Ok(())
    }
}
