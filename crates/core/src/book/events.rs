//! Change notifications.

use std::sync::{Mutex, PoisonError, mpsc};

use tally_shared::types::{AccountId, JournalEntryId};

/// A change that has been applied to the book and saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEvent {
    /// A new account was created.
    AccountAdded(AccountId),
    /// An account memo changed.
    AccountMemoUpdated(AccountId),
    /// An account was archived.
    AccountArchived(AccountId),
    /// An account was unarchived.
    AccountUnarchived(AccountId),
    /// An archived account was removed.
    AccountDeleted(AccountId),
    /// The account display order changed.
    AccountsReordered,
    /// A journal entry was created.
    EntryPosted(JournalEntryId),
    /// A journal entry was replaced.
    EntryEdited(JournalEntryId),
    /// Journal entries were removed.
    EntriesDeleted(Vec<JournalEntryId>),
}

/// Fan-out of events to every live subscriber.
#[derive(Debug, Default)]
pub(crate) struct EventHub {
    subscribers: Mutex<Vec<mpsc::Sender<BookEvent>>>,
}

impl EventHub {
    pub(crate) fn subscribe(&self) -> mpsc::Receiver<BookEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    pub(crate) fn publish(&self, event: &BookEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Dropped receivers disconnect their sender.
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
