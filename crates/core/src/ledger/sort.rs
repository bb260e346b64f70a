//! Sorted views over journal entries.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// Ordering for journal entry listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Oldest first by creation sequence.
    #[default]
    CreatedAsc,
    /// Newest first by creation sequence.
    CreatedDesc,
    /// Earliest booking date first.
    DateAsc,
    /// Latest booking date first.
    DateDesc,
}

/// Returns the entries ordered by `key`.
///
/// The sort is stable for every key: entries that compare equal keep their
/// input order, which is store order when called on the store's entries.
#[must_use]
pub fn sorted_view<'a, I>(entries: I, key: SortKey) -> Vec<&'a JournalEntry>
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    let mut view: Vec<&JournalEntry> = entries.into_iter().collect();
    match key {
        SortKey::CreatedAsc => view.sort_by_key(|e| e.sequence),
        SortKey::CreatedDesc => view.sort_by(|a, b| b.sequence.cmp(&a.sequence)),
        SortKey::DateAsc => view.sort_by_key(|e| e.date),
        SortKey::DateDesc => view.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    view
}
