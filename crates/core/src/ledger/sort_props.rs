//! Property-based tests for sorted entry views.

use chrono::NaiveDate;
use proptest::prelude::*;
use tally_shared::types::AccountId;

use super::entry::Posting;
use super::sort::{SortKey, sorted_view};
use super::store::JournalStore;

fn store_with(days: &[u32], deletions: &[usize]) -> JournalStore {
    let (debit, credit) = (AccountId::new(), AccountId::new());
    let mut store = JournalStore::new();
    for day in days {
        store
            .add_entry(
                NaiveDate::from_ymd_opt(2024, 3, *day).unwrap(),
                vec![Posting::new(debit, 10)],
                vec![Posting::new(credit, 10)],
                String::new(),
            )
            .unwrap();
    }
    for index in deletions {
        if let Some(id) = store.entries().get(*index).map(|e| e.id) {
            store.delete_entry(id);
        }
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Creation order is the order entries were added, even after deletions.
    #[test]
    fn prop_created_order_is_store_order(
        days in prop::collection::vec(1u32..=28, 1..30),
        deletions in prop::collection::vec(0usize..30, 0..5),
    ) {
        let store = store_with(&days, &deletions);

        let created: Vec<u64> = sorted_view(store.entries(), SortKey::CreatedAsc)
            .iter()
            .map(|e| e.sequence)
            .collect();
        let stored: Vec<u64> = store.entries().iter().map(|e| e.sequence).collect();

        prop_assert_eq!(&created, &stored);
        prop_assert!(created.windows(2).all(|w| w[0] < w[1]));
    }

    /// Entries sharing a date keep store order in both directions.
    #[test]
    fn prop_date_ties_keep_store_order(days in prop::collection::vec(1u32..=5, 1..30)) {
        let store = store_with(&days, &[]);

        for key in [SortKey::DateAsc, SortKey::DateDesc] {
            let view = sorted_view(store.entries(), key);
            for pair in view.windows(2) {
                if pair[0].date == pair[1].date {
                    prop_assert!(pair[0].sequence < pair[1].sequence);
                }
            }
        }
    }
}
