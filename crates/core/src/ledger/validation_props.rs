//! Property-based tests for journal entry validation rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use tally_shared::types::AccountId;

use super::entry::Posting;
use super::error::LedgerError;
use super::store::JournalStore;
use super::validation::{PostingPolicy, validate_balance};

/// Strategy to generate a positive amount in minor units.
fn positive_amount() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

/// Strategy to generate a list of positive line amounts.
fn amounts(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(positive_amount(), 1..=max_len)
}

fn to_lines(amounts: &[i64]) -> Vec<Posting> {
    amounts
        .iter()
        .map(|amount| Posting::new(AccountId::new(), *amount))
        .collect()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Splitting one total over several debit lines against a single credit
    /// line always balances.
    #[test]
    fn prop_split_lines_balance(debits in amounts(8)) {
        let total: i64 = debits.iter().sum();
        let result = PostingPolicy::Strict.validate(&to_lines(&debits), &to_lines(&[total]));
        prop_assert_eq!(result, Ok(total));
    }

    /// Any difference between the sides is rejected with both totals.
    #[test]
    fn prop_mismatch_rejected(
        debits in amounts(6),
        credits in amounts(6),
    ) {
        let debit: i64 = debits.iter().sum();
        let credit: i64 = credits.iter().sum();
        prop_assume!(debit != credit);

        prop_assert_eq!(
            validate_balance(&to_lines(&debits), &to_lines(&credits)),
            Err(LedgerError::Unbalanced { debit, credit })
        );
    }

    /// A rejected entry leaves the store exactly as it was.
    #[test]
    fn prop_rejection_leaves_store_unchanged(
        seed in amounts(5),
        debit in positive_amount(),
        delta in 1i64..1_000,
    ) {
        let mut store = JournalStore::new();
        for amount in &seed {
            store
                .add_entry(date(), to_lines(&[*amount]), to_lines(&[*amount]), String::new())
                .unwrap();
        }
        let before = store.clone();

        let result = store.add_entry(date(), to_lines(&[debit]), to_lines(&[debit + delta]), String::new());

        prop_assert!(result.is_err());
        prop_assert_eq!(store, before);
    }

    /// Every entry accepted into the store satisfies the balance invariant.
    #[test]
    fn prop_store_holds_only_balanced_entries(
        attempts in prop::collection::vec((positive_amount(), 0i64..3), 1..20),
    ) {
        let mut store = JournalStore::new();
        for (amount, skew) in attempts {
            let _ = store.add_entry(
                date(),
                to_lines(&[amount]),
                to_lines(&[amount + skew]),
                String::new(),
            );
        }

        for entry in store.entries() {
            prop_assert_eq!(entry.debit_total(), entry.credit_total());
        }
    }
}
