//! Account registry (chart of accounts).
//!
//! The registry owns every account and its display order. Lookups by id are
//! linear: a personal chart of accounts holds tens of entries, and keeping a
//! single `Vec` makes the order the source of truth.

use std::collections::HashSet;

use tally_shared::types::AccountId;

use super::account::{Account, AccountType};
use super::error::LedgerError;

/// Ordered collection of accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the six starter accounts, one per type.
    #[must_use]
    pub fn with_default_seed() -> Self {
        let accounts = [
            ("Cash", AccountType::Asset),
            ("Scholarship Loan", AccountType::Liability),
            ("Net Assets", AccountType::Equity),
            ("Food", AccountType::Expense),
            ("Salary", AccountType::Revenue),
            ("Profit and Loss", AccountType::ProfitAndLoss),
        ]
        .into_iter()
        .map(|(name, account_type)| Account::new(name, account_type, None))
        .collect();

        Self { accounts }
    }

    /// Rebuilds a registry from previously saved accounts, keeping their order.
    #[must_use]
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Adds a new active account.
    ///
    /// # Errors
    ///
    /// Returns `EmptyAccountName` for a blank name and `DuplicateAccount` if an
    /// account (active or archived) with the same name and type exists.
    pub fn add(
        &mut self,
        name: &str,
        account_type: AccountType,
        memo: Option<String>,
    ) -> Result<Account, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyAccountName);
        }
        if self.find(name, account_type).is_some() {
            return Err(LedgerError::DuplicateAccount {
                name: name.to_string(),
                account_type,
            });
        }

        let account = Account::new(name, account_type, normalize_memo(memo));
        self.accounts.push(account.clone());
        Ok(account)
    }

    /// Replaces an account's memo. Returns false if the id is unknown.
    pub fn update_memo(&mut self, id: AccountId, memo: Option<String>) -> bool {
        match self.get_mut(id) {
            Some(account) => {
                account.memo = normalize_memo(memo);
                true
            }
            None => false,
        }
    }

    /// Archives an account. Returns true only if the flag actually flipped.
    pub fn archive(&mut self, id: AccountId) -> bool {
        self.set_archived(id, true)
    }

    /// Unarchives an account. Returns true only if the flag actually flipped.
    pub fn unarchive(&mut self, id: AccountId) -> bool {
        self.set_archived(id, false)
    }

    fn set_archived(&mut self, id: AccountId, archived: bool) -> bool {
        match self.get_mut(id) {
            Some(account) if account.archived != archived => {
                account.archived = archived;
                true
            }
            _ => false,
        }
    }

    /// Removes an account regardless of its archive state.
    ///
    /// Journal entries that reference the account are left untouched.
    pub fn delete(&mut self, id: AccountId) -> Option<Account> {
        let index = self.accounts.iter().position(|a| a.id == id)?;
        Some(self.accounts.remove(index))
    }

    /// Moves the listed accounts to the front, in the given order.
    ///
    /// Unknown and repeated ids are ignored. Accounts not listed keep their
    /// relative order and follow the listed ones.
    pub fn reorder(&mut self, order: &[AccountId]) {
        let mut seen = HashSet::with_capacity(order.len());
        let mut remaining = std::mem::take(&mut self.accounts);
        let mut reordered = Vec::with_capacity(remaining.len());

        for id in order {
            if !seen.insert(*id) {
                continue;
            }
            if let Some(index) = remaining.iter().position(|a| a.id == *id) {
                reordered.push(remaining.remove(index));
            }
        }

        reordered.append(&mut remaining);
        self.accounts = reordered;
    }

    /// Current display order.
    #[must_use]
    pub fn order(&self) -> Vec<AccountId> {
        self.accounts.iter().map(|a| a.id).collect()
    }

    /// Looks up an account by id.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Looks up an account by its (name, type) pair.
    #[must_use]
    pub fn find(&self, name: &str, account_type: AccountType) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.name == name && a.account_type == account_type)
    }

    /// All accounts in registry order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Accounts that are not archived, in registry order.
    #[must_use]
    pub fn list_active(&self) -> Vec<&Account> {
        self.accounts.iter().filter(|a| a.is_active()).collect()
    }

    /// Archived accounts, in registry order.
    #[must_use]
    pub fn list_archived(&self) -> Vec<&Account> {
        self.accounts.iter().filter(|a| a.archived).collect()
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the registry holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn normalize_memo(memo: Option<String>) -> Option<String> {
    memo.filter(|m| !m.trim().is_empty())
}
