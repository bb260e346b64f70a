//! Resolution of `<ACCOUNT>` arguments.

use tally_core::Book;
use tally_core::ledger::{Account, EntryDraft};
use tally_shared::AppError;
use tally_shared::types::AccountId;

use crate::args::EntryArgs;

/// Which account wins when several share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefer {
    /// A single active match.
    Active,
    /// A single archived match, for commands that act on archived accounts.
    Archived,
}

impl Prefer {
    fn matches(self, account: &Account) -> bool {
        match self {
            Self::Active => account.is_active(),
            Self::Archived => account.archived,
        }
    }
}

/// Finds an account by id or by name.
///
/// A name must identify one account. When several accounts share it, a
/// single match in the `prefer` state wins.
pub fn account<'a>(book: &'a Book, query: &str, prefer: Prefer) -> Result<&'a Account, AppError> {
    let query = query.trim();
    if let Ok(id) = query.parse::<AccountId>() {
        return book
            .account(id)
            .ok_or_else(|| AppError::NotFound(format!("account {id}")));
    }

    let matches: Vec<&Account> = book.accounts().iter().filter(|a| a.name == query).collect();
    if matches.is_empty() {
        return Err(AppError::NotFound(format!("account '{query}'")));
    }
    if matches.len() == 1 {
        return Ok(matches[0]);
    }

    let preferred: Vec<&Account> = matches.iter().copied().filter(|a| prefer.matches(a)).collect();
    if preferred.len() == 1 {
        return Ok(preferred[0]);
    }

    let candidates: Vec<String> = matches
        .iter()
        .map(|a| format!("{} ({}, {})", a.id, a.account_type, status(a)))
        .collect();
    Err(AppError::Validation(format!(
        "account name '{query}' is ambiguous, use one of: {}",
        candidates.join(", ")
    )))
}

/// Account id for a query, preferring active accounts.
pub fn account_id(book: &Book, query: &str) -> Result<AccountId, AppError> {
    account(book, query, Prefer::Active).map(|a| a.id)
}

/// Account id for a query, preferring archived accounts.
pub fn archived_account_id(book: &Book, query: &str) -> Result<AccountId, AppError> {
    account(book, query, Prefer::Archived).map(|a| a.id)
}

/// Builds a draft from entry arguments.
pub fn draft(book: &Book, args: &EntryArgs) -> Result<EntryDraft, AppError> {
    let mut draft = EntryDraft::new(args.date).description(args.description.clone());
    for line in &args.debits {
        draft = draft.debit(account_id(book, &line.account)?, line.amount);
    }
    for line in &args.credits {
        draft = draft.credit(account_id(book, &line.account)?, line.amount);
    }
    Ok(draft)
}

fn status(account: &Account) -> &'static str {
    if account.archived { "archived" } else { "active" }
}
