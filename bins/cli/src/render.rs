//! Plain-text output.

use std::io::{self, Write};

use tally_core::Book;
use tally_core::ledger::{Account, DisplayAmount, EntryType, JournalEntry};
use tally_core::reports::{PeriodSummary, StatementSection};
use tally_shared::types::AccountId;

/// Amount with a `(!)` marker when its sign is abnormal for the account type.
pub fn amount(display: DisplayAmount) -> String {
    if display.warning {
        format!("{} (!)", display.magnitude)
    } else {
        display.magnitude.to_string()
    }
}

/// Name of an account, or a placeholder for a deleted one.
pub fn account_name(book: &Book, id: AccountId) -> String {
    book.account(id)
        .map_or_else(|| format!("<unknown account {id}>"), |a| a.name.clone())
}

pub fn accounts<'a>(out: &mut dyn Write, accounts: impl IntoIterator<Item = &'a Account>) -> io::Result<()> {
    for account in accounts {
        write!(out, "{}  {:<15} {}", account.id, account.account_type.label(), account.name)?;
        if let Some(memo) = &account.memo {
            write!(out, "  # {memo}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn entry(out: &mut dyn Write, book: &Book, entry: &JournalEntry) -> io::Result<()> {
    write!(out, "#{} {} {}", entry.sequence, entry.date, entry.id)?;
    if !entry.description.is_empty() {
        write!(out, "  {}", entry.description)?;
    }
    writeln!(out)?;
    for (side, posting) in entry.lines() {
        let label = match side {
            EntryType::Debit => "Dr",
            EntryType::Credit => "Cr",
        };
        writeln!(
            out,
            "    {label} {:<24} {:>12}",
            account_name(book, posting.account_id),
            posting.amount
        )?;
    }
    Ok(())
}

pub fn section(out: &mut dyn Write, section: &StatementSection) -> io::Result<()> {
    writeln!(out, "  {}", section.account_type)?;
    for row in &section.rows {
        writeln!(out, "    {:<24} {:>12}", row.name, amount(row.display))?;
    }
    writeln!(out, "    {:<24} {:>12}", "Total", amount(section.total_display))?;
    Ok(())
}

pub fn unresolved(out: &mut dyn Write, book: &Book, summary: &PeriodSummary) -> io::Result<()> {
    if summary.unresolved().is_empty() {
        return Ok(());
    }
    writeln!(out, "Unresolved")?;
    for (id, total) in summary.unresolved() {
        writeln!(out, "    {:<24} {:>12}", account_name(book, *id), total)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_marker() {
        assert_eq!(
            amount(DisplayAmount {
                magnitude: 80,
                warning: true
            }),
            "80 (!)"
        );
        assert_eq!(
            amount(DisplayAmount {
                magnitude: 1000,
                warning: false
            }),
            "1000"
        );
    }

    #[test]
    fn test_unknown_account_placeholder() {
        let book = Book::in_memory();
        let ghost = AccountId::new();
        assert_eq!(account_name(&book, ghost), format!("<unknown account {ghost}>"));
    }
}
