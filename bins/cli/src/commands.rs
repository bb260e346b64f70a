//! Command handlers.
//!
//! Domain errors are converted to [`AppError`] before they reach `anyhow`,
//! so the exit code can be recovered in `main`.

use std::io::Write;

use chrono::NaiveDate;
use tally_core::Book;
use tally_core::fiscal::Period;
use tally_core::reports::ReportService;
use tally_shared::AppError;
use tally_shared::types::AccountId;

use crate::args::{AccountsCommand, Command, EntriesCommand, SummaryArgs};
use crate::{render, resolve};

/// Runs one command against the book, writing results to `out`.
pub fn run(book: &mut Book, command: Command, today: NaiveDate, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Accounts { command } => accounts(book, command, out),
        Command::Entries { command } => entries(book, command, out),
        Command::Summary(args) => summary(book, &args, today, out),
    }
}

fn accounts(book: &mut Book, command: AccountsCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        AccountsCommand::List { archived } => {
            let listed = if archived {
                book.archived_accounts()
            } else {
                book.active_accounts()
            };
            render::accounts(out, listed)?;
        }
        AccountsCommand::Add {
            name,
            account_type,
            memo,
        } => {
            let account = book
                .add_account(&name, account_type, memo)
                .map_err(AppError::from)?;
            writeln!(out, "Added {} ({}) {}", account.name, account.account_type, account.id)?;
        }
        AccountsCommand::Memo { account, text } => {
            let id = resolve::account_id(book, &account)?;
            let changed = book
                .update_account_memo(id, text)
                .map_err(AppError::from)?;
            let verdict = if changed { "updated" } else { "unchanged" };
            writeln!(out, "Memo of {} {verdict}", render::account_name(book, id))?;
        }
        AccountsCommand::Archive { account } => {
            let id = resolve::account_id(book, &account)?;
            let changed = book.archive_account(id).map_err(AppError::from)?;
            let verdict = if changed { "archived" } else { "already archived" };
            writeln!(out, "{} {verdict}", render::account_name(book, id))?;
        }
        AccountsCommand::Unarchive { account } => {
            let id = resolve::archived_account_id(book, &account)?;
            let changed = book.unarchive_account(id).map_err(AppError::from)?;
            let verdict = if changed { "unarchived" } else { "already active" };
            writeln!(out, "{} {verdict}", render::account_name(book, id))?;
        }
        AccountsCommand::Delete { account } => {
            let id = resolve::archived_account_id(book, &account)?;
            if let Some(removed) = book.delete_account(id).map_err(AppError::from)? {
                writeln!(out, "Deleted {}", removed.name)?;
                let references = book.entries_for_account(id).len();
                if references > 0 {
                    writeln!(out, "{references} entries still post to it")?;
                }
            }
        }
        AccountsCommand::Reorder { accounts } => {
            let ids = accounts
                .iter()
                .map(|query| resolve::account_id(book, query))
                .collect::<Result<Vec<AccountId>, AppError>>()?;
            book.reorder_accounts(&ids).map_err(AppError::from)?;
            render::accounts(out, book.accounts())?;
        }
    }
    Ok(())
}

fn entries(book: &mut Book, command: EntriesCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        EntriesCommand::Add(args) => {
            let draft = resolve::draft(book, &args)?;
            let entry = book.post_entry(draft).map_err(AppError::from)?;
            render::entry(out, book, &entry)?;
        }
        EntriesCommand::Edit { id, entry } => {
            let draft = resolve::draft(book, &entry)?;
            let entry = book.edit_entry(id, draft).map_err(AppError::from)?;
            render::entry(out, book, &entry)?;
        }
        EntriesCommand::List { account, sort } => {
            let filter = account
                .map(|query| resolve::account_id(book, &query))
                .transpose()?;
            for entry in book.sorted_entries(filter, sort.into()) {
                render::entry(out, book, entry)?;
            }
        }
        EntriesCommand::Delete { ids } => {
            let removed = book.delete_entries(&ids).map_err(AppError::from)?;
            writeln!(out, "Deleted {removed} of {} entries", ids.len())?;
        }
    }
    Ok(())
}

fn summary(book: &Book, args: &SummaryArgs, today: NaiveDate, out: &mut dyn Write) -> anyhow::Result<()> {
    let period = match args.month {
        Some(period) => period,
        None => Period::month_of(today).map_err(AppError::from)?,
    };
    let summary = book.summary(&period);
    writeln!(out, "Period {period}")?;

    if args.statement.includes_balance_sheet() {
        writeln!(out, "Balance Sheet")?;
        for section in ReportService::balance_sheet(&summary).sections() {
            render::section(out, section)?;
        }
    }
    if args.statement.includes_income() {
        let statement = ReportService::income_statement(&summary);
        writeln!(out, "Income Statement")?;
        for section in statement.sections() {
            render::section(out, section)?;
        }
        writeln!(out, "  Net income {}", statement.net_income())?;
    }
    render::unresolved(out, book, &summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::args::Cli;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    fn exec(book: &mut Book, argv: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("tally").chain(argv.iter().copied()))?;
        let mut out = Vec::new();
        run(book, cli.command, today(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_post_and_summarize() {
        let mut book = Book::in_memory();
        exec(
            &mut book,
            &["entries", "add", "--date", "2024-06-15", "--debit", "Cash=1000", "--credit", "Salary=1000"],
        )
        .unwrap();
        exec(
            &mut book,
            &["entries", "add", "--date", "2024-06-16", "--debit", "Food=1200", "--credit", "Cash=1200"],
        )
        .unwrap();

        let output = exec(&mut book, &["summary"]).unwrap();

        assert!(output.starts_with("Period 2024-06\n"));
        assert!(output.contains("Balance Sheet"));
        assert!(output.contains("Cash"));
        assert!(output.contains("200 (!)"));
        assert!(output.contains("Net income -200"));
    }

    #[test]
    fn test_statement_filter() {
        let mut book = Book::in_memory();
        let output = exec(&mut book, &["summary", "--month", "2024-05", "--statement", "income"]).unwrap();

        assert!(output.starts_with("Period 2024-05\n"));
        assert!(!output.contains("Balance Sheet"));
        assert!(output.contains("Income Statement"));
    }

    #[test]
    fn test_unbalanced_entry_maps_to_business_rule() {
        let mut book = Book::in_memory();
        let err = exec(
            &mut book,
            &["entries", "add", "--date", "2024-06-15", "--debit", "Cash=500", "--credit", "Salary=400"],
        )
        .unwrap_err();

        let app = err.downcast_ref::<AppError>().unwrap();
        assert_eq!(app.exit_code(), 4);
        assert!(book.entries().is_empty());
    }

    #[test]
    fn test_account_lifecycle() {
        let mut book = Book::in_memory();
        exec(&mut book, &["accounts", "add", "Bank", "--type", "asset", "--memo", "Checking"]).unwrap();

        let err = exec(&mut book, &["accounts", "delete", "Bank"]).unwrap_err();
        assert_eq!(err.downcast_ref::<AppError>().unwrap().exit_code(), 4);

        assert_eq!(exec(&mut book, &["accounts", "archive", "Bank"]).unwrap(), "Bank archived\n");
        assert_eq!(
            exec(&mut book, &["accounts", "archive", "Bank"]).unwrap(),
            "Bank already archived\n"
        );
        let archived = exec(&mut book, &["accounts", "list", "--archived"]).unwrap();
        assert!(archived.contains("Bank"));
        assert!(archived.contains("# Checking"));

        assert_eq!(exec(&mut book, &["accounts", "delete", "Bank"]).unwrap(), "Deleted Bank\n");
        assert_eq!(book.accounts().len(), 6);
    }

    #[test]
    fn test_delete_picks_archived_account_sharing_a_name() {
        let mut book = Book::in_memory();
        exec(&mut book, &["accounts", "add", "Wallet", "--type", "asset"]).unwrap();
        exec(&mut book, &["accounts", "archive", "Wallet"]).unwrap();
        exec(&mut book, &["accounts", "add", "Wallet", "--type", "expense"]).unwrap();

        assert_eq!(exec(&mut book, &["accounts", "delete", "Wallet"]).unwrap(), "Deleted Wallet\n");

        let remaining: Vec<_> = book.accounts().iter().filter(|a| a.name == "Wallet").collect();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].is_active());
    }

    #[test]
    fn test_reorder_and_list() {
        let mut book = Book::in_memory();
        let output = exec(&mut book, &["accounts", "reorder", "Salary", "Food"]).unwrap();

        let names: Vec<&str> = output
            .lines()
            .map(|line| line.split_whitespace().last().unwrap())
            .collect();
        assert_eq!(names[0], "Salary");
        assert_eq!(names[1], "Food");
        assert_eq!(names[2], "Cash");
    }

    #[test]
    fn test_list_and_delete_entries() {
        let mut book = Book::in_memory();
        exec(
            &mut book,
            &[
                "entries", "add", "--date", "2024-06-15", "--debit", "Cash=10", "--credit", "Salary=10",
                "--description", "first",
            ],
        )
        .unwrap();
        exec(
            &mut book,
            &[
                "entries", "add", "--date", "2024-06-01", "--debit", "Food=4", "--credit", "Cash=4",
                "--description", "second",
            ],
        )
        .unwrap();

        let listed = exec(&mut book, &["entries", "list", "--sort", "date-asc"]).unwrap();
        let first = listed.find("second").unwrap();
        let second = listed.find("first").unwrap();
        assert!(first < second);

        let food_only = exec(&mut book, &["entries", "list", "--account", "Food"]).unwrap();
        assert!(food_only.contains("second"));
        assert!(!food_only.contains("first"));

        let id = book.entries()[0].id.to_string();
        let output = exec(&mut book, &["entries", "delete", &id]).unwrap();
        assert_eq!(output, "Deleted 1 of 1 entries\n");
        assert_eq!(book.entries().len(), 1);
    }
}
