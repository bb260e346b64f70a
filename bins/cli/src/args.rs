//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tally_core::fiscal::Period;
use tally_core::ledger::{AccountType, SortKey};
use tally_shared::types::JournalEntryId;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Personal double-entry bookkeeping")]
pub struct Cli {
    /// Directory holding the ledger files (overrides configuration)
    #[arg(long, global = true, env = "TALLY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the chart of accounts
    Accounts {
        #[command(subcommand)]
        command: AccountsCommand,
    },
    /// Manage journal entries
    Entries {
        #[command(subcommand)]
        command: EntriesCommand,
    },
    /// Show the monthly balance sheet and income statement
    Summary(SummaryArgs),
}

#[derive(Subcommand, Debug)]
pub enum AccountsCommand {
    /// List accounts in display order
    List {
        /// Show archived accounts instead of active ones
        #[arg(long)]
        archived: bool,
    },
    /// Create an account
    Add {
        /// Account name
        name: String,
        /// asset, liability, equity, expense, revenue or pl
        #[arg(long = "type")]
        account_type: AccountType,
        /// Free-text note
        #[arg(long)]
        memo: Option<String>,
    },
    /// Set or clear an account memo
    Memo {
        /// Account id or name
        account: String,
        /// New memo; omit to clear
        text: Option<String>,
    },
    /// Archive an account
    Archive {
        /// Account id or name
        account: String,
    },
    /// Unarchive an account
    Unarchive {
        /// Account id or name
        account: String,
    },
    /// Delete an archived account
    Delete {
        /// Account id or name
        account: String,
    },
    /// Move accounts to the front of the display order
    Reorder {
        /// Account ids or names, in the wanted order
        #[arg(required = true)]
        accounts: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EntriesCommand {
    /// Record a journal entry
    Add(EntryArgs),
    /// Replace a journal entry
    Edit {
        /// Entry id
        id: JournalEntryId,
        #[command(flatten)]
        entry: EntryArgs,
    },
    /// List journal entries
    List {
        /// Only entries posting to this account (id or name)
        #[arg(long)]
        account: Option<String>,
        /// Listing order
        #[arg(long, value_enum, default_value_t = SortArg::CreatedAsc)]
        sort: SortArg,
    },
    /// Delete journal entries
    Delete {
        /// Entry ids
        #[arg(required = true)]
        ids: Vec<JournalEntryId>,
    },
}

/// Lines and metadata of one journal entry.
#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Booking date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
    /// Debit line as ACCOUNT=AMOUNT (repeatable)
    #[arg(long = "debit", value_parser = parse_line, required = true)]
    pub debits: Vec<LineArg>,
    /// Credit line as ACCOUNT=AMOUNT (repeatable)
    #[arg(long = "credit", value_parser = parse_line, required = true)]
    pub credits: Vec<LineArg>,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Month to report (YYYY-MM); defaults to the current month
    #[arg(long)]
    pub month: Option<Period>,
    /// Which statement to print
    #[arg(long, value_enum, default_value_t = StatementArg::All)]
    pub statement: StatementArg,
}

/// One `ACCOUNT=AMOUNT` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineArg {
    /// Account id or name.
    pub account: String,
    /// Amount in minor units.
    pub amount: i64,
}

/// Parses `ACCOUNT=AMOUNT`. The last `=` separates the amount.
pub fn parse_line(s: &str) -> Result<LineArg, String> {
    let (account, amount) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ACCOUNT=AMOUNT, got '{s}'"))?;
    let account = account.trim();
    if account.is_empty() {
        return Err(format!("missing account in '{s}'"));
    }
    let amount = amount
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid amount '{}' in '{s}'", amount.trim()))?;

    Ok(LineArg {
        account: account.to_string(),
        amount,
    })
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    CreatedAsc,
    CreatedDesc,
    DateAsc,
    DateDesc,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::CreatedAsc => Self::CreatedAsc,
            SortArg::CreatedDesc => Self::CreatedDesc,
            SortArg::DateAsc => Self::DateAsc,
            SortArg::DateDesc => Self::DateDesc,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementArg {
    BalanceSheet,
    Income,
    All,
}

impl StatementArg {
    pub fn includes_balance_sheet(self) -> bool {
        matches!(self, Self::BalanceSheet | Self::All)
    }

    pub fn includes_income(self) -> bool {
        matches!(self, Self::Income | Self::All)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case("Cash=1000", "Cash", 1000)]
    #[case(" Scholarship Loan = 250 ", "Scholarship Loan", 250)]
    #[case("a=b=5", "a=b", 5)]
    #[case("Food=-3", "Food", -3)]
    fn test_parse_line(#[case] input: &str, #[case] account: &str, #[case] amount: i64) {
        assert_eq!(
            parse_line(input).unwrap(),
            LineArg {
                account: account.to_string(),
                amount
            }
        );
    }

    #[rstest]
    #[case("Cash")]
    #[case("=10")]
    #[case("Cash=ten")]
    #[case("Cash=10.5")]
    fn test_parse_line_rejects(#[case] input: &str) {
        assert!(parse_line(input).is_err());
    }

    #[test]
    fn test_parse_entries_add() {
        let cli = Cli::try_parse_from([
            "tally",
            "entries",
            "add",
            "--date",
            "2024-06-15",
            "--debit",
            "Cash=1000",
            "--credit",
            "Salary=600",
            "--credit",
            "Salary=400",
            "--description",
            "June",
        ])
        .unwrap();

        let Command::Entries {
            command: EntriesCommand::Add(entry),
        } = cli.command
        else {
            panic!("expected entries add");
        };
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(entry.debits.len(), 1);
        assert_eq!(entry.credits.len(), 2);
        assert_eq!(entry.description, "June");
    }

    #[test]
    fn test_parse_summary_and_globals() {
        let cli = Cli::try_parse_from([
            "tally",
            "summary",
            "--month",
            "2024-06",
            "--statement",
            "balance-sheet",
            "--data-dir",
            "/tmp/books",
            "--json-logs",
        ])
        .unwrap();

        assert!(cli.json_logs);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/books")));
        let Command::Summary(summary) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(summary.month, Some(Period::month(2024, 6).unwrap()));
        assert!(summary.statement.includes_balance_sheet());
        assert!(!summary.statement.includes_income());
    }

    #[test]
    fn test_parse_account_type_aliases() {
        let cli = Cli::try_parse_from(["tally", "accounts", "add", "Closing", "--type", "pl"]).unwrap();
        let Command::Accounts {
            command: AccountsCommand::Add { account_type, .. },
        } = cli.command
        else {
            panic!("expected accounts add");
        };
        assert_eq!(account_type, AccountType::ProfitAndLoss);
    }

    #[test]
    fn test_sort_values() {
        let cli = Cli::try_parse_from(["tally", "entries", "list", "--sort", "date-desc"]).unwrap();
        let Command::Entries {
            command: EntriesCommand::List { sort, account },
        } = cli.command
        else {
            panic!("expected entries list");
        };
        assert_eq!(SortKey::from(sort), SortKey::DateDesc);
        assert!(account.is_none());
    }
}
