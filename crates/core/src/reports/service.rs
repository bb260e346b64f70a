//! Report generation service.

use tracing::debug;

use super::types::{
    BalanceSheet, IncomeStatement, PeriodSummary, StatementRow, StatementSection,
};
use crate::fiscal::Period;
use crate::ledger::{AccountRegistry, AccountType, EntryType, JournalEntry};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Aggregates the entries dated inside `period` into per-account totals.
    ///
    /// Debit lines add their amount and credit lines subtract it. Each
    /// posting is classified by the current type and name of its account.
    /// Postings whose account is missing from `accounts` are collected in
    /// [`PeriodSummary::unresolved`] instead of being dropped.
    #[must_use]
    pub fn summarize<'a, I>(entries: I, accounts: &AccountRegistry, period: &Period) -> PeriodSummary
    where
        I: IntoIterator<Item = &'a JournalEntry>,
    {
        let mut summary = PeriodSummary::new(*period);

        for entry in entries.into_iter().filter(|e| period.contains(e.date)) {
            for (side, posting) in entry.lines() {
                let amount = i128::from(posting.amount);
                let delta = match side {
                    EntryType::Debit => amount,
                    EntryType::Credit => -amount,
                };
                match accounts.get(posting.account_id) {
                    Some(account) => {
                        summary.post(account.account_type, account.id, &account.name, delta);
                    }
                    None => summary.post_unresolved(posting.account_id, delta),
                }
            }
        }

        if !summary.unresolved().is_empty() {
            debug!(
                period = %period,
                count = summary.unresolved().len(),
                "Postings reference unknown accounts"
            );
        }

        summary
    }

    /// Builds the balance sheet view of a summary.
    #[must_use]
    pub fn balance_sheet(summary: &PeriodSummary) -> BalanceSheet {
        BalanceSheet {
            period: summary.period,
            assets: Self::section(summary, AccountType::Asset),
            liabilities: Self::section(summary, AccountType::Liability),
            equity: Self::section(summary, AccountType::Equity),
        }
    }

    /// Builds the income statement view of a summary.
    #[must_use]
    pub fn income_statement(summary: &PeriodSummary) -> IncomeStatement {
        IncomeStatement {
            period: summary.period,
            expenses: Self::section(summary, AccountType::Expense),
            revenue: Self::section(summary, AccountType::Revenue),
            profit_and_loss: Self::section(summary, AccountType::ProfitAndLoss),
        }
    }

    fn section(summary: &PeriodSummary, account_type: AccountType) -> StatementSection {
        let rows: Vec<StatementRow> = summary
            .lines(account_type)
            .into_iter()
            .map(|line| StatementRow {
                account_id: line.account_id,
                name: line.name.clone(),
                amount: line.amount,
                display: account_type.display_amount(line.amount),
            })
            .collect();
        let total = summary.total_for(account_type);

        StatementSection {
            account_type,
            rows,
            total,
            total_display: account_type.display_amount(total),
        }
    }
}
