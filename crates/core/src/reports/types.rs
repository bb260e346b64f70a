//! Report data types.

use std::collections::BTreeMap;

use serde::Serialize;
use tally_shared::types::AccountId;

use crate::fiscal::Period;
use crate::ledger::{AccountType, DisplayAmount};

/// Net movement of one account over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name at the time of the query.
    pub name: String,
    /// Signed total, debit-positive.
    pub amount: i128,
}

/// Per-account, per-type totals for one period.
///
/// Totals are accumulated as `i128`: each entry fits in `i64`, but a
/// period of them may not. Lines are keyed by account id, so two accounts that share a name never
/// merge. Postings to accounts that no longer exist are kept apart in
/// [`PeriodSummary::unresolved`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    /// The period summarized.
    pub period: Period,
    sections: BTreeMap<AccountType, BTreeMap<AccountId, SummaryLine>>,
    unresolved: BTreeMap<AccountId, i128>,
}

impl PeriodSummary {
    pub(crate) fn new(period: Period) -> Self {
        Self {
            period,
            sections: BTreeMap::new(),
            unresolved: BTreeMap::new(),
        }
    }

    pub(crate) fn post(&mut self, account_type: AccountType, account_id: AccountId, name: &str, delta: i128) {
        let line = self
            .sections
            .entry(account_type)
            .or_default()
            .entry(account_id)
            .or_insert_with(|| SummaryLine {
                account_id,
                name: name.to_string(),
                amount: 0,
            });
        line.amount += delta;
    }

    pub(crate) fn post_unresolved(&mut self, account_id: AccountId, delta: i128) {
        *self.unresolved.entry(account_id).or_insert(0) += delta;
    }

    /// Lines of one type, sorted by name (ties by id).
    #[must_use]
    pub fn lines(&self, account_type: AccountType) -> Vec<&SummaryLine> {
        let mut lines: Vec<&SummaryLine> = self
            .sections
            .get(&account_type)
            .map(|section| section.values().collect())
            .unwrap_or_default();
        lines.sort_by(|a, b| a.name.cmp(&b.name).then(a.account_id.cmp(&b.account_id)));
        lines
    }

    /// Total of one account, if it moved in the period.
    #[must_use]
    pub fn amount(&self, account_type: AccountType, account_id: AccountId) -> Option<i128> {
        self.sections
            .get(&account_type)?
            .get(&account_id)
            .map(|line| line.amount)
    }

    /// Combined total of every account of `account_type` named `name`.
    #[must_use]
    pub fn amount_for(&self, account_type: AccountType, name: &str) -> Option<i128> {
        self.by_name().get(&account_type)?.get(name).copied()
    }

    /// Sum of all lines of one type.
    #[must_use]
    pub fn total_for(&self, account_type: AccountType) -> i128 {
        self.sections
            .get(&account_type)
            .map_or(0, |section| section.values().map(|line| line.amount).sum())
    }

    /// Projection onto `type -> name -> total`.
    ///
    /// Accounts of the same type that share a name are summed here; use
    /// [`PeriodSummary::lines`] to keep them apart.
    #[must_use]
    pub fn by_name(&self) -> BTreeMap<AccountType, BTreeMap<String, i128>> {
        self.sections
            .iter()
            .map(|(account_type, section)| {
                let mut totals: BTreeMap<String, i128> = BTreeMap::new();
                for line in section.values() {
                    *totals.entry(line.name.clone()).or_insert(0) += line.amount;
                }
                (*account_type, totals)
            })
            .collect()
    }

    /// Totals of postings whose account is no longer in the registry.
    #[must_use]
    pub fn unresolved(&self) -> &BTreeMap<AccountId, i128> {
        &self.unresolved
    }

    /// Returns true if nothing moved in the period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.unresolved.is_empty()
    }
}

/// One row of a financial statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name.
    pub name: String,
    /// Signed total, debit-positive.
    pub amount: i128,
    /// Presentation form of `amount`.
    pub display: DisplayAmount,
}

/// All rows of one account type plus their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementSection {
    /// Account type of this section.
    pub account_type: AccountType,
    /// Rows sorted by name.
    pub rows: Vec<StatementRow>,
    /// Section total.
    pub total: i128,
    /// Presentation form of `total`.
    pub total_display: DisplayAmount,
}

/// Balance sheet: assets, liabilities and equity movements for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    /// Report period.
    pub period: Period,
    /// Assets section.
    pub assets: StatementSection,
    /// Liabilities section.
    pub liabilities: StatementSection,
    /// Equity section.
    pub equity: StatementSection,
}

impl BalanceSheet {
    /// Sections in statement order.
    #[must_use]
    pub fn sections(&self) -> [&StatementSection; 3] {
        [&self.assets, &self.liabilities, &self.equity]
    }
}

/// Income statement: expense, revenue and profit and loss movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    /// Report period.
    pub period: Period,
    /// Expense section.
    pub expenses: StatementSection,
    /// Revenue section.
    pub revenue: StatementSection,
    /// Profit and loss section.
    pub profit_and_loss: StatementSection,
}

impl IncomeStatement {
    /// Sections in statement order.
    #[must_use]
    pub fn sections(&self) -> [&StatementSection; 3] {
        [&self.expenses, &self.revenue, &self.profit_and_loss]
    }

    /// Revenue minus expenses, positive for a profit.
    ///
    /// Revenue totals are credit (negative) and expense totals debit
    /// (positive), so both are negated.
    #[must_use]
    pub fn net_income(&self) -> i128 {
        -(self.revenue.total + self.expenses.total)
    }
}
