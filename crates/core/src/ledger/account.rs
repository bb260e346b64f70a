//! Chart of accounts domain types.

use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

/// Account classification.
///
/// The set is closed. Besides grouping accounts into statements, the type
/// decides which sign is "normal" for a period total (see
/// [`AccountType::display_amount`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Things owned (cash, bank balances). Debit-normal.
    Asset,
    /// Things owed (loans). Credit-normal.
    Liability,
    /// Net worth. Credit-normal.
    Equity,
    /// Consumption (food, rent). Debit-normal.
    Expense,
    /// Income (salary). Credit-normal.
    Revenue,
    /// Profit and loss closing account.
    ProfitAndLoss,
}

impl AccountType {
    /// Every account type, in statement order.
    pub const ALL: [Self; 6] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Expense,
        Self::Revenue,
        Self::ProfitAndLoss,
    ];

    /// Types reported on the balance sheet.
    pub const BALANCE_SHEET: [Self; 3] = [Self::Asset, Self::Liability, Self::Equity];

    /// Types reported on the income statement.
    pub const INCOME_STATEMENT: [Self; 3] = [Self::Expense, Self::Revenue, Self::ProfitAndLoss];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
            Self::Expense => "Expense",
            Self::Revenue => "Revenue",
            Self::ProfitAndLoss => "Profit and Loss",
        }
    }

    /// Returns true for balance-sheet types.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns true when a signed period total deviates from the type's
    /// normal direction.
    ///
    /// Totals are debit-positive. Assets, expenses and the profit and loss
    /// account warn when negative; liabilities, equity and revenue warn when
    /// positive.
    #[must_use]
    pub const fn is_abnormal(self, amount: i128) -> bool {
        match self {
            Self::Asset | Self::Expense | Self::ProfitAndLoss => amount < 0,
            Self::Liability | Self::Equity | Self::Revenue => amount > 0,
        }
    }

    /// Projects a signed total onto its presentation form.
    #[must_use]
    pub const fn display_amount(self, amount: i128) -> DisplayAmount {
        DisplayAmount {
            magnitude: amount.unsigned_abs(),
            warning: self.is_abnormal(amount),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "expense" => Ok(Self::Expense),
            "revenue" => Ok(Self::Revenue),
            "profit_and_loss" | "profitandloss" | "pl" | "p&l" => Ok(Self::ProfitAndLoss),
            other => Err(format!("Unknown account type: {other}")),
        }
    }
}

/// A signed total prepared for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAmount {
    /// Absolute value of the total.
    pub magnitude: u128,
    /// Whether the sign deviates from the type's normal direction.
    pub warning: bool,
}

/// An entry in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, never reused.
    pub id: AccountId,
    /// Display label.
    pub name: String,
    /// Classification, fixed at creation.
    pub account_type: AccountType,
    /// Optional free-text note.
    #[serde(default)]
    pub memo: Option<String>,
    /// Soft-delete flag.
    #[serde(default)]
    pub archived: bool,
}

impl Account {
    /// Creates a new, active account with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, account_type: AccountType, memo: Option<String>) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            memo,
            archived: false,
        }
    }

    /// Returns true if the account is not archived.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.archived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AccountType::Asset, -1, true)]
    #[case(AccountType::Asset, 1, false)]
    #[case(AccountType::Liability, 1, true)]
    #[case(AccountType::Liability, -1, false)]
    #[case(AccountType::Equity, 1, true)]
    #[case(AccountType::Equity, -1, false)]
    #[case(AccountType::Expense, -1, true)]
    #[case(AccountType::Expense, 1, false)]
    #[case(AccountType::Revenue, 1, true)]
    #[case(AccountType::Revenue, -1, false)]
    #[case(AccountType::ProfitAndLoss, -1, true)]
    #[case(AccountType::ProfitAndLoss, 1, false)]
    fn test_warning_direction(
        #[case] account_type: AccountType,
        #[case] amount: i128,
        #[case] warning: bool,
    ) {
        let shown = account_type.display_amount(amount * 250);
        assert_eq!(shown.magnitude, 250);
        assert_eq!(shown.warning, warning);
    }

    #[test]
    fn test_zero_never_warns() {
        for account_type in AccountType::ALL {
            assert!(!account_type.display_amount(0).warning);
        }
    }

    #[test]
    fn test_magnitude_of_min_value() {
        let shown = AccountType::Asset.display_amount(i128::MIN);
        assert_eq!(shown.magnitude, i128::MIN.unsigned_abs());
    }

    #[rstest]
    #[case("asset", AccountType::Asset)]
    #[case("Liability", AccountType::Liability)]
    #[case(" EQUITY ", AccountType::Equity)]
    #[case("profit-and-loss", AccountType::ProfitAndLoss)]
    #[case("P&L", AccountType::ProfitAndLoss)]
    fn test_parse_account_type(#[case] input: &str, #[case] expected: AccountType) {
        assert_eq!(input.parse::<AccountType>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_account_type() {
        assert!("cash".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AccountType::ProfitAndLoss).unwrap();
        assert_eq!(json, "\"profit_and_loss\"");
    }

    #[test]
    fn test_statement_partition() {
        for account_type in AccountType::ALL {
            assert_eq!(
                account_type.is_balance_sheet(),
                AccountType::BALANCE_SHEET.contains(&account_type)
            );
            assert_ne!(
                account_type.is_balance_sheet(),
                AccountType::INCOME_STATEMENT.contains(&account_type)
            );
        }
    }
}
