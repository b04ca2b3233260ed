//! Accounts on the BAS chart of accounts.
//!
//! The BAS chart is divided into classes by the first digit:
//! - 1xxx: Assets
//! - 2xxx: Equity and liabilities
//! - 3xxx: Operating revenue
//! - 4xxx: Cost of goods
//! - 5-6xxx: Other external expenses
//! - 7xxx: Personnel
//! - 8xxx: Financial items and taxes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::NormalBalance;
use super::error::LedgerError;

/// Account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Tillgång
    Asset,
    /// Skuld
    Liability,
    /// Eget kapital
    Equity,
    /// Intäkt
    Revenue,
    /// Kostnad
    Expense,
}

impl AccountType {
    /// Derives the account type from a BAS account number.
    ///
    /// 20xx and 21xx (equity and untaxed reserves) are treated as equity,
    /// the rest of class 2 as liabilities. Classes 4-8 are expenses.
    #[must_use]
    pub fn from_bas_number(number: &str) -> Self {
        let mut digits = number.chars();
        match (digits.next(), digits.next()) {
            (Some('2'), Some('0' | '1')) => Self::Equity,
            (Some('2'), _) => Self::Liability,
            (Some('3'), _) => Self::Revenue,
            (Some('1') | None, _) => Self::Asset,
            _ => Self::Expense,
        }
    }

    /// Swedish label, e.g. "Tillgång".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asset => "Tillgång",
            Self::Liability => "Skuld",
            Self::Equity => "Eget kapital",
            Self::Revenue => "Intäkt",
            Self::Expense => "Kostnad",
        }
    }

    /// Which side increases the account.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }
}

/// An account in a company's chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// BAS account number, e.g. "1930".
    pub number: String,
    /// Account name, e.g. "Företagskonto".
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// VAT code for automatic VAT handling ("25", "12", "6", "0").
    #[serde(default)]
    pub vat_code: Option<String>,
    /// Whether the account is in use.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Opening balance (ingående balans) on the account's normal side.
    #[serde(default)]
    pub opening_balance: Decimal,
}

fn default_true() -> bool {
    true
}

impl Account {
    /// Creates an account, deriving its type from the number.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAccountNumber` unless the number is all digits
    /// and starts with 1-8.
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Result<Self, LedgerError> {
        let number = number.into();
        validate_number(&number)?;
        let account_type = AccountType::from_bas_number(&number);
        Ok(Self {
            number,
            name: name.into(),
            account_type,
            vat_code: None,
            is_active: true,
            opening_balance: Decimal::ZERO,
        })
    }

    /// Sets the opening balance.
    #[must_use]
    pub fn with_opening_balance(mut self, opening_balance: Decimal) -> Self {
        self.opening_balance = opening_balance;
        self
    }

    /// Account class (1-8) from the first digit, 0 if the number is empty.
    #[must_use]
    pub fn account_class(&self) -> u32 {
        self.number
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0)
    }

    /// Is this a balance sheet account (class 1-2)?
    #[must_use]
    pub fn is_balance_account(&self) -> bool {
        matches!(self.account_class(), 1 | 2)
    }

    /// Is this an income statement account (class 3-8)?
    #[must_use]
    pub fn is_result_account(&self) -> bool {
        matches!(self.account_class(), 3..=8)
    }
}

pub(crate) fn validate_number(number: &str) -> Result<(), LedgerError> {
    let valid = !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
        && matches!(number.as_bytes()[0], b'1'..=b'8');
    if valid {
        Ok(())
    } else {
        Err(LedgerError::InvalidAccountNumber(number.to_string()))
    }
}
