//! Report data types.
//!
//! These are the view models templates are rendered from. Amounts serialize
//! as strings so no precision is lost on the way into a template.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::AccountType;

/// One account row: the shape shared by the trial balance and the statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// BAS account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Balance on the account's normal side.
    pub balance: Decimal,
    /// The balance when the account is debit-normal, else zero.
    pub debit: Decimal,
    /// The balance when the account is credit-normal, else zero.
    pub credit: Decimal,
}

/// Trial balance (råbalans): every account with a non-zero balance,
/// ordered by account number.
pub type TrialBalance = Vec<LineItem>;

/// Income statement (resultaträkning).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Revenue accounts (class 3).
    pub revenue: Vec<LineItem>,
    /// Expense accounts (classes 4-8).
    pub expenses: Vec<LineItem>,
    /// Sum of absolute revenue balances.
    pub total_revenue: Decimal,
    /// Sum of expense balances.
    pub total_expenses: Decimal,
}

/// Balance sheet (balansräkning).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Asset accounts (class 1).
    pub assets: Vec<LineItem>,
    /// Equity and liability accounts (class 2).
    pub liabilities: Vec<LineItem>,
    /// Sum of asset balances.
    pub total_assets: Decimal,
    /// Sum of equity and liability balances.
    pub total_liabilities: Decimal,
    /// `total_liabilities` plus the year's result, which is not yet booked
    /// to equity. Equals `total_assets` when the books balance.
    pub total_equity_and_liabilities: Decimal,
}

/// Everything the financial templates need, derived from one trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialData {
    /// The trial balance the statements were built from.
    pub trial_balance: TrialBalance,
    /// Income statement.
    pub income_statement: IncomeStatement,
    /// Balance sheet.
    pub balance_sheet: BalanceSheet,
    /// Net result: total revenue minus total expenses.
    pub result: Decimal,
}

/// One line on an account in the general ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLedgerEntry {
    /// Transaction date.
    pub date: NaiveDate,
    /// Verification number.
    pub verification_number: u32,
    /// Line description, falling back to the transaction description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this line, on the account's normal side.
    pub running_balance: Decimal,
}

/// General ledger (huvudbok) for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLedger {
    /// BAS account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Balance before the first line of the period.
    pub opening_balance: Decimal,
    /// Lines in date and verification order.
    pub entries: Vec<AccountLedgerEntry>,
    /// Sum of debits in the period.
    pub total_debit: Decimal,
    /// Sum of credits in the period.
    pub total_credit: Decimal,
    /// Balance after the last line of the period.
    pub closing_balance: Decimal,
}
