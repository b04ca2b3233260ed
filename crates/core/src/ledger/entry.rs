//! Transaction lines (konteringsrader).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of a transaction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit line (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit line (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

/// A single line of a transaction.
///
/// Only one of `debit` and `credit` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLine {
    /// BAS account number the line is booked on.
    pub account_number: String,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
    /// Optional line comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_number: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_number: account_number.into(),
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_number: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_number: account_number.into(),
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }

    /// Creates a line from a signed amount: positive is debit, negative is credit.
    ///
    /// This is how SIE files express lines.
    #[must_use]
    pub fn from_signed(account_number: impl Into<String>, amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::credit(account_number, -amount)
        } else {
            Self::debit(account_number, amount)
        }
    }

    /// Which side the line is on; `None` for an all-zero line.
    #[must_use]
    pub fn entry_type(&self) -> Option<EntryType> {
        if self.debit > Decimal::ZERO {
            Some(EntryType::Debit)
        } else if self.credit > Decimal::ZERO {
            Some(EntryType::Credit)
        } else {
            None
        }
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}
