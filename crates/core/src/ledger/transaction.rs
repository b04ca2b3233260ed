//! Transaction aggregate (verifikation).

use bokslut_shared::types::{FiscalYearId, TransactionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::TransactionLine;

/// A verification: one business event booked as balanced lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    #[serde(default)]
    pub id: TransactionId,
    /// Fiscal year this transaction is recorded in.
    pub fiscal_year_id: FiscalYearId,
    /// Verification number, unique within the fiscal year.
    pub verification_number: u32,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Lines.
    pub lines: Vec<TransactionLine>,
}

impl Transaction {
    /// Sum of debit amounts.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|l| l.debit).sum()
    }

    /// Sum of credit amounts.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|l| l.credit).sum()
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }
}
