//! Ledger types for transaction creation and querying.

use bokslut_shared::types::FiscalYearId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::TransactionLine;
use super::transaction::Transaction;

/// Input for creating a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionInput {
    /// Fiscal year to book in.
    pub fiscal_year_id: FiscalYearId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Lines; debits must equal credits.
    pub lines: Vec<TransactionLine>,
}

/// Totals of a validated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTotals {
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
}

/// Filter for listing transactions. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only this fiscal year.
    pub fiscal_year_id: Option<FiscalYearId>,
    /// Dated on or after.
    pub start_date: Option<NaiveDate>,
    /// Dated on or before.
    pub end_date: Option<NaiveDate>,
    /// Verification number at least.
    pub ver_from: Option<u32>,
    /// Verification number at most.
    pub ver_to: Option<u32>,
}

impl TransactionFilter {
    /// Filter for one fiscal year.
    #[must_use]
    pub fn fiscal_year(fiscal_year_id: FiscalYearId) -> Self {
        Self {
            fiscal_year_id: Some(fiscal_year_id),
            ..Self::default()
        }
    }

    /// Returns true if the transaction passes the filter.
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.fiscal_year_id.is_none_or(|id| tx.fiscal_year_id == id)
            && self.start_date.is_none_or(|d| tx.date >= d)
            && self.end_date.is_none_or(|d| tx.date <= d)
            && self.ver_from.is_none_or(|v| tx.verification_number >= v)
            && self.ver_to.is_none_or(|v| tx.verification_number <= v)
    }
}
