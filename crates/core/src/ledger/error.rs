//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur during ledger operations,
//! including transaction validation errors, account errors and fiscal year
//! errors.

use bokslut_shared::AppError;
use bokslut_shared::types::FiscalYearId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Transaction has no lines.
    #[error("Transaction has no lines")]
    NoLines,

    /// Transaction is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedTransaction {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Transaction lines add up to zero.
    #[error("Transaction has no amounts")]
    EmptyTransaction,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// Line must specify either debit or credit, not both.
    #[error("Line must specify either debit or credit, not both")]
    InvalidEntryType,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account number already exists in the chart of accounts.
    #[error("Account {0} already exists")]
    DuplicateAccount(String),

    /// Account number is not a BAS number.
    #[error("Invalid account number: {0:?}")]
    InvalidAccountNumber(String),

    // ========== Fiscal Year Errors ==========
    /// Fiscal year not found.
    #[error("Fiscal year not found: {0}")]
    FiscalYearNotFound(FiscalYearId),

    /// No fiscal year ends in the requested year.
    #[error("No fiscal year ends in {0}")]
    NoFiscalYearFor(i32),

    /// Fiscal year is closed, no posting allowed.
    #[error("Fiscal year is closed, no posting allowed")]
    FiscalYearClosed,

    /// Transaction date lies outside the fiscal year.
    #[error("Date {date} is outside the fiscal year {start} - {end}")]
    DateOutsideFiscalYear {
        /// Transaction date.
        date: NaiveDate,
        /// Fiscal year start.
        start: NaiveDate,
        /// Fiscal year end.
        end: NaiveDate,
    },

    /// The fiscal year has used the highest verification number.
    #[error("No verification numbers left in fiscal year {0}")]
    VerificationNumbersExhausted(FiscalYearId),

    /// Start date is after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Fiscal year overlaps an existing one.
    #[error("Fiscal year {start} - {end} overlaps an existing fiscal year")]
    OverlappingFiscalYear {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

impl LedgerError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoLines => "NO_LINES",
            Self::UnbalancedTransaction { .. } => "UNBALANCED_TRANSACTION",
            Self::EmptyTransaction => "EMPTY_TRANSACTION",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::InvalidEntryType => "INVALID_ENTRY_TYPE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            Self::InvalidAccountNumber(_) => "INVALID_ACCOUNT_NUMBER",
            Self::FiscalYearNotFound(_) | Self::NoFiscalYearFor(_) => "FISCAL_YEAR_NOT_FOUND",
            Self::FiscalYearClosed => "FISCAL_YEAR_CLOSED",
            Self::DateOutsideFiscalYear { .. } => "DATE_OUTSIDE_FISCAL_YEAR",
            Self::VerificationNumbersExhausted(_) => "VERIFICATION_NUMBERS_EXHAUSTED",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::OverlappingFiscalYear { .. } => "OVERLAPPING_FISCAL_YEAR",
        }
    }

    /// Returns true if this is a validation error of the transaction itself.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::NoLines
                | Self::UnbalancedTransaction { .. }
                | Self::EmptyTransaction
                | Self::NegativeAmount
                | Self::InvalidEntryType
                | Self::InvalidAccountNumber(_)
                | Self::InvalidDateRange { .. }
        )
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(_)
            | LedgerError::FiscalYearNotFound(_)
            | LedgerError::NoFiscalYearFor(_) => Self::NotFound(err.to_string()),
            LedgerError::DuplicateAccount(_) | LedgerError::OverlappingFiscalYear { .. } => {
                Self::Conflict(err.to_string())
            }
            LedgerError::FiscalYearClosed
            | LedgerError::DateOutsideFiscalYear { .. }
            | LedgerError::VerificationNumbersExhausted(_) => {
                Self::BusinessRule(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}
