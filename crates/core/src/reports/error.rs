//! Report error types.

use bokslut_shared::AppError;
use chrono::NaiveDate;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur while collecting report data.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The ledger rejected the lookup.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The books have no fiscal year to report on.
    #[error("No fiscal year found as of {0}")]
    NoFiscalYear(NaiveDate),
}

impl ReportError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(inner) => inner.error_code(),
            Self::NoFiscalYear(_) => "NO_FISCAL_YEAR",
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Ledger(inner) => inner.into(),
            ReportError::NoFiscalYear(_) => Self::NotFound(err.to_string()),
        }
    }
}
