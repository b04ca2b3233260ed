//! Fiscal year posting rules.

use chrono::NaiveDate;

use crate::fiscal::FiscalYear;
use crate::ledger::error::LedgerError;

/// Validates that a transaction dated `date` may be posted to `fiscal_year`.
///
/// - Closed year → no one can post
/// - Date outside the year → rejected
///
/// # Errors
///
/// Returns `FiscalYearClosed` or `DateOutsideFiscalYear`.
pub fn validate_posting(fiscal_year: &FiscalYear, date: NaiveDate) -> Result<(), LedgerError> {
    if fiscal_year.is_closed {
        return Err(LedgerError::FiscalYearClosed);
    }
    if !fiscal_year.contains_date(date) {
        return Err(LedgerError::DateOutsideFiscalYear {
            date,
            start: fiscal_year.start_date,
            end: fiscal_year.end_date,
        });
    }
    Ok(())
}
