//! Fiscal year (räkenskapsår) boundaries.

use bokslut_shared::types::FiscalYearId;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// An accounting period.
///
/// Most Swedish companies use the calendar year, but a broken fiscal year
/// (brutet räkenskapsår) is allowed, as is a longer first year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Unique identifier.
    #[serde(default)]
    pub id: FiscalYearId,
    /// First day of the year.
    pub start_date: NaiveDate,
    /// Last day of the year.
    pub end_date: NaiveDate,
    /// Whether the year is closed (locked for posting).
    #[serde(default)]
    pub is_closed: bool,
}

impl FiscalYear {
    /// Creates an open fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidDateRange` if `start_date` is after `end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, LedgerError> {
        if start_date > end_date {
            return Err(LedgerError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            id: FiscalYearId::new(),
            start_date,
            end_date,
            is_closed: false,
        })
    }

    /// The year the fiscal year is named after (the end date's year).
    #[must_use]
    pub fn year(&self) -> i32 {
        self.end_date.year()
    }

    /// Returns true if the given date falls within this fiscal year.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if `today` falls within this fiscal year.
    #[must_use]
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.contains_date(today)
    }

    /// Returns true if the two fiscal years share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}
