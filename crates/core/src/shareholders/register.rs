//! Share register entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ShareRegisterError;

/// Inclusive range of share numbers, e.g. `1-500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRange {
    /// First share number.
    pub first: u64,
    /// Last share number.
    pub last: u64,
}

impl ShareRange {
    /// Number of shares in the range, 0 if reversed. Saturates at `u64::MAX`.
    #[must_use]
    pub fn len(self) -> u64 {
        self.last
            .checked_sub(self.first)
            .map_or(0, |span| span.saturating_add(1))
    }

    /// True if the range is reversed.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True if the ranges share at least one number.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.first <= other.last && other.first <= self.last
    }
}

impl fmt::Display for ShareRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// One owner in the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shareholder {
    /// Owner name.
    pub name: String,
    /// Personnummer or organisationsnummer.
    pub id_number: String,
    /// Number of shares held.
    pub num_shares: u64,
    /// Share numbers held.
    #[serde(default)]
    pub share_numbers: Option<ShareRange>,
    /// Date the shares were acquired.
    #[serde(default)]
    pub acquisition_date: Option<NaiveDate>,
}

/// The share register of a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareRegister {
    /// Owners in register order.
    pub shareholders: Vec<Shareholder>,
}

impl ShareRegister {
    /// Creates a register from its owners.
    #[must_use]
    pub fn new(shareholders: Vec<Shareholder>) -> Self {
        Self { shareholders }
    }

    /// Total number of shares in the register.
    #[must_use]
    pub fn total_shares(&self) -> u64 {
        self.shareholders.iter().map(|s| s.num_shares).sum()
    }

    /// Checks that every range matches its holding and no two ranges overlap.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ShareRegisterError> {
        let mut ranges: Vec<ShareRange> = Vec::with_capacity(self.shareholders.len());

        for holder in &self.shareholders {
            let Some(range) = holder.share_numbers else {
                continue;
            };
            if range.first == 0 || range.is_empty() {
                return Err(ShareRegisterError::InvalidRange {
                    name: holder.name.clone(),
                    range,
                });
            }
            if range.len() != holder.num_shares {
                return Err(ShareRegisterError::RangeMismatch {
                    name: holder.name.clone(),
                    num_shares: holder.num_shares,
                    range,
                    covered: range.len(),
                });
            }
            if let Some(existing) = ranges.iter().find(|r| r.overlaps(range)) {
                return Err(ShareRegisterError::OverlappingRanges {
                    first: *existing,
                    second: range,
                });
            }
            ranges.push(range);
        }
        Ok(())
    }
}
