//! Share register error types.

use bokslut_shared::AppError;
use thiserror::Error;

use super::register::ShareRange;

/// Errors found when validating a share register.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareRegisterError {
    /// A share range is empty or reversed.
    #[error("Invalid share range {range} for {name}")]
    InvalidRange {
        /// Shareholder name.
        name: String,
        /// The range.
        range: ShareRange,
    },

    /// A range does not cover as many shares as the holder owns.
    #[error("{name} holds {num_shares} shares but range {range} covers {covered}")]
    RangeMismatch {
        /// Shareholder name.
        name: String,
        /// Number of shares held.
        num_shares: u64,
        /// The range.
        range: ShareRange,
        /// Number of shares the range covers.
        covered: u64,
    },

    /// Two holders claim the same share numbers.
    #[error("Share ranges {first} and {second} overlap")]
    OverlappingRanges {
        /// First range.
        first: ShareRange,
        /// Second range.
        second: ShareRange,
    },
}

impl ShareRegisterError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_SHARE_RANGE",
            Self::RangeMismatch { .. } => "SHARE_RANGE_MISMATCH",
            Self::OverlappingRanges { .. } => "OVERLAPPING_SHARE_RANGES",
        }
    }
}

impl From<ShareRegisterError> for AppError {
    fn from(err: ShareRegisterError) -> Self {
        Self::Validation(err.to_string())
    }
}
