//! SIE error types.

use bokslut_shared::AppError;
use thiserror::Error;

/// Problems found in a SIE file.
///
/// The parser records these as warnings; only [`SieError::Empty`] is fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SieError {
    /// A known tag lacks a required field.
    #[error("Line {line}: {tag} is missing {field}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Tag, e.g. `#KONTO`.
        tag: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A date is not in `YYYYMMDD` form.
    #[error("Line {line}: invalid date {value:?}")]
    InvalidDate {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        value: String,
    },

    /// An amount is not a decimal number.
    #[error("Line {line}: invalid amount {value:?}")]
    InvalidAmount {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        value: String,
    },

    /// A voucher number is not a positive integer.
    #[error("Line {line}: invalid verification number {value:?}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        value: String,
    },

    /// The file contains no SIE tags at all.
    #[error("Not a SIE file: no tags found")]
    Empty,
}

impl SieError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "SIE_MISSING_FIELD",
            Self::InvalidDate { .. } => "SIE_INVALID_DATE",
            Self::InvalidAmount { .. } => "SIE_INVALID_AMOUNT",
            Self::InvalidNumber { .. } => "SIE_INVALID_NUMBER",
            Self::Empty => "SIE_EMPTY",
        }
    }
}

impl From<SieError> for AppError {
    fn from(err: SieError) -> Self {
        Self::Parse(err.to_string())
    }
}
