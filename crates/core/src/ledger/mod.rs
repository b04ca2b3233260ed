//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - BAS accounts and account types
//! - Transaction lines and verifications
//! - Balance calculations on the normal side
//! - Business rule validation
//! - The [`Ledger`] book holding a company's accounts, fiscal years and
//!   transactions

pub mod account;
pub mod balance;
pub mod book;
pub mod entry;
pub mod error;
pub mod fiscal;
pub mod transaction;
pub mod types;
pub mod validation;

#[cfg(test)]
mod book_props;
#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountType};
pub use balance::{AccountTotals, NormalBalance};
pub use book::Ledger;
pub use entry::{EntryType, TransactionLine};
pub use error::LedgerError;
pub use fiscal::validate_posting;
pub use transaction::Transaction;
pub use types::{CreateTransactionInput, TransactionFilter, TransactionTotals};
pub use validation::validate_lines;
