//! SIE4 import.
//!
//! SIE (Standard Import Export) is the Swedish text format for moving
//! bookkeeping between systems. Type 4 files carry the chart of accounts,
//! opening balances and every voucher of a fiscal year.
//!
//! Parsing is lenient: unknown tags are skipped and malformed known tags are
//! collected as warnings on [`SieData`] instead of failing the whole file.

pub mod error;
pub mod importer;
pub mod parser;


pub use error::SieError;
pub use importer::{ImportStats, SieImporter};
pub use parser::{SieAccount, SieData, SieParser, SieVoucher, decode};
