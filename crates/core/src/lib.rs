//! Core business logic for bokslut.
//!
//! This crate contains pure bookkeeping logic with ZERO template or filesystem
//! dependencies. Everything a Swedish accounting document is rendered from is
//! built here.
//!
//! # Modules
//!
//! - `company` - Company profile, accounting standard and logo
//! - `fiscal` - Fiscal year boundaries
//! - `ledger` - Double-entry bookkeeping on the BAS chart of accounts
//! - `reports` - Trial balance grouping into income statement and balance sheet
//! - `shareholders` - Share register (aktiebok)
//! - `minutes` - Board and general meeting minutes
//! - `sie` - SIE4 import

pub mod company;
pub mod fiscal;
pub mod ledger;
pub mod minutes;
pub mod reports;
pub mod shareholders;
pub mod sie;

pub use company::{AccountingStandard, Company, Logo};
pub use fiscal::FiscalYear;
pub use ledger::{Ledger, LedgerError};
pub use minutes::{MeetingItem, MeetingKind, MeetingMinutes, NumberedItem};
pub use reports::{FinancialData, ReportError, ReportService};
pub use shareholders::{ShareRange, ShareRegister, ShareRegisterError, Shareholder};
pub use sie::{ImportStats, SieError, SieImporter, SieParser};
