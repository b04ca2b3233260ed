//! Financial report data.
//!
//! This module provides pure business logic for turning a trial balance into
//! the statements a Swedish annual report is built from:
//! - Trial balance (råbalans)
//! - Income statement (resultaträkning)
//! - Balance sheet (balansräkning)
//! - General ledger (huvudbok)

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
