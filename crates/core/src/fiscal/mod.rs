//! Fiscal year management.

pub mod year;

pub use year::FiscalYear;
