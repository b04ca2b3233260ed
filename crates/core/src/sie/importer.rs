//! Loads parsed SIE data into a [`Ledger`].

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use super::parser::SieData;
use crate::company::Company;
use crate::ledger::{Account, Ledger, NormalBalance};

const DEFAULT_COMPANY_NAME: &str = "Importerat företag";
const DEFAULT_ORG_NUMBER: &str = "000000-0000";

/// What an import did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// A new company was created from `#FNAMN` / `#ORGNR`.
    pub company_created: bool,
    /// Accounts added to the chart.
    pub accounts_imported: usize,
    /// Vouchers recorded.
    pub transactions_imported: usize,
    /// Problems that did not stop the import.
    pub errors: Vec<String>,
}

/// Imports SIE data into new or existing books.
pub struct SieImporter;

impl SieImporter {
    /// Imports `data` into `existing`, or into a new company when `None`.
    ///
    /// - Accounts already in the chart are kept as they are
    /// - The fiscal year from `#RAR 0` is reused if present, otherwise
    ///   created; without `#RAR` the calendar year of `today` is used
    /// - Vouchers keep their verification numbers; lines on unknown
    ///   accounts are skipped
    /// - Vouchers without a valid date, or dated outside the fiscal year,
    ///   are skipped and reported in `errors`
    ///
    /// Parser warnings are carried over into `errors`.
    #[must_use]
    pub fn import(data: SieData, existing: Option<Ledger>, today: NaiveDate) -> (Ledger, ImportStats) {
        let mut stats = ImportStats {
            errors: data.warnings.iter().map(ToString::to_string).collect(),
            ..ImportStats::default()
        };

        let mut ledger = existing.unwrap_or_else(|| {
            stats.company_created = true;
            Ledger::new(Company::new(
                data.company_name.clone().unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
                data.org_number.clone().unwrap_or_else(|| DEFAULT_ORG_NUMBER.to_string()),
            ))
        });

        for sie_account in &data.accounts {
            if ledger.account(&sie_account.number).is_some() {
                continue;
            }
            match Account::new(sie_account.number.as_str(), sie_account.name.as_str())
                .and_then(|account| ledger.add_account(account))
            {
                Ok(()) => stats.accounts_imported += 1,
                Err(e) => stats.errors.push(e.to_string()),
            }
        }

        let (start, end) = match (data.fiscal_year_start, data.fiscal_year_end) {
            (Some(start), Some(end)) => (start, end),
            _ => calendar_year(today),
        };
        let fiscal_year_id = match ledger.find_fiscal_year(start, end) {
            Some(fy) => fy.id,
            None => match ledger.create_fiscal_year(start, end) {
                Ok(id) => id,
                Err(e) => {
                    warn!(error = %e, "Cannot create fiscal year, skipping vouchers");
                    stats.errors.push(e.to_string());
                    return (ledger, stats);
                }
            },
        };

        for (number, amount) in &data.opening_balances {
            // SIE balances are signed debit-positive; accounts keep theirs on
            // the normal side.
            if let Some(account) = ledger.account_mut(number) {
                account.opening_balance = match account.account_type.normal_balance() {
                    NormalBalance::Debit => *amount,
                    NormalBalance::Credit => -*amount,
                };
            }
        }

        for voucher in data.vouchers {
            let Some(date) = voucher.date else {
                stats.errors.push(format!(
                    "Voucher {}{} has no valid date, skipped",
                    voucher.series,
                    voucher.number.map(|n| n.to_string()).unwrap_or_default()
                ));
                continue;
            };
            let number = match voucher.number {
                Some(number) => number,
                None => match ledger.next_verification_number(fiscal_year_id) {
                    Ok(number) => number,
                    Err(e) => {
                        stats.errors.push(e.to_string());
                        continue;
                    }
                },
            };
            match ledger.import_transaction(fiscal_year_id, number, date, voucher.description, voucher.lines) {
                Ok(Some(_)) => stats.transactions_imported += 1,
                Ok(None) => {}
                Err(e) => stats.errors.push(e.to_string()),
            }
        }

        info!(
            company = %ledger.company().name,
            accounts = stats.accounts_imported,
            transactions = stats.transactions_imported,
            errors = stats.errors.len(),
            "SIE import finished"
        );
        (ledger, stats)
    }
}

fn calendar_year(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = today.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today);
    (start, end)
}
