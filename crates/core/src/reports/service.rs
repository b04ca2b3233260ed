//! Report data service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{BalanceSheet, FinancialData, IncomeStatement, LineItem, TrialBalance};
use crate::fiscal::FiscalYear;
use crate::ledger::Ledger;

/// Service for building financial statements.
pub struct ReportService;

impl ReportService {
    /// Groups a trial balance into income statement and balance sheet by
    /// BAS class.
    ///
    /// - Class 1: assets
    /// - Class 2: equity and liabilities
    /// - Class 3: revenue, totalled by absolute balance
    /// - Classes 4-8: expenses
    ///
    /// Other classes are left out of both statements. The result is total
    /// revenue minus total expenses, and the balance sheet's equity side
    /// includes it.
    #[must_use]
    pub fn financial_data(trial_balance: TrialBalance) -> FinancialData {
        let mut income_statement = IncomeStatement::default();
        let mut balance_sheet = BalanceSheet::default();

        for item in &trial_balance {
            match class_of(item) {
                Some(1) => {
                    balance_sheet.total_assets += item.balance;
                    balance_sheet.assets.push(item.clone());
                }
                Some(2) => {
                    balance_sheet.total_liabilities += item.balance;
                    balance_sheet.liabilities.push(item.clone());
                }
                Some(3) => {
                    income_statement.total_revenue += item.balance.abs();
                    income_statement.revenue.push(item.clone());
                }
                Some(4..=8) => {
                    income_statement.total_expenses += item.balance;
                    income_statement.expenses.push(item.clone());
                }
                _ => {}
            }
        }

        let result = income_statement.total_revenue - income_statement.total_expenses;
        balance_sheet.total_equity_and_liabilities = balance_sheet.total_liabilities + result;
        FinancialData {
            trial_balance,
            income_statement,
            balance_sheet,
            result,
        }
    }

    /// Financial data for one fiscal year of a ledger.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` if the fiscal year does not exist.
    pub fn for_fiscal_year(
        ledger: &Ledger,
        fiscal_year: &FiscalYear,
    ) -> Result<FinancialData, ReportError> {
        let trial_balance = ledger.fiscal_year_trial_balance(fiscal_year.id)?;
        Ok(Self::financial_data(trial_balance))
    }

    /// Picks the fiscal year to report on: the one ending in `year` if given,
    /// otherwise the active year as of `today`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` for an unknown year, or
    /// `ReportError::NoFiscalYear` when the ledger has none.
    pub fn select_fiscal_year(
        ledger: &Ledger,
        year: Option<i32>,
        today: NaiveDate,
    ) -> Result<&FiscalYear, ReportError> {
        match year {
            Some(year) => Ok(ledger.fiscal_year_for_year(year)?),
            None => ledger
                .active_fiscal_year(today)
                .ok_or(ReportError::NoFiscalYear(today)),
        }
    }

    /// Sum of the debit column and of the credit column of a trial balance.
    #[must_use]
    pub fn trial_balance_totals(trial_balance: &[LineItem]) -> (Decimal, Decimal) {
        trial_balance
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), item| {
                (debit + item.debit, credit + item.credit)
            })
    }
}

fn class_of(item: &LineItem) -> Option<u32> {
    item.account_number.chars().next().and_then(|c| c.to_digit(10))
}
