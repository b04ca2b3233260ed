//! The ledger: one company's chart of accounts, fiscal years and verifications.

use std::collections::BTreeMap;

use bokslut_shared::types::{FiscalYearId, TransactionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::account::Account;
use super::balance::{AccountTotals, NormalBalance};
use super::entry::TransactionLine;
use super::error::LedgerError;
use super::fiscal::validate_posting;
use super::transaction::Transaction;
use super::types::{CreateTransactionInput, TransactionFilter};
use super::validation::validate_lines;
use crate::company::Company;
use crate::fiscal::FiscalYear;
use crate::reports::{AccountLedger, AccountLedgerEntry, LineItem, TrialBalance};

/// Double-entry book for one company.
///
/// Invariants kept by every mutating operation:
/// - account numbers are unique and `accounts()` is ordered by number
/// - fiscal years never overlap
/// - transactions created through [`Ledger::create_transaction`] balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LedgerData", into = "LedgerData")]
pub struct Ledger {
    company: Company,
    accounts: Vec<Account>,
    fiscal_years: Vec<FiscalYear>,
    transactions: Vec<Transaction>,
}

/// Serialized form of a [`Ledger`], validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerData {
    company: Company,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    fiscal_years: Vec<FiscalYear>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl TryFrom<LedgerData> for Ledger {
    type Error = LedgerError;

    fn try_from(data: LedgerData) -> Result<Self, Self::Error> {
        let mut ledger = Self::new(data.company);
        ledger.load_accounts(data.accounts)?;
        for fiscal_year in data.fiscal_years {
            ledger.add_fiscal_year(fiscal_year)?;
        }
        for tx in &data.transactions {
            ledger.fiscal_year(tx.fiscal_year_id)?;
        }
        ledger.transactions = data.transactions;
        Ok(ledger)
    }
}

impl From<Ledger> for LedgerData {
    fn from(ledger: Ledger) -> Self {
        Self {
            company: ledger.company,
            accounts: ledger.accounts,
            fiscal_years: ledger.fiscal_years,
            transactions: ledger.transactions,
        }
    }
}

impl Ledger {
    /// Creates an empty ledger for a company.
    #[must_use]
    pub fn new(company: Company) -> Self {
        Self {
            company,
            accounts: Vec::new(),
            fiscal_years: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// The company the books belong to.
    #[must_use]
    pub fn company(&self) -> &Company {
        &self.company
    }

    // ========== Chart of accounts ==========

    /// Adds an account to the chart.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if the number is taken, or
    /// `InvalidAccountNumber` if it is not a BAS number.
    pub fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        super::account::validate_number(&account.number)?;
        match self.position(&account.number) {
            Ok(_) => Err(LedgerError::DuplicateAccount(account.number)),
            Err(index) => {
                self.accounts.insert(index, account);
                Ok(())
            }
        }
    }

    /// Adds several accounts, e.g. a BAS chart. Returns how many were added.
    ///
    /// # Errors
    ///
    /// Stops at the first account `add_account` rejects.
    pub fn load_accounts(
        &mut self,
        accounts: impl IntoIterator<Item = Account>,
    ) -> Result<usize, LedgerError> {
        let mut count = 0;
        for account in accounts {
            self.add_account(account)?;
            count += 1;
        }
        Ok(count)
    }

    /// Looks up an account by number.
    #[must_use]
    pub fn account(&self, number: &str) -> Option<&Account> {
        self.position(number).ok().map(|i| &self.accounts[i])
    }

    /// Mutable lookup by number.
    pub fn account_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.position(number).ok().map(|i| &mut self.accounts[i])
    }

    /// All accounts, ordered by number.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    fn position(&self, number: &str) -> Result<usize, usize> {
        self.accounts
            .binary_search_by(|a| a.number.as_str().cmp(number))
    }

    // ========== Fiscal years ==========

    /// Creates a new open fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` or `OverlappingFiscalYear`.
    pub fn create_fiscal_year(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<FiscalYearId, LedgerError> {
        self.add_fiscal_year(FiscalYear::new(start_date, end_date)?)
    }

    /// Adds an existing fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` or `OverlappingFiscalYear`.
    pub fn add_fiscal_year(&mut self, fiscal_year: FiscalYear) -> Result<FiscalYearId, LedgerError> {
        if fiscal_year.start_date > fiscal_year.end_date {
            return Err(LedgerError::InvalidDateRange {
                start: fiscal_year.start_date,
                end: fiscal_year.end_date,
            });
        }
        if self.fiscal_years.iter().any(|fy| fy.overlaps(&fiscal_year)) {
            return Err(LedgerError::OverlappingFiscalYear {
                start: fiscal_year.start_date,
                end: fiscal_year.end_date,
            });
        }
        let id = fiscal_year.id;
        self.fiscal_years.push(fiscal_year);
        Ok(id)
    }

    /// Looks up a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `FiscalYearNotFound`.
    pub fn fiscal_year(&self, id: FiscalYearId) -> Result<&FiscalYear, LedgerError> {
        self.fiscal_years
            .iter()
            .find(|fy| fy.id == id)
            .ok_or(LedgerError::FiscalYearNotFound(id))
    }

    /// All fiscal years, newest first.
    #[must_use]
    pub fn fiscal_years(&self) -> Vec<&FiscalYear> {
        let mut years: Vec<&FiscalYear> = self.fiscal_years.iter().collect();
        years.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        years
    }

    /// The fiscal year containing `today`.
    #[must_use]
    pub fn current_fiscal_year(&self, today: NaiveDate) -> Option<&FiscalYear> {
        self.fiscal_years.iter().find(|fy| fy.is_current(today))
    }

    /// The current fiscal year, else the one that ended last.
    ///
    /// Imported historical books usually have no current year.
    #[must_use]
    pub fn active_fiscal_year(&self, today: NaiveDate) -> Option<&FiscalYear> {
        self.current_fiscal_year(today)
            .or_else(|| self.fiscal_years.iter().max_by_key(|fy| fy.end_date))
    }

    /// The fiscal year ending in calendar year `year`.
    ///
    /// # Errors
    ///
    /// Returns `NoFiscalYearFor`.
    pub fn fiscal_year_for_year(&self, year: i32) -> Result<&FiscalYear, LedgerError> {
        self.fiscal_years
            .iter()
            .find(|fy| fy.year() == year)
            .ok_or(LedgerError::NoFiscalYearFor(year))
    }

    /// The fiscal year with exactly these boundaries.
    #[must_use]
    pub fn find_fiscal_year(&self, start_date: NaiveDate, end_date: NaiveDate) -> Option<&FiscalYear> {
        self.fiscal_years
            .iter()
            .find(|fy| fy.start_date == start_date && fy.end_date == end_date)
    }

    /// Closes a fiscal year for posting.
    ///
    /// # Errors
    ///
    /// Returns `FiscalYearNotFound`.
    pub fn close_fiscal_year(&mut self, id: FiscalYearId) -> Result<(), LedgerError> {
        let fiscal_year = self
            .fiscal_years
            .iter_mut()
            .find(|fy| fy.id == id)
            .ok_or(LedgerError::FiscalYearNotFound(id))?;
        fiscal_year.is_closed = true;
        Ok(())
    }

    // ========== Transactions ==========

    /// Next free verification number in a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `VerificationNumbersExhausted` once `u32::MAX` is taken.
    pub fn next_verification_number(&self, fiscal_year_id: FiscalYearId) -> Result<u32, LedgerError> {
        self.transactions
            .iter()
            .filter(|tx| tx.fiscal_year_id == fiscal_year_id)
            .map(|tx| tx.verification_number)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(LedgerError::VerificationNumbersExhausted(fiscal_year_id))
    }

    /// Validates and books a new transaction with the next verification number.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`validate_lines`], `AccountNotFound` for
    /// an unknown account, or a fiscal year error.
    pub fn create_transaction(
        &mut self,
        input: CreateTransactionInput,
    ) -> Result<&Transaction, LedgerError> {
        let totals = validate_lines(&input.lines)?;

        if let Some(line) = input.lines.iter().find(|l| self.account(&l.account_number).is_none()) {
            return Err(LedgerError::AccountNotFound(line.account_number.clone()));
        }

        let fiscal_year = self.fiscal_year(input.fiscal_year_id)?;
        validate_posting(fiscal_year, input.date)?;

        let verification_number = self.next_verification_number(input.fiscal_year_id)?;
        debug!(
            verification_number,
            total = %totals.total_debit,
            "Booking transaction"
        );

        self.transactions.push(Transaction {
            id: TransactionId::new(),
            fiscal_year_id: input.fiscal_year_id,
            verification_number,
            date: input.date,
            description: input.description,
            lines: input.lines,
        });
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Records a transaction exported from another system as-is.
    ///
    /// Keeps the given verification number and skips lines on unknown accounts.
    /// Debits and credits are not required to match. Returns `None` when no
    /// line is left.
    ///
    /// # Errors
    ///
    /// Returns `FiscalYearNotFound`, or `DateOutsideFiscalYear` when `date`
    /// is not within the year.
    pub fn import_transaction(
        &mut self,
        fiscal_year_id: FiscalYearId,
        verification_number: u32,
        date: NaiveDate,
        description: String,
        lines: Vec<TransactionLine>,
    ) -> Result<Option<TransactionId>, LedgerError> {
        let fiscal_year = self.fiscal_year(fiscal_year_id)?;
        if !fiscal_year.contains_date(date) {
            return Err(LedgerError::DateOutsideFiscalYear {
                date,
                start: fiscal_year.start_date,
                end: fiscal_year.end_date,
            });
        }

        let total = lines.len();
        let lines: Vec<TransactionLine> = lines
            .into_iter()
            .filter(|l| self.account(&l.account_number).is_some())
            .collect();
        if lines.len() < total {
            warn!(
                verification_number,
                skipped = total - lines.len(),
                "Skipped lines on unknown accounts"
            );
        }
        if lines.is_empty() {
            return Ok(None);
        }

        let tx = Transaction {
            id: TransactionId::new(),
            fiscal_year_id,
            verification_number,
            date,
            description,
            lines,
        };
        if !tx.is_balanced() {
            warn!(
                verification_number,
                debit = %tx.total_debit(),
                credit = %tx.total_credit(),
                "Imported transaction does not balance"
            );
        }
        let id = tx.id;
        self.transactions.push(tx);
        Ok(Some(id))
    }

    /// Transactions passing the filter, ordered by verification number.
    #[must_use]
    pub fn transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        let mut found: Vec<&Transaction> =
            self.transactions.iter().filter(|tx| filter.matches(tx)).collect();
        found.sort_by_key(|tx| (tx.verification_number, tx.date));
        found
    }

    /// Number of transactions in a fiscal year.
    #[must_use]
    pub fn transaction_count(&self, fiscal_year_id: FiscalYearId) -> usize {
        self.transactions
            .iter()
            .filter(|tx| tx.fiscal_year_id == fiscal_year_id)
            .count()
    }

    // ========== Balances ==========

    /// Balance of an account on its normal side, including the opening balance.
    ///
    /// Asset and expense accounts: debit - credit. Liability, equity and revenue
    /// accounts: credit - debit. With `end_date`, only transactions dated on or
    /// before it count.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub fn account_balance(
        &self,
        number: &str,
        end_date: Option<NaiveDate>,
    ) -> Result<Decimal, LedgerError> {
        let account = self
            .account(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))?;
        let filter = TransactionFilter {
            end_date,
            ..TransactionFilter::default()
        };
        Ok(self.totals(account, &filter, account.opening_balance).balance())
    }

    /// Trial balance over all transactions up to `end_date`.
    ///
    /// Accounts with a zero balance are left out.
    #[must_use]
    pub fn trial_balance(&self, end_date: Option<NaiveDate>) -> TrialBalance {
        let filter = TransactionFilter {
            end_date,
            ..TransactionFilter::default()
        };
        self.accounts
            .iter()
            .map(|account| (account, self.totals(account, &filter, account.opening_balance)))
            .filter_map(|(account, totals)| line_item(account, totals.balance()))
            .collect()
    }

    /// Trial balance at the end of a fiscal year.
    ///
    /// Balance sheet accounts accumulate from the opening balance; income
    /// statement accounts only count the fiscal year itself.
    ///
    /// # Errors
    ///
    /// Returns `FiscalYearNotFound`.
    pub fn fiscal_year_trial_balance(
        &self,
        fiscal_year_id: FiscalYearId,
    ) -> Result<TrialBalance, LedgerError> {
        let fiscal_year = self.fiscal_year(fiscal_year_id)?;
        let to_date = TransactionFilter {
            end_date: Some(fiscal_year.end_date),
            ..TransactionFilter::default()
        };
        let within_year = TransactionFilter {
            start_date: Some(fiscal_year.start_date),
            end_date: Some(fiscal_year.end_date),
            ..TransactionFilter::default()
        };

        Ok(self
            .accounts
            .iter()
            .map(|account| {
                let totals = if account.is_result_account() {
                    self.totals(account, &within_year, Decimal::ZERO)
                } else {
                    self.totals(account, &to_date, account.opening_balance)
                };
                (account, totals.balance())
            })
            .filter_map(|(account, balance)| line_item(account, balance))
            .collect())
    }

    /// General ledger (huvudbok) for a fiscal year: every account with lines
    /// dated within the year, with running balances. Closing balances agree
    /// with [`Ledger::fiscal_year_trial_balance`].
    ///
    /// # Errors
    ///
    /// Returns `FiscalYearNotFound`.
    pub fn general_ledger(
        &self,
        fiscal_year_id: FiscalYearId,
    ) -> Result<Vec<AccountLedger>, LedgerError> {
        let fiscal_year = self.fiscal_year(fiscal_year_id)?;
        let before_year = TransactionFilter {
            end_date: fiscal_year.start_date.pred_opt(),
            ..TransactionFilter::default()
        };
        let within_year = TransactionFilter {
            start_date: Some(fiscal_year.start_date),
            end_date: Some(fiscal_year.end_date),
            ..TransactionFilter::default()
        };

        let mut year_transactions: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|tx| within_year.matches(tx))
            .collect();
        year_transactions.sort_by_key(|tx| (tx.date, tx.verification_number));

        let mut by_account: BTreeMap<&str, Vec<(&Transaction, &TransactionLine)>> = BTreeMap::new();
        for tx in year_transactions {
            for line in &tx.lines {
                by_account
                    .entry(line.account_number.as_str())
                    .or_default()
                    .push((tx, line));
            }
        }

        let mut ledgers = Vec::with_capacity(by_account.len());
        for (number, lines) in by_account {
            let Some(account) = self.account(number) else {
                continue;
            };
            let opening_balance = if account.is_result_account() {
                Decimal::ZERO
            } else {
                self.totals(account, &before_year, account.opening_balance)
                    .balance()
            };

            let normal = account.account_type.normal_balance();
            let mut running = opening_balance;
            let mut total_debit = Decimal::ZERO;
            let mut total_credit = Decimal::ZERO;
            let entries = lines
                .into_iter()
                .map(|(tx, line)| {
                    running += normal.balance_change(line.debit, line.credit);
                    total_debit += line.debit;
                    total_credit += line.credit;
                    AccountLedgerEntry {
                        date: tx.date,
                        verification_number: tx.verification_number,
                        description: line
                            .description
                            .clone()
                            .unwrap_or_else(|| tx.description.clone()),
                        debit: line.debit,
                        credit: line.credit,
                        running_balance: running,
                    }
                })
                .collect();

            ledgers.push(AccountLedger {
                account_number: account.number.clone(),
                account_name: account.name.clone(),
                account_type: account.account_type,
                opening_balance,
                entries,
                total_debit,
                total_credit,
                closing_balance: running,
            });
        }
        Ok(ledgers)
    }

    fn totals(&self, account: &Account, filter: &TransactionFilter, opening: Decimal) -> AccountTotals {
        let mut totals = AccountTotals::new(account.account_type.normal_balance(), opening);
        for tx in self.transactions.iter().filter(|tx| filter.matches(tx)) {
            for line in tx.lines.iter().filter(|l| l.account_number == account.number) {
                totals.add(line.debit, line.credit);
            }
        }
        totals
    }
}

fn line_item(account: &Account, balance: Decimal) -> Option<LineItem> {
    if balance.is_zero() {
        return None;
    }
    let (debit, credit) = match account.account_type.normal_balance() {
        NormalBalance::Debit => (balance, Decimal::ZERO),
        NormalBalance::Credit => (Decimal::ZERO, balance),
    };
    Some(LineItem {
        account_number: account.number.clone(),
        account_name: account.name.clone(),
        account_type: account.account_type,
        balance,
        debit,
        credit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::AccountType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> (Ledger, FiscalYearId) {
        let mut ledger = Ledger::new(Company::new("Test AB", "556123-4567"));
        ledger
            .load_accounts([
                Account::new("1930", "Företagskonto").unwrap(),
                Account::new("2081", "Aktiekapital").unwrap(),
                Account::new("2440", "Leverantörsskulder").unwrap(),
                Account::new("3010", "Försäljning").unwrap(),
                Account::new("5010", "Lokalhyra").unwrap(),
            ])
            .unwrap();
        let fy = ledger
            .create_fiscal_year(date(2024, 1, 1), date(2024, 12, 31))
            .unwrap();
        (ledger, fy)
    }

    fn book(ledger: &mut Ledger, fy: FiscalYearId, day: NaiveDate, lines: Vec<TransactionLine>) {
        ledger
            .create_transaction(CreateTransactionInput {
                fiscal_year_id: fy,
                date: day,
                description: "Test".to_string(),
                lines,
            })
            .unwrap();
    }

    #[test]
    fn test_accounts_stay_sorted_and_unique() {
        let (mut ledger, _) = sample_ledger();
        ledger.add_account(Account::new("1510", "Kundfordringar").unwrap()).unwrap();
        let numbers: Vec<&str> = ledger.accounts().iter().map(|a| a.number.as_str()).collect();
        assert_eq!(numbers, ["1510", "1930", "2081", "2440", "3010", "5010"]);

        let err = ledger
            .add_account(Account::new("1930", "Dubblett").unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateAccount(n) if n == "1930"));
    }

    #[test]
    fn test_create_transaction_assigns_verification_numbers() {
        let (mut ledger, fy) = sample_ledger();
        assert_eq!(ledger.next_verification_number(fy).unwrap(), 1);

        book(&mut ledger, fy, date(2024, 1, 15), vec![
            TransactionLine::debit("1930", dec!(1000)),
            TransactionLine::credit("3010", dec!(1000)),
        ]);
        book(&mut ledger, fy, date(2024, 1, 20), vec![
            TransactionLine::debit("5010", dec!(400)),
            TransactionLine::credit("1930", dec!(400)),
        ]);

        let numbers: Vec<u32> = ledger
            .transactions(&TransactionFilter::fiscal_year(fy))
            .iter()
            .map(|tx| tx.verification_number)
            .collect();
        assert_eq!(numbers, [1, 2]);
        assert_eq!(ledger.transaction_count(fy), 2);
        assert_eq!(ledger.next_verification_number(fy).unwrap(), 3);
    }

    #[test]
    fn test_create_transaction_rejects_unbalanced() {
        let (mut ledger, fy) = sample_ledger();
        let err = ledger
            .create_transaction(CreateTransactionInput {
                fiscal_year_id: fy,
                date: date(2024, 3, 1),
                description: "Fel".to_string(),
                lines: vec![
                    TransactionLine::debit("1930", dec!(100)),
                    TransactionLine::credit("3010", dec!(90)),
                ],
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::UnbalancedTransaction { .. }));
        assert_eq!(ledger.transaction_count(fy), 0);
    }

    #[test]
    fn test_create_transaction_rejects_unknown_account() {
        let (mut ledger, fy) = sample_ledger();
        let err = ledger
            .create_transaction(CreateTransactionInput {
                fiscal_year_id: fy,
                date: date(2024, 3, 1),
                description: "Okänt konto".to_string(),
                lines: vec![
                    TransactionLine::debit("1910", dec!(100)),
                    TransactionLine::credit("3010", dec!(100)),
                ],
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(n) if n == "1910"));
    }

    #[test]
    fn test_create_transaction_rejects_closed_year_and_outside_dates() {
        let (mut ledger, fy) = sample_ledger();
        let lines = vec![
            TransactionLine::debit("1930", dec!(100)),
            TransactionLine::credit("3010", dec!(100)),
        ];

        let outside = ledger
            .create_transaction(CreateTransactionInput {
                fiscal_year_id: fy,
                date: date(2025, 1, 1),
                description: "Nästa år".to_string(),
                lines: lines.clone(),
            })
            .unwrap_err();
        assert!(matches!(outside, LedgerError::DateOutsideFiscalYear { .. }));

        ledger.close_fiscal_year(fy).unwrap();
        let closed = ledger
            .create_transaction(CreateTransactionInput {
                fiscal_year_id: fy,
                date: date(2024, 6, 1),
                description: "Stängt".to_string(),
                lines,
            })
            .unwrap_err();
        assert!(matches!(closed, LedgerError::FiscalYearClosed));
    }

    #[test]
    fn test_overlapping_fiscal_year_is_rejected() {
        let (mut ledger, _) = sample_ledger();
        let err = ledger
            .create_fiscal_year(date(2024, 7, 1), date(2025, 6, 30))
            .unwrap_err();
        assert!(matches!(err, LedgerError::OverlappingFiscalYear { .. }));
    }

    #[test]
    fn test_active_fiscal_year_falls_back_to_latest() {
        let (mut ledger, fy_2024) = sample_ledger();
        let fy_2023 = ledger
            .create_fiscal_year(date(2023, 1, 1), date(2023, 12, 31))
            .unwrap();

        assert_eq!(ledger.current_fiscal_year(date(2023, 5, 1)).unwrap().id, fy_2023);
        assert!(ledger.current_fiscal_year(date(2026, 5, 1)).is_none());
        assert_eq!(ledger.active_fiscal_year(date(2026, 5, 1)).unwrap().id, fy_2024);
        assert_eq!(ledger.fiscal_years()[0].id, fy_2024);
        assert_eq!(ledger.fiscal_year_for_year(2023).unwrap().id, fy_2023);
        assert!(matches!(
            ledger.fiscal_year_for_year(2019),
            Err(LedgerError::NoFiscalYearFor(2019))
        ));
    }

    #[test]
    fn test_account_balance_by_normal_side() {
        let (mut ledger, fy) = sample_ledger();
        ledger.account_mut("1930").unwrap().opening_balance = dec!(50000);

        book(&mut ledger, fy, date(2024, 1, 15), vec![
            TransactionLine::debit("1930", dec!(1000)),
            TransactionLine::credit("3010", dec!(1000)),
        ]);
        book(&mut ledger, fy, date(2024, 2, 1), vec![
            TransactionLine::debit("5010", dec!(400)),
            TransactionLine::credit("1930", dec!(400)),
        ]);

        assert_eq!(ledger.account_balance("1930", None).unwrap(), dec!(50600));
        assert_eq!(
            ledger.account_balance("1930", Some(date(2024, 1, 31))).unwrap(),
            dec!(51000)
        );
        assert_eq!(ledger.account_balance("3010", None).unwrap(), dec!(1000));
        assert_eq!(ledger.account_balance("5010", None).unwrap(), dec!(400));
        assert!(ledger.account_balance("9999", None).is_err());
    }

    #[test]
    fn test_trial_balance_skips_zero_balances() {
        let (mut ledger, fy) = sample_ledger();
        book(&mut ledger, fy, date(2024, 1, 15), vec![
            TransactionLine::debit("1930", dec!(1000)),
            TransactionLine::credit("3010", dec!(1000)),
        ]);

        let tb = ledger.trial_balance(None);
        assert_eq!(tb.len(), 2);
        assert_eq!(tb[0].account_number, "1930");
        assert_eq!(tb[0].debit, dec!(1000));
        assert_eq!(tb[0].credit, Decimal::ZERO);
        assert_eq!(tb[1].account_number, "3010");
        assert_eq!(tb[1].account_type, AccountType::Revenue);
        assert_eq!(tb[1].credit, dec!(1000));
        assert_eq!(tb[1].debit, Decimal::ZERO);
    }

    #[test]
    fn test_fiscal_year_trial_balance_resets_result_accounts() {
        let (mut ledger, fy_2024) = sample_ledger();
        let fy_2025 = ledger
            .create_fiscal_year(date(2025, 1, 1), date(2025, 12, 31))
            .unwrap();

        book(&mut ledger, fy_2024, date(2024, 5, 1), vec![
            TransactionLine::debit("1930", dec!(1000)),
            TransactionLine::credit("3010", dec!(1000)),
        ]);
        book(&mut ledger, fy_2025, date(2025, 5, 1), vec![
            TransactionLine::debit("1930", dec!(300)),
            TransactionLine::credit("3010", dec!(300)),
        ]);

        let tb = ledger.fiscal_year_trial_balance(fy_2025).unwrap();
        let cash = tb.iter().find(|i| i.account_number == "1930").unwrap();
        let sales = tb.iter().find(|i| i.account_number == "3010").unwrap();
        assert_eq!(cash.balance, dec!(1300));
        assert_eq!(sales.balance, dec!(300));
    }

    #[test]
    fn test_general_ledger_running_balance() {
        let (mut ledger, fy) = sample_ledger();
        ledger.account_mut("1930").unwrap().opening_balance = dec!(500);

        book(&mut ledger, fy, date(2024, 1, 15), vec![
            TransactionLine::debit("1930", dec!(1000)),
            TransactionLine::credit("3010", dec!(1000)),
        ]);
        book(&mut ledger, fy, date(2024, 2, 1), vec![
            TransactionLine::debit("5010", dec!(400)),
            TransactionLine::credit("1930", dec!(400)),
        ]);

        let gl = ledger.general_ledger(fy).unwrap();
        let numbers: Vec<&str> = gl.iter().map(|a| a.account_number.as_str()).collect();
        assert_eq!(numbers, ["1930", "3010", "5010"]);

        let cash = &gl[0];
        assert_eq!(cash.opening_balance, dec!(500));
        assert_eq!(cash.entries.len(), 2);
        assert_eq!(cash.entries[0].running_balance, dec!(1500));
        assert_eq!(cash.entries[1].running_balance, dec!(1100));
        assert_eq!(cash.total_debit, dec!(1000));
        assert_eq!(cash.total_credit, dec!(400));
        assert_eq!(cash.closing_balance, dec!(1100));
    }

    #[test]
    fn test_import_transaction_keeps_number_and_skips_unknown_accounts() {
        let (mut ledger, fy) = sample_ledger();
        let id = ledger
            .import_transaction(
                fy,
                17,
                date(2024, 1, 20),
                "Inköp".to_string(),
                vec![
                    TransactionLine::credit("2440", dec!(500)),
                    TransactionLine::credit("1930", dec!(500)),
                    TransactionLine::debit("4010", dec!(1000)),
                ],
            )
            .unwrap();
        assert!(id.is_some());

        let txs = ledger.transactions(&TransactionFilter::fiscal_year(fy));
        assert_eq!(txs[0].verification_number, 17);
        assert_eq!(txs[0].lines.len(), 2);

        let none = ledger
            .import_transaction(
                fy,
                18,
                date(2024, 1, 21),
                "Bara okända".to_string(),
                vec![TransactionLine::debit("4010", dec!(1))],
            )
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_import_transaction_rejects_date_outside_year() {
        let (mut ledger, fy) = sample_ledger();
        let err = ledger
            .import_transaction(
                fy,
                1,
                date(2023, 6, 15),
                "Fjolårets".to_string(),
                vec![
                    TransactionLine::debit("1930", dec!(500)),
                    TransactionLine::credit("3010", dec!(500)),
                ],
            )
            .unwrap_err();
        assert_eq!(err.error_code(), "DATE_OUTSIDE_FISCAL_YEAR");
        assert_eq!(ledger.transaction_count(fy), 0);
    }

    #[test]
    fn test_verification_numbers_exhausted() {
        let (mut ledger, fy) = sample_ledger();
        ledger
            .import_transaction(
                fy,
                u32::MAX,
                date(2024, 1, 15),
                "Sista".to_string(),
                vec![
                    TransactionLine::debit("1930", dec!(10)),
                    TransactionLine::credit("3010", dec!(10)),
                ],
            )
            .unwrap();

        assert!(matches!(
            ledger.next_verification_number(fy),
            Err(LedgerError::VerificationNumbersExhausted(id)) if id == fy
        ));
        let err = ledger
            .create_transaction(CreateTransactionInput {
                fiscal_year_id: fy,
                date: date(2024, 1, 16),
                description: "En till".to_string(),
                lines: vec![
                    TransactionLine::debit("1930", dec!(10)),
                    TransactionLine::credit("3010", dec!(10)),
                ],
            })
            .unwrap_err();
        assert_eq!(err.error_code(), "VERIFICATION_NUMBERS_EXHAUSTED");
        assert_eq!(ledger.transaction_count(fy), 1);
    }

    #[test]
    fn test_general_ledger_agrees_with_trial_balance() {
        let (mut ledger, fy_2024) = sample_ledger();
        let fy_2023 = ledger
            .create_fiscal_year(date(2023, 1, 1), date(2023, 12, 31))
            .unwrap();
        book(&mut ledger, fy_2023, date(2023, 3, 1), vec![
            TransactionLine::debit("1930", dec!(200)),
            TransactionLine::credit("3010", dec!(200)),
        ]);
        book(&mut ledger, fy_2024, date(2024, 1, 15), vec![
            TransactionLine::debit("1930", dec!(1000)),
            TransactionLine::credit("3010", dec!(1000)),
        ]);
        // Filed under 2024 but dated in 2023, as older exports may have it.
        ledger.transactions.push(Transaction {
            id: TransactionId::new(),
            fiscal_year_id: fy_2024,
            verification_number: 99,
            date: date(2023, 6, 15),
            description: "Felårad".to_string(),
            lines: vec![
                TransactionLine::debit("1930", dec!(500)),
                TransactionLine::credit("3010", dec!(500)),
            ],
        });

        let gl = ledger.general_ledger(fy_2024).unwrap();
        let tb = ledger.fiscal_year_trial_balance(fy_2024).unwrap();
        for account in &gl {
            let expected = tb
                .iter()
                .find(|item| item.account_number == account.account_number)
                .map_or(Decimal::ZERO, |item| item.balance);
            assert_eq!(account.closing_balance, expected, "account {}", account.account_number);
        }

        let cash = gl.iter().find(|a| a.account_number == "1930").unwrap();
        assert_eq!(cash.opening_balance, dec!(700));
        assert_eq!(cash.entries.len(), 1);
        assert_eq!(cash.closing_balance, dec!(1700));
        let sales = gl.iter().find(|a| a.account_number == "3010").unwrap();
        assert_eq!(sales.closing_balance, dec!(1000));
    }

    #[test]
    fn test_transaction_filter_ranges() {
        let (mut ledger, fy) = sample_ledger();
        for day in 1..=5 {
            book(&mut ledger, fy, date(2024, 3, day), vec![
                TransactionLine::debit("1930", dec!(10)),
                TransactionLine::credit("3010", dec!(10)),
            ]);
        }

        let by_ver = ledger.transactions(&TransactionFilter {
            ver_from: Some(2),
            ver_to: Some(3),
            ..TransactionFilter::default()
        });
        assert_eq!(by_ver.len(), 2);

        let by_date = ledger.transactions(&TransactionFilter {
            start_date: Some(date(2024, 3, 4)),
            ..TransactionFilter::default()
        });
        assert_eq!(by_date.len(), 2);
    }

    #[test]
    fn test_ledger_json_roundtrip_validates() {
        let (mut ledger, fy) = sample_ledger();
        book(&mut ledger, fy, date(2024, 1, 15), vec![
            TransactionLine::debit("1930", dec!(1000)),
            TransactionLine::credit("3010", dec!(1000)),
        ]);

        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back.accounts().len(), 5);
        assert_eq!(back.transaction_count(fy), 1);

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["accounts"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({"number": "1930", "name": "Dubblett", "account_type": "asset"}));
        assert!(serde_json::from_value::<Ledger>(value).is_err());
    }
}
