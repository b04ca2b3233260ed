//! Property-based tests for the ledger book.
//!
//! - Every posted transaction keeps the trial balance in balance
//! - Verification numbers are gapless within a fiscal year
//! - The general ledger closing balance equals the account balance

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::account::Account;
use super::balance::NormalBalance;
use super::book::Ledger;
use super::entry::TransactionLine;
use super::types::{CreateTransactionInput, TransactionFilter};
use crate::company::Company;
use crate::fiscal::FiscalYear;

const ACCOUNTS: [&str; 6] = ["1510", "1930", "2440", "3010", "4010", "6110"];

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|ore| Decimal::new(ore, 2))
}

/// A balanced two-line posting: (debit account, credit account, amount, day of year).
fn posting() -> impl Strategy<Value = (usize, usize, Decimal, u32)> {
    (0..ACCOUNTS.len(), 0..ACCOUNTS.len(), positive_amount(), 0u32..365)
        .prop_filter("distinct accounts", |(d, c, _, _)| d != c)
}

fn ledger_with_postings(postings: &[(usize, usize, Decimal, u32)]) -> (Ledger, FiscalYear) {
    let mut ledger = Ledger::new(Company::new("Prop AB", "556000-0000"));
    ledger
        .load_accounts(ACCOUNTS.iter().map(|n| Account::new(*n, format!("Konto {n}")).unwrap()))
        .unwrap();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let fy_id = ledger
        .create_fiscal_year(start, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
        .unwrap();

    for (debit, credit, amount, day) in postings {
        ledger
            .create_transaction(CreateTransactionInput {
                fiscal_year_id: fy_id,
                date: start + chrono::Days::new(u64::from(*day)),
                description: "Prop".to_string(),
                lines: vec![
                    TransactionLine::debit(ACCOUNTS[*debit], *amount),
                    TransactionLine::credit(ACCOUNTS[*credit], *amount),
                ],
            })
            .unwrap();
    }
    let fy = ledger.fiscal_year(fy_id).unwrap().clone();
    (ledger, fy)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Debit-side and credit-side trial balance totals are always equal.
    #[test]
    fn prop_trial_balance_balances(postings in prop::collection::vec(posting(), 1..20)) {
        let (ledger, _) = ledger_with_postings(&postings);
        let tb = ledger.trial_balance(None);

        let debit_side: Decimal = tb
            .iter()
            .map(|i| match i.account_type.normal_balance() {
                NormalBalance::Debit => i.balance,
                NormalBalance::Credit => -i.balance,
            })
            .sum();
        prop_assert_eq!(debit_side, Decimal::ZERO);
    }

    /// Verification numbers run 1..=n without gaps.
    #[test]
    fn prop_verification_numbers_gapless(postings in prop::collection::vec(posting(), 1..20)) {
        let (ledger, fy) = ledger_with_postings(&postings);
        let numbers: Vec<u32> = ledger
            .transactions(&TransactionFilter::fiscal_year(fy.id))
            .iter()
            .map(|tx| tx.verification_number)
            .collect();
        let expected: Vec<u32> = (1..=u32::try_from(postings.len()).unwrap()).collect();
        prop_assert_eq!(numbers, expected);
    }

    /// Every account in the general ledger closes on its account balance.
    #[test]
    fn prop_general_ledger_closes_on_balance(postings in prop::collection::vec(posting(), 1..20)) {
        let (ledger, fy) = ledger_with_postings(&postings);
        for account in ledger.general_ledger(fy.id).unwrap() {
            let balance = ledger.account_balance(&account.account_number, None).unwrap();
            prop_assert_eq!(account.closing_balance, balance);
            prop_assert_eq!(
                account.entries.last().map(|e| e.running_balance),
                Some(account.closing_balance)
            );
        }
    }
}
