//! Property-based tests for transaction line validation rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::TransactionLine;
use super::error::LedgerError;
use super::validation::validate_lines;

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|ore| Decimal::new(ore, 2))
}

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|ore| Decimal::new(-ore, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A transaction split into any number of debit lines and one matching
    /// credit line always validates, and the totals equal the sum.
    #[test]
    fn prop_split_debits_balance(amounts in prop::collection::vec(positive_amount(), 1..10)) {
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<TransactionLine> = amounts
            .iter()
            .map(|a| TransactionLine::debit("5010", *a))
            .collect();
        lines.push(TransactionLine::credit("1930", total));

        let totals = validate_lines(&lines).unwrap();
        prop_assert_eq!(totals.total_debit, total);
        prop_assert_eq!(totals.total_credit, total);
    }

    /// Any difference between debits and credits is rejected with both sums.
    #[test]
    fn prop_unbalanced_rejected(debit in positive_amount(), credit in positive_amount()) {
        prop_assume!(debit != credit);
        let lines = vec![
            TransactionLine::debit("1930", debit),
            TransactionLine::credit("3010", credit),
        ];

        match validate_lines(&lines) {
            Err(LedgerError::UnbalancedTransaction { debit: d, credit: c }) => {
                prop_assert_eq!(d, debit);
                prop_assert_eq!(c, credit);
            }
            other => prop_assert!(false, "expected UnbalancedTransaction, got {:?}", other),
        }
    }

    /// A negative amount is rejected before the balance check.
    #[test]
    fn prop_negative_amount_rejected(amount in negative_amount()) {
        let lines = vec![
            TransactionLine::debit("1930", amount),
            TransactionLine::credit("3010", amount),
        ];
        prop_assert!(matches!(validate_lines(&lines), Err(LedgerError::NegativeAmount)));
    }

    /// A line carrying both a debit and a credit is rejected.
    #[test]
    fn prop_double_sided_line_rejected(amount in positive_amount()) {
        let line = TransactionLine {
            account_number: "1930".to_string(),
            debit: amount,
            credit: amount,
            description: None,
        };
        prop_assert!(matches!(validate_lines(&[line]), Err(LedgerError::InvalidEntryType)));
    }

    /// Signed amounts map to the right side and back.
    #[test]
    fn prop_signed_amount_roundtrip(ore in -100_000_000i64..100_000_000i64) {
        let amount = Decimal::new(ore, 2);
        let line = TransactionLine::from_signed("1930", amount);
        prop_assert_eq!(line.signed_amount(), amount);
        prop_assert!(line.debit >= Decimal::ZERO && line.credit >= Decimal::ZERO);
    }
}
