//! Business rule validation for transaction lines.

use rust_decimal::Decimal;

use super::entry::TransactionLine;
use super::error::LedgerError;
use super::types::TransactionTotals;

/// Validates that a set of lines forms a bookable transaction.
///
/// Rules, checked in order:
/// 1. There is at least one line
/// 2. No amount is negative
/// 3. No line carries both a debit and a credit
/// 4. Debits equal credits
/// 5. The total is not zero
///
/// # Errors
///
/// Returns the first rule violated.
pub fn validate_lines(lines: &[TransactionLine]) -> Result<TransactionTotals, LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for line in lines {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if !line.debit.is_zero() && !line.credit.is_zero() {
            return Err(LedgerError::InvalidEntryType);
        }
        total_debit += line.debit;
        total_credit += line.credit;
    }

    if total_debit != total_credit {
        return Err(LedgerError::UnbalancedTransaction {
            debit: total_debit,
            credit: total_credit,
        });
    }

    if total_debit.is_zero() {
        return Err(LedgerError::EmptyTransaction);
    }

    Ok(TransactionTotals {
        total_debit,
        total_credit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balanced_lines() {
        let lines = vec![
            TransactionLine::debit("1930", dec!(100.00)),
            TransactionLine::credit("3010", dec!(100.00)),
        ];
        let totals = validate_lines(&lines).unwrap();
        assert_eq!(totals.total_debit, dec!(100.00));
        assert_eq!(totals.total_credit, dec!(100.00));
    }

    #[test]
    fn test_unbalanced_lines() {
        let lines = vec![
            TransactionLine::debit("1930", dec!(100.00)),
            TransactionLine::credit("3010", dec!(50.00)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::UnbalancedTransaction { .. })
        ));
    }

    #[test]
    fn test_no_lines() {
        assert!(matches!(validate_lines(&[]), Err(LedgerError::NoLines)));
    }

    #[test]
    fn test_zero_total() {
        let lines = vec![
            TransactionLine::debit("1930", Decimal::ZERO),
            TransactionLine::credit("3010", Decimal::ZERO),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::EmptyTransaction)
        ));
    }

    #[test]
    fn test_negative_amount() {
        let lines = vec![
            TransactionLine::debit("1930", dec!(-100)),
            TransactionLine::credit("3010", dec!(-100)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::NegativeAmount)
        ));
    }

    #[test]
    fn test_both_sides_on_one_line() {
        let mut line = TransactionLine::debit("1930", dec!(100));
        line.credit = dec!(100);
        assert!(matches!(
            validate_lines(&[line]),
            Err(LedgerError::InvalidEntryType)
        ));
    }
}
