//! Property-based tests for amount and date formatting.

use std::str::FromStr;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::filters::{CurrencyStyle, format_currency, format_date};

/// Amounts in öre between -10 million and 10 million kronor.
fn amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|ore| Decimal::new(ore, 2))
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Removing the separators and suffix gives back the rounded amount.
    #[test]
    fn prop_currency_reads_back(value in amount()) {
        let formatted = format_currency(value, &CurrencyStyle::default(), "kr");
        prop_assert!(formatted.ends_with(" kr"));

        let digits: String = formatted
            .trim_end_matches(" kr")
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        let expected = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        prop_assert_eq!(Decimal::from_str(&digits).unwrap(), expected);
    }

    /// Groups between separators are exactly three digits.
    #[test]
    fn prop_currency_groups_of_three(value in amount()) {
        let formatted = format_currency(value, &CurrencyStyle::default(), "");
        let unsigned = formatted.trim_start_matches('-');
        let groups: Vec<&str> = unsigned.split(' ').collect();
        prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3);
        }
    }

    /// The default pattern gives back the ISO date.
    #[test]
    fn prop_default_date_pattern_is_iso(date in any_date()) {
        let iso = date.format("%Y-%m-%d").to_string();
        prop_assert_eq!(format_date(&iso, "%Y-%m-%d").unwrap(), iso.clone());
        let datetime = format!("{iso}T12:00:00");
        prop_assert_eq!(format_date(&datetime, "%Y-%m-%d").unwrap(), iso);
    }
}
