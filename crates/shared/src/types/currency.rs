//! Currency codes.
//!
//! Amounts themselves are plain `rust_decimal::Decimal`; the currency only
//! decides how an amount is labelled when rendered.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes a company can keep its books in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Swedish krona
    #[default]
    Sek,
    /// Norwegian krone
    Nok,
    /// Danish krone
    Dkk,
    /// Euro
    Eur,
    /// US Dollar
    Usd,
}

impl Currency {
    /// Suffix written after a formatted amount, e.g. `1 234 kr`.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Sek | Self::Nok | Self::Dkk => "kr",
            Self::Eur => "€",
            Self::Usd => "USD",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sek => write!(f, "SEK"),
            Self::Nok => write!(f, "NOK"),
            Self::Dkk => write!(f, "DKK"),
            Self::Eur => write!(f, "EUR"),
            Self::Usd => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SEK" => Ok(Self::Sek),
            "NOK" => Ok(Self::Nok),
            "DKK" => Ok(Self::Dkk),
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_default_is_sek() {
        assert_eq!(Currency::default(), Currency::Sek);
    }

    #[rstest]
    #[case(Currency::Sek, "kr")]
    #[case(Currency::Nok, "kr")]
    #[case(Currency::Dkk, "kr")]
    #[case(Currency::Eur, "€")]
    #[case(Currency::Usd, "USD")]
    fn test_suffix(#[case] currency: Currency, #[case] expected: &str) {
        assert_eq!(currency.suffix(), expected);
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Sek.to_string(), "SEK");
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("SEK").unwrap(), Currency::Sek);
        assert_eq!(Currency::from_str("sek").unwrap(), Currency::Sek);
        assert_eq!(Currency::from_str("DKK").unwrap(), Currency::Dkk);
        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }
}
