//! Template filters: `currency` and `date_format`.

use std::fmt::Write as _;
use std::str::FromStr;

use bokslut_shared::config::FormattingConfig;
use bokslut_shared::types::Currency;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use minijinja::value::ValueKind;
use minijinja::{Error, ErrorKind, State, Value};
use rust_decimal::{Decimal, RoundingStrategy};

/// How amounts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyStyle {
    /// Fixed suffix; `None` derives it from `company.currency`.
    pub suffix: Option<String>,
    /// Thousands separator, a space in Swedish.
    pub thousands_separator: String,
    /// Decimal mark, a comma in Swedish.
    pub decimal_mark: String,
    /// Number of decimals.
    pub decimals: u32,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self::from(&FormattingConfig::default())
    }
}

impl From<&FormattingConfig> for CurrencyStyle {
    fn from(config: &FormattingConfig) -> Self {
        Self {
            suffix: config.currency_suffix.clone(),
            thousands_separator: config.thousands_separator.clone(),
            decimal_mark: config.decimal_mark.clone(),
            decimals: config.decimals,
        }
    }
}

/// Formats an amount, e.g. `1234` as `1 234 kr`.
///
/// Rounds half to even. A result that rounds to zero has no sign.
#[must_use]
pub fn format_currency(amount: Decimal, style: &CurrencyStyle, suffix: &str) -> String {
    let rounded =
        amount.round_dp_with_strategy(style.decimals, RoundingStrategy::MidpointNearestEven);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let decimals = style.decimals as usize;
    let digits = format!("{:.decimals$}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((&digits, ""));

    let mut out = String::with_capacity(digits.len() + 8);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part, &style.thousands_separator));
    if !frac_part.is_empty() {
        out.push_str(&style.decimal_mark);
        out.push_str(frac_part);
    }
    if !suffix.is_empty() {
        out.push(' ');
        out.push_str(suffix);
    }
    out
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Reads a template value as an amount.
///
/// Decimals reach templates as strings, so numeric strings count.
fn to_decimal(value: &Value) -> Option<Decimal> {
    if let Some(s) = value.as_str() {
        return Decimal::from_str(s.trim()).ok();
    }
    if value.kind() != ValueKind::Number {
        return None;
    }
    if let Ok(n) = i64::try_from(value.clone()) {
        return Some(Decimal::from(n));
    }
    f64::try_from(value.clone())
        .ok()
        .and_then(|f| Decimal::try_from(f).ok())
}

/// Builds the `currency` filter.
///
/// `none` and undefined render as zero; values that are not numbers render
/// unchanged.
pub fn currency_filter(
    style: CurrencyStyle,
) -> impl Fn(&State<'_, '_>, Value) -> String + Send + Sync + 'static {
    move |state: &State<'_, '_>, value: Value| {
        let amount = if value.is_none() || value.is_undefined() {
            Decimal::ZERO
        } else if let Some(amount) = to_decimal(&value) {
            amount
        } else {
            return value.to_string();
        };
        match &style.suffix {
            Some(suffix) => format_currency(amount, &style, suffix),
            None => format_currency(amount, &style, company_currency(state).suffix()),
        }
    }
}

fn company_currency(state: &State<'_, '_>) -> Currency {
    state
        .lookup("company")
        .and_then(|company| company.get_attr("currency").ok())
        .and_then(|currency| currency.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or_default()
}

/// Formats a date with a strftime pattern.
///
/// Accepts `YYYY-MM-DD`, ISO datetimes and RFC 3339 timestamps. Other strings
/// come back unchanged.
///
/// # Errors
///
/// Returns an error if the pattern is invalid or asks for time fields of a
/// plain date.
pub fn format_date(value: &str, pattern: &str) -> Result<String, Error> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid date format {pattern:?}"),
        ));
    }

    let value = value.trim();
    let mut out = String::new();
    let written = if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        write!(out, "{}", date.format_with_items(items.iter()))
    } else if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
    {
        write!(out, "{}", datetime.format_with_items(items.iter()))
    } else if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        write!(out, "{}", datetime.format_with_items(items.iter()))
    } else {
        return Ok(value.to_string());
    };

    written.map_err(|_| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("date format {pattern:?} does not fit {value:?}"),
        )
    })?;
    Ok(out)
}

/// Builds the `date_format` filter with a default pattern.
///
/// `none` and undefined render as an empty string.
pub fn date_format_filter(
    default_pattern: String,
) -> impl Fn(Value, Option<String>) -> Result<String, Error> + Send + Sync + 'static {
    move |value: Value, pattern: Option<String>| {
        if value.is_none() || value.is_undefined() {
            return Ok(String::new());
        }
        let pattern = pattern.as_deref().unwrap_or(&default_pattern);
        match value.as_str() {
            Some(s) => format_date(s, pattern),
            None => Ok(value.to_string()),
        }
    }
}
