//! SIE4 parser.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::SieError;
use crate::ledger::TransactionLine;

/// Upper half of code page 437 ("PC8"), the encoding SIE files are written in.
const CP437_HIGH: &str = "ÇüéâäàåçêëèïîìÄÅÉæÆôöòûùÿÖÜ¢£¥₧ƒáíóúñÑªº¿⌐¬½¼¡«»\
░▒▓│┤╡╢╖╕╣║╗╝╜╛┐└┴┬├─┼╞╟╚╔╩╦╠═╬╧╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀\
αßΓπΣσµτΦΘΩδ∞φε∩≡±≥≤⌠⌡÷≈°∙·√ⁿ²■\u{a0}";

/// Decodes raw file bytes: UTF-8 when valid, otherwise PC8.
#[must_use]
pub fn decode(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }
    bytes
        .iter()
        .map(|&b| {
            if b < 0x80 {
                char::from(b)
            } else {
                CP437_HIGH
                    .chars()
                    .nth(usize::from(b - 0x80))
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            }
        })
        .collect()
}

/// An account from `#KONTO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SieAccount {
    /// Account number.
    pub number: String,
    /// Account name.
    pub name: String,
}

/// A voucher from `#VER` and its `#TRANS` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SieVoucher {
    /// Series, e.g. `A`. May be empty.
    pub series: String,
    /// Verification number, if the file had a valid one.
    pub number: Option<u32>,
    /// Voucher date, if the file had a valid one.
    pub date: Option<NaiveDate>,
    /// Voucher text, `"Importerad"` when blank.
    pub description: String,
    /// Lines; positive SIE amounts are debits.
    pub lines: Vec<TransactionLine>,
}

/// Parsed content of a SIE file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SieData {
    /// `#FNAMN`.
    pub company_name: Option<String>,
    /// `#ORGNR`.
    pub org_number: Option<String>,
    /// First day of `#RAR 0`.
    pub fiscal_year_start: Option<NaiveDate>,
    /// Last day of `#RAR 0`.
    pub fiscal_year_end: Option<NaiveDate>,
    /// `#KONTO` in file order.
    pub accounts: Vec<SieAccount>,
    /// `#IB 0` per account, in SIE sign (positive = debit).
    pub opening_balances: BTreeMap<String, Decimal>,
    /// Vouchers with at least one line.
    pub vouchers: Vec<SieVoucher>,
    /// Malformed lines that were skipped.
    pub warnings: Vec<SieError>,
}

const DEFAULT_VOUCHER_TEXT: &str = "Importerad";

/// Parser for SIE type 4 files.
#[derive(Debug, Default)]
pub struct SieParser {
    data: SieData,
    current: Option<SieVoucher>,
    tags_seen: usize,
}

impl SieParser {
    /// Parses SIE text. Never fails; problems end up in `warnings`.
    #[must_use]
    pub fn parse(content: &str) -> SieData {
        let mut parser = Self::default();
        parser.run(content);
        parser.data
    }

    /// Parses SIE text, rejecting input without a single tag.
    ///
    /// # Errors
    ///
    /// Returns `SieError::Empty` if no line starts with `#`.
    pub fn parse_file(content: &str) -> Result<SieData, SieError> {
        let mut parser = Self::default();
        parser.run(content);
        if parser.tags_seen == 0 {
            return Err(SieError::Empty);
        }
        Ok(parser.data)
    }

    fn run(&mut self, content: &str) {
        let content = content.replace("\r\n", "\n").replace('\r', "\n");

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") || line == "{" {
                continue;
            }
            if line.starts_with('}') {
                self.finish_voucher();
                continue;
            }
            if !line.starts_with('#') {
                continue;
            }
            self.tags_seen += 1;

            let tokens = tokenize(line);
            let Some((tag, fields)) = tokens.split_first() else {
                continue;
            };
            match tag.as_str() {
                "#FNAMN" => self.data.company_name = fields.first().cloned(),
                "#ORGNR" => self.data.org_number = fields.first().cloned(),
                "#RAR" => self.parse_fiscal_year(line_no, fields),
                "#KONTO" => self.parse_account(line_no, fields),
                "#IB" => self.parse_opening_balance(line_no, fields),
                "#VER" => self.parse_voucher(line_no, fields),
                "#TRANS" => self.parse_transaction_line(line_no, fields),
                _ => {}
            }
        }

        // A file may end without the closing brace.
        self.finish_voucher();
    }

    fn warn(&mut self, warning: SieError) {
        debug!(%warning, "Skipping malformed SIE line");
        self.data.warnings.push(warning);
    }

    fn missing(&mut self, line: usize, tag: &str, field: &'static str) {
        self.warn(SieError::MissingField {
            line,
            tag: tag.to_string(),
            field,
        });
    }

    fn parse_fiscal_year(&mut self, line: usize, fields: &[String]) {
        let [year, start, end, ..] = fields else {
            self.missing(line, "#RAR", "dates");
            return;
        };
        if year != "0" {
            return;
        }
        match (parse_date(line, start), parse_date(line, end)) {
            (Ok(start), Ok(end)) => {
                self.data.fiscal_year_start = Some(start);
                self.data.fiscal_year_end = Some(end);
            }
            (Err(e), _) | (_, Err(e)) => self.warn(e),
        }
    }

    fn parse_account(&mut self, line: usize, fields: &[String]) {
        match fields {
            [number, name, ..] if is_account_number(number) => {
                self.data.accounts.push(SieAccount {
                    number: number.clone(),
                    name: name.clone(),
                });
            }
            _ => self.missing(line, "#KONTO", "account number and name"),
        }
    }

    fn parse_opening_balance(&mut self, line: usize, fields: &[String]) {
        let [year, account, amount, ..] = fields else {
            self.missing(line, "#IB", "account and amount");
            return;
        };
        if year != "0" {
            return;
        }
        match parse_amount(line, amount) {
            Ok(amount) => {
                self.data.opening_balances.insert(account.clone(), amount);
            }
            Err(e) => self.warn(e),
        }
    }

    fn parse_voucher(&mut self, line: usize, fields: &[String]) {
        // An unterminated voucher is closed by the next one.
        self.finish_voucher();

        let fields: Vec<&String> = fields.iter().filter(|f| f.as_str() != "{").collect();
        let series = fields.first().map(|s| (*s).clone()).unwrap_or_default();

        let number = match fields.get(1) {
            Some(raw) if raw.is_empty() => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    self.warn(SieError::InvalidNumber {
                        line,
                        value: (*raw).clone(),
                    });
                    None
                }
            },
            None => None,
        };

        let date = match fields.get(2) {
            Some(raw) => match parse_date(line, raw) {
                Ok(d) => Some(d),
                Err(e) => {
                    self.warn(e);
                    None
                }
            },
            None => {
                self.missing(line, "#VER", "date");
                None
            }
        };

        let description = fields
            .get(3)
            .filter(|text| !text.is_empty())
            .map_or_else(|| DEFAULT_VOUCHER_TEXT.to_string(), |text| (*text).clone());

        self.current = Some(SieVoucher {
            series,
            number,
            date,
            description,
            lines: Vec::new(),
        });
    }

    fn parse_transaction_line(&mut self, line: usize, fields: &[String]) {
        if self.current.is_none() {
            return;
        }
        let Some(account) = fields.first().filter(|a| is_account_number(a)) else {
            self.missing(line, "#TRANS", "account number");
            return;
        };
        // The object list is optional in files from older programs.
        let amount_index = match fields.get(1) {
            Some(f) if f.starts_with('{') => 2,
            _ => 1,
        };
        let Some(raw) = fields.get(amount_index) else {
            self.missing(line, "#TRANS", "amount");
            return;
        };
        let amount = match parse_amount(line, raw) {
            Ok(amount) => amount,
            Err(e) => {
                self.warn(e);
                return;
            }
        };
        // Amount is followed by transaction date, then text.
        let text = fields
            .get(amount_index + 2)
            .filter(|t| !t.is_empty())
            .cloned();

        if let Some(voucher) = self.current.as_mut() {
            let mut tx_line = TransactionLine::from_signed(account.clone(), amount);
            tx_line.description = text;
            voucher.lines.push(tx_line);
        }
    }

    fn finish_voucher(&mut self) {
        if let Some(voucher) = self.current.take() {
            if voucher.lines.is_empty() {
                debug!(number = ?voucher.number, "Dropping voucher without lines");
            } else {
                self.data.vouchers.push(voucher);
            }
        }
    }
}

/// Splits a SIE line into fields.
///
/// Quoted fields lose their quotes (`\"` escapes a quote) and a `{...}` object
/// list stays one field including its braces.
pub(crate) fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '"' => {
                chars.next();
                let mut token = String::new();
                while let Some(c) = chars.next() {
                    match c {
                        '\\' if chars.peek() == Some(&'"') => {
                            token.push('"');
                            chars.next();
                        }
                        '"' => break,
                        c => token.push(c),
                    }
                }
                tokens.push(token);
            }
            '{' => {
                let mut token = String::new();
                let mut in_quotes = false;
                for c in chars.by_ref() {
                    token.push(c);
                    match c {
                        '"' => in_quotes = !in_quotes,
                        '}' if !in_quotes => break,
                        _ => {}
                    }
                }
                tokens.push(token);
            }
            _ => {
                let mut token = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '"' || c == '{' {
                        break;
                    }
                    token.push(c);
                    chars.next();
                }
                tokens.push(token);
            }
        }
    }
    tokens
}

fn is_account_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn parse_date(line: usize, value: &str) -> Result<NaiveDate, SieError> {
    NaiveDate::parse_from_str(value, "%Y%m%d").map_err(|_| SieError::InvalidDate {
        line,
        value: value.to_string(),
    })
}

fn parse_amount(line: usize, value: &str) -> Result<Decimal, SieError> {
    Decimal::from_str(&value.replace(',', ".")).map_err(|_| SieError::InvalidAmount {
        line,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tokenizer_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#KONTO 1930 \"Företagskonto\"", &["#KONTO", "1930", "Företagskonto"])]
    #[case("#VER A 1 20240115 \"Försäljning kontant\" {", &["#VER", "A", "1", "20240115", "Försäljning kontant", "{"])]
    #[case("#VER \"\" 1 20240115 \"Test\" 20240115", &["#VER", "", "1", "20240115", "Test", "20240115"])]
    #[case("#TRANS 1930 {\"1\" \"100\"} 1000.00 \"\" \"\" 0", &["#TRANS", "1930", "{\"1\" \"100\"}", "1000.00", "", "", "0"])]
    #[case("#TRANS 1930 {} -1000,00", &["#TRANS", "1930", "{}", "-1000,00"])]
    #[case("#FNAMN \"Citat \\\"AB\\\"\"", &["#FNAMN", "Citat \"AB\""])]
    fn test_tokenize(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(tokenize(line), expected);
    }

    #[test]
    fn test_decode_pc8() {
        // "Företag Åsa" in code page 437
        let bytes = [0x46, 0x94, 0x72, 0x65, 0x74, 0x61, 0x67, 0x20, 0x8F, 0x73, 0x61];
        assert_eq!(decode(&bytes), "Företag Åsa");
        assert_eq!(decode(&[0x84, 0x86, 0x8E, 0x99]), "äåÄÖ");
        assert_eq!(decode("Redan UTF-8 åäö".as_bytes()), "Redan UTF-8 åäö");
    }

    #[test]
    fn test_cp437_table_is_complete() {
        assert_eq!(CP437_HIGH.chars().count(), 128);
    }
}
