//! Reading ledgers and JSON inputs.

use std::fs;
use std::path::Path;

use bokslut_core::sie::decode;
use bokslut_core::{ImportStats, Ledger, SieImporter, SieParser};
use bokslut_shared::{AppError, AppResult};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

const SIE_EXTENSIONS: [&str; 3] = ["se", "si", "sie"];

/// Whether a file is read as SIE, by extension.
pub fn is_sie(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SIE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn read(path: &Path) -> AppResult<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
        _ => AppError::Io(format!("{}: {e}", path.display())),
    })
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes = read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::Parse(format!("{}: {e}", path.display())))
}

/// Imports an SIE file into new books.
pub fn import_sie(path: &Path, today: NaiveDate) -> AppResult<(Ledger, ImportStats)> {
    let content = decode(&read(path)?);
    let data = SieParser::parse_file(&content)?;
    let (ledger, stats) = SieImporter::import(data, None, today);
    for problem in &stats.errors {
        warn!(file = %path.display(), "{problem}");
    }
    info!(
        file = %path.display(),
        accounts = stats.accounts_imported,
        transactions = stats.transactions_imported,
        "Imported SIE file"
    );
    Ok((ledger, stats))
}

/// Loads a ledger from JSON, or from SIE by extension.
pub fn load_ledger(path: &Path, today: NaiveDate) -> AppResult<Ledger> {
    if is_sie(path) {
        return import_sie(path, today).map(|(ledger, _)| ledger);
    }
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SIE: &str = "#FLAGGA 0\n\
#SIETYP 4\n\
#FNAMN \"Exempel AB\"\n\
#ORGNR 556677-8899\n\
#RAR 0 20240101 20241231\n\
#KONTO 1930 \"Företagskonto\"\n\
#KONTO 3010 \"Försäljning\"\n\
#VER A 1 20240115 \"Kontantförsäljning\"\n\
{\n\
#TRANS 1930 {} 1000.00\n\
#TRANS 3010 {} -1000.00\n\
}\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    #[rstest]
    #[case("bok.se", true)]
    #[case("bok.SI", true)]
    #[case("bok.sie", true)]
    #[case("bok.json", false)]
    #[case("bok", false)]
    fn test_is_sie(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_sie(Path::new(name)), expected);
    }

    #[test]
    fn test_load_ledger_from_sie_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let sie = dir.path().join("bok.se");
        fs::write(&sie, SIE).unwrap();

        let ledger = load_ledger(&sie, today()).unwrap();
        assert_eq!(ledger.company().name, "Exempel AB");
        assert_eq!(ledger.accounts().len(), 2);

        let json = dir.path().join("bok.json");
        fs::write(&json, serde_json::to_vec(&ledger).unwrap()).unwrap();
        let reloaded = load_ledger(&json, today()).unwrap();
        assert_eq!(reloaded.company().org_number, "556677-8899");
        assert_eq!(reloaded.accounts().len(), 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_ledger(Path::new("finns-inte.json"), today()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bok.json");
        fs::write(&path, "{ inte json").unwrap();
        assert!(matches!(load_ledger(&path, today()), Err(AppError::Parse(_))));
    }
}
