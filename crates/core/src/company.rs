//! Company profile.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bokslut_shared::types::{CompanyId, Currency};
use serde::{Deserialize, Serialize};

/// Swedish accounting standards for annual report preparation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountingStandard {
    /// Simplified rules for smaller companies (BFNAR 2016:10).
    #[default]
    K2,
    /// Principle-based main framework (BFNAR 2012:1).
    K3,
}

impl AccountingStandard {
    /// Lowercase code used in template keys, e.g. `annual_report_k2`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::K2 => "k2",
            Self::K3 => "k3",
        }
    }
}

impl std::fmt::Display for AccountingStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::K2 => write!(f, "K2"),
            Self::K3 => write!(f, "K3"),
        }
    }
}

/// Company logo, embedded into documents as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Raw image bytes, base64 encoded when serialized.
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl Logo {
    /// Returns the logo as `data:<mime>;base64,<payload>` for use in `<img src>`.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// Static company profile.
///
/// Every company has its own chart of accounts, fiscal years and transactions,
/// held by a [`crate::Ledger`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier.
    #[serde(default)]
    pub id: CompanyId,
    /// Registered name.
    pub name: String,
    /// Organisationsnummer, e.g. `556123-4567`.
    pub org_number: String,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// K2 or K3.
    #[serde(default)]
    pub accounting_standard: AccountingStandard,
    /// First month of the fiscal year (1-12, usually 1).
    #[serde(default = "default_start_month")]
    pub fiscal_year_start_month: u32,
    /// Currency the books are kept in.
    #[serde(default)]
    pub currency: Currency,
    /// Optional logo.
    #[serde(default)]
    pub logo: Option<Logo>,
}

fn default_start_month() -> u32 {
    1
}

impl Company {
    /// Creates a K2 company keeping its books in SEK with a calendar fiscal year.
    #[must_use]
    pub fn new(name: impl Into<String>, org_number: impl Into<String>) -> Self {
        Self {
            id: CompanyId::new(),
            name: name.into(),
            org_number: org_number.into(),
            address: None,
            postal_code: None,
            city: None,
            email: None,
            phone: None,
            accounting_standard: AccountingStandard::K2,
            fiscal_year_start_month: default_start_month(),
            currency: Currency::Sek,
            logo: None,
        }
    }

    /// Sets the accounting standard.
    #[must_use]
    pub fn with_standard(mut self, standard: AccountingStandard) -> Self {
        self.accounting_standard = standard;
        self
    }

    /// Returns the logo as a data URI, if the company has one.
    #[must_use]
    pub fn logo_data_uri(&self) -> Option<String> {
        self.logo.as_ref().map(Logo::data_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_company_defaults() {
        let company = Company::new("Test AB", "556123-4567");
        assert_eq!(company.accounting_standard, AccountingStandard::K2);
        assert_eq!(company.fiscal_year_start_month, 1);
        assert_eq!(company.currency, Currency::Sek);
        assert!(company.logo_data_uri().is_none());
    }

    #[test]
    fn test_standard_code() {
        assert_eq!(AccountingStandard::K2.code(), "k2");
        assert_eq!(AccountingStandard::K3.code(), "k3");
        assert_eq!(AccountingStandard::K3.to_string(), "K3");
    }

    #[test]
    fn test_logo_data_uri() {
        let logo = Logo {
            mime_type: "image/png".to_string(),
            bytes: b"abc".to_vec(),
        };
        assert_eq!(logo.data_uri(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_company_from_minimal_json() {
        let company: Company = serde_json::from_str(
            r#"{"name": "Exempel AB", "org_number": "556000-0000", "accounting_standard": "K3"}"#,
        )
        .unwrap();
        assert_eq!(company.name, "Exempel AB");
        assert_eq!(company.accounting_standard, AccountingStandard::K3);
        assert_eq!(company.fiscal_year_start_month, 1);
    }

    #[test]
    fn test_logo_serializes_as_base64() {
        let mut company = Company::new("Test AB", "556123-4567");
        company.logo = Some(Logo {
            mime_type: "image/svg+xml".to_string(),
            bytes: b"<svg/>".to_vec(),
        });

        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["logo"]["bytes"], "PHN2Zy8+");

        let back: Company = serde_json::from_value(json).unwrap();
        assert_eq!(back.logo, company.logo);
    }
}
