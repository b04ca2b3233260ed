//! Template variables.
//!
//! Every document gets `company`, `generated_at` and, when the company has a
//! logo, `logo_base64`. Financial documents add `fiscal_year`,
//! `income_statement`, `balance_sheet`, `trial_balance` and `result`.

use std::collections::BTreeMap;

use bokslut_core::reports::{AccountLedger, FinancialData};
use bokslut_core::{Company, FiscalYear, MeetingMinutes, ShareRegister};
use chrono::{Local, NaiveDate, NaiveDateTime};
use minijinja::Value;
use serde::Serialize;

/// `company.*` as seen by templates.
#[derive(Debug, Clone, Serialize)]
struct CompanyView<'a> {
    name: &'a str,
    org_number: &'a str,
    address: Option<&'a str>,
    postal_code: Option<&'a str>,
    city: Option<&'a str>,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    accounting_standard: String,
    currency: String,
    fiscal_year_start_month: u32,
    logo_base64: Option<String>,
}

impl<'a> CompanyView<'a> {
    fn new(company: &'a Company) -> Self {
        Self {
            name: &company.name,
            org_number: &company.org_number,
            address: company.address.as_deref(),
            postal_code: company.postal_code.as_deref(),
            city: company.city.as_deref(),
            email: company.email.as_deref(),
            phone: company.phone.as_deref(),
            accounting_standard: company.accounting_standard.to_string(),
            currency: company.currency.to_string(),
            fiscal_year_start_month: company.fiscal_year_start_month,
            logo_base64: company.logo_data_uri(),
        }
    }
}

/// `fiscal_year.*` as seen by templates.
#[derive(Debug, Clone, Serialize)]
struct FiscalYearView {
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_closed: bool,
    year: i32,
}

/// `share_register.*`.
#[derive(Debug, Clone, Serialize)]
struct ShareRegisterView<'a> {
    shareholders: &'a ShareRegister,
    total_shares: u64,
}

/// `minutes.*`, with items numbered.
#[derive(Debug, Clone, Serialize)]
struct MinutesView<'a> {
    title: &'static str,
    kind: bokslut_core::MeetingKind,
    date: Option<NaiveDate>,
    location: Option<&'a str>,
    chair: Option<&'a str>,
    secretary: Option<&'a str>,
    adjusters: &'a [String],
    attendees: &'a [String],
    items: Vec<bokslut_core::NumberedItem>,
}

/// Variables for one render.
///
/// Keys set later replace earlier ones, so [`ReportContext::extend`] can
/// override anything the generator put in.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    values: BTreeMap<String, Value>,
}

impl ReportContext {
    /// Starts a context for a company, stamped with the current local time.
    #[must_use]
    pub fn new(company: &Company) -> Self {
        let mut ctx = Self::default();
        let view = CompanyView::new(company);
        if let Some(logo) = &view.logo_base64 {
            ctx.insert("logo_base64", logo);
        }
        ctx.insert("company", &view);
        ctx.generated_at(Local::now().naive_local())
    }

    /// Overrides the generation timestamp.
    #[must_use]
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.insert("generated_at", &at);
        self
    }

    /// Adds `fiscal_year`.
    #[must_use]
    pub fn fiscal_year(mut self, fiscal_year: &FiscalYear) -> Self {
        self.insert(
            "fiscal_year",
            &FiscalYearView {
                start_date: fiscal_year.start_date,
                end_date: fiscal_year.end_date,
                is_closed: fiscal_year.is_closed,
                year: fiscal_year.year(),
            },
        );
        self
    }

    /// Adds `trial_balance`, `income_statement`, `balance_sheet` and `result`.
    #[must_use]
    pub fn financial(mut self, data: &FinancialData) -> Self {
        self.insert("trial_balance", &data.trial_balance);
        self.insert("income_statement", &data.income_statement);
        self.insert("balance_sheet", &data.balance_sheet);
        self.insert("result", &data.result);
        self
    }

    /// Adds `general_ledger`.
    #[must_use]
    pub fn general_ledger(mut self, accounts: &[AccountLedger]) -> Self {
        self.insert("general_ledger", &accounts);
        self
    }

    /// Adds `share_register`.
    #[must_use]
    pub fn share_register(mut self, register: &ShareRegister) -> Self {
        self.insert(
            "share_register",
            &ShareRegisterView {
                shareholders: register,
                total_shares: register.total_shares(),
            },
        );
        self
    }

    /// Adds `minutes`.
    #[must_use]
    pub fn minutes(mut self, minutes: &MeetingMinutes) -> Self {
        self.insert(
            "minutes",
            &MinutesView {
                title: minutes.kind.title(),
                kind: minutes.kind,
                date: minutes.date,
                location: minutes.location.as_deref(),
                chair: minutes.chair.as_deref(),
                secretary: minutes.secretary.as_deref(),
                adjusters: &minutes.adjusters,
                attendees: &minutes.attendees,
                items: minutes.numbered_items(),
            },
        );
        self
    }

    /// Merges caller data. A JSON object contributes its keys; anything else
    /// is ignored.
    #[must_use]
    pub fn extend(mut self, extra: &serde_json::Value) -> Self {
        if let Some(map) = extra.as_object() {
            for (key, value) in map {
                self.insert(key, value);
            }
        }
        self
    }

    /// Sets a single variable.
    pub fn insert<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.values.insert(key.to_string(), Value::from_serialize(value));
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Variable names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl Serialize for ReportContext {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
