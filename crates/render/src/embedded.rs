//! Built-in templates compiled into the crate.
//!
//! The same files are written to the template directory by
//! `ReportGenerator::install_builtin_templates` as a starting point for edits.

use crate::kind::TemplateKind;

/// Shared layout every built-in template extends.
pub const BASE_TEMPLATE: &str = "_base.html";

/// README placed in the template directory.
pub const README: &str = include_str!("../templates/README.md");

const BASE: &str = include_str!("../templates/_base.html");
const K2_ANNUAL_REPORT: &str = include_str!("../templates/arsredovisning/k2_arsredovisning.html");
const K3_ANNUAL_REPORT: &str = include_str!("../templates/arsredovisning/k3_arsredovisning.html");
const INCOME_STATEMENT: &str = include_str!("../templates/rapporter/resultatrakning.html");
const BALANCE_SHEET: &str = include_str!("../templates/rapporter/balansrakning.html");
const TRIAL_BALANCE: &str = include_str!("../templates/rapporter/rabalans.html");
const GENERAL_LEDGER: &str = include_str!("../templates/rapporter/huvudbok.html");
const SHAREHOLDER_REGISTER: &str = include_str!("../templates/register/aktiebok.html");
const BOARD_MEETING: &str = include_str!("../templates/protokoll/styrelsemote.html");
const ANNUAL_MEETING: &str = include_str!("../templates/protokoll/bolagsstamma.html");

/// Built-in source of a document kind.
#[must_use]
pub const fn template(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::AnnualReportK2 => K2_ANNUAL_REPORT,
        TemplateKind::AnnualReportK3 => K3_ANNUAL_REPORT,
        TemplateKind::IncomeStatement => INCOME_STATEMENT,
        TemplateKind::BalanceSheet => BALANCE_SHEET,
        TemplateKind::TrialBalance => TRIAL_BALANCE,
        TemplateKind::GeneralLedger => GENERAL_LEDGER,
        TemplateKind::ShareholderRegister => SHAREHOLDER_REGISTER,
        TemplateKind::BoardMeeting => BOARD_MEETING,
        TemplateKind::AnnualMeeting => ANNUAL_MEETING,
    }
}

/// Built-in source by template name (path relative to the template directory).
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    if name == BASE_TEMPLATE {
        return Some(BASE);
    }
    TemplateKind::ALL
        .into_iter()
        .find(|kind| kind.path() == name)
        .map(template)
}

/// Every built-in file as `(relative path, source)`, layout first.
pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
    std::iter::once((BASE_TEMPLATE, BASE))
        .chain(TemplateKind::ALL.into_iter().map(|kind| (kind.path(), template(kind))))
}
