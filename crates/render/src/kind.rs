//! Template catalogue.

use std::fmt;
use std::str::FromStr;

use bokslut_core::{AccountingStandard, MeetingKind};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// The documents that can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Årsredovisning enligt K2.
    AnnualReportK2,
    /// Årsredovisning enligt K3.
    AnnualReportK3,
    /// Resultaträkning.
    IncomeStatement,
    /// Balansräkning.
    BalanceSheet,
    /// Råbalans.
    TrialBalance,
    /// Huvudbok.
    GeneralLedger,
    /// Aktiebok.
    ShareholderRegister,
    /// Styrelsemöte.
    BoardMeeting,
    /// Bolagsstämma.
    AnnualMeeting,
}

impl TemplateKind {
    /// Every kind, in catalogue order.
    pub const ALL: [Self; 9] = [
        Self::AnnualReportK2,
        Self::AnnualReportK3,
        Self::IncomeStatement,
        Self::BalanceSheet,
        Self::TrialBalance,
        Self::GeneralLedger,
        Self::ShareholderRegister,
        Self::BoardMeeting,
        Self::AnnualMeeting,
    ];

    /// Catalogue key, e.g. `annual_report_k2`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::AnnualReportK2 => "annual_report_k2",
            Self::AnnualReportK3 => "annual_report_k3",
            Self::IncomeStatement => "income_statement",
            Self::BalanceSheet => "balance_sheet",
            Self::TrialBalance => "trial_balance",
            Self::GeneralLedger => "general_ledger",
            Self::ShareholderRegister => "shareholder_register",
            Self::BoardMeeting => "board_meeting",
            Self::AnnualMeeting => "annual_meeting",
        }
    }

    /// Template path relative to the template directory.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::AnnualReportK2 => "arsredovisning/k2_arsredovisning.html",
            Self::AnnualReportK3 => "arsredovisning/k3_arsredovisning.html",
            Self::IncomeStatement => "rapporter/resultatrakning.html",
            Self::BalanceSheet => "rapporter/balansrakning.html",
            Self::TrialBalance => "rapporter/rabalans.html",
            Self::GeneralLedger => "rapporter/huvudbok.html",
            Self::ShareholderRegister => "register/aktiebok.html",
            Self::BoardMeeting => "protokoll/styrelsemote.html",
            Self::AnnualMeeting => "protokoll/bolagsstamma.html",
        }
    }

    /// Swedish document title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::AnnualReportK2 | Self::AnnualReportK3 => "Årsredovisning",
            Self::IncomeStatement => "Resultaträkning",
            Self::BalanceSheet => "Balansräkning",
            Self::TrialBalance => "Råbalans",
            Self::GeneralLedger => "Huvudbok",
            Self::ShareholderRegister => "Aktiebok",
            Self::BoardMeeting => "Styrelsemöte",
            Self::AnnualMeeting => "Bolagsstämma",
        }
    }

    /// The annual report template for an accounting standard.
    #[must_use]
    pub const fn annual_report(standard: AccountingStandard) -> Self {
        match standard {
            AccountingStandard::K2 => Self::AnnualReportK2,
            AccountingStandard::K3 => Self::AnnualReportK3,
        }
    }

    /// Whether the document is built from a fiscal year's bookkeeping.
    #[must_use]
    pub const fn needs_fiscal_year(self) -> bool {
        !matches!(
            self,
            Self::ShareholderRegister | Self::BoardMeeting | Self::AnnualMeeting
        )
    }

    /// The minutes template for a kind of meeting.
    #[must_use]
    pub const fn minutes(meeting: MeetingKind) -> Self {
        match meeting {
            MeetingKind::Board => Self::BoardMeeting,
            MeetingKind::Annual => Self::AnnualMeeting,
        }
    }

    /// The meeting a minutes template is for, `None` for other documents.
    #[must_use]
    pub const fn meeting_kind(self) -> Option<MeetingKind> {
        match self {
            Self::BoardMeeting => Some(MeetingKind::Board),
            Self::AnnualMeeting => Some(MeetingKind::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TemplateKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == wanted)
            .ok_or_else(|| RenderError::UnknownTemplate(s.to_string()))
    }
}
