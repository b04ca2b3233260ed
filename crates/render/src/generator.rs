//! Report generator.
//!
//! Templates are looked up in the override directory first and fall back to
//! the built-in copies, so a single edited file is enough to customise a
//! document.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Component, Path, PathBuf};

use bokslut_core::{Company, Ledger, MeetingMinutes, ReportService, ShareRegister};
use bokslut_shared::AppConfig;
use bokslut_shared::types::FiscalYearId;
use minijinja::{AutoEscape, Environment, Error, ErrorKind};
use serde::Serialize;
use tracing::{debug, info};

use crate::context::ReportContext;
use crate::embedded;
use crate::error::RenderError;
use crate::filters::{CurrencyStyle, currency_filter, date_format_filter};
use crate::kind::TemplateKind;

/// Folders created by [`ReportGenerator::create_default_templates`].
const TEMPLATE_FOLDERS: [&str; 4] = ["arsredovisning", "rapporter", "register", "protokoll"];

/// Generator settings.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Directory holding template overrides.
    pub template_dir: PathBuf,
    /// Amount formatting for the `currency` filter.
    pub style: CurrencyStyle,
    /// Default pattern for the `date_format` filter.
    pub date_format: String,
}

impl GeneratorOptions {
    /// Options for a template directory with default formatting.
    #[must_use]
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            ..Self::default()
        }
    }

    /// Options from the application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            template_dir: config.templates.dir.clone(),
            style: CurrencyStyle::from(&config.formatting),
            date_format: config.formatting.date_format.clone(),
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// A template kind and where its override lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    /// Document kind.
    pub kind: TemplateKind,
    /// Override path inside the template directory.
    pub path: PathBuf,
    /// Whether the override file exists.
    pub overridden: bool,
}

/// Renders accounting documents to HTML.
pub struct ReportGenerator {
    env: Environment<'static>,
    template_dir: PathBuf,
}

impl std::fmt::Debug for ReportGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportGenerator")
            .field("template_dir", &self.template_dir)
            .finish_non_exhaustive()
    }
}

impl ReportGenerator {
    /// Creates a generator, creating the template directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Io` if the directory cannot be created.
    pub fn new(options: GeneratorOptions) -> Result<Self, RenderError> {
        let GeneratorOptions {
            template_dir,
            style,
            date_format,
        } = options;
        fs::create_dir_all(&template_dir).map_err(|e| RenderError::io(&template_dir, e))?;

        let mut env = Environment::new();
        let dir = template_dir.clone();
        env.set_loader(move |name| load_template(&dir, name));
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") || name.ends_with(".htm") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        env.add_filter("currency", currency_filter(style));
        env.add_filter("date_format", date_format_filter(date_format));

        debug!(dir = %template_dir.display(), "Report generator ready");
        Ok(Self { env, template_dir })
    }

    /// The override directory.
    #[must_use]
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Renders a document kind with a prepared context.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Template` on syntax or evaluation errors.
    pub fn render(&self, kind: TemplateKind, context: &ReportContext) -> Result<String, RenderError> {
        self.render_template(kind.path(), context)
    }

    /// Renders any template from the override directory or the built-ins,
    /// by relative path.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidTemplateName` for names leaving the
    /// template directory and `RenderError::Template` otherwise.
    pub fn render_template(&self, name: &str, context: &ReportContext) -> Result<String, RenderError> {
        if !is_safe_name(name) {
            return Err(RenderError::InvalidTemplateName(name.to_string()));
        }
        let template = self.env.get_template(name)?;
        let html = template.render(context)?;
        info!(template = name, bytes = html.len(), "Rendered template");
        Ok(html)
    }

    /// Context with `fiscal_year` and the financial statements of a year.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Report` if the fiscal year does not exist.
    pub fn financial_context(
        ledger: &Ledger,
        fiscal_year_id: FiscalYearId,
    ) -> Result<ReportContext, RenderError> {
        let fiscal_year = ledger.fiscal_year(fiscal_year_id)?;
        let data = ReportService::for_fiscal_year(ledger, fiscal_year)?;
        Ok(ReportContext::new(ledger.company())
            .fiscal_year(fiscal_year)
            .financial(&data))
    }

    /// Financial context plus the `general_ledger` accounts of the year.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Report` if the fiscal year does not exist.
    pub fn general_ledger_context(
        ledger: &Ledger,
        fiscal_year_id: FiscalYearId,
    ) -> Result<ReportContext, RenderError> {
        let accounts = ledger.general_ledger(fiscal_year_id)?;
        Ok(Self::financial_context(ledger, fiscal_year_id)?.general_ledger(&accounts))
    }

    /// Context with a validated `share_register`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::ShareRegister` for an inconsistent register.
    pub fn share_register_context(
        company: &Company,
        register: &ShareRegister,
    ) -> Result<ReportContext, RenderError> {
        register.validate()?;
        Ok(ReportContext::new(company).share_register(register))
    }

    /// Context with `minutes`, and the template for that kind of meeting.
    #[must_use]
    pub fn minutes_context(company: &Company, minutes: &MeetingMinutes) -> (TemplateKind, ReportContext) {
        (
            TemplateKind::minutes(minutes.kind),
            ReportContext::new(company).minutes(minutes),
        )
    }

    /// Annual report (årsredovisning), K2 or K3 after the company's
    /// accounting standard. `extra` is merged into the context last.
    ///
    /// # Errors
    ///
    /// Returns an error if the fiscal year does not exist or rendering fails.
    pub fn generate_annual_report(
        &self,
        ledger: &Ledger,
        fiscal_year_id: FiscalYearId,
        extra: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let kind = TemplateKind::annual_report(ledger.company().accounting_standard);
        let context = Self::financial_context(ledger, fiscal_year_id)?.extend(extra);
        self.render(kind, &context)
    }

    /// Income statement (resultaträkning).
    ///
    /// # Errors
    ///
    /// Returns an error if the fiscal year does not exist or rendering fails.
    pub fn generate_income_statement(
        &self,
        ledger: &Ledger,
        fiscal_year_id: FiscalYearId,
    ) -> Result<String, RenderError> {
        let context = Self::financial_context(ledger, fiscal_year_id)?;
        self.render(TemplateKind::IncomeStatement, &context)
    }

    /// Balance sheet (balansräkning).
    ///
    /// # Errors
    ///
    /// Returns an error if the fiscal year does not exist or rendering fails.
    pub fn generate_balance_sheet(
        &self,
        ledger: &Ledger,
        fiscal_year_id: FiscalYearId,
    ) -> Result<String, RenderError> {
        let context = Self::financial_context(ledger, fiscal_year_id)?;
        self.render(TemplateKind::BalanceSheet, &context)
    }

    /// Trial balance (råbalans).
    ///
    /// # Errors
    ///
    /// Returns an error if the fiscal year does not exist or rendering fails.
    pub fn generate_trial_balance(
        &self,
        ledger: &Ledger,
        fiscal_year_id: FiscalYearId,
    ) -> Result<String, RenderError> {
        let context = Self::financial_context(ledger, fiscal_year_id)?;
        self.render(TemplateKind::TrialBalance, &context)
    }

    /// General ledger (huvudbok).
    ///
    /// # Errors
    ///
    /// Returns an error if the fiscal year does not exist or rendering fails.
    pub fn generate_general_ledger(
        &self,
        ledger: &Ledger,
        fiscal_year_id: FiscalYearId,
    ) -> Result<String, RenderError> {
        let context = Self::general_ledger_context(ledger, fiscal_year_id)?;
        self.render(TemplateKind::GeneralLedger, &context)
    }

    /// Share register (aktiebok). The register is validated first.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::ShareRegister` for an inconsistent register.
    pub fn generate_shareholder_register(
        &self,
        company: &Company,
        register: &ShareRegister,
    ) -> Result<String, RenderError> {
        let context = Self::share_register_context(company, register)?;
        self.render(TemplateKind::ShareholderRegister, &context)
    }

    /// Minutes of a board meeting or a general meeting.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Template` if rendering fails.
    pub fn generate_meeting_minutes(
        &self,
        company: &Company,
        minutes: &MeetingMinutes,
    ) -> Result<String, RenderError> {
        let (kind, context) = Self::minutes_context(company, minutes);
        self.render(kind, &context)
    }

    /// Creates the folder structure and a README in the template directory.
    /// Existing files are left alone.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Io` if a folder or the README cannot be written.
    pub fn create_default_templates(&self) -> Result<(), RenderError> {
        for folder in TEMPLATE_FOLDERS {
            let path = self.template_dir.join(folder);
            fs::create_dir_all(&path).map_err(|e| RenderError::io(&path, e))?;
        }
        let readme = self.template_dir.join("README.md");
        if !readme.exists() {
            fs::write(&readme, embedded::README).map_err(|e| RenderError::io(&readme, e))?;
            info!(path = %readme.display(), "Created template README");
        }
        Ok(())
    }

    /// Writes the built-in templates into the template directory for editing.
    /// Existing files are kept unless `force` is set. Returns the written
    /// paths.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Io` if a file cannot be written.
    pub fn install_builtin_templates(&mut self, force: bool) -> Result<Vec<PathBuf>, RenderError> {
        self.create_default_templates()?;
        let mut written = Vec::new();
        for (name, source) in embedded::all() {
            let path = self.template_dir.join(name);
            if path.exists() && !force {
                debug!(path = %path.display(), "Keeping existing template");
                continue;
            }
            fs::write(&path, source).map_err(|e| RenderError::io(&path, e))?;
            written.push(path);
        }
        self.env.clear_templates();
        info!(count = written.len(), "Installed built-in templates");
        Ok(written)
    }

    /// Every document kind with its override status.
    #[must_use]
    pub fn available_templates(&self) -> Vec<TemplateInfo> {
        TemplateKind::ALL
            .into_iter()
            .map(|kind| {
                let path = self.template_dir.join(kind.path());
                TemplateInfo {
                    kind,
                    overridden: path.is_file(),
                    path,
                }
            })
            .collect()
    }
}

/// Relative, forward-only template names.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('\\')
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn load_template(dir: &Path, name: &str) -> Result<Option<String>, Error> {
    if !is_safe_name(name) {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("template name {name:?} leaves the template directory"),
        ));
    }
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(source) => {
            debug!(path = %path.display(), "Loaded template override");
            Ok(Some(source))
        }
        Err(err) if err.kind() == IoErrorKind::NotFound => {
            Ok(embedded::lookup(name).map(str::to_string))
        }
        Err(err) => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template {}", path.display()),
        )
        .with_source(err)),
    }
}
