//! Subcommand implementations.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use bokslut_core::reports::LineItem;
use bokslut_core::{Ledger, MeetingMinutes, ReportService, ShareRegister};
use bokslut_render::filters::format_currency;
use bokslut_render::{
    CurrencyStyle, GeneratorOptions, RenderError, ReportContext, ReportGenerator, TemplateKind,
};
use bokslut_shared::{AppConfig, AppError, AppResult};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

use crate::input;

/// Arguments of `bokslut render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document kind, e.g. income_statement, or annual_report for the
    /// company's K2/K3 report
    pub kind: String,

    /// Ledger file (JSON, or SIE by extension)
    #[arg(short, long)]
    pub ledger: PathBuf,

    /// Fiscal year, by the year it ends in (default: the current one)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// JSON object merged into the template variables
    #[arg(long)]
    pub extra: Option<PathBuf>,

    /// Share register as JSON (shareholder_register)
    #[arg(long)]
    pub shareholders: Option<PathBuf>,

    /// Meeting minutes as JSON (board_meeting, annual_meeting)
    #[arg(long)]
    pub minutes: Option<PathBuf>,

    /// Output file, `-` for stdout (default: <output dir>/<kind>.html)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// `bokslut templates` subcommands.
#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// List document templates and whether they are overridden
    List,
    /// Create the template directory and copy the built-in templates into it
    Init {
        /// Overwrite templates that already exist
        #[arg(long)]
        force: bool,
    },
}

/// Resolves a kind argument; `annual_report` follows the company's standard.
fn resolve_kind(arg: &str, ledger: &Ledger) -> AppResult<TemplateKind> {
    match arg.trim().to_lowercase().replace('-', "_").as_str() {
        "annual_report" | "arsredovisning" => Ok(TemplateKind::annual_report(
            ledger.company().accounting_standard,
        )),
        _ => arg.parse().map_err(|e: RenderError| e.into()),
    }
}

fn required<'a>(path: Option<&'a Path>, flag: &str, kind: TemplateKind) -> AppResult<&'a Path> {
    path.ok_or_else(|| AppError::Validation(format!("{flag} is required for {kind}")))
}

fn render_context(
    kind: TemplateKind,
    args: &RenderArgs,
    ledger: &Ledger,
    today: NaiveDate,
) -> AppResult<ReportContext> {
    if kind.needs_fiscal_year() {
        let fiscal_year = ReportService::select_fiscal_year(ledger, args.year, today)?;
        let context = if kind == TemplateKind::GeneralLedger {
            ReportGenerator::general_ledger_context(ledger, fiscal_year.id)?
        } else {
            ReportGenerator::financial_context(ledger, fiscal_year.id)?
        };
        return Ok(context);
    }

    let company = ledger.company();
    if let Some(meeting) = kind.meeting_kind() {
        let path = required(args.minutes.as_deref(), "--minutes", kind)?;
        let mut minutes: MeetingMinutes = input::read_json(path)?;
        minutes.kind = meeting;
        return Ok(ReportGenerator::minutes_context(company, &minutes).1);
    }

    let path = required(args.shareholders.as_deref(), "--shareholders", kind)?;
    let register: ShareRegister = input::read_json(path)?;
    Ok(ReportGenerator::share_register_context(company, &register)?)
}

/// `bokslut render`.
pub fn render(config: &AppConfig, args: &RenderArgs, today: NaiveDate) -> AppResult<()> {
    let ledger = input::load_ledger(&args.ledger, today)?;
    let kind = resolve_kind(&args.kind, &ledger)?;
    let extra = match &args.extra {
        Some(path) => input::read_json::<serde_json::Value>(path)?,
        None => serde_json::Value::Null,
    };

    let generator = ReportGenerator::new(GeneratorOptions::from_config(config))?;
    let context = render_context(kind, args, &ledger, today)?.extend(&extra);
    let html = generator.render(kind, &context)?;

    let target = output_path(args.output.as_deref(), &config.output.dir, kind);
    match target {
        None => std::io::stdout().write_all(html.as_bytes())?,
        Some(path) => write_file(&path, html.as_bytes())?,
    }
    Ok(())
}

/// Where a rendered document goes; `None` means stdout.
fn output_path(output: Option<&Path>, output_dir: &Path, kind: TemplateKind) -> Option<PathBuf> {
    match output {
        Some(path) if path == Path::new("-") => None,
        Some(path) => Some(path.to_path_buf()),
        None => Some(output_dir.join(format!("{kind}.html"))),
    }
}

fn write_file(path: &Path, contents: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::Io(format!("{}: {e}", parent.display())))?;
    }
    fs::write(path, contents).map_err(|e| AppError::Io(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote file");
    Ok(())
}

/// `bokslut templates`.
pub fn templates(config: &AppConfig, command: &TemplateCommands) -> AppResult<()> {
    let mut generator = ReportGenerator::new(GeneratorOptions::from_config(config))?;
    match command {
        TemplateCommands::List => {
            println!("{:<22} {:<16} {:<10} SÖKVÄG", "MALL", "TITEL", "KÄLLA");
            for template in generator.available_templates() {
                println!(
                    "{:<22} {:<16} {:<10} {}",
                    template.kind.key(),
                    template.kind.title(),
                    if template.overridden { "anpassad" } else { "inbyggd" },
                    template.path.display()
                );
            }
        }
        TemplateCommands::Init { force } => {
            let written = generator.install_builtin_templates(*force)?;
            for path in &written {
                println!("Skapade {}", path.display());
            }
            println!(
                "{} mallar skrivna till {}",
                written.len(),
                generator.template_dir().display()
            );
        }
    }
    Ok(())
}

/// `bokslut import-sie`.
pub fn import_sie(file: &Path, output: Option<&Path>, today: NaiveDate) -> AppResult<()> {
    let (ledger, stats) = input::import_sie(file, today)?;

    println!("Företag: {} ({})", ledger.company().name, ledger.company().org_number);
    println!("Nytt företag: {}", if stats.company_created { "ja" } else { "nej" });
    println!("Konton importerade: {}", stats.accounts_imported);
    println!("Verifikationer importerade: {}", stats.transactions_imported);
    for problem in &stats.errors {
        println!("Varning: {problem}");
    }

    if let Some(path) = output {
        let json = serde_json::to_vec_pretty(&ledger)
            .map_err(|e| AppError::Internal(format!("serializing ledger: {e}")))?;
        write_file(path, &json)?;
    }
    Ok(())
}

fn trial_balance_table(items: &[LineItem], style: &CurrencyStyle, suffix: &str) -> String {
    let amount = |value: Decimal| {
        if value.is_zero() {
            String::new()
        } else {
            format_currency(value, style, suffix)
        }
    };
    let mut table = format!(
        "{:<6} {:<36} {:<12} {:>16} {:>16}\n",
        "KONTO", "BENÄMNING", "TYP", "DEBET", "KREDIT"
    );
    for item in items {
        table.push_str(&format!(
            "{:<6} {:<36} {:<12} {:>16} {:>16}\n",
            item.account_number,
            item.account_name,
            item.account_type.label(),
            amount(item.debit),
            amount(item.credit)
        ));
    }
    let (debit, credit) = ReportService::trial_balance_totals(items);
    table.push_str(&format!(
        "{:<6} {:<36} {:<12} {:>16} {:>16}\n",
        "",
        "Summa",
        "",
        format_currency(debit, style, suffix),
        format_currency(credit, style, suffix)
    ));
    table
}

/// `bokslut trial-balance`.
pub fn trial_balance(
    config: &AppConfig,
    ledger_path: &Path,
    as_of: Option<NaiveDate>,
    today: NaiveDate,
) -> AppResult<()> {
    let ledger = input::load_ledger(ledger_path, today)?;
    let style = CurrencyStyle::from(&config.formatting);
    let suffix = style
        .suffix
        .clone()
        .unwrap_or_else(|| ledger.company().currency.suffix().to_string());
    print!("{}", trial_balance_table(&ledger.trial_balance(as_of), &style, &suffix));
    Ok(())
}
