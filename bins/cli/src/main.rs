//! bokslut
//!
//! Renders Swedish accounting documents (årsredovisning, rapporter, aktiebok,
//! protokoll) from a JSON ledger or an SIE file.

mod commands;
mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use bokslut_shared::{AppConfig, AppError};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "bokslut",
    version,
    about = "Renders Swedish accounting documents to HTML",
    long_about = "Renders annual reports, financial statements, share registers and \
                  meeting minutes from a ledger, using built-in templates or your own \
                  overrides in the template directory."
)]
struct Cli {
    /// Directory holding default.toml and the RUN_MODE file
    #[arg(long, global = true, env = "BOKSLUT_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to HTML
    Render(commands::RenderArgs),

    /// Manage the template directory
    #[command(subcommand)]
    Templates(commands::TemplateCommands),

    /// Import an SIE file and print what was imported
    ImportSie {
        /// SIE file (type 4)
        file: PathBuf,
        /// Write the imported ledger as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the trial balance of a ledger
    #[command(alias = "rabalans")]
    TrialBalance {
        /// Ledger file (JSON, or SIE by extension)
        #[arg(short, long)]
        ledger: PathBuf,
        /// Include transactions up to and including this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

fn init_logging(verbose: bool, json: bool) {
    let default_filter = if verbose { "bokslut=debug" } else { "bokslut=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load_from(&cli.config_dir)
        .map_err(|e| AppError::Validation(e.to_string()))
        .with_context(|| format!("loading configuration from {}", cli.config_dir.display()))?;
    debug!(?config, "Configuration loaded");
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Render(args) => commands::render(&config, &args, today)?,
        Commands::Templates(command) => commands::templates(&config, &command)?,
        Commands::ImportSie { file, output } => {
            commands::import_sie(&file, output.as_deref(), today)?;
        }
        Commands::TrialBalance { ledger, as_of } => {
            commands::trial_balance(&config, &ledger, as_of, today)?;
        }
    }
    Ok(())
}

/// Exit status for an error: the `AppError` code when there is one.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppError>()
        .map_or(1, AppError::exit_code)
        .try_into()
        .unwrap_or(1)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Fel: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
