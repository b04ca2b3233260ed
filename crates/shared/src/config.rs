//! Application configuration management.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Application configuration.
///
/// Every section has defaults, so an empty configuration is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template configuration.
    pub templates: TemplateConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Number and date formatting used by template filters.
    pub formatting: FormattingConfig,
}

/// Template configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding template overrides.
    pub dir: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory rendered documents are written to.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

/// Formatting configuration for the `currency` and `date_format` filters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
    /// Overrides the suffix derived from the company currency.
    pub currency_suffix: Option<String>,
    /// Thousands separator.
    pub thousands_separator: String,
    /// Decimal mark used when `decimals` is above zero.
    pub decimal_mark: String,
    /// Number of decimals shown for amounts.
    pub decimals: u32,
    /// Default strftime pattern for dates.
    pub date_format: String,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            currency_suffix: None,
            thousands_separator: " ".to_string(),
            decimal_mark: ",".to_string(),
            decimals: 0,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files in `./config`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Loads configuration from `default` and `{RUN_MODE}` files in `config_dir`,
    /// then from `BOKSLUT__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is malformed or a value has the wrong type.
    pub fn load_from(config_dir: &Path) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let default_file = config_dir.join("default");
        let mode_file = config_dir.join(&run_mode);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&mode_file.to_string_lossy()).required(false))
            .add_source(config::Environment::with_prefix("BOKSLUT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
