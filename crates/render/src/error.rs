//! Render error types.

use std::path::PathBuf;

use bokslut_core::{LedgerError, ReportError, ShareRegisterError};
use bokslut_shared::AppError;
use thiserror::Error;

/// Errors that can occur while rendering a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template syntax or evaluation error.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// No template kind with this key.
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Template name escapes the template directory.
    #[error("Invalid template name: {0}")]
    InvalidTemplateName(String),

    /// Report data could not be collected.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The share register is inconsistent.
    #[error(transparent)]
    ShareRegister(#[from] ShareRegisterError),

    /// Reading or writing a template file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl From<LedgerError> for RenderError {
    fn from(err: LedgerError) -> Self {
        Self::Report(ReportError::Ledger(err))
    }
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Template(_) => "TEMPLATE_ERROR",
            Self::UnknownTemplate(_) => "UNKNOWN_TEMPLATE",
            Self::InvalidTemplateName(_) => "INVALID_TEMPLATE_NAME",
            Self::Report(inner) => inner.error_code(),
            Self::ShareRegister(inner) => inner.error_code(),
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Report(inner) => inner.into(),
            RenderError::ShareRegister(inner) => inner.into(),
            RenderError::Io { .. } => Self::Io(err.to_string()),
            RenderError::UnknownTemplate(_) | RenderError::InvalidTemplateName(_) => {
                Self::Validation(err.to_string())
            }
            RenderError::Template(inner) => Self::Template(template_message(&inner)),
        }
    }
}

/// Error text including the template name and line, when known.
fn template_message(err: &minijinja::Error) -> String {
    match (err.name(), err.line()) {
        (Some(name), Some(line)) => format!("{err} ({name}:{line})"),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RenderError::UnknownTemplate("x".into()).error_code(),
            "UNKNOWN_TEMPLATE"
        );
        let ledger: RenderError = LedgerError::FiscalYearClosed.into();
        assert_eq!(ledger.error_code(), "FISCAL_YEAR_CLOSED");
    }

    #[test]
    fn test_conversion_to_app_error() {
        let io = RenderError::io("templates", std::io::Error::other("disk full"));
        assert!(matches!(AppError::from(io), AppError::Io(_)));

        let template = RenderError::Template(minijinja::Error::new(
            minijinja::ErrorKind::SyntaxError,
            "unexpected end",
        ));
        let app: AppError = template.into();
        assert_eq!(app.exit_code(), 70);
    }
}
