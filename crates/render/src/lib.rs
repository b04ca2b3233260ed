//! HTML document rendering for bokslut.
//!
//! Templates are Jinja-style HTML rendered with `minijinja`. Every document
//! kind has a built-in template compiled into the crate; a file with the same
//! relative path in the template directory overrides it.
//!
//! # Modules
//!
//! - `kind` - Template catalogue
//! - `filters` - `currency` and `date_format`
//! - `context` - Variables passed to templates
//! - `generator` - The report generator
//! - `embedded` - Built-in templates

pub mod context;
pub mod embedded;
pub mod error;
pub mod filters;
pub mod generator;
pub mod kind;

#[cfg(test)]
mod filters_props;

pub use context::ReportContext;
pub use error::RenderError;
pub use filters::CurrencyStyle;
pub use generator::{GeneratorOptions, ReportGenerator, TemplateInfo};
pub use kind::TemplateKind;
