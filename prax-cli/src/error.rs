//! CLI error types and result alias.

use miette::Diagnostic;
use prax_catalog::CatalogError;
use prax_filters::{ExpressionError, SchemaValidationError};
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(prax::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(prax::config))]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    #[diagnostic(code(prax::validation))]
    Validation(String),

    /// Document parse error
    #[error("Invalid JSON document: {0}")]
    #[diagnostic(code(prax::json))]
    Json(#[from] serde_json::Error),

    /// Catalog or configuration file error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    /// Filter-expression error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Expression(#[from] ExpressionError),

    /// Generated schema failed the meta-schema check
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaValidationError),
}
