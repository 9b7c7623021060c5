//! Error types for catalog and configuration loading.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use prax_filters::ConfigurationError;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading models and filter sets.
#[derive(Error, Debug, Diagnostic)]
pub enum CatalogError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(prax::catalog::io_error))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the TOML document.
    #[error("failed to parse configuration: {source}")]
    #[diagnostic(
        code(prax::catalog::toml_error),
        help("check the syntax of prax-filtering.toml")
    )]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    /// A filter set references a model that is not defined.
    #[error("unknown model `{model}` referenced by filter set `{filterset}`")]
    #[diagnostic(code(prax::catalog::unknown_model))]
    UnknownModel { filterset: String, model: String },

    /// A filter set name that is not defined.
    #[error("unknown filter set `{name}`")]
    #[diagnostic(code(prax::catalog::unknown_filterset))]
    UnknownFilterSet { name: String, available: String },

    /// Unknown field type.
    #[error("unknown type `{type_name}` in `{model}.{field}`")]
    #[diagnostic(code(prax::catalog::unknown_type))]
    UnknownType {
        model: String,
        field: String,
        type_name: String,
    },

    /// A field narrows its lookups to one its type does not expose.
    #[error("lookup `{lookup}` is not available on `{model}.{field}`")]
    #[diagnostic(code(prax::catalog::unknown_lookup))]
    UnknownLookup {
        model: String,
        field: String,
        lookup: String,
    },

    /// A field lists the same narrowed lookup twice.
    #[error("lookup `{lookup}` is listed more than once on `{model}.{field}`")]
    #[diagnostic(code(prax::catalog::duplicate_lookup))]
    DuplicateLookup {
        model: String,
        field: String,
        lookup: String,
    },

    /// Semantically invalid configuration.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(prax::catalog::invalid_config))]
    Config { message: String },

    /// A filter or filter set failed to build.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl CatalogError {
    /// Create an unknown filter set error listing the defined names.
    pub fn unknown_filterset<'a>(
        name: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownFilterSet {
            name: name.into(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Create an invalid configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(source: toml::de::Error) -> Self {
        Self::Toml { source }
    }
}
