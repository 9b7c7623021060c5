//! Error types for filter set construction, schema checks and expression validation.
//!
//! Errors are split by when they can happen:
//!
//! - [`ConfigurationError`]: raised while building a [`Filter`](crate::Filter) or
//!   [`FilterSet`](crate::FilterSet). A misconfigured filter set never exists.
//! - [`SchemaValidationError`]: a generated JSON Schema failed the draft 2020-12
//!   meta-schema. This indicates a derivation bug, not bad input.
//! - [`ExpressionError`]: a client-submitted filter-expression document does not
//!   fit the filter set.
//!
//! ```rust
//! use prax_filters::{ConfigurationError, Filter, Lookup};
//!
//! let err = Filter::new("Age", [Lookup::input("gte", "at least")], "lte").unwrap_err();
//! assert!(matches!(err, ConfigurationError::InvalidDefaultLookup { .. }));
//! assert!(err.to_string().contains("lte"));
//! ```

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for filtering operations.
pub type FilteringResult<T> = Result<T, FilteringError>;

/// Errors raised while constructing filters and filter sets.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigurationError {
    /// The default lookup is not one of the filter's lookups.
    #[error("invalid default lookup `{lookup}` for filter `{filter}` (available: {available})")]
    #[diagnostic(
        code(prax::filters::invalid_default_lookup),
        help("choose one of the lookups declared on the filter")
    )]
    InvalidDefaultLookup {
        filter: String,
        lookup: String,
        available: String,
    },

    /// A filter was declared without any lookups.
    #[error("filter `{filter}` must declare at least one lookup")]
    #[diagnostic(code(prax::filters::no_lookups))]
    NoLookups { filter: String },

    /// The same lookup name was declared twice on one filter.
    #[error("duplicate lookup `{lookup}` on filter `{filter}`")]
    #[diagnostic(code(prax::filters::duplicate_lookup))]
    DuplicateLookup { filter: String, lookup: String },

    /// A field selection names a field the model does not have.
    #[error("unknown field `{field}` on model `{model}`")]
    #[diagnostic(code(prax::filters::unknown_field))]
    UnknownField { model: String, field: String },

    /// The same filter name was declared twice.
    #[error("duplicate filter `{name}`")]
    #[diagnostic(code(prax::filters::duplicate_filter))]
    DuplicateFilter { name: String },

    /// A filter name collides with a boolean operator tag.
    #[error("`{name}` is reserved for boolean operators and cannot name a filter")]
    #[diagnostic(code(prax::filters::reserved_name))]
    ReservedName { name: String },
}

impl ConfigurationError {
    /// Create an invalid default lookup error.
    pub fn invalid_default_lookup<'a>(
        filter: impl Into<String>,
        lookup: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::InvalidDefaultLookup {
            filter: filter.into(),
            lookup: lookup.into(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Create an unknown field error.
    pub fn unknown_field(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            model: model.into(),
            field: field.into(),
        }
    }

    /// Create a duplicate filter error.
    pub fn duplicate_filter(name: impl Into<String>) -> Self {
        Self::DuplicateFilter { name: name.into() }
    }

    /// Replace the filter name carried by this error.
    ///
    /// Filters are built before they are attached to a name, so errors raised by
    /// [`Filter::new`](crate::Filter::new) report the filter's label until the
    /// caller that knows the name renames them.
    pub fn for_filter(self, name: &str) -> Self {
        match self {
            Self::InvalidDefaultLookup {
                lookup, available, ..
            } => Self::InvalidDefaultLookup {
                filter: name.to_string(),
                lookup,
                available,
            },
            Self::NoLookups { .. } => Self::NoLookups {
                filter: name.to_string(),
            },
            Self::DuplicateLookup { lookup, .. } => Self::DuplicateLookup {
                filter: name.to_string(),
                lookup,
            },
            other => other,
        }
    }
}

/// A generated JSON Schema failed the meta-schema check.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("generated schema is not a valid JSON Schema: {}", .errors.join("; "))]
#[diagnostic(
    code(prax::filters::schema_validation),
    help("this is a bug in schema derivation, please report it")
)]
pub struct SchemaValidationError {
    /// Meta-schema violations, one message each.
    pub errors: Vec<String>,
}

/// Errors raised while checking a filter-expression document.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ExpressionError {
    /// The document does not have the shape of a filter expression.
    #[error("malformed filter expression: {message}")]
    #[diagnostic(code(prax::filters::malformed_expression))]
    Malformed { message: String },

    /// A clause references a filter the filter set does not define.
    #[error("unknown filter `{filter}`")]
    #[diagnostic(code(prax::filters::unknown_filter))]
    UnknownFilter { filter: String },

    /// A clause uses a lookup the filter does not permit.
    #[error("lookup `{lookup}` is not permitted on filter `{filter}`")]
    #[diagnostic(code(prax::filters::unknown_lookup))]
    UnknownLookup { filter: String, lookup: String },

    /// An `and`/`or` node has fewer than two children.
    #[error("`{operator}` requires at least two operands, got {count}")]
    #[diagnostic(code(prax::filters::invalid_arity))]
    InvalidArity { operator: String, count: usize },

    /// A clause value does not match the lookup's input kind.
    #[error("invalid value for `{filter}__{lookup}`: {message}")]
    #[diagnostic(code(prax::filters::invalid_value))]
    InvalidValue {
        filter: String,
        lookup: String,
        message: String,
    },

    /// The document failed the filter set's JSON Schema.
    #[error("filter expression does not match schema: {}", .errors.join("; "))]
    #[diagnostic(code(prax::filters::schema_violation))]
    SchemaViolation { errors: Vec<String> },
}

impl ExpressionError {
    /// Create a malformed expression error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(
        filter: impl Into<String>,
        lookup: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            filter: filter.into(),
            lookup: lookup.into(),
            message: message.into(),
        }
    }
}

/// Any error produced by this crate.
#[derive(Error, Debug, Diagnostic)]
pub enum FilteringError {
    /// Construction-time configuration error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Generated schema failed the meta-schema.
    #[error(transparent)]
    #[diagnostic(transparent)]
    SchemaValidation(#[from] SchemaValidationError),

    /// Filter-expression document error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Expression(#[from] ExpressionError),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    #[diagnostic(code(prax::filters::json))]
    Json(#[from] serde_json::Error),
}
