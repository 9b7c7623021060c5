//! # Prax Filtering
//!
//! Filter schemas for Prax models.
//!
//! A filter set lists, for each filterable field of a model, the lookups
//! (`exact`, `icontains`, `gte`, ...) a client may combine into a
//! filter-expression document. From one filter set Prax Filtering derives:
//! - a draft 2020-12 JSON Schema describing every valid filter-expression
//!   document, with `and`/`or`/`not` composition
//! - a filtering options document a UI uses to render filter controls
//!
//! ## Quick Start
//!
//! ```rust
//! use prax_filtering::prelude::*;
//!
//! let model = Model::new("Participant")
//!     .field(Field::new("name", ScalarType::String))
//!     .field(Field::new("age", ScalarType::Int).with_default_lookup("gte"));
//! let registry = LookupRegistry::new();
//! let catalog = ModelCatalog::new(&model, &registry)?;
//!
//! let filterset = FilterSet::builder(&catalog)
//!     .name("ParticipantFilterSet")
//!     .fields(FieldSelection::All)
//!     .build()?;
//!
//! let schema = JsonSchema::new(&filterset);
//! let options = FilteringOptionsSchema::new(&filterset);
//! assert_eq!(options.schema()["filters"]["age"]["default_lookup"], "gte");
//!
//! let expr = FilterExpression::from_json(r#"["age", {"lookup": "gte", "value": "30"}]"#)?;
//! schema.validate_document(&expr.to_value())?;
//! filterset.validate(&expr)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Filter sets, schema derivation and filter expressions.
pub mod filters {
    pub use prax_filters::*;
}

/// Models, lookup registries and configuration files.
pub mod catalog {
    pub use prax_catalog::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use prax_catalog::{
        Field, FieldType, FilteringConfig, LookupRegistry, Model, ModelCatalog, ScalarType,
    };
    pub use prax_filters::prelude::*;
}

// Re-export key types at the crate root
pub use prax_catalog::{CatalogError, FilteringConfig, ModelCatalog};
pub use prax_filters::{
    ConfigurationError, ExpressionError, FilterExpression, FilterSet, FilteringError,
    FilteringOptionsSchema, JsonSchema,
};
