//! # prax-filters
//!
//! Filter set resolution and filter schema derivation for the Prax ORM.
//!
//! This crate provides:
//! - [`Lookup`] and [`Filter`]: the comparison operators permitted on a field
//! - [`FilterSet`]: an ordered collection of filters, declared by hand or
//!   derived from a model through the [`FieldCatalog`] interface
//! - [`JsonSchema`]: a draft 2020-12 JSON Schema for filter-expression documents
//! - [`FilteringOptionsSchema`]: a descriptive document for UI clients
//! - [`FilterExpression`]: the parsed form of a filter-expression document
//!
//! Both schema documents are projections of the same [`FilterSet`] and agree on
//! exactly which filter/lookup combinations are permitted.
//!
//! ## Declaring filters
//!
//! ```rust
//! # use indexmap::IndexMap;
//! # use prax_filters::{FieldCatalog, FieldDescriptor, LookupDescriptor};
//! # use smol_str::SmolStr;
//! # struct Participant;
//! # impl FieldCatalog for Participant {
//! #     fn model_name(&self) -> &str { "Participant" }
//! #     fn fields(&self) -> Vec<FieldDescriptor> { vec![] }
//! #     fn lookups_for(&self, _: &str) -> IndexMap<SmolStr, LookupDescriptor> { IndexMap::new() }
//! # }
//! use prax_filters::{Filter, FilterSet, FilteringOptionsSchema, JsonSchema, Lookup};
//!
//! let age = Filter::new(
//!     "Age",
//!     [Lookup::input("gte", "at least"), Lookup::input("lte", "at most")],
//!     "gte",
//! )?;
//! let set = FilterSet::builder(&Participant).filter("age", age).build()?;
//!
//! let schema = JsonSchema::new(&set);
//! let options = FilteringOptionsSchema::new(&set);
//!
//! assert_eq!(schema.schema()["$defs"]["age-filter"]["prefixItems"][0]["const"], "age");
//! assert_eq!(options.schema()["filters"]["age"]["default_lookup"], "gte");
//! # Ok::<(), prax_filters::ConfigurationError>(())
//! ```
//!
//! ## Validating expressions
//!
//! ```rust
//! # use indexmap::IndexMap;
//! # use prax_filters::{FieldCatalog, FieldDescriptor, LookupDescriptor};
//! # use smol_str::SmolStr;
//! # struct Participant;
//! # impl FieldCatalog for Participant {
//! #     fn model_name(&self) -> &str { "Participant" }
//! #     fn fields(&self) -> Vec<FieldDescriptor> { vec![] }
//! #     fn lookups_for(&self, _: &str) -> IndexMap<SmolStr, LookupDescriptor> { IndexMap::new() }
//! # }
//! use prax_filters::{ExpressionError, Filter, FilterExpression, FilterSet, Lookup};
//!
//! let name = Filter::new("Name", [Lookup::input("icontains", "contains")], "icontains")?;
//! let set = FilterSet::builder(&Participant).filter("name", name).build()?;
//!
//! let expr = FilterExpression::from_json(r#"["name", {"lookup": "exact", "value": "Ann"}]"#)?;
//! assert!(matches!(set.validate(&expr), Err(ExpressionError::UnknownLookup { .. })));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod error;
pub mod expression;
pub mod filter;
pub mod filterset;
pub mod json_schema;
pub mod logging;
pub mod lookup;
pub mod options;
pub mod serialize;

pub use catalog::{FieldCatalog, FieldDescriptor, LookupDescriptor, humanize};
pub use error::{
    ConfigurationError, ExpressionError, FilteringError, FilteringResult, SchemaValidationError,
};
pub use expression::FilterExpression;
pub use filter::{Filter, FilterBuilder};
pub use filterset::{ALL_FIELDS, FieldSelection, FilterSet, FilterSetBuilder, RESERVED_NAMES};
pub use json_schema::JsonSchema;
pub use lookup::{Choice, InputKind, Lookup};
pub use options::FilteringOptionsSchema;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Choice, FieldCatalog, FieldSelection, Filter, FilterExpression, FilterSet,
        FilteringOptionsSchema, InputKind, JsonSchema, Lookup,
    };
}
