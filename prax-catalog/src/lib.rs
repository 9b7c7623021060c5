//! # prax-catalog
//!
//! Concrete models, lookup registries and file configuration for Prax filtering.
//!
//! [`ModelCatalog`] binds a [`Model`] to a [`LookupRegistry`] and implements
//! [`prax_filters::FieldCatalog`], so filter sets can be derived from it.
//! [`FilteringConfig`] loads models and filter sets from `prax-filtering.toml`.
//!
//! ## Example
//!
//! ```rust
//! use prax_catalog::FilteringConfig;
//!
//! let config = FilteringConfig::from_str(r#"
//! [models.Participant]
//! fields = [
//!     { name = "name", type = "String" },
//!     { name = "age", type = "Int", default_lookup = "gte" },
//! ]
//!
//! [filtersets.ParticipantFilterSet]
//! model = "Participant"
//! fields = "__all__"
//! "#)?;
//!
//! let set = config.filterset("ParticipantFilterSet")?;
//! assert_eq!(set.names().collect::<Vec<_>>(), ["name", "age"]);
//! assert_eq!(set.get("age").unwrap().default_lookup(), "gte");
//! # Ok::<(), prax_catalog::CatalogError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod types;

pub use catalog::ModelCatalog;
pub use config::{
    CONFIG_FILE_NAME, CustomLookupConfig, FieldConfig, FieldsConfig, FilterConfig,
    FilterSetConfig, FilteringConfig, LookupConfig, LookupKind, ModelConfig,
};
pub use error::{CatalogError, CatalogResult};
pub use model::{Field, Model};
pub use registry::{LookupRegistry, lookup_label};
pub use types::{FieldType, ScalarType};
