//! [`FieldCatalog`] implementation backed by a [`Model`] and a [`LookupRegistry`].

use indexmap::IndexMap;
use prax_filters::{FieldCatalog, FieldDescriptor, LookupDescriptor};
use smol_str::SmolStr;
use tracing::trace;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Field, Model};
use crate::registry::LookupRegistry;

/// A model's fields and their registered lookups.
///
/// Required fields do not expose `isnull`. A field with a narrowed lookup list
/// exposes exactly those lookups, in that order.
///
/// ```rust
/// use prax_catalog::{Field, LookupRegistry, Model, ModelCatalog, ScalarType};
/// use prax_filters::{FieldSelection, FilterSet};
///
/// let model = Model::new("Participant")
///     .field(Field::new("name", ScalarType::String).with_lookups(["icontains", "exact"]))
///     .field(Field::new("age", ScalarType::Int).optional());
/// let registry = LookupRegistry::new();
/// let catalog = ModelCatalog::new(&model, &registry)?;
///
/// let set = FilterSet::builder(&catalog).fields(FieldSelection::All).build()?;
/// assert_eq!(set.valid_filters()["name"], ["icontains", "exact"]);
/// assert_eq!(
///     set.valid_filters()["age"],
///     ["exact", "gt", "gte", "lt", "lte", "in", "range", "isnull"]
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ModelCatalog<'a> {
    model: &'a Model,
    registry: &'a LookupRegistry,
}

impl<'a> ModelCatalog<'a> {
    /// Bind a model to a registry.
    ///
    /// Fails if a field narrows its lookups to one its type does not expose,
    /// or lists the same lookup twice.
    pub fn new(model: &'a Model, registry: &'a LookupRegistry) -> CatalogResult<Self> {
        for field in model.fields.values() {
            let Some(narrowed) = &field.lookups else {
                continue;
            };
            for (i, lookup) in narrowed.iter().enumerate() {
                if !registry.has_lookup(&field.field_type, lookup) || !exposes_isnull(field, lookup)
                {
                    return Err(CatalogError::UnknownLookup {
                        model: model.name().to_string(),
                        field: field.name().to_string(),
                        lookup: lookup.to_string(),
                    });
                }
                if narrowed[..i].contains(lookup) {
                    return Err(CatalogError::DuplicateLookup {
                        model: model.name().to_string(),
                        field: field.name().to_string(),
                        lookup: lookup.to_string(),
                    });
                }
            }
        }
        Ok(Self { model, registry })
    }

    /// The bound model.
    pub fn model(&self) -> &'a Model {
        self.model
    }
}

fn exposes_isnull(field: &Field, lookup: &str) -> bool {
    lookup != "isnull" || field.optional
}

impl FieldCatalog for ModelCatalog<'_> {
    fn model_name(&self) -> &str {
        self.model.name()
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.model
            .fields
            .values()
            .map(|field| FieldDescriptor {
                name: field.name.clone(),
                label: field.label.clone(),
                default_lookup: field.default_lookup.clone(),
            })
            .collect()
    }

    fn lookups_for(&self, field: &str) -> IndexMap<SmolStr, LookupDescriptor> {
        let Some(field) = self.model.get_field(field) else {
            return IndexMap::new();
        };
        let mut available = self.registry.lookups(&field.field_type);
        available.retain(|name, _| exposes_isnull(field, name));

        let lookups = match &field.lookups {
            Some(narrowed) => narrowed
                .iter()
                .filter_map(|name| available.get(name).map(|d| (name.clone(), d.clone())))
                .collect(),
            None => available,
        };
        trace!(
            model = %self.model.name(),
            field = %field.name,
            lookups = lookups.len(),
            "Resolved field lookups"
        );
        lookups
    }
}
