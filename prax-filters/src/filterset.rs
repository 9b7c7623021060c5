//! Filter sets: the complete collection of filters governing one resource.
//!
//! A [`FilterSet`] is built against a [`FieldCatalog`] with a [`FieldSelection`]
//! deciding which filters come from the model and which are declared by hand:
//!
//! ```rust
//! use indexmap::IndexMap;
//! use prax_filters::{
//!     FieldCatalog, FieldDescriptor, FieldSelection, Filter, FilterSet, InputKind, Lookup,
//!     LookupDescriptor,
//! };
//! use smol_str::SmolStr;
//!
//! struct Participant;
//!
//! impl FieldCatalog for Participant {
//!     fn model_name(&self) -> &str {
//!         "Participant"
//!     }
//!
//!     fn fields(&self) -> Vec<FieldDescriptor> {
//!         vec![FieldDescriptor::new("name"), FieldDescriptor::new("age")]
//!     }
//!
//!     fn lookups_for(&self, field: &str) -> IndexMap<SmolStr, LookupDescriptor> {
//!         let names: &[&str] = match field {
//!             "name" => &["exact", "icontains"],
//!             "age" => &["exact", "gte", "lte"],
//!             _ => &[],
//!         };
//!         names
//!             .iter()
//!             .map(|n| (SmolStr::new(n), LookupDescriptor::new(*n, InputKind::Input)))
//!             .collect()
//!     }
//! }
//!
//! // Every field, every lookup.
//! let all = FilterSet::builder(&Participant)
//!     .fields(FieldSelection::All)
//!     .build()?;
//! assert_eq!(all.valid_filters()["age"], ["exact", "gte", "lte"]);
//!
//! // Hand-declared filters only.
//! let declared = FilterSet::builder(&Participant)
//!     .filter("name", Filter::new("Name", [Lookup::input("icontains", "contains")], "icontains")?)
//!     .build()?;
//! assert_eq!(declared.len(), 1);
//! # Ok::<(), prax_filters::ConfigurationError>(())
//! ```

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::catalog::{FieldCatalog, FieldDescriptor, humanize};
use crate::error::{ConfigurationError, ExpressionError, FilteringResult};
use crate::expression::FilterExpression;
use crate::filter::Filter;
use crate::lookup::Lookup;

/// Operator tags that cannot be used as filter names.
pub const RESERVED_NAMES: [&str; 3] = ["and", "or", "not"];

/// Sentinel selecting every model field.
pub const ALL_FIELDS: &str = "__all__";

/// Which model fields are turned into filters automatically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSelection {
    /// No derived filters; only declared filters are used.
    #[default]
    Declared,
    /// Every model field with every lookup it exposes.
    All,
    /// The listed fields, in listed order, with every lookup they expose.
    Only(Vec<SmolStr>),
}

impl FieldSelection {
    /// Select the listed fields.
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self::Only(fields.into_iter().map(Into::into).collect())
    }
}

/// An ordered, immutable collection of named filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    name: Option<String>,
    filters: IndexMap<SmolStr, Filter>,
}

impl FilterSet {
    /// Start building a filter set bound to `model`.
    pub fn builder<'a>(model: &'a dyn FieldCatalog) -> FilterSetBuilder<'a> {
        FilterSetBuilder {
            model,
            name: None,
            fields: FieldSelection::Declared,
            declared: Vec::new(),
        }
    }

    /// Display name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check whether the set has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Get a filter by name.
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    /// Filters in set order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Filter)> {
        self.filters.iter().map(|(name, filter)| (name.as_str(), filter))
    }

    /// Filter names in set order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.filters.keys().map(SmolStr::as_str)
    }

    /// Filter name to permitted lookup names, both in set order.
    pub fn valid_filters(&self) -> IndexMap<SmolStr, Vec<SmolStr>> {
        self.filters
            .iter()
            .map(|(name, filter)| (name.clone(), filter.lookup_keys()))
            .collect()
    }

    /// Parse JSON text into a filter expression accepted by this set.
    pub fn parse_expression(&self, text: &str) -> FilteringResult<FilterExpression> {
        let expression = FilterExpression::from_value(serde_json::from_str(text)?)?;
        self.validate(&expression)?;
        Ok(expression)
    }

    /// Check a filter expression against the filters and lookups of this set.
    pub fn validate(&self, expression: &FilterExpression) -> Result<(), ExpressionError> {
        match expression {
            FilterExpression::Clause {
                filter,
                lookup,
                value,
            } => {
                let Some(definition) = self.filters.get(filter.as_str()) else {
                    return Err(ExpressionError::UnknownFilter {
                        filter: filter.to_string(),
                    });
                };
                let Some(lookup_def) = definition.get_lookup(lookup) else {
                    return Err(ExpressionError::UnknownLookup {
                        filter: filter.to_string(),
                        lookup: lookup.to_string(),
                    });
                };
                if !lookup_def.input_kind().accepts(value) {
                    return Err(ExpressionError::invalid_value(
                        filter.as_str(),
                        lookup.as_str(),
                        format!("expected {} value, got {}", lookup_def.input_kind(), value),
                    ));
                }
                Ok(())
            }
            FilterExpression::And(children) | FilterExpression::Or(children) => {
                if children.len() < 2 {
                    return Err(ExpressionError::InvalidArity {
                        operator: expression.operator().to_string(),
                        count: children.len(),
                    });
                }
                children.iter().try_for_each(|child| self.validate(child))
            }
            FilterExpression::Not(child) => self.validate(child),
        }
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = (&'a SmolStr, &'a Filter);
    type IntoIter = indexmap::map::Iter<'a, SmolStr, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

/// Configuration for a [`FilterSet`]: the bound model, the field selection and
/// the explicitly declared filters.
pub struct FilterSetBuilder<'a> {
    model: &'a dyn FieldCatalog,
    name: Option<String>,
    fields: FieldSelection,
    declared: Vec<(SmolStr, Filter)>,
}

impl<'a> FilterSetBuilder<'a> {
    /// Set a display name for the set.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Choose which model fields are derived into filters.
    pub fn fields(mut self, fields: FieldSelection) -> Self {
        self.fields = fields;
        self
    }

    /// Declare a filter.
    ///
    /// A declared filter whose name matches a derived field replaces the
    /// derived filter in place.
    pub fn filter(mut self, name: impl Into<SmolStr>, filter: Filter) -> Self {
        self.declared.push((name.into(), filter));
        self
    }

    /// Resolve the filters and build the set.
    pub fn build(mut self) -> Result<FilterSet, ConfigurationError> {
        let model_name = self.model.model_name();
        debug!(
            model = %model_name,
            fields = ?self.fields,
            declared = self.declared.len(),
            "Resolving filter set"
        );

        let mut declared: IndexMap<SmolStr, Filter> = IndexMap::new();
        for (name, filter) in std::mem::take(&mut self.declared) {
            if RESERVED_NAMES.contains(&name.as_str()) {
                return Err(ConfigurationError::ReservedName {
                    name: name.to_string(),
                });
            }
            if declared.contains_key(&name) {
                return Err(ConfigurationError::duplicate_filter(name.as_str()));
            }
            declared.insert(name, filter);
        }

        let selected = self.select_fields()?;

        let mut filters = IndexMap::with_capacity(selected.len() + declared.len());
        for field in selected {
            if let Some(filter) = declared.shift_remove(&field.name) {
                trace!(field = %field.name, "Declared filter overrides derived filter");
                filters.insert(field.name, filter);
                continue;
            }
            if RESERVED_NAMES.contains(&field.name.as_str()) {
                return Err(ConfigurationError::ReservedName {
                    name: field.name.to_string(),
                });
            }
            let filter = derive_filter(self.model, &field)?;
            trace!(
                field = %field.name,
                lookups = filter.lookups().len(),
                default_lookup = %filter.default_lookup(),
                "Derived filter"
            );
            filters.insert(field.name, filter);
        }
        filters.extend(declared);

        debug!(model = %model_name, filters = filters.len(), "Filter set resolved");

        Ok(FilterSet {
            name: self.name,
            filters,
        })
    }

    fn select_fields(&self) -> Result<Vec<FieldDescriptor>, ConfigurationError> {
        match &self.fields {
            FieldSelection::Declared => Ok(Vec::new()),
            FieldSelection::All => Ok(self.model.fields()),
            FieldSelection::Only(names) => {
                let mut available: IndexMap<SmolStr, FieldDescriptor> = self
                    .model
                    .fields()
                    .into_iter()
                    .map(|f| (f.name.clone(), f))
                    .collect();
                let mut selected = Vec::with_capacity(names.len());
                for name in names {
                    match available.shift_remove(name) {
                        Some(field) => selected.push(field),
                        None if selected.iter().any(|f: &FieldDescriptor| &f.name == name) => {
                            return Err(ConfigurationError::duplicate_filter(name.as_str()));
                        }
                        None => {
                            return Err(ConfigurationError::unknown_field(
                                self.model.model_name(),
                                name.as_str(),
                            ));
                        }
                    }
                }
                Ok(selected)
            }
        }
    }
}

/// Build a filter mirroring every lookup a model field exposes.
fn derive_filter(
    model: &dyn FieldCatalog,
    field: &FieldDescriptor,
) -> Result<Filter, ConfigurationError> {
    let lookups = model.lookups_for(&field.name);
    let default_lookup = match (&field.default_lookup, lookups.keys().next()) {
        (Some(explicit), _) => explicit.clone(),
        (None, Some(first)) => first.clone(),
        (None, None) => {
            return Err(ConfigurationError::NoLookups {
                filter: field.name.to_string(),
            });
        }
    };
    let label = field
        .label
        .clone()
        .unwrap_or_else(|| humanize(&field.name));
    let lookups = lookups
        .into_iter()
        .map(|(name, descriptor)| Lookup::new(name, descriptor.label, descriptor.input_kind));

    Filter::new(label, lookups, default_lookup).map_err(|e| e.for_filter(&field.name))
}
