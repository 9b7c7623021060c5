//! Filter definitions: the lookups permitted on one field.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::error::ConfigurationError;
use crate::lookup::Lookup;

/// The set of lookups permitted for one named field, plus its default lookup.
///
/// A `Filter` does not know its own name; the owning
/// [`FilterSet`](crate::FilterSet) keys it.
///
/// ```rust
/// use prax_filters::{Filter, Lookup};
///
/// let age = Filter::new(
///     "Age",
///     [Lookup::input("gte", "at least"), Lookup::input("lte", "at most")],
///     "gte",
/// )?;
///
/// assert_eq!(age.default_lookup(), "gte");
/// assert_eq!(age.lookup_names().collect::<Vec<_>>(), ["gte", "lte"]);
/// # Ok::<(), prax_filters::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    label: String,
    lookups: IndexMap<SmolStr, Lookup>,
    default_lookup: SmolStr,
}

impl Filter {
    /// Create a filter.
    ///
    /// Fails if `lookups` is empty, contains a name twice, or does not contain
    /// `default_lookup`.
    pub fn new(
        label: impl Into<String>,
        lookups: impl IntoIterator<Item = Lookup>,
        default_lookup: impl Into<SmolStr>,
    ) -> Result<Self, ConfigurationError> {
        let label = label.into();
        let default_lookup = default_lookup.into();

        let mut map = IndexMap::new();
        for lookup in lookups {
            let name = lookup.name_key().clone();
            if map.contains_key(&name) {
                return Err(ConfigurationError::DuplicateLookup {
                    filter: label,
                    lookup: name.to_string(),
                });
            }
            map.insert(name, lookup);
        }

        if map.is_empty() {
            return Err(ConfigurationError::NoLookups { filter: label });
        }

        if !map.contains_key(&default_lookup) {
            return Err(ConfigurationError::invalid_default_lookup(
                label,
                default_lookup,
                map.keys().map(SmolStr::as_str),
            ));
        }

        Ok(Self {
            label,
            lookups: map,
            default_lookup,
        })
    }

    /// Start building a filter with the given label.
    pub fn builder(label: impl Into<String>) -> FilterBuilder {
        FilterBuilder {
            label: label.into(),
            lookups: Vec::new(),
            default_lookup: None,
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The default lookup name.
    pub fn default_lookup(&self) -> &str {
        &self.default_lookup
    }

    /// Lookups in declaration order.
    pub fn lookups(&self) -> impl ExactSizeIterator<Item = &Lookup> {
        self.lookups.values()
    }

    /// Lookup names in declaration order.
    pub fn lookup_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.lookups.keys().map(SmolStr::as_str)
    }

    /// Get a lookup by name.
    pub fn get_lookup(&self, name: &str) -> Option<&Lookup> {
        self.lookups.get(name)
    }

    /// Check whether a lookup is permitted.
    pub fn has_lookup(&self, name: &str) -> bool {
        self.lookups.contains_key(name)
    }

    pub(crate) fn lookup_keys(&self) -> Vec<SmolStr> {
        self.lookups.keys().cloned().collect()
    }
}

/// Incremental construction of a [`Filter`].
///
/// Without an explicit default, the first lookup added becomes the default.
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    label: String,
    lookups: Vec<Lookup>,
    default_lookup: Option<SmolStr>,
}

impl FilterBuilder {
    /// Add a lookup.
    pub fn lookup(mut self, lookup: Lookup) -> Self {
        self.lookups.push(lookup);
        self
    }

    /// Set the default lookup.
    pub fn default_lookup(mut self, name: impl Into<SmolStr>) -> Self {
        self.default_lookup = Some(name.into());
        self
    }

    /// Validate and build the filter.
    pub fn build(self) -> Result<Filter, ConfigurationError> {
        let default_lookup = match self.default_lookup {
            Some(name) => name,
            None => match self.lookups.first() {
                Some(first) => first.name_key().clone(),
                None => return Err(ConfigurationError::NoLookups { filter: self.label }),
            },
        };
        Filter::new(self.label, self.lookups, default_lookup)
    }
}
