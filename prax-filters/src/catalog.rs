//! The model introspection interface consumed when deriving filters.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::lookup::InputKind;

/// A field exposed by a backing model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name; becomes the derived filter's name.
    pub name: SmolStr,
    /// Display label. Falls back to the humanised field name.
    pub label: Option<String>,
    /// Explicit default lookup. Falls back to the first registered lookup.
    pub default_lookup: Option<SmolStr>,
}

impl FieldDescriptor {
    /// Create a descriptor with only a name.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            label: None,
            default_lookup: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the default lookup.
    pub fn with_default_lookup(mut self, lookup: impl Into<SmolStr>) -> Self {
        self.default_lookup = Some(lookup.into());
        self
    }
}

/// Metadata for a lookup registered on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupDescriptor {
    /// Display label.
    pub label: String,
    /// Input kind.
    pub input_kind: InputKind,
}

impl LookupDescriptor {
    /// Create a lookup descriptor.
    pub fn new(label: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            label: label.into(),
            input_kind,
        }
    }
}

/// Field and lookup introspection of a backing model.
///
/// Implementations must return fields and lookups in a stable order; that order
/// becomes the order of derived filters and their lookups.
pub trait FieldCatalog {
    /// Name of the model, used in error messages.
    fn model_name(&self) -> &str;

    /// Fields in model order.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Lookups registered on `field`, in registry order.
    ///
    /// Returns an empty map for an unknown field.
    fn lookups_for(&self, field: &str) -> IndexMap<SmolStr, LookupDescriptor>;
}

impl<T: FieldCatalog + ?Sized> FieldCatalog for &T {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        (**self).fields()
    }

    fn lookups_for(&self, field: &str) -> IndexMap<SmolStr, LookupDescriptor> {
        (**self).lookups_for(field)
    }
}

/// Turn a field name into a display label: `date_of_birth` becomes `Date of birth`.
pub fn humanize(name: &str) -> String {
    let spaced = name.trim_matches('_').replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
