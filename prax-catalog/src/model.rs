//! Model and field definitions.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::types::FieldType;

/// A filterable field of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name.
    pub name: SmolStr,
    /// Field type.
    pub field_type: FieldType,
    /// Whether the field may be null.
    pub optional: bool,
    /// Display label.
    pub label: Option<String>,
    /// Explicit default lookup.
    pub default_lookup: Option<SmolStr>,
    /// Narrowed lookup list, in the order given.
    pub lookups: Option<Vec<SmolStr>>,
}

impl Field {
    /// Create a required field.
    pub fn new(name: impl Into<SmolStr>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            optional: false,
            label: None,
            default_lookup: None,
            lookups: None,
        }
    }

    /// Get the field name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Mark the field as nullable.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
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

    /// Restrict the field to the listed lookups.
    pub fn with_lookups<I, S>(mut self, lookups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.lookups = Some(lookups.into_iter().map(Into::into).collect());
        self
    }
}

/// A model definition: an ordered set of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Model name.
    pub name: SmolStr,
    /// Model fields.
    pub fields: IndexMap<SmolStr, Field>,
}

impl Model {
    /// Create a new model.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Get the model name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Add a field, builder style.
    pub fn field(mut self, field: Field) -> Self {
        self.add_field(field);
        self
    }

    /// Add a field to the model.
    ///
    /// Returns the previous field of the same name, if any.
    pub fn add_field(&mut self, field: Field) -> Option<Field> {
        self.fields.insert(field.name.clone(), field)
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}
