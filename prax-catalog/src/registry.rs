//! Per-type lookup registries.
//!
//! Every field type exposes an ordered set of lookups, following the usual
//! Django names (`exact`, `icontains`, `gte`, `isnull`, ...). The order of the
//! built-in tables is the order derived filters list their lookups in, and the
//! first entry is the default lookup unless a field names another one.

use indexmap::IndexMap;
use prax_filters::{Choice, InputKind, LookupDescriptor, humanize};
use smol_str::SmolStr;

use crate::types::{FieldType, ScalarType};

const STRING_LOOKUPS: &[&str] = &[
    "exact",
    "iexact",
    "contains",
    "icontains",
    "in",
    "startswith",
    "istartswith",
    "endswith",
    "iendswith",
    "regex",
    "iregex",
    "isnull",
];
const NUMERIC_LOOKUPS: &[&str] = &["exact", "gt", "gte", "lt", "lte", "in", "range", "isnull"];
const BOOLEAN_LOOKUPS: &[&str] = &["exact", "isnull"];
const DATETIME_LOOKUPS: &[&str] = &[
    "exact", "gt", "gte", "lt", "lte", "range", "date", "year", "month", "day", "isnull",
];
const DATE_LOOKUPS: &[&str] = &[
    "exact", "gt", "gte", "lt", "lte", "range", "year", "month", "day", "isnull",
];
const TIME_LOOKUPS: &[&str] = &["exact", "gt", "gte", "lt", "lte", "range", "isnull"];
const UUID_LOOKUPS: &[&str] = &["exact", "in", "isnull"];
const JSON_LOOKUPS: &[&str] = &["exact", "has_key", "contains", "isnull"];
const ENUM_LOOKUPS: &[&str] = &["exact", "in", "isnull"];

/// Default label for a lookup name.
pub fn lookup_label(name: &str) -> String {
    let label = match name {
        "exact" => "equals",
        "iexact" => "equals (case-insensitive)",
        "contains" => "contains",
        "icontains" => "contains (case-insensitive)",
        "in" => "is one of",
        "gt" => "greater than",
        "gte" => "greater than or equal to",
        "lt" => "less than",
        "lte" => "less than or equal to",
        "startswith" => "starts with",
        "istartswith" => "starts with (case-insensitive)",
        "endswith" => "ends with",
        "iendswith" => "ends with (case-insensitive)",
        "range" => "is between",
        "isnull" => "is empty",
        "regex" => "matches pattern",
        "iregex" => "matches pattern (case-insensitive)",
        "date" => "date is",
        "year" => "year is",
        "month" => "month is",
        "day" => "day is",
        "has_key" => "has key",
        other => return humanize(other).to_lowercase(),
    };
    label.to_string()
}

fn builtin_names(field_type: &FieldType) -> &'static [&'static str] {
    match field_type {
        FieldType::Enum(_) => ENUM_LOOKUPS,
        FieldType::Scalar(scalar) => match scalar {
            ScalarType::String => STRING_LOOKUPS,
            ScalarType::Boolean => BOOLEAN_LOOKUPS,
            ScalarType::DateTime => DATETIME_LOOKUPS,
            ScalarType::Date => DATE_LOOKUPS,
            ScalarType::Time => TIME_LOOKUPS,
            ScalarType::Uuid => UUID_LOOKUPS,
            ScalarType::Json => JSON_LOOKUPS,
            ScalarType::Int | ScalarType::BigInt | ScalarType::Float | ScalarType::Decimal => {
                NUMERIC_LOOKUPS
            }
        },
    }
}

fn builtin_input_kind(field_type: &FieldType, lookup: &str) -> InputKind {
    match (field_type, lookup) {
        (_, "isnull") => InputKind::Toggle,
        (FieldType::Scalar(ScalarType::Boolean), "exact") => InputKind::Toggle,
        (FieldType::Enum(values), "exact" | "in") => InputKind::Choice(
            values
                .iter()
                .map(|v| Choice::new(v.as_str(), humanize(v)))
                .collect(),
        ),
        _ => InputKind::Input,
    }
}

/// Lookup tables keyed by field type name.
#[derive(Debug, Clone, Default)]
pub struct LookupRegistry {
    custom: IndexMap<SmolStr, IndexMap<SmolStr, LookupDescriptor>>,
}

impl LookupRegistry {
    /// Create a registry with only the built-in lookups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an additional lookup for a type name (`String`, `Int`, `Enum`, ...).
    ///
    /// Registering a built-in lookup name replaces its label and input kind in
    /// place; new names are appended after the built-ins.
    pub fn register(
        &mut self,
        type_name: impl Into<SmolStr>,
        lookup: impl Into<SmolStr>,
        descriptor: LookupDescriptor,
    ) -> &mut Self {
        self.custom
            .entry(type_name.into())
            .or_default()
            .insert(lookup.into(), descriptor);
        self
    }

    /// Check whether a type exposes a lookup.
    pub fn has_lookup(&self, field_type: &FieldType, lookup: &str) -> bool {
        builtin_names(field_type).contains(&lookup)
            || self
                .custom
                .get(field_type.type_name())
                .is_some_and(|custom| custom.contains_key(lookup))
    }

    /// All lookups a type exposes, in registry order.
    pub fn lookups(&self, field_type: &FieldType) -> IndexMap<SmolStr, LookupDescriptor> {
        let mut lookups: IndexMap<SmolStr, LookupDescriptor> = builtin_names(field_type)
            .iter()
            .map(|name| {
                (
                    SmolStr::new(name),
                    LookupDescriptor::new(lookup_label(name), builtin_input_kind(field_type, name)),
                )
            })
            .collect();

        if let Some(custom) = self.custom.get(field_type.type_name()) {
            for (name, descriptor) in custom {
                lookups.insert(name.clone(), descriptor.clone());
            }
        }
        lookups
    }
}
