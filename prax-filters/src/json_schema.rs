//! JSON Schema derivation for filter-expression documents.
//!
//! The generated document (draft 2020-12) accepts either a single filter clause
//! or a boolean composition node:
//!
//! - `$defs/<name>-filter`: `["<name>", {"lookup": <enum>, "value": <schema>}]`
//! - `$defs/filters`: any of the per-filter definitions
//! - `$defs/and-or-op`: `["and" | "or", [<node>, <node>, ...]]`
//! - `$defs/not-op`: `["not", <node>]`
//!
//! where `<node>` is any of `filters`, `and-or-op` or `not-op`.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::{ExpressionError, SchemaValidationError};
use crate::filter::Filter;
use crate::filterset::FilterSet;
use crate::serialize;

/// Draft identifier placed in `$schema`.
pub const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

const FILTERS_DEF: &str = "filters";
const AND_OR_DEF: &str = "and-or-op";
const NOT_DEF: &str = "not-op";

/// Name of the `$defs` entry for a filter.
pub fn filter_def_name(filter: &str) -> String {
    format!("{filter}-filter")
}

/// Encode a `$defs` key as a URI fragment JSON pointer token.
fn pointer_token(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '~' => token.push_str("~0"),
            '/' => token.push_str("~1"),
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_') => token.push(c),
            c => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    token.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    token
}

fn def_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/$defs/{}", pointer_token(name)) })
}

/// Any node of the boolean grammar.
fn node_schema() -> Value {
    json!({
        "anyOf": [def_ref(FILTERS_DEF), def_ref(AND_OR_DEF), def_ref(NOT_DEF)]
    })
}

/// A two element array with fixed element schemas.
fn pair(first: Value, second: Value) -> Value {
    json!({
        "type": "array",
        "prefixItems": [first, second],
        "minItems": 2,
        "maxItems": 2
    })
}

fn value_schema(filter: &Filter) -> Value {
    let mut schemas: Vec<Value> = Vec::new();
    for lookup in filter.lookups() {
        let schema = lookup.input_kind().value_schema();
        if !schemas.contains(&schema) {
            schemas.push(schema);
        }
    }
    if schemas.len() == 1 {
        schemas.remove(0)
    } else {
        json!({ "anyOf": schemas })
    }
}

/// Per-lookup value constraints, only needed when value schemas differ.
fn lookup_conditions(filter: &Filter) -> Option<Value> {
    let mut lookups = filter.lookups();
    let first = lookups.next()?.input_kind().value_schema();
    if lookups.all(|lookup| lookup.input_kind().value_schema() == first) {
        return None;
    }
    let conditions: Vec<Value> = filter
        .lookups()
        .map(|lookup| {
            json!({
                "if": {
                    "properties": { "lookup": { "const": lookup.name() } },
                    "required": ["lookup"]
                },
                "then": {
                    "properties": { "value": lookup.input_kind().value_schema() }
                }
            })
        })
        .collect();
    Some(Value::Array(conditions))
}

fn filter_def(name: &str, filter: &Filter) -> Value {
    let lookups: Vec<&str> = filter.lookup_names().collect();
    let mut clause = json!({
        "type": "object",
        "properties": {
            "lookup": { "enum": lookups },
            "value": value_schema(filter)
        },
        "required": ["lookup", "value"],
        "additionalProperties": false
    });
    if let (Some(conditions), Value::Object(object)) = (lookup_conditions(filter), &mut clause) {
        object.insert("allOf".to_string(), conditions);
    }
    pair(json!({ "const": name }), clause)
}

/// Structural validation schema for the filter expressions of a [`FilterSet`].
///
/// ```rust
/// # use indexmap::IndexMap;
/// # use prax_filters::{FieldCatalog, FieldDescriptor, LookupDescriptor};
/// # use smol_str::SmolStr;
/// # struct NoFields;
/// # impl FieldCatalog for NoFields {
/// #     fn model_name(&self) -> &str { "Participant" }
/// #     fn fields(&self) -> Vec<FieldDescriptor> { vec![] }
/// #     fn lookups_for(&self, _: &str) -> IndexMap<SmolStr, LookupDescriptor> { IndexMap::new() }
/// # }
/// use prax_filters::{Filter, FilterSet, JsonSchema, Lookup};
///
/// let set = FilterSet::builder(&NoFields)
///     .filter("name", Filter::new("Name", [Lookup::input("icontains", "contains")], "icontains")?)
///     .build()?;
/// let schema = JsonSchema::new(&set);
///
/// assert_eq!(schema.schema()["$defs"]["filters"]["anyOf"][0]["$ref"], "#/$defs/name-filter");
/// assert!(schema.check().is_ok());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSchema {
    schema: Value,
}

impl JsonSchema {
    /// Derive the schema for `filterset`.
    pub fn new(filterset: &FilterSet) -> Self {
        let mut defs = Map::new();
        defs.insert(
            AND_OR_DEF.to_string(),
            pair(
                json!({ "enum": ["and", "or"] }),
                json!({
                    "type": "array",
                    "minItems": 2,
                    "items": node_schema()
                }),
            ),
        );
        defs.insert(
            NOT_DEF.to_string(),
            pair(json!({ "const": "not" }), node_schema()),
        );

        let refs: Vec<Value> = filterset
            .names()
            .map(|name| def_ref(&filter_def_name(name)))
            .collect();
        let filters = if refs.is_empty() {
            // `anyOf` must be non-empty; nothing matches an empty filter set.
            json!({ "not": {} })
        } else {
            json!({ "anyOf": refs })
        };
        defs.insert(FILTERS_DEF.to_string(), filters);

        for (name, filter) in filterset.iter() {
            defs.insert(filter_def_name(name), filter_def(name, filter));
        }

        let mut schema = Map::new();
        schema.insert("$schema".to_string(), json!(DRAFT));
        if let Some(title) = filterset.name() {
            schema.insert("title".to_string(), json!(title));
        }
        schema.insert("anyOf".to_string(), node_schema()["anyOf"].clone());
        schema.insert("$defs".to_string(), Value::Object(defs));

        debug!(
            filterset = filterset.name().unwrap_or_default(),
            filters = filterset.len(),
            "Derived JSON schema"
        );

        Self {
            schema: Value::Object(schema),
        }
    }

    /// The schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Consume and return the schema document.
    pub fn into_value(self) -> Value {
        self.schema
    }

    /// Compact JSON text.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serialize::to_json(&self.schema)
    }

    /// Indented JSON text.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serialize::to_json_pretty(&self.schema)
    }

    /// Check the document against the draft 2020-12 meta-schema.
    pub fn check(&self) -> Result<(), SchemaValidationError> {
        jsonschema::meta::validate(&self.schema).map_err(|e| SchemaValidationError {
            errors: vec![e.to_string()],
        })
    }

    /// Validate a filter-expression document against this schema.
    pub fn validate_document(&self, document: &Value) -> Result<(), ExpressionError> {
        let validator = jsonschema::validator_for(&self.schema).map_err(|e| {
            ExpressionError::SchemaViolation {
                errors: vec![format!("schema could not be compiled: {e}")],
            }
        })?;
        let errors: Vec<String> = validator
            .iter_errors(document)
            .map(|e| format!("{} at `{}`", e, e.instance_path))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ExpressionError::SchemaViolation { errors })
        }
    }
}

impl Serialize for JsonSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.schema.serialize(serializer)
    }
}

impl std::fmt::Display for JsonSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serialize::write_json(f, &self.schema)
    }
}
