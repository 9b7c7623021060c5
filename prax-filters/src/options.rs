//! Options document describing operators, filters and lookups for UI clients.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::filter::Filter;
use crate::filterset::FilterSet;
use crate::lookup::{InputKind, Lookup};
use crate::serialize;

/// Boolean operators and their labels, in document order.
pub const OPERATORS: [(&str, &str); 3] = [("and", "All of"), ("or", "Any of"), ("not", "None of")];

fn lookup_options(lookup: &Lookup) -> Value {
    let mut entry = Map::new();
    entry.insert("type".to_string(), json!(lookup.input_kind().as_str()));
    entry.insert("label".to_string(), json!(lookup.label()));
    if let InputKind::Choice(choices) = lookup.input_kind() {
        let pairs: Vec<[&str; 2]> = choices
            .iter()
            .map(|c| [c.value.as_str(), c.label.as_str()])
            .collect();
        entry.insert("choices".to_string(), json!(pairs));
    }
    Value::Object(entry)
}

fn filter_options(filter: &Filter) -> Value {
    let lookups: Map<String, Value> = filter
        .lookups()
        .map(|lookup| (lookup.name().to_string(), lookup_options(lookup)))
        .collect();
    json!({
        "label": filter.label(),
        "default_lookup": filter.default_lookup(),
        "lookups": lookups
    })
}

/// Descriptive schema of a [`FilterSet`] for rendering filter controls.
///
/// ```json
/// {
///   "operators": {"and": {"label": "All of"}, "or": {...}, "not": {...}},
///   "filters": {
///     "age": {
///       "label": "Age",
///       "default_lookup": "gte",
///       "lookups": {"gte": {"type": "input", "label": "greater than or equal to"}}
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilteringOptionsSchema {
    schema: Value,
}

impl FilteringOptionsSchema {
    /// Derive the options document for `filterset`.
    pub fn new(filterset: &FilterSet) -> Self {
        let operators: Map<String, Value> = OPERATORS
            .iter()
            .map(|(name, label)| (name.to_string(), json!({ "label": label })))
            .collect();
        let filters: Map<String, Value> = filterset
            .iter()
            .map(|(name, filter)| (name.to_string(), filter_options(filter)))
            .collect();

        debug!(
            filterset = filterset.name().unwrap_or_default(),
            filters = filters.len(),
            "Derived filtering options"
        );

        Self {
            schema: json!({
                "operators": operators,
                "filters": filters
            }),
        }
    }

    /// The options document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Consume and return the options document.
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
}

impl Serialize for FilteringOptionsSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.schema.serialize(serializer)
    }
}

impl std::fmt::Display for FilteringOptionsSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serialize::write_json(f, &self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldCatalog, FieldDescriptor, LookupDescriptor};
    use crate::lookup::Choice;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use smol_str::SmolStr;

    struct NoFields;

    impl FieldCatalog for NoFields {
        fn model_name(&self) -> &str {
            "Participant"
        }

        fn fields(&self) -> Vec<FieldDescriptor> {
            vec![]
        }

        fn lookups_for(&self, _field: &str) -> IndexMap<SmolStr, LookupDescriptor> {
            IndexMap::new()
        }
    }

    fn participant_filters() -> FilterSet {
        let age = Filter::new(
            "Age",
            [
                Lookup::input("gte", "greater than or equal to"),
                Lookup::input("lte", "less than or equal to"),
            ],
            "gte",
        )
        .unwrap();
        let sex = Filter::new(
            "Sex",
            [
                Lookup::input("icontains", "contains"),
                Lookup::choice("exact", "is", [Choice::new("f", "Female"), Choice::new("m", "Male")]),
            ],
            "icontains",
        )
        .unwrap();
        FilterSet::builder(&NoFields)
            .filter("age", age)
            .filter("sex", sex)
            .build()
            .unwrap()
    }

    #[test]
    fn test_operators() {
        let options = FilteringOptionsSchema::new(&participant_filters());
        assert_eq!(
            options.schema()["operators"],
            json!({
                "and": { "label": "All of" },
                "or": { "label": "Any of" },
                "not": { "label": "None of" }
            })
        );
    }

    #[test]
    fn test_filter_entry() {
        let options = FilteringOptionsSchema::new(&participant_filters());
        assert_eq!(
            options.schema()["filters"]["age"],
            json!({
                "label": "Age",
                "default_lookup": "gte",
                "lookups": {
                    "gte": { "type": "input", "label": "greater than or equal to" },
                    "lte": { "type": "input", "label": "less than or equal to" }
                }
            })
        );
    }

    #[test]
    fn test_choice_entry() {
        let options = FilteringOptionsSchema::new(&participant_filters());
        assert_eq!(
            options.schema()["filters"]["sex"]["lookups"]["exact"],
            json!({
                "type": "choice",
                "label": "is",
                "choices": [["f", "Female"], ["m", "Male"]]
            })
        );
    }

    #[test]
    fn test_lookup_order() {
        let options = FilteringOptionsSchema::new(&participant_filters());
        let keys: Vec<&String> = options.schema()["filters"]["sex"]["lookups"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, ["icontains", "exact"]);
    }

    #[test]
    fn test_empty_filterset() {
        let set = FilterSet::builder(&NoFields).build().unwrap();
        let options = FilteringOptionsSchema::new(&set);
        assert_eq!(options.schema()["filters"], json!({}));
        assert_eq!(options.schema()["operators"].as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_round_trip() {
        let options = FilteringOptionsSchema::new(&participant_filters());
        let parsed = serialize::from_json(&options.to_json().unwrap()).unwrap();
        assert_eq!(&parsed, options.schema());
        assert_eq!(options.to_string(), options.to_json().unwrap());
    }
}
