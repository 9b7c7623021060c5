//! Integration tests for the JSON Schema and options documents.
//!
//! These tests build filter sets from declared filters and check the exact
//! shape of both derived documents.

use indexmap::IndexMap;
use insta::assert_json_snapshot;
use pretty_assertions::assert_eq;
use prax_filtering::filters::{
    Choice, ExpressionError, FieldCatalog, FieldDescriptor, Filter, FilterExpression, FilterSet,
    FilteringOptionsSchema, JsonSchema, Lookup, LookupDescriptor,
};
use serde_json::{Value, json};
use smol_str::SmolStr;

struct Participant;

impl FieldCatalog for Participant {
    fn model_name(&self) -> &str {
        "Participant"
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        Vec::new()
    }

    fn lookups_for(&self, _field: &str) -> IndexMap<SmolStr, LookupDescriptor> {
        IndexMap::new()
    }
}

fn age() -> Filter {
    Filter::new(
        "Age",
        [
            Lookup::input("gte", "greater than or equal to"),
            Lookup::input("lte", "less than or equal to"),
        ],
        "gte",
    )
    .unwrap()
}

fn sex() -> Filter {
    Filter::new("Sex", [Lookup::input("icontains", "contains")], "icontains").unwrap()
}

fn age_and_sex() -> FilterSet {
    FilterSet::builder(&Participant)
        .name("ParticipantFilterSet")
        .filter("age", age())
        .filter("sex", sex())
        .build()
        .unwrap()
}

/// Test the `$defs` key set and the filters union.
#[test]
fn test_schema_defs() {
    let schema = JsonSchema::new(&age_and_sex());
    let defs = schema.schema()["$defs"].as_object().unwrap();

    let mut keys: Vec<&str> = defs.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["age-filter", "and-or-op", "filters", "not-op", "sex-filter"]
    );
    assert_eq!(
        defs["filters"]["anyOf"],
        json!([
            {"$ref": "#/$defs/age-filter"},
            {"$ref": "#/$defs/sex-filter"}
        ])
    );
}

/// Test the root of the document.
#[test]
fn test_schema_root() {
    let schema = JsonSchema::new(&age_and_sex());
    let root = schema.schema();

    assert_eq!(root["$schema"], "https://json-schema.org/draft/2020-12/schema");
    assert_eq!(root["title"], "ParticipantFilterSet");
    assert_eq!(
        root["anyOf"],
        json!([
            {"$ref": "#/$defs/filters"},
            {"$ref": "#/$defs/and-or-op"},
            {"$ref": "#/$defs/not-op"}
        ])
    );
}

/// Test a per-filter definition.
#[test]
fn test_filter_def() {
    let schema = JsonSchema::new(&age_and_sex());
    assert_eq!(
        schema.schema()["$defs"]["age-filter"],
        json!({
            "type": "array",
            "prefixItems": [
                {"const": "age"},
                {
                    "type": "object",
                    "properties": {
                        "lookup": {"enum": ["gte", "lte"]},
                        "value": {"type": "string"}
                    },
                    "required": ["lookup", "value"],
                    "additionalProperties": false
                }
            ],
            "minItems": 2,
            "maxItems": 2
        })
    );
}

/// Test the options entry of a filter.
#[test]
fn test_options_filter_entry() {
    let options = FilteringOptionsSchema::new(&age_and_sex());
    assert_eq!(
        options.schema()["filters"]["age"],
        json!({
            "label": "Age",
            "default_lookup": "gte",
            "lookups": {
                "gte": {"type": "input", "label": "greater than or equal to"},
                "lte": {"type": "input", "label": "less than or equal to"}
            }
        })
    );

    let operators: Vec<&String> = options.schema()["operators"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(operators, ["and", "or", "not"]);
}

/// Test the full options document of a single filter.
#[test]
fn test_options_snapshot() {
    let set = FilterSet::builder(&Participant)
        .filter(
            "sex",
            Filter::builder("Sex")
                .lookup(Lookup::choice(
                    "exact",
                    "equals",
                    [Choice::new("female", "Female"), Choice::new("male", "Male")],
                ))
                .lookup(Lookup::toggle("isnull", "is empty"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    assert_json_snapshot!(FilteringOptionsSchema::new(&set).schema(), @r#"
    {
      "operators": {
        "and": {
          "label": "All of"
        },
        "or": {
          "label": "Any of"
        },
        "not": {
          "label": "None of"
        }
      },
      "filters": {
        "sex": {
          "label": "Sex",
          "default_lookup": "exact",
          "lookups": {
            "exact": {
              "type": "choice",
              "label": "equals",
              "choices": [
                [
                  "female",
                  "Female"
                ],
                [
                  "male",
                  "Male"
                ]
              ]
            },
            "isnull": {
              "type": "toggle",
              "label": "is empty"
            }
          }
        }
      }
    }
    "#);
}

/// Test that both documents survive a serialization round trip.
#[test]
fn test_round_trip() {
    let set = age_and_sex();

    let schema = JsonSchema::new(&set);
    let parsed: Value = serde_json::from_str(&schema.to_json().unwrap()).unwrap();
    assert_eq!(&parsed, schema.schema());
    let parsed: Value = serde_json::from_str(&schema.to_json_pretty().unwrap()).unwrap();
    assert_eq!(&parsed, schema.schema());

    let options = FilteringOptionsSchema::new(&set);
    let parsed: Value = serde_json::from_str(&options.to_json().unwrap()).unwrap();
    assert_eq!(&parsed, options.schema());
}

/// Test that generated schemas are valid draft 2020-12 schemas.
#[test]
fn test_meta_schema() {
    let empty = FilterSet::builder(&Participant).build().unwrap();
    for set in [age_and_sex(), empty] {
        let schema = JsonSchema::new(&set);
        schema.check().unwrap();
        assert!(jsonschema::meta::is_valid(schema.schema()));
    }
}

/// Test structural validation of filter-expression documents.
#[test]
fn test_validate_documents() {
    let set = age_and_sex();
    let schema = JsonSchema::new(&set);
    let validator = jsonschema::validator_for(schema.schema()).unwrap();

    let valid = [
        json!(["age", {"lookup": "gte", "value": "30"}]),
        json!(["and", [
            ["age", {"lookup": "gte", "value": "30"}],
            ["or", [
                ["sex", {"lookup": "icontains", "value": "f"}],
                ["not", ["age", {"lookup": "lte", "value": "20"}]]
            ]]
        ]]),
    ];
    for document in &valid {
        assert!(validator.is_valid(document), "{document}");
        schema.validate_document(document).unwrap();
        let expr = FilterExpression::from_value(document.clone()).unwrap();
        set.validate(&expr).unwrap();
        assert_eq!(&expr.to_value(), document);
    }

    let invalid = [
        json!(["age", {"lookup": "icontains", "value": "30"}]),
        json!(["height", {"lookup": "gte", "value": "30"}]),
        json!(["and", [["age", {"lookup": "gte", "value": "30"}]]]),
        json!(["not", []]),
        json!(["age", {"lookup": "gte"}]),
        json!(["age", {"lookup": "gte", "value": "30", "extra": 1}]),
        json!({"age": "30"}),
    ];
    for document in &invalid {
        assert!(!validator.is_valid(document), "{document}");
        assert!(matches!(
            schema.validate_document(document),
            Err(ExpressionError::SchemaViolation { .. })
        ));
    }
}

/// Test that semantic validation agrees with the schema on lookups.
#[test]
fn test_semantic_validation() {
    let set = age_and_sex();

    let expr = FilterExpression::clause("age", "icontains", json!("30"));
    assert!(matches!(
        set.validate(&expr),
        Err(ExpressionError::UnknownLookup { .. })
    ));

    let expr = FilterExpression::clause("height", "gte", json!("30"));
    assert!(matches!(
        set.validate(&expr),
        Err(ExpressionError::UnknownFilter { .. })
    ));

    let expr = FilterExpression::or([FilterExpression::clause("age", "gte", json!("30"))]);
    assert!(matches!(
        set.validate(&expr),
        Err(ExpressionError::InvalidArity { .. })
    ));
}

/// Test that the schema and the filter set agree on per-lookup values.
#[test]
fn test_schema_agrees_with_validate_on_values() {
    let set = FilterSet::builder(&Participant)
        .filter(
            "sex",
            Filter::builder("Sex")
                .lookup(Lookup::choice(
                    "exact",
                    "equals",
                    [Choice::new("female", "Female"), Choice::new("male", "Male")],
                ))
                .lookup(Lookup::toggle("isnull", "is empty"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let schema = JsonSchema::new(&set);

    let documents = [
        (json!(["sex", {"lookup": "exact", "value": "female"}]), true),
        (json!(["sex", {"lookup": "isnull", "value": true}]), true),
        (json!(["sex", {"lookup": "isnull", "value": "female"}]), false),
        (json!(["sex", {"lookup": "exact", "value": true}]), false),
        (json!(["not", ["sex", {"lookup": "isnull", "value": "male"}]]), false),
    ];
    for (document, valid) in &documents {
        let expr = FilterExpression::from_value(document.clone()).unwrap();
        assert_eq!(schema.validate_document(document).is_ok(), *valid, "{document}");
        assert_eq!(set.validate(&expr).is_ok(), *valid, "{document}");
    }
    assert!(matches!(
        set.validate(&FilterExpression::clause("sex", "isnull", json!("female"))),
        Err(ExpressionError::InvalidValue { .. })
    ));
}
