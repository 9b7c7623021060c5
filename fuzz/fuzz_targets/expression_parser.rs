//! Fuzz target for filter-expression parsing and validation.
//!
//! Any document the JSON Schema accepts must parse into a
//! [`FilterExpression`] that the filter set also accepts, and serialize back
//! to the same document.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_expression_parser
//! ```

#![no_main]

use std::sync::LazyLock;

use libfuzzer_sys::fuzz_target;
use prax_catalog::FilteringConfig;
use prax_filters::{FilterExpression, FilterSet, JsonSchema};
use serde_json::Value;

const CONFIG: &str = r#"
[models.Participant]
fields = [
    { name = "name", type = "String" },
    { name = "age", type = "Int" },
    { name = "sex", type = "Enum", values = ["female", "male"], optional = true },
]

[filtersets.Participants]
model = "Participant"
fields = "__all__"
"#;

static FILTERSET: LazyLock<(FilterSet, JsonSchema)> = LazyLock::new(|| {
    let config = FilteringConfig::from_str(CONFIG).expect("fuzz config is valid");
    let set = config.filterset("Participants").expect("fuzz filter set builds");
    let schema = JsonSchema::new(&set);
    (set, schema)
});

fuzz_target!(|data: &[u8]| {
    let Ok(document) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let (set, schema) = &*FILTERSET;

    let parsed = FilterExpression::from_value(document.clone());
    if schema.validate_document(&document).is_ok() {
        let expr = parsed.expect("schema-valid documents parse");
        assert_eq!(set.validate(&expr), Ok(()));
        assert_eq!(expr.to_value(), document);
    }
});
