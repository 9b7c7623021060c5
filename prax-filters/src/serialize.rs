//! Canonical JSON text for generated schema documents.
//!
//! Documents keep insertion order (`serde_json` is built with
//! `preserve_order`), so the same filter set always serializes to the same
//! text, and parsing that text yields an equal document.

use serde_json::Value;

/// Compact JSON text.
pub fn to_json(document: &Value) -> serde_json::Result<String> {
    serde_json::to_string(document)
}

/// Two-space indented JSON text.
pub fn to_json_pretty(document: &Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// Parse JSON text back into a document.
pub fn from_json(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(text)
}

/// Write compact JSON text to a formatter.
pub(crate) fn write_json(f: &mut std::fmt::Formatter<'_>, document: &Value) -> std::fmt::Result {
    // Value's Display is the compact serde_json writer.
    write!(f, "{document}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_is_preserved() {
        let document = json!({ "z": 1, "a": { "y": 2, "b": 3 } });
        assert_eq!(to_json(&document).unwrap(), r#"{"z":1,"a":{"y":2,"b":3}}"#);
    }

    #[test]
    fn test_round_trip() {
        let document = json!({ "filters": { "age": ["gte", "lte"] }, "n": null });
        assert_eq!(from_json(&to_json(&document).unwrap()).unwrap(), document);
        assert_eq!(from_json(&to_json_pretty(&document).unwrap()).unwrap(), document);
    }

    #[test]
    fn test_pretty_indent() {
        let document = json!({ "a": 1 });
        assert_eq!(to_json_pretty(&document).unwrap(), "{\n  \"a\": 1\n}");
    }
}
