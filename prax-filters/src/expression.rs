//! Filter-expression documents.
//!
//! A filter expression is a tree of clauses combined with `and`, `or` and
//! `not`. Its JSON form is the one described by [`JsonSchema`](crate::JsonSchema):
//!
//! ```json
//! ["and", [
//!     ["name", {"lookup": "icontains", "value": "ann"}],
//!     ["not", ["age", {"lookup": "lt", "value": "18"}]]
//! ]]
//! ```
//!
//! ```rust
//! use prax_filters::FilterExpression;
//! use serde_json::json;
//!
//! let expr = FilterExpression::from_json(
//!     r#"["or", [["name", {"lookup": "exact", "value": "Ann"}],
//!               ["name", {"lookup": "exact", "value": "Bob"}]]]"#,
//! )?;
//! assert_eq!(expr.operator(), "or");
//! assert_eq!(expr.filters(), ["name", "name"]);
//! assert_eq!(expr.to_value()[0], json!("or"));
//! # Ok::<(), prax_filters::ExpressionError>(())
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use smol_str::SmolStr;

use crate::error::ExpressionError;

/// A node of a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// A single filter clause: `filter__lookup = value`.
    Clause {
        /// Filter name.
        filter: SmolStr,
        /// Lookup name.
        lookup: SmolStr,
        /// Submitted value.
        value: Value,
    },
    /// All children must match.
    And(Vec<FilterExpression>),
    /// Any child must match.
    Or(Vec<FilterExpression>),
    /// The child must not match.
    Not(Box<FilterExpression>),
}

impl FilterExpression {
    /// Create a clause.
    pub fn clause(filter: impl Into<SmolStr>, lookup: impl Into<SmolStr>, value: Value) -> Self {
        Self::Clause {
            filter: filter.into(),
            lookup: lookup.into(),
            value,
        }
    }

    /// Combine expressions with AND.
    pub fn and(children: impl IntoIterator<Item = FilterExpression>) -> Self {
        Self::And(children.into_iter().collect())
    }

    /// Combine expressions with OR.
    pub fn or(children: impl IntoIterator<Item = FilterExpression>) -> Self {
        Self::Or(children.into_iter().collect())
    }

    /// Negate an expression.
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: FilterExpression) -> Self {
        Self::Not(Box::new(child))
    }

    /// The leading tag of this node: the operator, or the filter name for a clause.
    pub fn operator(&self) -> &str {
        match self {
            Self::Clause { filter, .. } => filter.as_str(),
            Self::And(_) => "and",
            Self::Or(_) => "or",
            Self::Not(_) => "not",
        }
    }

    /// Filter names referenced by clauses, depth first.
    pub fn filters(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_filters(&mut names);
        names
    }

    fn collect_filters<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Clause { filter, .. } => names.push(filter.as_str()),
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_filters(names);
                }
            }
            Self::Not(child) => child.collect_filters(names),
        }
    }

    /// Parse an expression from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ExpressionError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ExpressionError::malformed(format!("invalid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Parse an expression from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, ExpressionError> {
        let Value::Array(items) = value else {
            return Err(ExpressionError::malformed("expected a two-element array"));
        };
        let [tag, operand]: [Value; 2] = items.try_into().map_err(|items: Vec<Value>| {
            ExpressionError::malformed(format!(
                "expected a two-element array, got {} elements",
                items.len()
            ))
        })?;
        let Value::String(tag) = tag else {
            return Err(ExpressionError::malformed(
                "first element must be an operator or filter name",
            ));
        };

        match tag.as_str() {
            "and" | "or" => {
                let Value::Array(children) = operand else {
                    return Err(ExpressionError::malformed(format!(
                        "`{tag}` operands must be an array"
                    )));
                };
                let children = children
                    .into_iter()
                    .map(Self::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                if tag == "and" {
                    Ok(Self::And(children))
                } else {
                    Ok(Self::Or(children))
                }
            }
            "not" => Ok(Self::not(Self::from_value(operand)?)),
            _ => parse_clause(tag, operand),
        }
    }

    /// Convert to the JSON form.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Clause {
                filter,
                lookup,
                value,
            } => json!([filter.as_str(), { "lookup": lookup.as_str(), "value": value }]),
            Self::And(children) | Self::Or(children) => {
                let children: Vec<Value> = children.iter().map(Self::to_value).collect();
                json!([self.operator(), children])
            }
            Self::Not(child) => json!(["not", child.to_value()]),
        }
    }
}

fn parse_clause(filter: String, operand: Value) -> Result<FilterExpression, ExpressionError> {
    let Value::Object(mut args) = operand else {
        return Err(ExpressionError::malformed(format!(
            "clause for `{filter}` must be an object with `lookup` and `value`"
        )));
    };
    let lookup = match args.remove("lookup") {
        Some(Value::String(lookup)) => lookup,
        Some(_) => {
            return Err(ExpressionError::malformed(format!(
                "`lookup` of `{filter}` must be a string"
            )));
        }
        None => {
            return Err(ExpressionError::malformed(format!(
                "clause for `{filter}` is missing `lookup`"
            )));
        }
    };
    let Some(value) = args.remove("value") else {
        return Err(ExpressionError::malformed(format!(
            "clause for `{filter}` is missing `value`"
        )));
    };
    reject_extra_keys(&filter, &args)?;

    Ok(FilterExpression::clause(filter, lookup, value))
}

fn reject_extra_keys(filter: &str, args: &Map<String, Value>) -> Result<(), ExpressionError> {
    match args.keys().next() {
        Some(key) => Err(ExpressionError::malformed(format!(
            "unexpected key `{key}` in clause for `{filter}`"
        ))),
        None => Ok(()),
    }
}

impl Serialize for FilterExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilterExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl std::str::FromStr for FilterExpression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_clause() {
        let expr = FilterExpression::from_json(r#"["age", {"lookup": "gte", "value": "18"}]"#)
            .unwrap();
        assert_eq!(expr, FilterExpression::clause("age", "gte", json!("18")));
    }

    #[test]
    fn test_parse_nested() {
        let expr = FilterExpression::from_value(json!([
            "and",
            [
                ["name", {"lookup": "icontains", "value": "ann"}],
                ["not", ["age", {"lookup": "lt", "value": "18"}]],
                ["or", [
                    ["sex", {"lookup": "exact", "value": "f"}],
                    ["sex", {"lookup": "exact", "value": "m"}]
                ]]
            ]
        ]))
        .unwrap();

        assert_eq!(
            expr,
            FilterExpression::and([
                FilterExpression::clause("name", "icontains", json!("ann")),
                FilterExpression::not(FilterExpression::clause("age", "lt", json!("18"))),
                FilterExpression::or([
                    FilterExpression::clause("sex", "exact", json!("f")),
                    FilterExpression::clause("sex", "exact", json!("m")),
                ]),
            ])
        );
        assert_eq!(expr.filters(), ["name", "age", "sex", "sex"]);
    }

    #[test]
    fn test_to_value_matches_wire_form() {
        let wire = json!(["not", ["name", {"lookup": "exact", "value": "x"}]]);
        let expr = FilterExpression::from_value(wire.clone()).unwrap();
        assert_eq!(expr.to_value(), wire);
        assert_eq!(serde_json::to_value(&expr).unwrap(), wire);
    }

    #[test]
    fn test_deserialize() {
        let expr: FilterExpression =
            serde_json::from_str(r#"["name", {"lookup": "exact", "value": true}]"#).unwrap();
        assert_eq!(expr.operator(), "name");
    }

    #[test]
    fn test_malformed() {
        let cases = [
            json!({"name": "x"}),
            json!(["name"]),
            json!(["name", {"lookup": "exact"}, 1]),
            json!([1, {"lookup": "exact", "value": 1}]),
            json!(["and", {"lookup": "exact", "value": 1}]),
            json!(["name", {"value": 1}]),
            json!(["name", {"lookup": 3, "value": 1}]),
            json!(["name", {"lookup": "exact"}]),
            json!(["name", {"lookup": "exact", "value": 1, "extra": 2}]),
            json!(["name", "exact"]),
        ];
        for case in cases {
            let result = FilterExpression::from_value(case.clone());
            assert!(
                matches!(result, Err(ExpressionError::Malformed { .. })),
                "expected malformed error for {case}"
            );
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = FilterExpression::from_json("[").unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_from_str() {
        let expr: FilterExpression = r#"["not", ["a", {"lookup": "exact", "value": "1"}]]"#
            .parse()
            .unwrap();
        assert!(matches!(expr, FilterExpression::Not(_)));
    }
}
