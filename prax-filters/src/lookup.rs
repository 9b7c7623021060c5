//! Lookups: the comparison operators a filter permits.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use smol_str::SmolStr;

/// A selectable value for a choice lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Value submitted in filter expressions.
    pub value: String,
    /// Human readable label.
    pub label: String,
}

impl Choice {
    /// Create a new choice.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// How a client should render the value input of a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "choices", rename_all = "lowercase")]
pub enum InputKind {
    /// Free text input.
    #[default]
    Input,
    /// One of a fixed set of values.
    Choice(Vec<Choice>),
    /// A boolean switch.
    Toggle,
}

impl InputKind {
    /// Name of the input kind as used in the options document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Choice(_) => "choice",
            Self::Toggle => "toggle",
        }
    }

    /// JSON Schema for values of this input kind.
    pub fn value_schema(&self) -> Value {
        match self {
            Self::Input => json!({ "type": "string" }),
            Self::Choice(choices) => {
                let values: Vec<&str> = choices.iter().map(|c| c.value.as_str()).collect();
                json!({ "enum": values })
            }
            Self::Toggle => json!({ "type": "boolean" }),
        }
    }

    /// Check whether a submitted value fits this input kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Input => value.is_string(),
            Self::Choice(choices) => value
                .as_str()
                .is_some_and(|v| choices.iter().any(|c| c.value == v)),
            Self::Toggle => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named comparison operator with a display label and an input kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    name: SmolStr,
    label: String,
    input_kind: InputKind,
}

impl Lookup {
    /// Create a lookup with an explicit input kind.
    pub fn new(name: impl Into<SmolStr>, label: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            input_kind,
        }
    }

    /// Create a free text lookup.
    pub fn input(name: impl Into<SmolStr>, label: impl Into<String>) -> Self {
        Self::new(name, label, InputKind::Input)
    }

    /// Create a lookup restricted to a set of choices.
    pub fn choice(
        name: impl Into<SmolStr>,
        label: impl Into<String>,
        choices: impl IntoIterator<Item = Choice>,
    ) -> Self {
        Self::new(name, label, InputKind::Choice(choices.into_iter().collect()))
    }

    /// Create a boolean lookup.
    pub fn toggle(name: impl Into<SmolStr>, label: impl Into<String>) -> Self {
        Self::new(name, label, InputKind::Toggle)
    }

    /// Operator identifier, e.g. `icontains`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// How the value input is rendered.
    pub fn input_kind(&self) -> &InputKind {
        &self.input_kind
    }

    pub(crate) fn name_key(&self) -> &SmolStr {
        &self.name
    }
}
