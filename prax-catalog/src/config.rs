//! Configuration file parsing for `prax-filtering.toml`.
//!
//! ```toml
//! [models.Participant]
//! fields = [
//!     { name = "name", type = "String" },
//!     { name = "age", type = "Int", default_lookup = "gte" },
//!     { name = "sex", type = "Enum", values = ["female", "male"], optional = true },
//! ]
//!
//! [lookups.String.unaccent]
//! label = "matches ignoring accents"
//!
//! [filtersets.ParticipantFilterSet]
//! model = "Participant"
//! fields = "__all__"
//!
//! [filtersets.ParticipantFilterSet.filters.name]
//! label = "Name"
//! default_lookup = "icontains"
//! lookups = [{ name = "icontains", label = "contains" }]
//! ```

use indexmap::IndexMap;
use prax_filters::{
    ALL_FIELDS, Choice, FieldSelection, Filter, FilterSet, InputKind, Lookup, LookupDescriptor,
    humanize,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::catalog::ModelCatalog;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Field, Model};
use crate::registry::{LookupRegistry, lookup_label};
use crate::types::{FieldType, ScalarType};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "prax-filtering.toml";

/// Main configuration structure for `prax-filtering.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilteringConfig {
    /// Model definitions, keyed by model name.
    #[serde(default)]
    pub models: IndexMap<String, ModelConfig>,

    /// Additional lookups, keyed by type name then lookup name.
    #[serde(default)]
    pub lookups: IndexMap<String, IndexMap<String, CustomLookupConfig>>,

    /// Filter set definitions, keyed by filter set name.
    #[serde(default)]
    pub filtersets: IndexMap<String, FilterSetConfig>,
}

impl FilteringConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> CatalogResult<Self> {
        let config: Self = toml::from_str(content)?;
        debug!(
            models = config.models.len(),
            filtersets = config.filtersets.len(),
            "Configuration parsed"
        );
        Ok(config)
    }

    /// Names of the declared filter sets, in file order.
    pub fn filterset_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.filtersets.keys().map(String::as_str)
    }

    /// Build the lookup registry, including custom lookups.
    pub fn registry(&self) -> CatalogResult<LookupRegistry> {
        let mut registry = LookupRegistry::new();
        for (type_name, lookups) in &self.lookups {
            if type_name != "Enum" && ScalarType::from_str(type_name).is_none() {
                return Err(CatalogError::config(format!(
                    "custom lookups declared for unknown type `{type_name}`"
                )));
            }
            for (name, lookup) in lookups {
                let input_kind = lookup.kind.resolve(&lookup.choices, name)?;
                let label = lookup.label.clone().unwrap_or_else(|| lookup_label(name));
                registry.register(type_name.as_str(), name.as_str(), LookupDescriptor::new(label, input_kind));
            }
        }
        Ok(registry)
    }

    /// Build a model by name.
    pub fn model(&self, name: &str) -> CatalogResult<Model> {
        let config = self
            .models
            .get(name)
            .ok_or_else(|| CatalogError::config(format!("unknown model `{name}`")))?;
        config.build(name)
    }

    /// Build a filter set by name.
    pub fn filterset(&self, name: &str) -> CatalogResult<FilterSet> {
        let config = self
            .filtersets
            .get(name)
            .ok_or_else(|| CatalogError::unknown_filterset(name, self.filterset_names()))?;
        let registry = self.registry()?;
        self.build_filterset(name, config, &registry)
    }

    /// Build every declared filter set, in file order.
    pub fn filtersets(&self) -> CatalogResult<IndexMap<String, FilterSet>> {
        let registry = self.registry()?;
        let mut sets = IndexMap::with_capacity(self.filtersets.len());
        for (name, config) in &self.filtersets {
            sets.insert(name.clone(), self.build_filterset(name, config, &registry)?);
        }
        Ok(sets)
    }

    fn build_filterset(
        &self,
        name: &str,
        config: &FilterSetConfig,
        registry: &LookupRegistry,
    ) -> CatalogResult<FilterSet> {
        let model_config =
            self.models
                .get(&config.model)
                .ok_or_else(|| CatalogError::UnknownModel {
                    filterset: name.to_string(),
                    model: config.model.clone(),
                })?;
        let model = model_config.build(&config.model)?;
        let catalog = ModelCatalog::new(&model, registry)?;

        let mut builder = FilterSet::builder(&catalog)
            .name(name)
            .fields(config.selection()?);
        for (filter_name, filter) in &config.filters {
            builder = builder.filter(filter_name.as_str(), filter.build(filter_name)?);
        }

        let filterset = builder.build()?;
        debug!(filterset = %name, filters = filterset.len(), "Filter set built from configuration");
        Ok(filterset)
    }
}

/// A model declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Fields in model order.
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl ModelConfig {
    fn build(&self, name: &str) -> CatalogResult<Model> {
        let mut model = Model::new(name);
        for field in &self.fields {
            let built = field.build(name)?;
            if model.add_field(built).is_some() {
                return Err(CatalogError::config(format!(
                    "duplicate field `{}` in model `{name}`",
                    field.name
                )));
            }
        }
        Ok(model)
    }
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Field name.
    pub name: String,

    /// Type name: a scalar type or `Enum`.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Whether the field may be null.
    #[serde(default)]
    pub optional: bool,

    /// Display label.
    pub label: Option<String>,

    /// Default lookup.
    pub default_lookup: Option<String>,

    /// Narrowed lookup list.
    pub lookups: Option<Vec<String>>,

    /// Enum values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl FieldConfig {
    fn field_type(&self, model: &str) -> CatalogResult<FieldType> {
        if self.type_name == "Enum" {
            if self.values.is_empty() {
                return Err(CatalogError::config(format!(
                    "enum field `{model}.{}` declares no values",
                    self.name
                )));
            }
            return Ok(FieldType::enumeration(self.values.iter().cloned()));
        }

        let scalar =
            ScalarType::from_str(&self.type_name).ok_or_else(|| CatalogError::UnknownType {
                model: model.to_string(),
                field: self.name.clone(),
                type_name: self.type_name.clone(),
            })?;
        if !self.values.is_empty() {
            return Err(CatalogError::config(format!(
                "`values` is only allowed on enum fields, found on `{model}.{}`",
                self.name
            )));
        }
        Ok(scalar.into())
    }

    fn build(&self, model: &str) -> CatalogResult<Field> {
        let mut field = Field::new(self.name.as_str(), self.field_type(model)?);
        field.optional = self.optional;
        field.label = self.label.clone();
        field.default_lookup = self.default_lookup.as_deref().map(Into::into);
        field.lookups = self
            .lookups
            .as_ref()
            .map(|lookups| lookups.iter().map(|l| l.as_str().into()).collect());
        Ok(field)
    }
}

/// The `fields` entry of a filter set: `"__all__"` or a list of field names.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldsConfig {
    /// The `"__all__"` sentinel.
    All(String),
    /// Listed fields.
    Only(Vec<String>),
}

/// A filter set declaration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSetConfig {
    /// Backing model name.
    pub model: String,

    /// Fields to derive filters for. Omitted means declared filters only.
    pub fields: Option<FieldsConfig>,

    /// Declared filters, keyed by filter name.
    #[serde(default)]
    pub filters: IndexMap<String, FilterConfig>,
}

impl FilterSetConfig {
    /// The field selection this declaration describes.
    pub fn selection(&self) -> CatalogResult<FieldSelection> {
        match &self.fields {
            None => Ok(FieldSelection::Declared),
            Some(FieldsConfig::All(sentinel)) if sentinel == ALL_FIELDS => Ok(FieldSelection::All),
            Some(FieldsConfig::All(other)) => Err(CatalogError::config(format!(
                "`fields` must be \"{ALL_FIELDS}\" or a list of field names, found \"{other}\""
            ))),
            Some(FieldsConfig::Only(fields)) => Ok(FieldSelection::only(fields.iter().map(String::as_str))),
        }
    }
}

/// A declared filter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Display label. Defaults to the humanized filter name.
    pub label: Option<String>,

    /// Default lookup. Defaults to the first lookup.
    pub default_lookup: Option<String>,

    /// Lookups in order.
    #[serde(default)]
    pub lookups: Vec<LookupConfig>,
}

impl FilterConfig {
    fn build(&self, name: &str) -> CatalogResult<Filter> {
        let label = self.label.clone().unwrap_or_else(|| humanize(name));
        let mut builder = Filter::builder(label);
        for lookup in &self.lookups {
            builder = builder.lookup(lookup.build()?);
        }
        if let Some(default) = &self.default_lookup {
            builder = builder.default_lookup(default.as_str());
        }
        builder.build().map_err(|e| e.for_filter(name).into())
    }
}

/// A lookup on a declared filter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    /// Operator name.
    pub name: String,

    /// Display label. Defaults to the built-in label for the name.
    pub label: Option<String>,

    /// Input kind.
    #[serde(rename = "type", default)]
    pub kind: LookupKind,

    /// `[value, label]` pairs for choice lookups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<(String, String)>,
}

impl LookupConfig {
    fn build(&self) -> CatalogResult<Lookup> {
        let input_kind = self.kind.resolve(&self.choices, &self.name)?;
        let label = self.label.clone().unwrap_or_else(|| lookup_label(&self.name));
        Ok(Lookup::new(self.name.as_str(), label, input_kind))
    }
}

/// A custom lookup registered for a type.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CustomLookupConfig {
    /// Display label. Defaults to the built-in label for the name.
    pub label: Option<String>,

    /// Input kind.
    #[serde(rename = "type", default)]
    pub kind: LookupKind,

    /// `[value, label]` pairs for choice lookups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<(String, String)>,
}

/// Lookup input kind as written in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    /// Free text.
    #[default]
    Input,
    /// One of `choices`.
    Choice,
    /// Boolean.
    Toggle,
}

impl LookupKind {
    fn resolve(self, choices: &[(String, String)], lookup: &str) -> CatalogResult<InputKind> {
        match self {
            Self::Choice if choices.is_empty() => Err(CatalogError::config(format!(
                "choice lookup `{lookup}` declares no choices"
            ))),
            Self::Choice => Ok(InputKind::Choice(
                choices
                    .iter()
                    .map(|(value, label)| Choice::new(value.as_str(), label.as_str()))
                    .collect(),
            )),
            _ if !choices.is_empty() => Err(CatalogError::config(format!(
                "`choices` is only allowed on choice lookups, found on `{lookup}`"
            ))),
            Self::Input => Ok(InputKind::Input),
            Self::Toggle => Ok(InputKind::Toggle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prax_filters::ConfigurationError;

    const PARTICIPANTS: &str = r#"
[models.Participant]
fields = [
    { name = "name", type = "String", lookups = ["icontains", "exact"] },
    { name = "age", type = "Int", default_lookup = "gte" },
    { name = "sex", type = "Enum", values = ["female", "male"], optional = true },
]

[filtersets.Everything]
model = "Participant"
fields = "__all__"

[filtersets.ByAge]
model = "Participant"
fields = ["age"]

[filtersets.Declared]
model = "Participant"

[filtersets.Declared.filters.name]
default_lookup = "exact"
lookups = [{ name = "icontains" }, { name = "exact", label = "is" }]
"#;

    fn lookups(set: &FilterSet, filter: &str) -> Vec<String> {
        set.get(filter)
            .unwrap()
            .lookup_names()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_parse_preserves_order() {
        let config = FilteringConfig::from_str(PARTICIPANTS).unwrap();
        assert_eq!(
            config.filterset_names().collect::<Vec<_>>(),
            ["Everything", "ByAge", "Declared"]
        );
        let fields: Vec<&str> = config.models["Participant"]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(fields, ["name", "age", "sex"]);
    }

    #[test]
    fn test_all_fields() {
        let config = FilteringConfig::from_str(PARTICIPANTS).unwrap();
        let set = config.filterset("Everything").unwrap();

        assert_eq!(set.name(), Some("Everything"));
        assert_eq!(set.names().collect::<Vec<_>>(), ["name", "age", "sex"]);
        assert_eq!(lookups(&set, "name"), ["icontains", "exact"]);
        assert_eq!(set.get("age").unwrap().default_lookup(), "gte");
        assert_eq!(lookups(&set, "sex"), ["exact", "in", "isnull"]);
    }

    #[test]
    fn test_only_fields() {
        let config = FilteringConfig::from_str(PARTICIPANTS).unwrap();
        let set = config.filterset("ByAge").unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), ["age"]);
    }

    #[test]
    fn test_declared_filters() {
        let config = FilteringConfig::from_str(PARTICIPANTS).unwrap();
        let set = config.filterset("Declared").unwrap();

        let name = set.get("name").unwrap();
        assert_eq!(name.label(), "Name");
        assert_eq!(name.default_lookup(), "exact");
        assert_eq!(name.get_lookup("icontains").unwrap().label(), "contains (case-insensitive)");
        assert_eq!(name.get_lookup("exact").unwrap().label(), "is");
    }

    #[test]
    fn test_filtersets_builds_all() {
        let config = FilteringConfig::from_str(PARTICIPANTS).unwrap();
        let sets = config.filtersets().unwrap();
        assert_eq!(sets.keys().collect::<Vec<_>>(), ["Everything", "ByAge", "Declared"]);
    }

    #[test]
    fn test_unknown_filterset() {
        let config = FilteringConfig::from_str(PARTICIPANTS).unwrap();
        let err = config.filterset("Nope").unwrap_err();
        assert!(
            matches!(err, CatalogError::UnknownFilterSet { ref available, .. } if available == "Everything, ByAge, Declared")
        );
    }

    #[test]
    fn test_unknown_model() {
        let config = FilteringConfig::from_str(
            r#"
[filtersets.People]
model = "Person"
"#,
        )
        .unwrap();
        let err = config.filterset("People").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownModel { ref model, .. } if model == "Person"));
    }

    #[test]
    fn test_unknown_type() {
        let config = FilteringConfig::from_str(
            r#"
[models.Participant]
fields = [{ name = "photo", type = "Bytes" }]
"#,
        )
        .unwrap();
        let err = config.model("Participant").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownType { ref type_name, .. } if type_name == "Bytes"));
    }

    #[test]
    fn test_repeated_field_lookup() {
        let config = FilteringConfig::from_str(
            r#"
[models.Participant]
fields = [{ name = "age", type = "Int", lookups = ["gte", "gte"] }]

[filtersets.People]
model = "Participant"
fields = "__all__"
"#,
        )
        .unwrap();
        let err = config.filterset("People").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLookup { ref lookup, .. } if lookup == "gte"));
    }

    #[test]
    fn test_enum_without_values() {
        let config = FilteringConfig::from_str(
            r#"
[models.Participant]
fields = [{ name = "sex", type = "Enum" }]
"#,
        )
        .unwrap();
        assert!(matches!(
            config.model("Participant"),
            Err(CatalogError::Config { .. })
        ));
    }

    #[test]
    fn test_invalid_fields_sentinel() {
        let config = FilteringConfig::from_str(
            r#"
[models.Participant]
fields = [{ name = "age", type = "Int" }]

[filtersets.People]
model = "Participant"
fields = "all"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.filterset("People"),
            Err(CatalogError::Config { .. })
        ));
    }

    #[test]
    fn test_invalid_default_lookup_names_filter() {
        let config = FilteringConfig::from_str(
            r#"
[models.Participant]
fields = [{ name = "age", type = "Int" }]

[filtersets.People]
model = "Participant"

[filtersets.People.filters.age]
label = "Age"
default_lookup = "exact"
lookups = [{ name = "gte" }]
"#,
        )
        .unwrap();
        let err = config.filterset("People").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Configuration(ConfigurationError::InvalidDefaultLookup { ref filter, .. })
                if filter == "age"
        ));
    }

    #[test]
    fn test_custom_lookups() {
        let config = FilteringConfig::from_str(
            r#"
[models.Participant]
fields = [{ name = "name", type = "String" }]

[lookups.String.unaccent]
label = "matches ignoring accents"

[filtersets.People]
model = "Participant"
fields = "__all__"
"#,
        )
        .unwrap();
        let set = config.filterset("People").unwrap();
        assert_eq!(lookups(&set, "name").last().map(String::as_str), Some("unaccent"));
    }

    #[test]
    fn test_custom_lookups_unknown_type() {
        let config = FilteringConfig::from_str(
            r#"
[lookups.Bytes.prefix]
label = "starts with"
"#,
        )
        .unwrap();
        assert!(matches!(config.registry(), Err(CatalogError::Config { .. })));
    }

    #[test]
    fn test_choice_lookup() {
        let lookup = LookupConfig {
            name: "exact".to_string(),
            label: None,
            kind: LookupKind::Choice,
            choices: vec![("f".to_string(), "Female".to_string())],
        };
        assert_eq!(
            lookup.build().unwrap().input_kind(),
            &InputKind::Choice(vec![Choice::new("f", "Female")])
        );

        let empty = LookupConfig {
            choices: Vec::new(),
            ..lookup
        };
        assert!(empty.build().is_err());
    }

    #[test]
    fn test_deny_unknown_fields() {
        let err = FilteringConfig::from_str("[database]\nurl = \"x\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::Toml { .. }));
    }
}
