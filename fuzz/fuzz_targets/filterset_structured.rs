//! Structured fuzz target for filter set construction.
//!
//! Builds filters from arbitrary names, lookups and defaults. Construction
//! either fails with a configuration error or yields documents that agree
//! with each other.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_filterset_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use indexmap::IndexMap;
use libfuzzer_sys::fuzz_target;
use prax_filters::{
    FieldCatalog, FieldDescriptor, Filter, FilterSet, FilteringOptionsSchema, JsonSchema, Lookup,
    LookupDescriptor,
};
use smol_str::SmolStr;

struct NoFields;

impl FieldCatalog for NoFields {
    fn model_name(&self) -> &str {
        "Fuzz"
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        Vec::new()
    }

    fn lookups_for(&self, _field: &str) -> IndexMap<SmolStr, LookupDescriptor> {
        IndexMap::new()
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzFilter {
    name: String,
    lookups: Vec<(String, bool)>,
    default_lookup: Option<String>,
}

fuzz_target!(|filters: Vec<FuzzFilter>| {
    let mut builder = FilterSet::builder(&NoFields);
    for filter in filters.iter().take(16) {
        let lookups = filter.lookups.iter().take(8).map(|(name, toggle)| {
            if *toggle {
                Lookup::toggle(name.as_str(), name.as_str())
            } else {
                Lookup::input(name.as_str(), name.as_str())
            }
        });
        let default = filter
            .default_lookup
            .clone()
            .or_else(|| filter.lookups.first().map(|(name, _)| name.clone()))
            .unwrap_or_default();
        let Ok(built) = Filter::new(filter.name.as_str(), lookups, default) else {
            return;
        };
        builder = builder.filter(filter.name.as_str(), built);
    }

    let Ok(set) = builder.build() else {
        return;
    };
    let schema = JsonSchema::new(&set);
    let options = FilteringOptionsSchema::new(&set);
    assert_eq!(
        schema.schema()["$defs"].as_object().map(|defs| defs.len()),
        Some(set.len() + 3)
    );
    assert_eq!(
        options.schema()["filters"].as_object().map(|f| f.len()),
        Some(set.len())
    );
});
