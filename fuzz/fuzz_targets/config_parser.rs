//! Fuzz target for the `prax-filtering.toml` parser.
//!
//! Feeds arbitrary TOML to the configuration loader and builds every filter
//! set it declares.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use prax_catalog::FilteringConfig;
use prax_filters::JsonSchema;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    // Parsing and building only ever return errors
    let Ok(config) = FilteringConfig::from_str(input) else {
        return;
    };
    if let Ok(sets) = config.filtersets() {
        for set in sets.values() {
            assert!(JsonSchema::new(set).check().is_ok());
        }
    }
});
