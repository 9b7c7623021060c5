//! `prax-filtering version` command - Display version information.

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the version command
pub fn run() -> CliResult<()> {
    output::header("Prax Filtering");

    kv("Version", VERSION);
    kv("Package", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);
    kv("Config file", crate::config::CONFIG_FILE_NAME);

    output::newline();

    output::section("Components");
    kv("prax-filters", VERSION);
    kv("prax-catalog", VERSION);

    output::newline();
    output::info("JSON Schema dialect: draft 2020-12");

    Ok(())
}
