//! `prax-filtering check` command - Build and check every configured filter set.

use prax_filters::JsonSchema;

use crate::cli::CheckArgs;
use crate::config;
use crate::error::{CliError, CliResult};
use crate::output::{self, success, warn};

/// Run the check command
pub fn run(args: CheckArgs) -> CliResult<()> {
    output::header("Check Configuration");

    let (path, config) = config::load(args.config.as_deref())?;
    output::kv("Config", &path.display().to_string());
    output::kv("Models", &config.models.len().to_string());
    output::kv("Filter sets", &config.filtersets.len().to_string());
    output::newline();

    if config.filtersets.is_empty() {
        warn("No filter sets are configured");
        return Ok(());
    }

    let total = config.filtersets.len();
    let mut failures = Vec::new();
    for (index, name) in config.filterset_names().enumerate() {
        output::step(index + 1, total, &format!("Building {name}..."));
        let checked = config
            .filterset(name)
            .map_err(CliError::from)
            .and_then(|set| {
                JsonSchema::new(&set).check()?;
                Ok(set)
            });

        match checked {
            Ok(set) if set.is_empty() => {
                warn(&format!("{name} has no filters"));
            }
            Ok(set) => {
                let names: Vec<&str> = set.names().collect();
                output::dim(&format!("    {} filters: {}", set.len(), names.join(", ")));
            }
            Err(e) => failures.push(format!("{name}: {e}")),
        }
    }

    output::newline();

    if failures.is_empty() {
        success(&format!("All {total} filter sets are valid!"));
        return Ok(());
    }

    output::error("Configuration check failed!");
    output::newline();
    output::section("Errors");
    for failure in &failures {
        output::list_item(failure);
    }
    Err(CliError::Validation(format!(
        "{} of {total} filter sets failed",
        failures.len()
    )))
}
