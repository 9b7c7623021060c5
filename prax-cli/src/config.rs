//! CLI configuration handling.

use std::path::{Path, PathBuf};

use prax_catalog::FilteringConfig;
use prax_filters::FilterSet;
use tracing::debug;

use crate::error::{CliError, CliResult};

pub use prax_catalog::CONFIG_FILE_NAME;

/// Resolve the configuration path, defaulting to `./prax-filtering.toml`.
pub fn resolve_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?.join(CONFIG_FILE_NAME),
    };

    if !path.exists() {
        return Err(CliError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }
    Ok(path)
}

/// Load the configuration file.
pub fn load(explicit: Option<&Path>) -> CliResult<(PathBuf, FilteringConfig)> {
    let path = resolve_path(explicit)?;
    debug!(path = %path.display(), "Loading configuration");
    let config = FilteringConfig::from_file(&path)?;
    Ok((path, config))
}

/// Load the configuration file and build one filter set from it.
pub fn load_filterset(explicit: Option<&Path>, name: &str) -> CliResult<FilterSet> {
    let (_, config) = load(explicit)?;
    Ok(config.filterset(name)?)
}
