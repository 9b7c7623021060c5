//! CLI command implementations.

pub mod check;
pub mod options;
pub mod schema;
pub mod validate;
pub mod version;

use std::path::Path;

use crate::error::CliResult;
use crate::output;

/// Print a rendered document, or write it to `output` when given.
pub(crate) fn emit_document(text: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))?;
            output::success(&format!("Wrote {}", path.display()));
        }
        None => output::document(text),
    }
    Ok(())
}
