//! `prax-filtering validate` command - Validate a filter-expression document.

use std::io::Read;
use std::path::Path;

use prax_filters::{ExpressionError, JsonSchema};
use serde_json::Value;

use crate::cli::ValidateArgs;
use crate::config;
use crate::error::{CliError, CliResult};
use crate::output::{self, success};

/// Run the validate command
pub fn run(args: ValidateArgs) -> CliResult<()> {
    output::header("Validate Filter Expression");

    let filterset = config::load_filterset(args.target.config.as_deref(), &args.target.filterset)?;
    output::kv("Filter set", &args.target.filterset);
    output::kv("Document", &args.document.display().to_string());
    output::newline();

    output::step(1, 3, "Parsing document...");
    let text = read_document(&args.document)?;
    let document: Value = serde_json::from_str(&text)?;

    output::step(2, 3, "Checking against the JSON Schema...");
    let structural = JsonSchema::new(&filterset).validate_document(&document);

    output::step(3, 3, "Checking filters, lookups and values...");
    let semantic = match structural {
        Ok(()) => filterset.parse_expression(&text).map(drop),
        Err(_) => Ok(()),
    };

    output::newline();

    let errors = match (structural, semantic) {
        (Ok(()), Ok(())) => {
            success("Filter expression is valid!");
            return Ok(());
        }
        (Err(ExpressionError::SchemaViolation { errors }), _) => errors,
        (Err(other), _) => vec![other.to_string()],
        (Ok(()), Err(err)) => vec![err.to_string()],
    };

    output::error("Filter expression is invalid!");
    output::newline();
    output::section("Errors");
    for error in &errors {
        output::list_item(error);
    }
    Err(CliError::Validation(format!(
        "Found {} validation errors",
        errors.len()
    )))
}

fn read_document(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }

    if !path.exists() {
        return Err(CliError::Config(format!(
            "Document not found: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}
