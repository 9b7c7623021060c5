//! `prax-filtering schema` command - Print the JSON Schema of a filter set.

use prax_filters::JsonSchema;
use tracing::debug;

use crate::cli::DocumentArgs;
use crate::config;
use crate::error::CliResult;

/// Run the schema command
pub fn run(args: DocumentArgs) -> CliResult<()> {
    let filterset = config::load_filterset(args.target.config.as_deref(), &args.target.filterset)?;
    let schema = JsonSchema::new(&filterset);
    schema.check()?;
    debug!(filterset = %args.target.filterset, "Emitting JSON Schema");

    let text = if args.pretty {
        schema.to_json_pretty()?
    } else {
        schema.to_json()?
    };
    super::emit_document(&text, args.output.as_deref())
}
