//! `prax-filtering options` command - Print the filtering options document.

use prax_filters::FilteringOptionsSchema;

use crate::cli::DocumentArgs;
use crate::config;
use crate::error::CliResult;

/// Run the options command
pub fn run(args: DocumentArgs) -> CliResult<()> {
    let filterset = config::load_filterset(args.target.config.as_deref(), &args.target.filterset)?;
    let options = FilteringOptionsSchema::new(&filterset);

    let text = if args.pretty {
        options.to_json_pretty()?
    } else {
        options.to_json()?
    };
    super::emit_document(&text, args.output.as_deref())
}
