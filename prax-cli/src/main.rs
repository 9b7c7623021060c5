//! Prax Filtering CLI - Command-line interface for Prax filter sets.

use clap::Parser;

use prax_cli::cli::{Cli, Command};
use prax_cli::commands;
use prax_cli::error::CliResult;
use prax_cli::output;
use prax_filters::logging;

fn main() {
    if let Err(e) = run() {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    if cli.verbose {
        logging::init_with_level("debug");
    } else {
        logging::init();
    }

    match cli.command {
        Command::Schema(args) => commands::schema::run(args),
        Command::Options(args) => commands::options::run(args),
        Command::Validate(args) => commands::validate::run(args),
        Command::Check(args) => commands::check::run(args),
        Command::Version => commands::version::run(),
    }
}
