//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Prax Filtering CLI - filter schemas for Prax models
#[derive(Parser, Debug)]
#[command(name = "prax-filtering")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Prax Filtering CLI - filter schemas for Prax models", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the JSON Schema of a filter set
    Schema(DocumentArgs),

    /// Print the filtering options document of a filter set
    Options(DocumentArgs),

    /// Validate a filter-expression document against a filter set
    Validate(ValidateArgs),

    /// Check that every configured filter set builds
    Check(CheckArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Shared Arguments
// =============================================================================

/// Selects a filter set from a configuration file
#[derive(Args, Debug, Clone)]
pub struct FilterSetArgs {
    /// Path to the configuration file (defaults to ./prax-filtering.toml)
    #[arg(short, long, env = "PRAX_FILTERING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name of the filter set
    #[arg(short, long)]
    pub filterset: String,
}

// =============================================================================
// Schema / Options Commands
// =============================================================================

/// Arguments for the `schema` and `options` commands
#[derive(Args, Debug)]
pub struct DocumentArgs {
    #[command(flatten)]
    pub target: FilterSetArgs,

    /// Pretty-print the document
    #[arg(short, long)]
    pub pretty: bool,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// =============================================================================
// Validate Command
// =============================================================================

/// Arguments for the `validate` command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub target: FilterSetArgs,

    /// Filter-expression document to validate (`-` reads stdin)
    pub document: PathBuf,
}

// =============================================================================
// Check Command
// =============================================================================

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file (defaults to ./prax-filtering.toml)
    #[arg(short, long, env = "PRAX_FILTERING_CONFIG")]
    pub config: Option<PathBuf>,
}
