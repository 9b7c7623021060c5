//! Prax Filtering CLI - Command-line interface for Prax filter sets.
//!
//! This crate provides the `prax-filtering` tool, which builds the filter sets
//! declared in `prax-filtering.toml`, prints their JSON Schema and options
//! documents, and validates filter-expression documents against them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
