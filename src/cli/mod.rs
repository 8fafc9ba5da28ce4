//! CLI module
//!
//! Command-line interface for running collections.
//!
//! # Commands
//!
//! - `collect` - Fetch every parameter set and write the page artifacts
//! - `plan` - Show encoded queries and resume points, no requests sent
//! - `validate` - Load settings, parameter table and credentials

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
