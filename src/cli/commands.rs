//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated flight status collector
#[derive(Parser, Debug)]
#[command(name = "flightstatus-collector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Parameter table (.csv, .yaml or .yml); the built-in set when omitted
    #[arg(short, long, global = true)]
    pub params: Option<PathBuf>,

    /// Credentials file, one API key per line
    #[arg(short, long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Output directory (overrides the settings file)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Highest page number (exclusive) to collect per parameter set
    #[arg(long, global = true)]
    pub page_cap: Option<u32>,

    /// Pause after every request, in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Stop the whole run when every credential fails on a page
    #[arg(long, global = true)]
    pub abort_run: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Collect every parameter set
    Collect,

    /// Show encoded queries and resume points without sending requests
    Plan,

    /// Load and validate the inputs
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
