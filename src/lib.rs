// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Flight Status Collector
//!
//! Collects the paginated flight status API into one JSON file per
//! result page.
//!
//! ## Features
//!
//! - **Canonical queries**: parameter sets encode to a deterministic
//!   query string that doubles as the artifact key
//! - **Resumable**: reruns skip every page already on disk
//! - **Credential rotation**: a failed request moves on to the next API key
//! - **Polite pacing**: fixed delay after every request plus an optional
//!   request quota
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flightstatus_collector::{run, Credential, Filter, ParameterSet, Result, RunConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let params = ParameterSet::builtin_default().with(Filter::Origin, "AMS");
//!     let config = RunConfig::new(vec![params], vec![Credential::new("my-key")])
//!         .with_page_cap(Some(2));
//!
//!     let report = run(&config).await?;
//!     println!("{} pages written", report.total_pages_written());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                Collector::run(RunConfig)                     │
//! │   for each ParameterSet: validate → resume → paginate        │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬───────────┬──────┴──────┬────────────┬────────────┐
//! │  Query   │   Auth    │    HTTP     │ Pagination │  Storage   │
//! ├──────────┼───────────┼─────────────┼────────────┼────────────┤
//! │ Filter   │ API-Key   │ GET         │ Page count │ Artifacts  │
//! │ Encoder  │ Rotation  │ Rate limit  │ Page cap   │ Resume     │
//! │ Range    │           │             │            │ Markers    │
//! └──────────┴───────────┴─────────────┴────────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the collector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Filters, parameter sets and the query encoder
pub mod query;

/// Credentials and the API key header
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Page-number pagination state
pub mod pagination;

/// Page artifacts and progress markers
pub mod storage;

/// Run configuration and settings file
pub mod config;

/// Collection engine
pub mod engine;

/// Parameter table and credential loading
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{Credential, CredentialPool};
pub use config::{CollectorSettings, RunConfig};
pub use engine::{run, Collector, RunReport, SetOutcome, SetReport};
pub use query::{encode, validate_range, EncodedQuery, Filter, ParameterSet};
pub use storage::ArtifactStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
