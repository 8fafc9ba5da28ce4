//! Storage module
//!
//! Page artifacts on local disk and the resume logic built on them.
//!
//! # Overview
//!
//! The storage module provides:
//! - `ArtifactStore` - deterministic artifact paths, atomic writes, and
//!   the resume-point scanner
//! - `ProgressMarker` - per-query hint of the next page and the last known
//!   page count
//!
//! Artifacts are the only source of truth: a page counts as collected
//! exactly when its final file exists. Writes go through a temporary file
//! and a rename, so a file under the final name is always complete.

mod marker;
mod store;

pub use marker::ProgressMarker;
pub use store::{ArtifactStore, DEFAULT_ARTIFACT_PREFIX};
