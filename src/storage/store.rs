//! Artifact store implementation
//!
//! Provides file-based page persistence with atomic writes.

use super::marker::ProgressMarker;
use crate::error::{Error, Result};
use crate::query::EncodedQuery;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name prefix of every artifact
pub const DEFAULT_ARTIFACT_PREFIX: &str = "afklm_api_data_collection";

/// Directory (inside the output directory) holding progress markers
const MARKER_DIR: &str = ".progress";

/// Page artifacts under one output directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// Output directory
    dir: PathBuf,
    /// Artifact file name prefix
    prefix: String,
}

impl ArtifactStore {
    /// Create a store rooted at `dir` using the default prefix
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_prefix(dir, DEFAULT_ARTIFACT_PREFIX)
    }

    /// Create a store with a custom file name prefix
    pub fn with_prefix(dir: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory if it does not exist
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::storage(format!(
                "Failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })
    }

    /// Path of the artifact for `(query, page)`.
    ///
    /// A pure function of its arguments.
    pub fn artifact_path(&self, query: &EncodedQuery, page: u32) -> PathBuf {
        self.dir
            .join(format!("{}_{}_{page}.json", self.prefix, query.storage_key()))
    }

    /// Path of the progress marker for `query`
    pub fn marker_path(&self, query: &EncodedQuery) -> PathBuf {
        self.dir
            .join(MARKER_DIR)
            .join(format!("{}_{}.json", self.prefix, query.storage_key()))
    }

    /// Whether the artifact for `(query, page)` exists
    pub async fn exists(&self, query: &EncodedQuery, page: u32) -> Result<bool> {
        let path = self.artifact_path(query, page);
        tokio::fs::try_exists(&path).await.map_err(|e| {
            Error::storage(format!("Failed to probe '{}': {e}", path.display()))
        })
    }

    /// First page, starting at 0, with no artifact.
    ///
    /// Probing stops at the first gap, so a page missing in the middle of a
    /// run is where collection resumes.
    pub async fn resume_point(&self, query: &EncodedQuery) -> Result<u32> {
        self.probe_from(query, 0).await
    }

    /// Like [`Self::resume_point`], but starts probing at `hint` when the
    /// page right before it is present. Falls back to probing from 0.
    pub async fn resume_point_from(&self, query: &EncodedQuery, hint: u32) -> Result<u32> {
        if hint > 0 && self.exists(query, hint - 1).await? {
            self.probe_from(query, hint).await
        } else {
            self.resume_point(query).await
        }
    }

    async fn probe_from(&self, query: &EncodedQuery, start: u32) -> Result<u32> {
        let mut page = start;
        while self.exists(query, page).await? {
            page += 1;
        }
        Ok(page)
    }

    /// Persist a page body as pretty-printed JSON.
    ///
    /// Returns `false` without touching the file when the artifact already
    /// exists; artifacts are never overwritten.
    pub async fn write_page(&self, query: &EncodedQuery, page: u32, body: &Value) -> Result<bool> {
        let path = self.artifact_path(query, page);
        if self.exists(query, page).await? {
            debug!("Artifact {} already present, leaving it untouched", path.display());
            return Ok(false);
        }

        let contents = to_pretty_json(body)?;
        write_atomic(&path, &contents).await?;
        Ok(true)
    }

    /// Load the progress marker for `query`.
    ///
    /// A missing marker is `None`; an unreadable one is logged and ignored,
    /// since the artifacts remain authoritative.
    pub async fn load_marker(&self, query: &EncodedQuery) -> Result<Option<ProgressMarker>> {
        let path = self.marker_path(query);
        let present = tokio::fs::try_exists(&path).await.map_err(|e| {
            Error::storage(format!("Failed to probe '{}': {e}", path.display()))
        })?;
        if !present {
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            Error::storage(format!("Failed to read marker '{}': {e}", path.display()))
        })?;

        match serde_json::from_str(&contents) {
            Ok(marker) => Ok(Some(marker)),
            Err(e) => {
                warn!("Ignoring unreadable progress marker {}: {e}", path.display());
                Ok(None)
            }
        }
    }

    /// Save the progress marker for `query`
    pub async fn save_marker(&self, query: &EncodedQuery, marker: &ProgressMarker) -> Result<()> {
        let path = self.marker_path(query);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::storage(format!("Failed to create '{}': {e}", parent.display()))
            })?;
        }

        let contents = to_pretty_json(marker)?;
        write_atomic(&path, &contents).await
    }
}

/// Serialize with a four-space indent
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write to a temp file first, then rename for atomicity
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, contents).await.map_err(|e| {
        Error::storage(format!("Failed to write '{}': {e}", temp_path.display()))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        Error::storage(format!("Failed to rename into '{}': {e}", path.display()))
    })?;

    Ok(())
}
