//! Engine types
//!
//! Reports produced by a collection run.

use crate::error::Error;
use crate::pagination::StopReason;
use crate::query::{EncodedQuery, ParameterSet};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// How collection of one parameter set ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SetOutcome {
    /// Pagination ran to a normal stop
    Completed {
        /// Why it stopped
        reason: StopReason,
    },
    /// Nothing left to fetch according to existing artifacts
    AlreadyComplete {
        /// Why nothing was fetched
        reason: StopReason,
    },
    /// Every credential failed on the same page
    CredentialsExhausted {
        /// Page that could not be fetched
        page: u32,
        /// Size of the credential pool
        credentials: usize,
    },
}

impl SetOutcome {
    /// Check if every credential failed
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::CredentialsExhausted { .. })
    }
}

/// One failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialFailure {
    /// Position of the credential in the pool
    pub credential_index: usize,
    /// Page that was requested
    pub page: u32,
    /// What went wrong
    pub error: String,
}

/// Result of collecting one parameter set
#[derive(Debug, Clone, Serialize)]
pub struct SetReport {
    /// Position of the parameter set in the run
    pub index: usize,
    /// Encoded query
    pub query: EncodedQuery,
    /// First page that had no artifact when collection started
    pub resume_point: u32,
    /// First page without an artifact when collection ended
    pub next_page: u32,
    /// Page count reported by the server, if any response was seen
    pub total_pages: Option<u32>,
    /// Number of requests sent
    pub requests: u32,
    /// Pages written during this run
    pub pages_written: Vec<u32>,
    /// Failed requests, in order
    pub failures: Vec<CredentialFailure>,
    /// How collection ended
    pub outcome: SetOutcome,
}

impl SetReport {
    /// Error describing a credential exhaustion, if that is how the set ended
    pub fn exhaustion_error(&self) -> Option<Error> {
        match self.outcome {
            SetOutcome::CredentialsExhausted { page, credentials } => {
                Some(Error::CredentialsExhausted {
                    query: self.query.to_string(),
                    page,
                    credentials,
                })
            }
            _ => None,
        }
    }
}

/// Result of a whole collection run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Per parameter set results, in run order
    pub sets: Vec<SetReport>,
    /// Set when credential exhaustion stopped the run
    pub stopped_early: bool,
    /// Parameter sets never started because the run stopped early
    pub not_attempted: usize,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Create an empty report starting now
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            sets: Vec::new(),
            stopped_early: false,
            not_attempted: 0,
            started_at: now,
            finished_at: now,
        }
    }

    /// Total requests sent
    pub fn total_requests(&self) -> u32 {
        self.sets.iter().map(|s| s.requests).sum()
    }

    /// Total artifacts written
    pub fn total_pages_written(&self) -> usize {
        self.sets.iter().map(|s| s.pages_written.len()).sum()
    }

    /// Parameter sets that ended with every credential failing
    pub fn exhausted_sets(&self) -> impl Iterator<Item = &SetReport> {
        self.sets.iter().filter(|s| s.outcome.is_exhausted())
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Utc::now();
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

/// What a run would do for one parameter set, computed without network access
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    /// Position of the parameter set
    pub index: usize,
    /// The parameter set as loaded
    pub parameters: ParameterSet,
    /// Encoded query
    pub query: EncodedQuery,
    /// First page without an artifact
    pub resume_point: u32,
    /// Page count from the progress marker, if any
    pub total_pages: Option<u32>,
    /// Artifact the next request would write
    pub next_artifact: PathBuf,
    /// Why a run would stop before reaching this set, if it would
    pub error: Option<String>,
}
