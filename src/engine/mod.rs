//! Collection engine module
//!
//! Drives the fetch/pagination loop over every parameter set.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Collector` - runs the loop for each parameter set in order
//! - `run` - builds the HTTP client from a `RunConfig` and runs a collector
//! - Report types (`RunReport`, `SetReport`, `SetOutcome`, `PlanEntry`)
//!
//! One request is in flight at a time. After every attempt, successful or
//! not, the collector sleeps the configured delay. A failed attempt moves
//! to the next credential and repeats the same page; when the pool runs
//! out the parameter set is abandoned (or the run stopped, depending on
//! the abort policy).

mod types;

pub use types::{CredentialFailure, PlanEntry, RunReport, SetOutcome, SetReport};

use crate::auth::CredentialPool;
use crate::config::RunConfig;
use crate::error::Result;
use crate::http::{HttpClient, PageSource};
use crate::pagination::{extract_total_pages, PaginationState, StopReason};
use crate::query::{encode, validate_range, EncodedQuery, ParameterSet};
use crate::storage::{ArtifactStore, ProgressMarker};
use crate::types::{AbortPolicy, ResumeStrategy};
use tracing::{debug, error, info, warn};

/// Run a collection against the configured endpoint
pub async fn run(config: &RunConfig) -> Result<RunReport> {
    let client = HttpClient::with_config(config.http.clone())?;
    Collector::new(Box::new(client), config.clone())
        .run()
        .await
}

/// Collects every parameter set of a run
pub struct Collector {
    /// Where pages come from
    source: Box<dyn PageSource>,
    /// Where pages go
    store: ArtifactStore,
    /// Run configuration
    config: RunConfig,
}

impl Collector {
    /// Create a collector reading from `source`
    pub fn new(source: Box<dyn PageSource>, config: RunConfig) -> Self {
        let store = ArtifactStore::with_prefix(&config.output_dir, &config.artifact_prefix);
        Self {
            source,
            store,
            config,
        }
    }

    /// Get the artifact store
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Get the run configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Collect every parameter set in order.
    ///
    /// An invalid date range aborts the run with an error before any
    /// request for that set is sent; sets collected earlier keep their
    /// artifacts.
    pub async fn run(&self) -> Result<RunReport> {
        self.config.validate()?;
        let mut pool = CredentialPool::new(self.config.credentials.clone())?;
        self.store.ensure_dir().await?;

        let total = self.config.parameter_sets.len();
        info!(
            "Collecting {total} parameter set(s) with {} credential(s)",
            pool.len()
        );

        let mut report = RunReport::new();
        for (index, params) in self.config.parameter_sets.iter().enumerate() {
            validate_range(params)?;
            pool.reset();

            let set = self.collect_set(index, params, &mut pool).await?;
            let exhausted = set.outcome.is_exhausted();
            log_outcome(&set);
            report.sets.push(set);

            if exhausted && self.config.abort_policy == AbortPolicy::AbortRun {
                report.stopped_early = true;
                report.not_attempted = total - index - 1;
                warn!(
                    "Stopping run, {} parameter set(s) not attempted",
                    report.not_attempted
                );
                break;
            }
        }

        report.finish();
        info!(
            "Run finished: {} request(s), {} page(s) written in {}ms",
            report.total_requests(),
            report.total_pages_written(),
            report.duration_ms()
        );
        Ok(report)
    }

    /// Describe what a run would do, without sending any request
    pub async fn plan(&self) -> Result<Vec<PlanEntry>> {
        let mut entries = Vec::with_capacity(self.config.parameter_sets.len());
        let mut blocked: Option<String> = None;

        for (index, params) in self.config.parameter_sets.iter().enumerate() {
            let query = encode(params);
            let marker = self.store.load_marker(&query).await?;
            let resume_point = self.resume_point(&query, marker.as_ref()).await?;

            if blocked.is_none() {
                if let Err(e) = validate_range(params) {
                    blocked = Some(e.to_string());
                }
            }

            entries.push(PlanEntry {
                index,
                parameters: params.clone(),
                next_artifact: self.store.artifact_path(&query, resume_point),
                total_pages: marker.and_then(|m| m.total_pages),
                query,
                resume_point,
                error: blocked.clone(),
            });
        }

        Ok(entries)
    }

    async fn resume_point(
        &self,
        query: &EncodedQuery,
        marker: Option<&ProgressMarker>,
    ) -> Result<u32> {
        match (self.config.resume_strategy, marker) {
            (ResumeStrategy::Marker, Some(marker)) => {
                self.store.resume_point_from(query, marker.next_page).await
            }
            _ => self.store.resume_point(query).await,
        }
    }

    async fn collect_set(
        &self,
        index: usize,
        params: &ParameterSet,
        pool: &mut CredentialPool,
    ) -> Result<SetReport> {
        let query = encode(params);
        let marker = self.store.load_marker(&query).await?;
        let resume_point = self.resume_point(&query, marker.as_ref()).await?;
        let mut state = PaginationState::new(resume_point, self.config.page_cap);

        let mut report = SetReport {
            index,
            query: query.clone(),
            resume_point,
            next_page: resume_point,
            total_pages: marker.as_ref().and_then(|m| m.total_pages),
            requests: 0,
            pages_written: Vec::new(),
            failures: Vec::new(),
            outcome: SetOutcome::Completed {
                reason: StopReason::LastPage,
            },
        };

        info!("Parameter set {index}: '{query}' resuming at page {resume_point}");

        if let Some(reason) = state.stop_reason() {
            report.outcome = SetOutcome::AlreadyComplete { reason };
            return Ok(report);
        }
        if marker.is_some_and(|m| m.is_complete_at(resume_point)) {
            report.outcome = SetOutcome::AlreadyComplete {
                reason: StopReason::LastPage,
            };
            return Ok(report);
        }

        loop {
            let page = state.page_number();
            let credential = pool.current();
            info!(
                "Fetching page {page} of {} for '{query}' with key {}",
                state.total_pages().map_or("?".to_string(), |t| t.to_string()),
                credential.masked()
            );

            let result = self.source.fetch_page(&query, page, credential).await;
            report.requests += 1;
            if !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            match result {
                Ok(body) => {
                    let total_pages = extract_total_pages(&body);
                    if self.store.write_page(&query, page, &body).await? {
                        report.pages_written.push(page);
                    }
                    state.record_page(total_pages);
                    report.next_page = state.page_number();
                    if state.total_pages().is_some() {
                        report.total_pages = state.total_pages();
                    }

                    let marker = ProgressMarker::new(state.page_number(), report.total_pages);
                    if let Err(e) = self.store.save_marker(&query, &marker).await {
                        warn!("Failed to save progress marker for '{query}': {e}");
                    }

                    if let Some(reason) = state.stop_reason() {
                        report.outcome = SetOutcome::Completed { reason };
                        break;
                    }
                }
                Err(e) if e.is_fetch_failure() => {
                    warn!(
                        "Page {page} failed with key {}: {e}",
                        pool.current().masked()
                    );
                    report.failures.push(CredentialFailure {
                        credential_index: pool.index(),
                        page,
                        error: e.to_string(),
                    });

                    if pool.advance() {
                        info!("Trying next API key ({}/{})", pool.index() + 1, pool.len());
                    } else {
                        report.outcome = SetOutcome::CredentialsExhausted {
                            page,
                            credentials: pool.len(),
                        };
                        break;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}

fn log_outcome(set: &SetReport) {
    match &set.outcome {
        SetOutcome::Completed { reason } => info!(
            "Parameter set {} done ({reason:?}): {} page(s) written, next page {}",
            set.index,
            set.pages_written.len(),
            set.next_page
        ),
        SetOutcome::AlreadyComplete { reason } => {
            debug!(
                "Parameter set {} already complete ({reason:?}), nothing fetched",
                set.index
            );
        }
        SetOutcome::CredentialsExhausted { .. } => {
            if let Some(e) = set.exhaustion_error() {
                error!("{e}");
            }
        }
    }
}
