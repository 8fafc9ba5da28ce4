//! Configuration types
//!
//! `RunConfig` is everything one collection run needs. `CollectorSettings`
//! is its on-disk form: a YAML file whose fields all have defaults, so an
//! empty file (or no file) reproduces the stock behaviour.

use crate::auth::{Credential, DEFAULT_API_KEY_HEADER};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use crate::query::ParameterSet;
use crate::storage::DEFAULT_ARTIFACT_PREFIX;
use crate::types::{AbortPolicy, ResumeStrategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default pause after every request, successful or not
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(1500);

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "data";

// ============================================================================
// Run Config
// ============================================================================

/// Everything a collection run needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Parameter sets, collected in order
    pub parameter_sets: Vec<ParameterSet>,
    /// Credentials, tried in order
    pub credentials: Vec<Credential>,
    /// Directory the artifacts are written to
    pub output_dir: PathBuf,
    /// Artifact file name prefix
    pub artifact_prefix: String,
    /// Highest page number (exclusive) to collect per parameter set
    pub page_cap: Option<u32>,
    /// Pause after every request attempt
    pub request_delay: Duration,
    /// What to do when every credential failed on a page
    pub abort_policy: AbortPolicy,
    /// How the resume point is located
    pub resume_strategy: ResumeStrategy,
    /// HTTP client settings
    pub http: HttpClientConfig,
}

impl RunConfig {
    /// Create a config with default settings
    pub fn new(parameter_sets: Vec<ParameterSet>, credentials: Vec<Credential>) -> Self {
        Self {
            parameter_sets,
            credentials,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            artifact_prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
            page_cap: None,
            request_delay: DEFAULT_REQUEST_DELAY,
            abort_policy: AbortPolicy::default(),
            resume_strategy: ResumeStrategy::default(),
            http: HttpClientConfig::default(),
        }
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the artifact prefix
    #[must_use]
    pub fn with_artifact_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.artifact_prefix = prefix.into();
        self
    }

    /// Set the page cap
    #[must_use]
    pub fn with_page_cap(mut self, cap: Option<u32>) -> Self {
        self.page_cap = cap;
        self
    }

    /// Set the inter-request delay
    #[must_use]
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Set the abort policy
    #[must_use]
    pub fn with_abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.abort_policy = policy;
        self
    }

    /// Set the resume strategy
    #[must_use]
    pub fn with_resume_strategy(mut self, strategy: ResumeStrategy) -> Self {
        self.resume_strategy = strategy;
        self
    }

    /// Set the HTTP client settings
    #[must_use]
    pub fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Check settings that do not depend on the parameter sets
    pub fn validate(&self) -> Result<()> {
        if self.credentials.is_empty() {
            return Err(Error::config("No credentials supplied"));
        }
        if self.artifact_prefix.is_empty() {
            return Err(Error::invalid_value("artifact_prefix", "must not be empty"));
        }
        if self.artifact_prefix.contains(['/', '\\']) {
            return Err(Error::invalid_value(
                "artifact_prefix",
                "must not contain path separators",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Settings File
// ============================================================================

/// Settings loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorSettings {
    /// Flight status endpoint
    pub base_url: String,
    /// Directory the artifacts are written to
    pub output_dir: PathBuf,
    /// Artifact file name prefix
    pub artifact_prefix: String,
    /// Header carrying the credential
    pub api_key_header: String,
    /// Highest page number (exclusive) to collect per parameter set
    pub page_cap: Option<u32>,
    /// Pause after every request, in milliseconds
    pub request_delay_ms: u64,
    /// Request timeout, in seconds
    pub timeout_secs: u64,
    /// Request quota; `null` disables the limiter
    pub requests_per_second: Option<u32>,
    /// What to do when every credential failed on a page
    pub abort_policy: AbortPolicy,
    /// How the resume point is located
    pub resume_strategy: ResumeStrategy,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            artifact_prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            page_cap: None,
            request_delay_ms: DEFAULT_REQUEST_DELAY.as_millis() as u64,
            timeout_secs: 30,
            requests_per_second: Some(1),
            abort_policy: AbortPolicy::default(),
            resume_strategy: ResumeStrategy::default(),
        }
    }
}

impl CollectorSettings {
    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read settings file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// HTTP client settings derived from these settings
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .api_key_header(&self.api_key_header)
            .timeout(Duration::from_secs(self.timeout_secs));

        let builder = match self.requests_per_second {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        };
        builder.build()
    }

    /// Combine with the loaded inputs into a run config
    pub fn into_run_config(
        self,
        parameter_sets: Vec<ParameterSet>,
        credentials: Vec<Credential>,
    ) -> RunConfig {
        let http = self.http_config();
        RunConfig::new(parameter_sets, credentials)
            .with_output_dir(&self.output_dir)
            .with_artifact_prefix(self.artifact_prefix)
            .with_page_cap(self.page_cap)
            .with_request_delay(Duration::from_millis(self.request_delay_ms))
            .with_abort_policy(self.abort_policy)
            .with_resume_strategy(self.resume_strategy)
            .with_http(http)
    }
}
