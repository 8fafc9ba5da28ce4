//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{CollectorSettings, RunConfig};
use crate::engine::{self, Collector};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::loader::{load_credentials, load_parameter_sets};
use crate::query::validate_range;
use crate::types::AbortPolicy;
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match self.cli.command {
            Commands::Collect => self.collect().await,
            Commands::Plan => self.plan().await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load settings and apply command-line overrides
    pub(super) fn load_settings(&self) -> Result<CollectorSettings> {
        let mut settings = match &self.cli.settings {
            Some(path) => CollectorSettings::from_file(path)?,
            None => CollectorSettings::default(),
        };

        if let Some(output) = &self.cli.output {
            settings.output_dir.clone_from(output);
        }
        if self.cli.page_cap.is_some() {
            settings.page_cap = self.cli.page_cap;
        }
        if let Some(delay) = self.cli.delay_ms {
            settings.request_delay_ms = delay;
        }
        if self.cli.abort_run {
            settings.abort_policy = AbortPolicy::AbortRun;
        }

        Ok(settings)
    }

    /// Build the run config from settings, parameter table and credentials
    fn load_run_config(&self) -> Result<RunConfig> {
        let settings = self.load_settings()?;
        let parameter_sets = load_parameter_sets(self.cli.params.as_deref())?;
        let path = self
            .cli
            .credentials
            .as_ref()
            .ok_or_else(|| Error::config("Credentials file not specified (use -c flag)"))?;
        let credentials = load_credentials(path)?;

        let config = settings.into_run_config(parameter_sets, credentials);
        config.validate()?;
        Ok(config)
    }

    /// Collect every parameter set
    async fn collect(&self) -> Result<()> {
        let config = self.load_run_config()?;
        let report = engine::run(&config).await?;

        self.output(&report)
    }

    /// Print what a run would do
    async fn plan(&self) -> Result<()> {
        let config = self.load_run_config()?;
        let client = HttpClient::with_config(config.http.clone())?;
        let entries = Collector::new(Box::new(client), config).plan().await?;
        self.output(&entries)
    }

    /// Load every input and check the date ranges
    fn validate(&self) -> Result<()> {
        let config = self.load_run_config()?;
        HttpClient::with_config(config.http.clone())?;
        for params in &config.parameter_sets {
            validate_range(params)?;
        }

        info!("Inputs are valid");
        self.output(&json!({
            "parameter_sets": config.parameter_sets.len(),
            "credentials": config.credentials.len(),
            "output_dir": config.output_dir,
            "page_cap": config.page_cap,
        }))
    }

    /// Print a value in the selected format
    pub(super) fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}
