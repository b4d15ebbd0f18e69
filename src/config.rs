//! Runtime settings: source URLs and fetch policy.
//!
//! Settings are resolved in three layers: built-in defaults, an optional YAML
//! file, then command-line overrides.
//!
//! ```yaml
//! sources:
//!   foxnews_url: https://www.foxnews.com
//!   nbc_url: https://www.nbcnews.com
//! fetch:
//!   max_retries: 3
//!   delay_secs: 1
//!   timeout_secs: 15
//! ```

use crate::cli::Cli;
use crate::fetch::RetryPolicy;
use crate::models::Source;
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

/// Desktop browser identity sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Homepage URLs for each source.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceUrls {
    pub foxnews_url: String,
    pub nbc_url: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            foxnews_url: "https://www.foxnews.com".to_string(),
            nbc_url: "https://www.nbcnews.com".to_string(),
        }
    }
}

impl SourceUrls {
    pub fn url_for(&self, source: Source) -> &str {
        match source {
            Source::FoxNews => &self.foxnews_url,
            Source::Nbc => &self.nbc_url,
        }
    }
}

/// Request identity, timeout and retry policy.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchSettings {
    /// Total attempts per source, including the first one.
    pub max_retries: u32,
    pub delay_secs: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_secs: 1,
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchSettings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_secs(self.delay_secs))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything a collection cycle needs to know.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub sources: SourceUrls,
    pub fetch: FetchSettings,
    #[serde(skip)]
    pub seed_path: PathBuf,
    #[serde(skip)]
    pub historical_path: PathBuf,
    #[serde(skip)]
    pub verbose: bool,
}

impl Settings {
    /// Parse settings from a YAML document; absent keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load settings from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&text)?;
        info!("Loaded settings file");
        Ok(settings)
    }

    /// Resolve the final settings for a run from the command line.
    pub fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_cli(cli);
        Ok(settings)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(max_retries) = cli.max_retries {
            self.fetch.max_retries = max_retries;
        }
        if let Some(delay_secs) = cli.delay_secs {
            self.fetch.delay_secs = delay_secs;
        }
        if let Some(timeout_secs) = cli.timeout_secs {
            self.fetch.timeout_secs = timeout_secs;
        }
        self.seed_path = cli.seed_path.clone();
        self.historical_path = cli.historical_path.clone();
        self.verbose = cli.verbose;
    }
}
