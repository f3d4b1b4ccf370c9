//! Configuration model loaded from external sources.

use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::pagination::DEFAULT_PAGE_SIZE;

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// Settings shared by the dashboard facade and the command-line tool.
pub struct DashboardConfig {
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,
    /// Network-level retries for reads; writes are never retried.
    #[serde(default)]
    pub retry: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Where the session token is persisted between runs.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
    #[serde(default = "default_fetch_all_page_size")]
    pub fetch_all_page_size: usize,
    #[serde(default = "default_max_fetch_pages")]
    pub max_fetch_pages: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

fn default_stale_time_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_fetch_all_page_size() -> usize {
    100
}

fn default_max_fetch_pages() -> usize {
    100
}

impl DashboardConfig {
    /// Reads `config/default`, the `APP_ENV` profile (default `local`) and
    /// `APP_*` environment variables, later sources winning.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            // Add `./config/default.yaml`
            .add_source(config::File::with_name("config/default"))
            // Add environment-specific overrides
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            // Add settings from the environment (with a prefix of APP)
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    /// Configured page size, falling back to the default for zero.
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
