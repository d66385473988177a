//! Configuration module
//!
//! Builds the explicit configuration value the monitor runs with: dbt Cloud
//! credentials from the environment plus the polling settings from the
//! command line.

use std::time::Duration;

use heartbeat_client::DEFAULT_BASE_URL;
use thiserror::Error;

/// Environment variable holding the dbt Cloud API token
pub const API_KEY_VAR: &str = "DBT_CLOUD_API_KEY";
/// Environment variable holding the dbt Cloud account id
pub const ACCOUNT_ID_VAR: &str = "DBT_CLOUD_ACCOUNT_ID";
/// Optional environment variable overriding the dbt Cloud host
pub const BASE_URL_VAR: &str = "DBT_CLOUD_BASE_URL";

/// Default seconds between two polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Monitor configuration
///
/// Constructed once at startup and passed by reference; nothing reads the
/// environment after this point.
#[derive(Clone)]
pub struct Config {
    /// dbt Cloud API token
    pub api_key: String,

    /// dbt Cloud account id
    pub account_id: String,

    /// dbt Cloud host (e.g., "https://cloud.getdbt.com")
    pub base_url: String,

    /// How long to wait between two status fetches
    pub poll_interval: Duration,

    /// Upper bound on a single HTTP request
    pub request_timeout: Duration,
}

/// Startup-time configuration failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required environment variables were absent or empty
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DBT_CLOUD_API_KEY (required)
    /// - DBT_CLOUD_ACCOUNT_ID (required)
    /// - DBT_CLOUD_BASE_URL (optional, default: https://cloud.getdbt.com)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable lookup
    ///
    /// Empty values count as missing. All missing variables are reported at
    /// once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = read(API_KEY_VAR);
        let account_id = read(ACCOUNT_ID_VAR);

        let (api_key, account_id) = match (api_key, account_id) {
            (Some(api_key), Some(account_id)) => (api_key, account_id),
            (api_key, account_id) => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push(API_KEY_VAR);
                }
                if account_id.is_none() {
                    missing.push(ACCOUNT_ID_VAR);
                }
                return Err(ConfigError::MissingVars(missing));
            }
        };

        let base_url = read(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            account_id,
            base_url,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            request_timeout: Duration::from_secs(30),
        })
    }

    /// Sets the poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("{} must start with http:// or https://", BASE_URL_VAR);
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("base_url", &self.base_url)
            .field("poll_interval", &self.poll_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
