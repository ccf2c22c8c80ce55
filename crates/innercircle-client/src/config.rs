//! Backend connection settings.
//!
//! Loaded from a TOML file or from `INNERCIRCLE_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable holding the backend base URL.
pub const ENV_BACKEND_URL: &str = "INNERCIRCLE_BACKEND_URL";
/// Environment variable holding the public (anon) API key.
pub const ENV_ANON_KEY: &str = "INNERCIRCLE_ANON_KEY";
/// Environment variable overriding the table name.
pub const ENV_TABLE: &str = "INNERCIRCLE_TABLE";
/// Environment variable overriding the change poll interval, in milliseconds.
pub const ENV_POLL_MS: &str = "INNERCIRCLE_POLL_MS";

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("{var} must be a number of milliseconds, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("backend url must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("anon key is empty or not a valid header value")]
    InvalidKey,

    #[error("request_timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Connection settings for the waitlist backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend project (e.g. `https://abc.supabase.co`).
    pub url: String,
    /// Public API key sent as `apikey` and bearer token.
    pub anon_key: String,
    /// Collection holding waitlist rows.
    pub table: String,
    /// Per-request timeout.
    pub request_timeout_ms: u64,
    /// How often the change poller checks the row count.
    pub poll_interval_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: "waitlist".to_string(),
            request_timeout_ms: 15_000,
            poll_interval_ms: 5_000,
        }
    }
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            ..Default::default()
        }
    }

    /// Read settings from `INNERCIRCLE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self {
            url: lookup(ENV_BACKEND_URL).ok_or(ConfigError::MissingVar(ENV_BACKEND_URL))?,
            anon_key: lookup(ENV_ANON_KEY).ok_or(ConfigError::MissingVar(ENV_ANON_KEY))?,
            ..Default::default()
        };
        if let Some(table) = lookup(ENV_TABLE) {
            config.table = table;
        }
        if let Some(value) = lookup(ENV_POLL_MS) {
            config.poll_interval_ms = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: ENV_POLL_MS,
                value,
            })?;
        }
        Ok(config)
    }

    /// Parse a TOML document with the same field names as this struct.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check the URL, key and timeout, returning the parsed base URL.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::InvalidKey);
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
