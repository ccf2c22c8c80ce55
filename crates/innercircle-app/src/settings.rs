//! App settings: an optional TOML file, overridden by command-line flags.
//!
//! ```toml
//! share_site = "innercircle.events"
//! duplicate_email = "on_insert"   # or "pre_check"
//!
//! [backend]
//! url = "https://abc.supabase.co"
//! anon_key = "..."
//!
//! [logging]
//! default_level = "info"
//! ```
//!
//! Without a `[backend]` table the backend is read from `INNERCIRCLE_*`
//! environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use innercircle_client::{BackendConfig, ConfigError};
use innercircle_core::{DEFAULT_SHARE_SITE, DuplicateEmailCheck, ShareFormatter, SignupPolicy};
use innercircle_logging::{FileConfig, LogConfig};

use crate::cli::Args;

/// Errors loading the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything the app needs before the window opens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub backend: Option<BackendConfig>,
    pub share_site: String,
    pub duplicate_email: DuplicateEmailCheck,
    pub logging: LogConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend: None,
            share_site: DEFAULT_SHARE_SITE.to_string(),
            duplicate_email: DuplicateEmailCheck::default(),
            // Pretty console at info; `--verbose` restores debug.
            logging: LogConfig {
                default_level: "info".to_string(),
                ..LogConfig::development()
            },
        }
    }
}

impl AppSettings {
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load the file named by `--config` (if any) and apply the other flags.
    pub fn load(args: &Args) -> Result<Self, SettingsError> {
        let mut settings = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_args(args);
        Ok(settings)
    }

    /// Command-line flags win over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(site) = &args.share_site {
            self.share_site = site.clone();
        }
        if args.precheck_email {
            self.duplicate_email = DuplicateEmailCheck::PreCheck;
        }
        if args.verbose {
            self.logging.default_level = "debug".to_string();
        }
        if let Some(dir) = &args.log_dir {
            self.logging.file = Some(FileConfig {
                directory: dir.clone(),
                ..FileConfig::default()
            });
        }
    }

    /// Backend settings from the file, falling back to the environment.
    pub fn backend_config(&self) -> Result<BackendConfig, ConfigError> {
        match &self.backend {
            Some(config) => Ok(config.clone()),
            None => BackendConfig::from_env(),
        }
    }

    pub fn policy(&self) -> SignupPolicy {
        SignupPolicy {
            duplicate_email: self.duplicate_email,
        }
    }

    pub fn share_formatter(&self) -> ShareFormatter {
        ShareFormatter::new(self.share_site.clone())
    }
}
