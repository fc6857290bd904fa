//! Runtime settings for the command-line front end.
//!
//! Process-level knobs (where the storage file lives, how long to wait on the
//! summarization API, an API key supplied through the environment) come from
//! environment variables through [`Settings::from_env`]. The API
//! configuration itself lives in a [`store::ConfigStore`].

pub mod store;

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::config::store::Configuration;

/// Environment variable names.
pub const ENV_STORE_PATH: &str = "LEAPREAD_STORE";
pub const ENV_TIMEOUT_SECS: &str = "LEAPREAD_TIMEOUT_SECS";
pub const ENV_API_KEY: &str = "LEAPREAD_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const STORE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    store_path: PathBuf,
    request_timeout: Duration,
    api_key_override: Option<String>,
}

impl Settings {
    pub fn new(store_path: impl Into<PathBuf>, request_timeout: Duration) -> Self {
        Self {
            store_path: store_path.into(),
            request_timeout,
            api_key_override: None,
        }
    }

    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_path = match env::var(ENV_STORE_PATH) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_store_path(),
        };

        let request_timeout = match env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_TIMEOUT_SECS,
                    reason: format!("expected a whole number of seconds, got '{raw}'"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: ENV_TIMEOUT_SECS,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let api_key_override = env::var(ENV_API_KEY).ok().filter(|k| !k.trim().is_empty());

        Ok(Self {
            store_path,
            request_timeout,
            api_key_override,
        })
    }

    pub fn store_path(&self) -> &PathBuf {
        &self.store_path
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn api_key_override(&self) -> Option<&str> {
        self.api_key_override.as_deref()
    }

    /// Apply environment overrides to a stored configuration.
    pub fn apply_overrides(&self, mut config: Configuration) -> Configuration {
        if let Some(key) = &self.api_key_override {
            config.api_key = key.clone();
        }
        config
    }
}

fn default_store_path() -> PathBuf {
    ProjectDirs::from("", "", "leapread")
        .map(|dirs| dirs.config_dir().join(STORE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE_NAME))
}

/// Errors that can occur while building settings.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
