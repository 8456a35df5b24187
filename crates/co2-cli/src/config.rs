//! Configuration for the CO2 front end.
//! Stored in ~/.co2/config/co2.toml; every section falls back to defaults.

use anyhow::{anyhow, Context, Result};
use co2_core::{Co2Error, DEFAULT_COUNTRIES};
use co2_io::{RetryPolicy, OWID_CO2_URL};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that replaces `source.url`.
pub const DATASET_URL_ENV: &str = "CO2_DATASET_URL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Co2Config {
    /// Where and how the dataset is fetched
    #[serde(default)]
    pub source: SourceConfig,
    /// Presentation defaults
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset download settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Extra attempts after a failed request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
    /// Seconds a loaded table stays valid (0 = for the whole session)
    #[serde(default)]
    pub cache_window_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            cache_window_seconds: 0,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }

    pub fn cache_window(&self) -> Option<Duration> {
        match self.cache_window_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn default_url() -> String {
    OWID_CO2_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

fn default_initial_backoff() -> u64 {
    500
}

fn default_max_backoff() -> u64 {
    5_000
}

/// Presentation defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Countries used by `trend` when none are given
    #[serde(default = "default_countries")]
    pub default_countries: Vec<String>,
    /// Rows printed by `head`
    #[serde(default = "default_head_rows")]
    pub head_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_countries: default_countries(),
            head_rows: default_head_rows(),
        }
    }
}

fn default_countries() -> Vec<String> {
    DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
}

fn default_head_rows() -> usize {
    5
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Co2Config {
    /// Apply `CO2_DATASET_URL` if set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(DATASET_URL_ENV) {
            if !url.trim().is_empty() {
                self.source.url = url;
            }
        }
    }

    /// Reject values that cannot produce a working session.
    pub fn validate(&self) -> Result<(), Co2Error> {
        if self.source.url.trim().is_empty() {
            return Err(Co2Error::Config("source.url must not be empty".into()));
        }
        if self.source.timeout_seconds == 0 {
            return Err(Co2Error::Config("source.timeout_seconds must be > 0".into()));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<tracing::Level, Co2Error> {
        self.logging.level.parse::<tracing::Level>().map_err(|_| {
            Co2Error::Config(format!("unknown logging.level \"{}\"", self.logging.level))
        })
    }
}

/// Load configuration from `path`, or from the default location when `None`.
///
/// An explicit path must exist; a missing default file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Co2Config> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = co2_config_path()?;
            if default_path.exists() {
                read_config(&default_path)?
            } else {
                Co2Config::default()
            }
        }
    };
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Co2Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Co2Config = toml::from_str(&contents)
        .map_err(|e| Co2Error::Config(format!("{}: {e}", path.display())))?;
    Ok(config)
}

/// Save the configuration to `path`, creating parent directories.
pub fn save_config(config: &Co2Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Location: ~/.co2/config/co2.toml
pub fn co2_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| anyhow!("Cannot determine home directory"))
        .map(|home| home.join(".co2").join("config").join("co2.toml"))
}
