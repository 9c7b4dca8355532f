//! Defines the top level configuration for the fetcher.
use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use ethereum_apis::multi::config::MultiClientConfig;
use tracing::Level;

/// The top level configuration for the fetcher.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct FetcherConfig {
    /// The log level for the fetcher.
    #[serde(default = "defaults::default_log_level")]
    pub log_level: String,
    /// The beacon nodes to fetch from.
    pub beacon: MultiClientConfig,
}

impl FetcherConfig {
    /// Reads config from a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse JSON configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validates the parsed config
    ///
    /// # Errors
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if !self.log_level.is_empty() {
            Level::from_str(&self.log_level).with_context(|| {
                format!(
                    "invalid log level '{}'. Valid levels are: TRACE, DEBUG, INFO, WARN, ERROR",
                    self.log_level
                )
            })?;
        }
        self.beacon.validate().context("invalid beacon config")
    }

    /// Returns the log level for the fetcher.
    #[must_use]
    pub fn log_level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or(defaults::DEFAULT_LOG_LEVEL)
    }
}

/// Default values for configuration
mod defaults {
    use tracing::Level;

    pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

    pub fn default_log_level() -> String {
        DEFAULT_LOG_LEVEL.to_string().to_lowercase()
    }
}
