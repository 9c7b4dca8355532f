//! Configuration of the multi-backend client.

use std::{collections::HashSet, fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::beacon_api::response::Encoding;

/// Multi-backend client config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct MultiClientConfig {
    /// The beacon nodes to query
    pub backends: Vec<BackendConfig>,
    /// How long a single backend may take to answer
    #[serde(default = "defaults::default_backend_timeout_ms")]
    pub backend_timeout_ms: u64,
    /// The encoding asked from every backend
    #[serde(default)]
    pub encoding: Encoding,
}

/// One beacon node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct BackendConfig {
    /// Name used in logs and errors
    pub name: String,
    /// Base url of the beacon api
    pub url: String,
}

impl MultiClientConfig {
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
        self.validate_backends()?;
        self.validate_timeout()?;
        Ok(())
    }

    /// Returns the per-backend timeout
    #[must_use]
    pub const fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }

    fn validate_backends(&self) -> Result<()> {
        anyhow::ensure!(
            !self.backends.is_empty(),
            "At least one backend must be specified"
        );

        self.backends
            .iter()
            .enumerate()
            .try_for_each(|(index, backend)| backend.validate(index))?;

        let unique_names = self
            .backends
            .iter()
            .map(|backend| backend.name.trim())
            .collect::<HashSet<_>>()
            .len();
        anyhow::ensure!(
            unique_names == self.backends.len(),
            "Duplicate backend names found: {} unique out of {} total",
            unique_names,
            self.backends.len()
        );

        let unique_urls = self
            .backends
            .iter()
            .map(|backend| backend.url.trim().trim_end_matches('/'))
            .collect::<HashSet<_>>()
            .len();
        anyhow::ensure!(
            unique_urls == self.backends.len(),
            "Duplicate backend urls found: {} unique out of {} total",
            unique_urls,
            self.backends.len()
        );

        Ok(())
    }

    fn validate_timeout(&self) -> Result<()> {
        let timeout_range = defaults::MIN_TIMEOUT_MS..=defaults::MAX_TIMEOUT_MS;

        anyhow::ensure!(
            timeout_range.contains(&self.backend_timeout_ms),
            "Backend timeout must be between {}ms and {}ms, got {}ms",
            defaults::MIN_TIMEOUT_MS,
            defaults::MAX_TIMEOUT_MS,
            self.backend_timeout_ms
        );

        Ok(())
    }
}

impl BackendConfig {
    fn validate(&self, index: usize) -> Result<()> {
        anyhow::ensure!(
            !self.name.trim().is_empty(),
            "Backend at index {} must have a name",
            index
        );

        let url = Url::parse(self.url.trim()).with_context(|| {
            format!("Backend '{}' has an invalid url '{}'", self.name, self.url)
        })?;
        anyhow::ensure!(
            matches!(url.scheme(), "http" | "https"),
            "Backend '{}' url must start with 'http://' or 'https://': '{}'",
            self.name,
            self.url
        );

        Ok(())
    }
}

/// Default values for configuration
mod defaults {
    pub const MIN_TIMEOUT_MS: u64 = 10;
    pub const MAX_TIMEOUT_MS: u64 = 60_000;
    pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

    pub const fn default_backend_timeout_ms() -> u64 {
        DEFAULT_TIMEOUT_MS
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn config(value: serde_json::Value) -> MultiClientConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config(json!({
            "backends": [{"name": "lighthouse", "url": "http://localhost:5052"}],
        }));

        config.validate().unwrap();
        assert_eq!(config.backend_timeout(), Duration::from_secs(5));
        assert_eq!(config.encoding, Encoding::Ssz);
    }

    #[test]
    fn test_explicit_values() {
        let config = config(json!({
            "backends": [
                {"name": "lighthouse", "url": "http://localhost:5052"},
                {"name": "nimbus", "url": "https://nimbus.example.org/"},
            ],
            "backend_timeout_ms": 250,
            "encoding": "json",
        }));

        config.validate().unwrap();
        assert_eq!(config.backend_timeout(), Duration::from_millis(250));
        assert_eq!(config.encoding, Encoding::Json);
    }

    #[rstest]
    #[case(json!({"backends": []}), "At least one backend")]
    #[case(json!({"backends": [{"name": " ", "url": "http://a"}]}), "must have a name")]
    #[case(json!({"backends": [{"name": "a", "url": "localhost:5052"}]}), "must start with")]
    #[case(json!({"backends": [{"name": "a", "url": "not a url"}]}), "invalid url")]
    #[case(
        json!({"backends": [{"name": "a", "url": "http://a"}, {"name": "a", "url": "http://b"}]}),
        "Duplicate backend names"
    )]
    #[case(
        json!({"backends": [{"name": "a", "url": "http://a/"}, {"name": "b", "url": "http://a"}]}),
        "Duplicate backend urls"
    )]
    #[case(
        json!({"backends": [{"name": "a", "url": "http://a"}], "backend_timeout_ms": 5}),
        "between 10ms and 60000ms"
    )]
    #[case(
        json!({"backends": [{"name": "a", "url": "http://a"}], "backend_timeout_ms": 60001}),
        "between 10ms and 60000ms"
    )]
    fn test_invalid_config(#[case] value: serde_json::Value, #[case] expected: &str) {
        let err = config(value).validate().unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "'{err}' does not contain '{expected}'"
        );
    }
}
