//! Configuration for the household services client

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend API
    pub base_url: String,

    /// Request timeout in seconds (0 disables the timeout)
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// File holding the persisted session tokens
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
            user_agent: concat!("household-client/", env!("CARGO_PKG_VERSION")).to_string(),
            session_file: default_data_dir().join("session.json"),
        }
    }
}

/// Directory for client state, e.g. `~/.local/share/household`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("household")
}

impl ClientConfig {
    /// Load configuration from file, overlaid with `HOUSEHOLD_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let settings = Self::with_defaults()?
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("HOUSEHOLD"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration with defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> Result<Self> {
        let settings = Self::with_defaults()?
            .add_source(config::Environment::with_prefix("HOUSEHOLD"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    fn with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Self::default();

        Ok(config::Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("user_agent", defaults.user_agent)?
            .set_default(
                "session_file",
                defaults.session_file.to_string_lossy().to_string(),
            )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.session_file.ends_with("household/session.json"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(
            &path,
            "base_url = \"https://household.example\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = ClientConfig::from_file(&path).unwrap();
        assert_eq!(config.base_url, "https://household.example");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, ClientConfig::default().user_agent);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ClientConfig::from_file(dir.path().join("absent.toml")).is_err());
    }
}
