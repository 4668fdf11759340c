//! CLI configuration utilities

use anyhow::{Context, Result};
use household_core::ClientConfig;
use household_core::config::default_data_dir;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

/// Data directory from the flag, then `HOUSEHOLD_DATA_DIR`, then the system default
pub fn resolve_data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| {
        std::env::var("HOUSEHOLD_DATA_DIR").map_or_else(|_| default_data_dir(), PathBuf::from)
    })
}

/// Load the client configuration and apply command line overrides
pub fn load(path: Option<&Path>, data_dir: &Path, base_url: Option<String>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ClientConfig::from_env().context("failed to load configuration")?,
    };

    // A configured session file wins over the data directory
    if config.session_file == ClientConfig::default().session_file {
        config.session_file = data_dir.join(SESSION_FILE);
    }
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }

    Ok(config)
}
