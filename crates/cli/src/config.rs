// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration management.
//!
//! Configuration is stored in `config.toml` inside the state directory and
//! includes:
//! - `api_key`: credential for the directory API (also `TZCLOCK_API_KEY`)
//! - `api_base`: base URL of the directory API
//! - `database`: optional override for the cache database location
//! - `probe_host` / `probe_interval_ms`: connectivity probing for `watch`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::sync::{FetcherConfig, DEFAULT_API_BASE};

const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "tzclock.log";
const STATE_DIR_NAME: &str = "tzclock";

/// Placeholder shipped in sample configs; never a real key.
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";
/// Keys must be longer than this to be considered usable.
const MIN_API_KEY_LEN: usize = 5;

/// User configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Credential for the directory API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the directory API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Optional path for the database (relative to the state directory or absolute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// `host:port` probed by `watch` to detect connectivity.
    #[serde(default = "default_probe_host")]
    pub probe_host: String,
    /// Interval between connectivity probes in milliseconds (default: 5000).
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
    /// HTTP request timeout in seconds (default: 15).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_probe_host() -> String {
    "api.timezonedb.com:443".to_string()
}

fn default_probe_interval_ms() -> u64 {
    5000
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_base: default_api_base(),
            database: None,
            probe_host: default_probe_host(),
            probe_interval_ms: default_probe_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from the given state directory.
    ///
    /// A missing file yields the defaults.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let config_path = state_dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to the given state directory.
    pub fn save(&self, state_dir: &Path) -> Result<()> {
        fs::create_dir_all(state_dir)?;
        let config_path = state_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Override the API key with `key` when it is set and non-blank.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Returns true if a usable API key is configured.
    pub fn has_usable_api_key(&self) -> bool {
        is_usable_api_key(self.api_key.as_deref())
    }

    /// Returns the database path for this configuration.
    pub fn db_path(&self, state_dir: &Path) -> PathBuf {
        match &self.database {
            Some(database) => {
                let path = PathBuf::from(database);
                if path.is_absolute() {
                    path
                } else {
                    state_dir.join(path)
                }
            }
            None => tz_core::default_db_path(state_dir),
        }
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms.max(100))
    }

    /// Settings for the HTTP fetcher. Unusable keys are not passed on.
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone().filter(|k| is_usable_api_key(Some(k))),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }
}

/// A key is usable when it is non-empty, not the placeholder, and long
/// enough to be a real credential.
pub fn is_usable_api_key(key: Option<&str>) -> bool {
    key.map(str::trim)
        .is_some_and(|k| k != PLACEHOLDER_API_KEY && k.len() > MIN_API_KEY_LEN)
}

/// Resolve the state directory from explicit and XDG locations.
pub fn resolve_state_dir(explicit: Option<PathBuf>, xdg_state_home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = xdg_state_home {
        return dir.join(STATE_DIR_NAME);
    }
    dirs::home_dir()
        .map(|h| h.join(".local/state").join(STATE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".local/state").join(STATE_DIR_NAME))
}

/// The state directory for this process, honoring `TZCLOCK_STATE_DIR` and
/// `XDG_STATE_HOME`.
pub fn state_dir() -> PathBuf {
    resolve_state_dir(env::state_dir(), env::xdg_state_home())
}

/// Load the configuration for this process, applying `TZCLOCK_API_KEY`.
pub fn load_config(state_dir: &Path) -> Result<Config> {
    Ok(Config::load(state_dir)?.with_api_key_override(env::api_key()))
}

/// Path of the log file within a state directory.
pub fn log_path(state_dir: &Path) -> PathBuf {
    state_dir.join(LOG_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
