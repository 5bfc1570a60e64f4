// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration management.
//!
//! Configuration is stored in `<state dir>/config.toml` and includes:
//! - `[remote]`: base URL of the remote API and probe timing
//! - `[store]`: optional path to the store database
//! - `[cache]`: entity field used as the read cache key
//!
//! A missing config file yields the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::sync::{probe_target, DEFAULT_KEY_FIELD};

const CONFIG_FILE_NAME: &str = "config.toml";
const STORE_FILE_NAME: &str = "store.db";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API settings (absent = queue and cache only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
    pub store: StoreConfig,
    pub cache: CacheConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL that relative request URLs are joined onto.
    pub base_url: String,
    /// Interval between connectivity probes in milliseconds (default: 5000).
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
    /// Max time to wait for a probe connect in milliseconds (default: 2000).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_probe_interval_ms() -> u64 {
    5_000
}

fn default_probe_timeout_ms() -> u64 {
    2_000
}

impl RemoteConfig {
    /// Remote config with default probe timing.
    pub fn new(base_url: impl Into<String>) -> Self {
        RemoteConfig {
            base_url: base_url.into(),
            probe_interval_ms: default_probe_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// The `host:port` probed for connectivity.
    pub fn probe_target(&self) -> Result<String> {
        probe_target(&self.base_url).ok_or_else(|| {
            Error::Config(format!(
                "cannot derive a host and port from base_url '{}'",
                self.base_url
            ))
        })
    }
}

/// Store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store database path (default: `<state dir>/store.db`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Read cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entity field used as the cache key (default: "id").
    #[serde(default = "default_key_field")]
    pub key_field: String,
}

fn default_key_field() -> String {
    DEFAULT_KEY_FIELD.to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            key_field: default_key_field(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or the defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// The remote settings, required by any command that talks to the network.
    pub fn remote(&self) -> Result<&RemoteConfig> {
        self.remote.as_ref().ok_or(Error::NoRemote)
    }

    /// Get the store database path.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| tether_state_dir().join(STORE_FILE_NAME))
    }
}

/// Get the state directory holding the store and default config.
///
/// Precedence: `$TETHER_STATE_DIR`, `$XDG_STATE_HOME/tether`,
/// `~/.local/state/tether`.
pub fn tether_state_dir() -> PathBuf {
    resolve_state_dir(env::state_dir(), env::xdg_state_home(), dirs::home_dir())
}

fn resolve_state_dir(
    explicit: Option<PathBuf>,
    xdg_state_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = xdg_state_home {
        return dir.join("tether");
    }
    home.map(|h| h.join(".local/state/tether"))
        .unwrap_or_else(|| PathBuf::from(".local/state/tether"))
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    tether_state_dir().join(CONFIG_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
