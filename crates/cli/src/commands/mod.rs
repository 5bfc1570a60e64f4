// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod cache;
pub mod drain;
pub mod enqueue;
pub mod fetch;
pub mod pending;
pub mod status;
pub mod submit;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tether_core::Store;

use crate::config::{default_config_path, Config};
use crate::error::{Error, Result};
use crate::sync::{
    probe, ConnectivityState, HttpTransport, MutationQueue, NetworkMonitor, OfflineClient,
    ReadCache, SyncCoordinator,
};

/// Config and open store shared by every command.
pub struct Context {
    pub config: Config,
    pub store: Store,
    pub store_path: PathBuf,
}

impl Context {
    /// Load the config and open the store.
    ///
    /// `store_override` takes precedence over `[store] path`.
    pub fn open(config_path: Option<&Path>, store_override: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(path)?,
            None => Config::load(&default_config_path())?,
        };
        let store_path = match store_override {
            Some(path) => path.to_path_buf(),
            None => config.store_path(),
        };
        tracing::debug!(store = %store_path.display(), "opening store");
        let store = Store::open(&store_path)?;
        Ok(Context {
            config,
            store,
            store_path,
        })
    }

    pub fn queue(&self) -> MutationQueue {
        MutationQueue::new(self.store.clone())
    }

    /// Read cache keyed by the configured field.
    pub fn cache(&self) -> ReadCache {
        ReadCache::with_key_field(self.store.clone(), self.config.cache.key_field.clone())
    }

    /// HTTP transport for the configured remote.
    pub fn transport(&self) -> Result<HttpTransport> {
        Ok(HttpTransport::new(self.config.remote()?.base_url.clone()))
    }

    pub fn coordinator(&self) -> Result<Arc<SyncCoordinator<HttpTransport>>> {
        Ok(Arc::new(SyncCoordinator::new(
            self.store.clone(),
            Arc::new(self.transport()?),
        )))
    }

    /// Probe the remote once for the current connectivity.
    pub async fn probe(&self) -> Result<ConnectivityState> {
        let remote = self.config.remote()?;
        let target = remote.probe_target()?;
        Ok(probe(&target, remote.probe_timeout()).await)
    }

    /// Monitor seeded with a fresh probe of the remote.
    pub async fn monitor(&self) -> Result<Arc<NetworkMonitor<HttpTransport>>> {
        let initial = self.probe().await?;
        tracing::debug!(state = %initial, "initial connectivity");
        Ok(Arc::new(NetworkMonitor::new(initial, self.coordinator()?)))
    }

    /// Offline client over a freshly probed monitor.
    pub async fn client(&self) -> Result<OfflineClient<HttpTransport>> {
        let monitor = self.monitor().await?;
        Ok(OfflineClient::new(self.queue(), self.cache(), monitor))
    }
}

/// Build the tokio runtime async commands run on.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))
}
