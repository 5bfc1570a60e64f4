// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-aware client for form submissions and list views.
//!
//! Writes go straight to the transport while online. A connectivity failure
//! marks the monitor offline and routes the write to the queue instead;
//! validation failures are returned to the caller and never queued. List
//! loads refresh the read cache on success and fall back to it otherwise.

use std::sync::Arc;

use serde_json::Value;
use tether_core::{HttpMethod, MutationRequest, PendingMutation};

use super::cache::ReadCache;
use super::monitor::{ConnectivityState, NetworkMonitor};
use super::queue::MutationQueue;
use super::transport::Transport;
use crate::error::{Error, Result};

/// Outcome of a submitted write.
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    /// The remote accepted the request; carries the response body.
    Sent(String),
    /// Saved locally; it will sync when the connection returns.
    Queued(PendingMutation),
}

/// Where a list view's entities came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    Remote,
    Cache,
}

/// Entities for a list view plus their source.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entities: Vec<Value>,
    pub source: ListSource,
}

/// Client that pairs direct requests with the offline queue and cache.
pub struct OfflineClient<T: Transport + 'static> {
    queue: MutationQueue,
    cache: ReadCache,
    monitor: Arc<NetworkMonitor<T>>,
}

impl<T: Transport + 'static> OfflineClient<T> {
    /// Create a client; requests go through the monitor's coordinator transport.
    pub fn new(queue: MutationQueue, cache: ReadCache, monitor: Arc<NetworkMonitor<T>>) -> Self {
        OfflineClient {
            queue,
            cache,
            monitor,
        }
    }

    /// The monitor whose state gates direct attempts.
    pub fn monitor(&self) -> &Arc<NetworkMonitor<T>> {
        &self.monitor
    }

    fn transport(&self) -> &T {
        self.monitor.coordinator().transport()
    }

    /// Send a write, queueing it if the remote is unreachable.
    pub async fn submit(&self, request: MutationRequest) -> Result<Submitted> {
        if !self.monitor.is_online() {
            return self.queue_request(&request);
        }

        match self.transport().execute(&request).await {
            Ok(body) => Ok(Submitted::Sent(body)),
            Err(e) if e.is_connectivity() => {
                tracing::info!(error = %e, url = %request.url, "remote unreachable, queueing");
                self.monitor.observe(ConnectivityState::Offline);
                self.queue_request(&request)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn queue_request(&self, request: &MutationRequest) -> Result<Submitted> {
        let mutation = self.queue.enqueue(request)?;
        Ok(Submitted::Queued(mutation))
    }

    /// Load a collection for a list view.
    ///
    /// Online, the remote list is fetched, cached, and returned. A failed
    /// cache refresh is logged and does not fail the load. Offline or on a
    /// connectivity failure, the cached snapshot is returned.
    pub async fn load_list(&self, collection: &str, url: &str) -> Result<Listing> {
        if self.monitor.is_online() {
            let request = MutationRequest::new(HttpMethod::Get, url);
            match self.transport().execute(&request).await {
                Ok(body) => {
                    let entities = parse_list(url, &body)?;
                    if let Err(e) = self.cache.refresh(collection, &entities) {
                        tracing::warn!(error = %e, collection, "cache refresh failed");
                    }
                    return Ok(Listing {
                        entities,
                        source: ListSource::Remote,
                    });
                }
                Err(e) if e.is_connectivity() => {
                    tracing::info!(error = %e, collection, "remote unreachable, reading cache");
                    self.monitor.observe(ConnectivityState::Offline);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Listing {
            entities: self.cache.read(collection)?,
            source: ListSource::Cache,
        })
    }
}

fn parse_list(url: &str, body: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(entities) => Ok(entities),
        _ => Err(Error::NotAList {
            url: url.to_string(),
        }),
    }
}
