// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity probe.
//!
//! Reachability is judged by a TCP connect to the remote host. The probe loop
//! feeds each result into the network monitor, which decides whether a
//! transition happened.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::monitor::{ConnectivityState, NetworkMonitor};
use super::transport::Transport;

/// Shortest probe interval accepted by the loop.
const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Derive the `host:port` to probe from a base URL.
///
/// Returns `None` when the URL has no host or no known default port.
pub fn probe_target(base_url: &str) -> Option<String> {
    let url = Url::parse(base_url).ok()?;
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(format!("{}:{}", host, port))
}

/// Attempt one TCP connect to `addr` within `timeout`.
pub async fn probe(addr: &str, timeout: Duration) -> ConnectivityState {
    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_)) => ConnectivityState::Online,
        Ok(Err(e)) => {
            tracing::debug!(addr, error = %e, "probe connect failed");
            ConnectivityState::Offline
        }
        Err(_) => {
            tracing::debug!(addr, ?timeout, "probe timed out");
            ConnectivityState::Offline
        }
    }
}

/// Probe `target` every `interval` until `cancel` fires.
///
/// The first probe runs immediately. Drains spawned by the monitor are not
/// awaited.
pub fn spawn_probe_loop<T: Transport + 'static>(
    monitor: Arc<NetworkMonitor<T>>,
    target: String,
    interval: Duration,
    timeout: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let state = probe(&target, timeout).await;
                    monitor.observe(state);
                }
            }
        }
        tracing::debug!(addr = %target, "probe loop stopped");
    })
}
