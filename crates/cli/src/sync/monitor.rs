// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network state monitor.
//!
//! Tracks connectivity and fires a background drain on every offline to
//! online transition. The observation handler is synchronous: it flips the
//! stored state and spawns the drain without awaiting it.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::coordinator::{DrainResult, SyncCoordinator};
use super::transport::Transport;

const STATE_OFFLINE: u8 = 0;
const STATE_ONLINE: u8 = 1;

/// Connectivity as last reported by the platform or a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    Online,
    Offline,
}

impl ConnectivityState {
    fn to_u8(self) -> u8 {
        match self {
            ConnectivityState::Online => STATE_ONLINE,
            ConnectivityState::Offline => STATE_OFFLINE,
        }
    }

    fn from_u8(value: u8) -> Self {
        if value == STATE_ONLINE {
            ConnectivityState::Online
        } else {
            ConnectivityState::Offline
        }
    }

    /// Lowercase label used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectivityState::Online => "online",
            ConnectivityState::Offline => "offline",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a drain running in the background.
///
/// Dropping the handle does not stop the drain.
#[derive(Debug)]
pub struct DrainHandle {
    cancel: CancellationToken,
    task: JoinHandle<Option<DrainResult>>,
}

impl DrainHandle {
    /// Abandon the drain. Entries not yet replayed stay queued.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if the drain task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the drain to finish.
    ///
    /// Returns `None` if the drain was cancelled or its task aborted.
    pub async fn wait(self) -> Option<DrainResult> {
        self.task.await.ok().flatten()
    }
}

/// Observes connectivity and triggers replay on reconnect.
pub struct NetworkMonitor<T: Transport + 'static> {
    state: AtomicU8,
    coordinator: Arc<SyncCoordinator<T>>,
    shutdown: CancellationToken,
}

impl<T: Transport + 'static> NetworkMonitor<T> {
    /// Create a monitor seeded with the connectivity reported at startup.
    pub fn new(initial: ConnectivityState, coordinator: Arc<SyncCoordinator<T>>) -> Self {
        NetworkMonitor {
            state: AtomicU8::new(initial.to_u8()),
            coordinator,
            shutdown: CancellationToken::new(),
        }
    }

    /// Current connectivity.
    pub fn state(&self) -> ConnectivityState {
        ConnectivityState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Check if the monitor currently reports online.
    pub fn is_online(&self) -> bool {
        self.state() == ConnectivityState::Online
    }

    /// The coordinator drains are run on.
    pub fn coordinator(&self) -> &Arc<SyncCoordinator<T>> {
        &self.coordinator
    }

    /// Record a connectivity observation.
    ///
    /// Returns a handle when the observation was an offline to online
    /// transition and a drain was spawned. Must be called from within a
    /// tokio runtime.
    pub fn observe(&self, state: ConnectivityState) -> Option<DrainHandle> {
        let previous = ConnectivityState::from_u8(self.state.swap(state.to_u8(), Ordering::AcqRel));
        match (previous, state) {
            (ConnectivityState::Offline, ConnectivityState::Online) => {
                tracing::info!("connectivity restored, starting drain");
                Some(self.trigger_drain())
            }
            (ConnectivityState::Online, ConnectivityState::Offline) => {
                tracing::info!("connectivity lost");
                None
            }
            _ => None,
        }
    }

    /// Spawn a drain regardless of the current state.
    pub fn trigger_drain(&self) -> DrainHandle {
        let cancel = self.shutdown.child_token();
        let token = cancel.clone();
        let coordinator = Arc::clone(&self.coordinator);

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::info!("drain cancelled");
                    None
                }
                result = coordinator.drain() => {
                    if let Err(ref e) = result {
                        tracing::warn!(error = %e, "drain aborted by storage failure");
                    }
                    Some(result)
                }
            }
        });

        DrainHandle { cancel, task }
    }

    /// Cancel every drain this monitor has spawned.
    ///
    /// Drains triggered afterwards are cancelled immediately.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
