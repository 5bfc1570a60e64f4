// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync coordinator: replays the mutation queue in order.
//!
//! Drain algorithm:
//! 1. Return immediately if a drain is already in flight
//! 2. Snapshot the queue once; later enqueues wait for the next trigger
//! 3. Replay each mutation sequentially, removing it after success
//! 4. Stop at the first transport failure, leaving it and everything after
//!    it queued
//!
//! Transient and permanent failures are not distinguished, and there is no
//! retry, backoff or timeout. Delivery is at-least-once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tether_core::Store;

use super::transport::{Transport, TransportError};

/// Outcome of a single drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrainReport {
    /// Another drain was in flight; nothing was done.
    AlreadyRunning,
    /// Every mutation in the snapshot was replayed and removed.
    Completed { replayed: usize },
    /// Replay stopped at `failed_id`; it and all later entries stay queued.
    Halted {
        replayed: usize,
        failed_id: i64,
        error: TransportError,
    },
}

impl DrainReport {
    /// Number of mutations replayed and removed by this drain.
    pub fn replayed(&self) -> usize {
        match self {
            DrainReport::AlreadyRunning => 0,
            DrainReport::Completed { replayed } | DrainReport::Halted { replayed, .. } => *replayed,
        }
    }
}

/// Result of a drain; `Err` means the store failed.
pub type DrainResult = tether_core::Result<DrainReport>;

/// Releases the in-flight flag when dropped, including on cancellation.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drains the mutation queue against a transport.
pub struct SyncCoordinator<T: Transport> {
    store: Store,
    transport: Arc<T>,
    in_flight: AtomicBool,
}

impl<T: Transport> SyncCoordinator<T> {
    /// Create a coordinator over the given store and transport.
    pub fn new(store: Store, transport: Arc<T>) -> Self {
        SyncCoordinator {
            store,
            transport,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The transport used for replay.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Check if a drain is currently running.
    pub fn is_draining(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Replay queued mutations in ascending id order.
    pub async fn drain(&self) -> DrainResult {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("drain already in flight, skipping");
            return Ok(DrainReport::AlreadyRunning);
        };

        let snapshot = self.store.list_all()?;
        if snapshot.is_empty() {
            return Ok(DrainReport::Completed { replayed: 0 });
        }
        tracing::info!(pending = snapshot.len(), "draining mutation queue");

        let mut replayed = 0;
        for mutation in snapshot {
            match self.transport.execute(mutation.request()).await {
                Ok(_) => {
                    self.store.remove(mutation.id)?;
                    replayed += 1;
                    tracing::debug!(id = mutation.id, "replayed mutation");
                }
                Err(error) => {
                    tracing::warn!(
                        id = mutation.id,
                        replayed,
                        %error,
                        "replay failed, halting drain"
                    );
                    return Ok(DrainReport::Halted {
                        replayed,
                        failed_id: mutation.id,
                        error,
                    });
                }
            }
        }

        tracing::info!(replayed, "mutation queue drained");
        Ok(DrainReport::Completed { replayed })
    }
}
