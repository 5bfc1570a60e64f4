// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue for persisting writes when disconnected.
//!
//! This is the local fallback taken after a direct attempt fails for lack of
//! connectivity. It never touches the network: each enqueue is one durable
//! append to the store, and the sync coordinator replays the queue in order
//! once connectivity returns.

use chrono::Utc;
use tether_core::{MutationRequest, PendingMutation, Result, Store};

/// Enqueue contract over the store's mutation queue.
#[derive(Debug, Clone)]
pub struct MutationQueue {
    store: Store,
}

impl MutationQueue {
    /// Create a queue backed by the given store.
    pub fn new(store: Store) -> Self {
        MutationQueue { store }
    }

    /// Persist a request for later replay.
    ///
    /// Stamps the enqueue time and returns the stored record with its id.
    pub fn enqueue(&self, request: &MutationRequest) -> Result<PendingMutation> {
        let mutation = self.store.append(request, Utc::now())?;
        tracing::debug!(
            id = mutation.id,
            method = %mutation.request.method,
            url = %mutation.request.url,
            "queued mutation"
        );
        Ok(mutation)
    }

    /// All queued mutations in replay order.
    pub fn pending(&self) -> Result<Vec<PendingMutation>> {
        self.store.list_all()
    }

    /// Number of queued mutations.
    pub fn len(&self) -> Result<usize> {
        self.store.pending_count()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
