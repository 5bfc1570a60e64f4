// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync engine.
//!
//! Writes that fail for lack of connectivity are persisted locally and
//! replayed against the remote API once connectivity returns.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  offline   ┌──────────────┐       ┌──────────────┐
//! │ OfflineClient│───────────►│MutationQueue │──────►│    Store     │
//! │              │            └──────────────┘       │   (SQLite)   │
//! │              │  lists     ┌──────────────┐       │              │
//! │              │───────────►│  ReadCache   │──────►│              │
//! └──────────────┘            └──────────────┘       └──────────────┘
//!        │                                                  ▲
//!        ▼                                                  │
//! ┌──────────────┐ reconnect  ┌──────────────┐  replay      │
//! │NetworkMonitor│───────────►│SyncCoordinator│─────────────┘
//! │  (probe)     │            └──────────────┘
//! └──────────────┘                   │
//!                                    ▼
//!                             ┌──────────────┐
//!                             │  Transport   │
//!                             │   (trait)    │
//!                             └──────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Replay in enqueue order, one request at a time
//! - At-least-once delivery; the first failure halts the drain
//! - At most one drain in flight
//! - Injectable transport trait for testing

mod cache;
mod client;
mod coordinator;
mod monitor;
mod probe;
mod queue;
mod transport;

pub use cache::{ReadCache, DEFAULT_KEY_FIELD};
pub use client::{ListSource, Listing, OfflineClient, Submitted};
pub use coordinator::{DrainReport, DrainResult, SyncCoordinator};
pub use monitor::{ConnectivityState, DrainHandle, NetworkMonitor};
pub use probe::{probe, probe_target, spawn_probe_loop};
pub use queue::MutationQueue;
pub use transport::{HttpTransport, Transport, TransportError, TransportFuture, TransportResult};

#[cfg(test)]
mod test_helpers;





#[cfg(test)]
mod monitor_tests;
