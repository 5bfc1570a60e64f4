// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tether_sync - offline-first mutation queue and sync engine.
//!
//! This crate provides the sync engine behind the `tether` CLI: writes that
//! cannot reach the remote API are saved to a local SQLite store and replayed
//! in order once connectivity returns.
//!
//! # Main Components
//!
//! - [`sync::MutationQueue`] - durable FIFO of pending requests
//! - [`sync::ReadCache`] - last-known entity snapshots for list views
//! - [`sync::SyncCoordinator`] - single-flight, fail-fast queue replay
//! - [`sync::NetworkMonitor`] - connectivity state, drains on reconnect
//! - [`sync::OfflineClient`] - submit and list-load with offline fallback
//! - [`Config`] - remote, store, and cache settings
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tether_core::Store;
//! use tether_sync::sync::{ConnectivityState, HttpTransport, NetworkMonitor, SyncCoordinator};
//!
//! let store = Store::open(Path::new("store.db"))?;
//! let transport = Arc::new(HttpTransport::new("https://api.example.com"));
//! let coordinator = Arc::new(SyncCoordinator::new(store, transport));
//! let monitor = NetworkMonitor::new(ConnectivityState::Offline, coordinator);
//!
//! // Offline -> Online starts a drain in the background
//! let handle = monitor.observe(ConnectivityState::Online);
//! ```

mod cli;
mod commands;
mod env;

pub mod config;
pub mod error;
pub mod sync;

pub use cli::{CacheCommand, Cli, Command, OutputFormat, RequestArgs};
pub use config::Config;
pub use error::{Error, Result};

use std::fs;
use std::path::Path;

use commands::Context;
use tracing_subscriber::EnvFilter;

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process
/// execution.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::open(cli.config.as_deref(), cli.store.as_deref())?;
    let result = dispatch(&ctx, cli.command);
    let closed = ctx.store.close();
    result?;
    closed.map_err(Error::from)
}

fn dispatch(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Enqueue { request } => commands::enqueue::run(ctx, &request),
        Command::Submit { request } => commands::submit::run(ctx, &request),
        Command::Pending { output } => commands::pending::run(ctx, output),
        Command::Drain => commands::drain::run(ctx),
        Command::Fetch {
            collection,
            url,
            output,
        } => commands::fetch::run(ctx, &collection, &url, output),
        Command::Cache(CacheCommand::Put {
            collection,
            entities,
        }) => commands::cache::put(ctx, &collection, &entities),
        Command::Cache(CacheCommand::List { collection, output }) => {
            commands::cache::list(ctx, &collection, output)
        }
        Command::Watch => commands::watch::run(ctx),
        Command::Status { output } => commands::status::run(ctx, output),
    }
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given and openable, otherwise to stderr.
pub fn setup_logging(log_file: Option<&Path>) {
    let filter =
        EnvFilter::try_from_env(env::vars::RUST_LOG).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = log_file.and_then(|path| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    if let Some(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
