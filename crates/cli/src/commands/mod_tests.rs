// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Test infrastructure for command testing without filesystem setup.
//!
//! This module provides a `TestContext` that wraps an in-memory store
//! and a default config, enabling commands to be tested without a state
//! directory.

use crate::cli::RequestArgs;
use crate::commands::Context;
use crate::config::{Config, RemoteConfig};
use crate::sync::{MutationQueue, ReadCache};
use std::path::PathBuf;
use tether_core::Store;

/// Test context providing an in-memory store and default config.
pub struct TestContext {
    pub store: Store,
    pub config: Config,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Create a new test context with no remote configured.
    pub fn new() -> Self {
        TestContext {
            store: Store::open_in_memory().expect("Failed to create in-memory store"),
            config: Config::default(),
        }
    }

    /// Create a test context pointing at a remote.
    pub fn with_remote(base_url: &str) -> Self {
        let mut remote = RemoteConfig::new(base_url);
        remote.probe_timeout_ms = 500;
        let mut ctx = Self::new();
        ctx.config.remote = Some(remote);
        ctx
    }

    /// A command context sharing this store.
    pub fn context(&self) -> Context {
        Context {
            config: self.config.clone(),
            store: self.store.clone(),
            store_path: PathBuf::from(":memory:"),
        }
    }

    pub fn queue(&self) -> MutationQueue {
        MutationQueue::new(self.store.clone())
    }

    pub fn cache(&self) -> ReadCache {
        ReadCache::new(self.store.clone())
    }
}

/// Request args as clap would produce them, without payload or headers.
pub fn request_args(method: &str, url: &str) -> RequestArgs {
    RequestArgs {
        method: method.parse().expect("valid method"),
        url: url.to_string(),
        payload: None,
        headers: Vec::new(),
    }
}

/// An `http://` base URL on a local port with nothing listening.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    format!("http://{}", listener.local_addr().unwrap())
}
