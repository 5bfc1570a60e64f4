// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use tether_core::{HttpMethod, MutationRequest, Store};

/// Open a fresh in-memory store.
pub fn memory_store() -> Store {
    Store::open_in_memory().unwrap()
}

/// Create a POST request with a small payload.
pub fn make_request(url: &str) -> MutationRequest {
    MutationRequest::new(HttpMethod::Post, url).with_payload(json!({"target": url}))
}
