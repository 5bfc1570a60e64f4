// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mutation types for the offline queue.
//!
//! A [`MutationRequest`] is the write a caller attempted; a [`PendingMutation`]
//! is that request once the store has persisted it and assigned it an id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// HTTP verb of a queued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case verb used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

/// A write attempted against the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRequest {
    /// Target URL, absolute or relative to the configured base URL.
    pub url: String,
    pub method: HttpMethod,
    /// Opaque JSON body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Extra headers sent verbatim.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl MutationRequest {
    /// Create a request with no payload and no extra headers.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        MutationRequest {
            url: url.into(),
            method,
            payload: None,
            headers: BTreeMap::new(),
        }
    }

    /// Attach a JSON payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Add an extra header, replacing any previous value for the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A request persisted in the mutation queue.
///
/// Immutable once stored: the queue only ever appends whole records and
/// removes them after a successful replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingMutation {
    /// Store-assigned id, strictly increasing in insertion order.
    pub id: i64,
    #[serde(flatten)]
    pub request: MutationRequest,
    pub enqueued_at: DateTime<Utc>,
}

impl PendingMutation {
    /// The request to replay.
    pub fn request(&self) -> &MutationRequest {
        &self.request
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
