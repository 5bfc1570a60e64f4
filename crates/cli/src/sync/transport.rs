// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for replaying requests against the remote API.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production
//! - Mock transports for unit testing

use std::future::Future;
use std::pin::Pin;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tether_core::{HttpMethod, MutationRequest};

/// Error type for transport operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The remote could not be reached (connect, timeout, dropped request).
    #[error("connectivity failure: {0}")]
    Connectivity(String),

    /// The remote answered with a non-success status.
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request could not be built (bad URL or header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Returns true for failures caused by missing connectivity.
    ///
    /// Only this class routes a write to the offline queue.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, TransportError::Connectivity(_))
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Boxed future returned by [`Transport::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = TransportResult<String>> + Send + 'a>>;

/// Transport trait for request/response communication.
///
/// The response body is opaque to the sync engine; only success or failure
/// matters during replay.
pub trait Transport: Send + Sync {
    /// Execute a request and return the response body.
    fn execute<'a>(&'a self, request: &'a MutationRequest) -> TransportFuture<'a>;
}

/// HTTP transport implementation using reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport that resolves relative URLs against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a transport around a preconfigured client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        HttpTransport {
            client,
            base_url: base_url.into(),
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a request URL. Absolute URLs are used as is.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if url.starts_with('/') {
            format!("{}{}", base, url)
        } else {
            format!("{}/{}", base, url)
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn to_header_map(request: &MutationRequest) -> TransportResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &request.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(format!("header '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::InvalidRequest(format!("header '{}': {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Classify a reqwest error.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        // connect, timeout, request and body errors all mean the exchange
        // never completed
        TransportError::Connectivity(err.to_string())
    }
}

impl Transport for HttpTransport {
    fn execute<'a>(&'a self, request: &'a MutationRequest) -> TransportFuture<'a> {
        Box::pin(async move {
            let url = self.resolve_url(&request.url);
            let headers = to_header_map(request)?;

            let mut builder = self
                .client
                .request(to_reqwest_method(request.method), &url)
                .headers(headers);
            if let Some(payload) = &request.payload {
                builder = builder.json(payload);
            }

            let response = builder.send().await.map_err(classify)?;
            let status = response.status();
            let body = response.text().await.map_err(classify)?;

            if status.is_success() {
                Ok(body)
            } else {
                Err(TransportError::Rejected {
                    status: status.as_u16(),
                    body,
                })
            }
        })
    }
}
