// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` by every command that
//! takes a request to send or queue.

use clap::Args;
use serde_json::Value;
use tether_core::{HttpMethod, MutationRequest};

use crate::error::{Error, Result};

/// A request given on the command line.
#[derive(Args, Clone, Debug)]
pub struct RequestArgs {
    /// HTTP method (POST, PUT, PATCH, DELETE, GET)
    pub method: HttpMethod,

    /// Request URL, absolute or relative to the configured base_url
    pub url: String,

    /// JSON request body
    #[arg(long, short = 'd', value_name = "JSON")]
    pub payload: Option<String>,

    /// Extra header as NAME:VALUE (repeatable)
    #[arg(long = "header", short = 'H', value_name = "NAME:VALUE")]
    pub headers: Vec<String>,
}

impl RequestArgs {
    /// Build the request, validating payload and headers.
    pub fn to_request(&self) -> Result<MutationRequest> {
        let mut request = MutationRequest::new(self.method, self.url.clone());
        if let Some(raw) = &self.payload {
            let payload: Value =
                serde_json::from_str(raw).map_err(|e| Error::InvalidPayload(e.to_string()))?;
            request = request.with_payload(payload);
        }
        for header in &self.headers {
            let (name, value) = parse_header(header)?;
            request = request.with_header(name, value);
        }
        Ok(request)
    }
}

/// Split `NAME:VALUE`, trimming whitespace around both parts.
pub(crate) fn parse_header(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => Err(Error::InvalidHeader(raw.to_string())),
    }
}
