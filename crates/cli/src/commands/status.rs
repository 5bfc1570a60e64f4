// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use serde::Serialize;

use super::{runtime, Context};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::sync::ConnectivityState;

/// Snapshot printed by `tether status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub pending: usize,
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<ConnectivityState>,
}

pub fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let connectivity = match &ctx.config.remote {
        Some(_) => Some(runtime()?.block_on(ctx.probe())?),
        None => None,
    };
    let status = Status {
        pending: ctx.queue().len()?,
        store: ctx.store_path.display().to_string(),
        remote: ctx.config.remote.as_ref().map(|r| r.base_url.clone()),
        connectivity,
    };
    write_status(&status, output, &mut std::io::stdout())
}

pub(crate) fn write_status(
    status: &Status,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match output {
        OutputFormat::Text => {
            writeln!(out, "Pending: {}", status.pending)?;
            writeln!(out, "Store: {}", status.store)?;
            match (&status.remote, status.connectivity) {
                (Some(remote), Some(state)) => {
                    writeln!(out, "Remote: {} ({})", remote, state)?;
                }
                (Some(remote), None) => writeln!(out, "Remote: {}", remote)?,
                _ => writeln!(out, "Remote: not configured")?,
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(status)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
