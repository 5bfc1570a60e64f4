// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use tether_core::PendingMutation;

use super::Context;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::sync::MutationQueue;

pub fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    run_impl(&ctx.queue(), output, &mut std::io::stdout())
}

pub(crate) fn run_impl(
    queue: &MutationQueue,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let pending = queue.pending()?;
    match output {
        OutputFormat::Text => {
            if pending.is_empty() {
                writeln!(out, "no pending requests")?;
            }
            for mutation in &pending {
                writeln!(out, "{}", format_mutation_line(mutation))?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&pending)?)?;
        }
    }
    Ok(())
}

/// `#<id> <METHOD> <URL> (<enqueued at>)`
pub(crate) fn format_mutation_line(mutation: &PendingMutation) -> String {
    format!(
        "#{} {} {} ({})",
        mutation.id,
        mutation.request.method,
        mutation.request.url,
        mutation.enqueued_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
