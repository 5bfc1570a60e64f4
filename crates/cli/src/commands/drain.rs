// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tether drain`: one synchronous replay of the queue.

use std::io::Write;

use super::{runtime, Context};
use crate::error::Result;
use crate::sync::{DrainReport, SyncCoordinator, Transport};

pub fn run(ctx: &Context) -> Result<()> {
    let coordinator = ctx.coordinator()?;
    runtime()?.block_on(run_impl(coordinator.as_ref(), &mut std::io::stdout()))
}

pub(crate) async fn run_impl<T: Transport>(
    coordinator: &SyncCoordinator<T>,
    out: &mut impl Write,
) -> Result<()> {
    let report = coordinator.drain().await?;
    writeln!(out, "{}", describe(&report))?;
    Ok(())
}

pub(crate) fn describe(report: &DrainReport) -> String {
    match report {
        DrainReport::AlreadyRunning => "a drain is already running".to_string(),
        DrainReport::Completed { replayed: 0 } => "nothing to replay".to_string(),
        DrainReport::Completed { replayed } => format!("replayed {}", replayed),
        DrainReport::Halted {
            replayed,
            failed_id,
            error,
        } => format!(
            "replayed {}, halted at #{}: {}\n  hint: #{} and everything after it remain queued",
            replayed, failed_id, error, failed_id
        ),
    }
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
