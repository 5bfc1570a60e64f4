// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tether enqueue`: queue a request without touching the network.

use std::io::Write;

use super::Context;
use crate::cli::RequestArgs;
use crate::error::Result;
use crate::sync::MutationQueue;

pub fn run(ctx: &Context, args: &RequestArgs) -> Result<()> {
    run_impl(&ctx.queue(), args, &mut std::io::stdout())
}

pub(crate) fn run_impl(
    queue: &MutationQueue,
    args: &RequestArgs,
    out: &mut impl Write,
) -> Result<()> {
    let request = args.to_request()?;
    let mutation = queue.enqueue(&request)?;
    writeln!(
        out,
        "queued #{} {} {}",
        mutation.id, mutation.request.method, mutation.request.url
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "enqueue_tests.rs"]
mod tests;
