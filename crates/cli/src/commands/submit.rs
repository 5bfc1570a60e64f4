// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tether submit`: send now, or save locally when the remote is unreachable.

use std::io::Write;

use super::{runtime, Context};
use crate::cli::RequestArgs;
use crate::error::Result;
use crate::sync::{OfflineClient, Submitted, Transport};

pub fn run(ctx: &Context, args: &RequestArgs) -> Result<()> {
    let request = args.to_request()?;
    runtime()?.block_on(async {
        let client = ctx.client().await?;
        run_impl(&client, request, &mut std::io::stdout()).await
    })
}

pub(crate) async fn run_impl<T: Transport + 'static>(
    client: &OfflineClient<T>,
    request: tether_core::MutationRequest,
    out: &mut impl Write,
) -> Result<()> {
    match client.submit(request).await? {
        Submitted::Sent(body) => {
            writeln!(out, "sent")?;
            let body = body.trim();
            if !body.is_empty() {
                writeln!(out, "{}", body)?;
            }
        }
        Submitted::Queued(mutation) => {
            writeln!(
                out,
                "saved locally as #{}, will sync when connection returns",
                mutation.id
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
