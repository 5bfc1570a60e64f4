// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tether fetch`: load a list view, falling back to the read cache.

use std::io::Write;

use super::cache::write_entities;
use super::{runtime, Context};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::sync::{ListSource, OfflineClient, Transport};

pub fn run(ctx: &Context, collection: &str, url: &str, output: OutputFormat) -> Result<()> {
    runtime()?.block_on(async {
        let client = ctx.client().await?;
        run_impl(&client, collection, url, output, &mut std::io::stdout()).await
    })
}

pub(crate) async fn run_impl<T: Transport + 'static>(
    client: &OfflineClient<T>,
    collection: &str,
    url: &str,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let listing = client.load_list(collection, url).await?;
    if listing.source == ListSource::Cache {
        eprintln!(
            "offline: showing {} cached {}",
            listing.entities.len(),
            collection
        );
    }
    write_entities(&listing.entities, output, out)
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
