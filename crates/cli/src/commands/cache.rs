// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use serde_json::Value;

use super::Context;
use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::sync::ReadCache;

pub fn put(ctx: &Context, collection: &str, entities: &str) -> Result<()> {
    put_impl(&ctx.cache(), collection, entities, &mut std::io::stdout())
}

pub fn list(ctx: &Context, collection: &str, output: OutputFormat) -> Result<()> {
    list_impl(&ctx.cache(), collection, output, &mut std::io::stdout())
}

pub(crate) fn put_impl(
    cache: &ReadCache,
    collection: &str,
    raw: &str,
    out: &mut impl Write,
) -> Result<()> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|e| Error::InvalidPayload(e.to_string()))?;
    let entities = match parsed {
        Value::Array(entities) => entities,
        _ => return Err(Error::InvalidPayload("expected a JSON array".to_string())),
    };
    let count = cache.refresh(collection, &entities)?;
    writeln!(out, "cached {} in {}", count, collection)?;
    Ok(())
}

pub(crate) fn list_impl(
    cache: &ReadCache,
    collection: &str,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let entities = cache.read(collection)?;
    write_entities(&entities, output, out)
}

/// Print entities one compact JSON object per line, or as a pretty array.
pub(crate) fn write_entities(
    entities: &[Value],
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match output {
        OutputFormat::Text => {
            for entity in entities {
                writeln!(out, "{}", entity)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(entities)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
