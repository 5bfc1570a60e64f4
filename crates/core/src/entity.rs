// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cached entity snapshots for offline list views.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Business identifier of a cached entity.
///
/// Integer and string ids are distinct keys: `1` and `"1"` never collide.
/// Keys order integers first (numerically), then strings (lexically).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Int(n) => write!(f, "{}", n),
            CacheKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CacheKey {
    fn from(n: i64) -> Self {
        CacheKey::Int(n)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        CacheKey::Text(s.to_string())
    }
}

/// Last known snapshot of one entity within a named collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedEntity {
    pub collection: String,
    /// Business identifier, unique within the collection.
    pub key: CacheKey,
    pub entity: Value,
    pub updated_at: DateTime<Utc>,
}

impl CachedEntity {
    /// Extract the cache key of `entity` from its `field` member.
    ///
    /// Non-empty strings and integers within `i64` are accepted; anything
    /// else cannot key the cache.
    pub fn key_of(collection: &str, entity: &Value, field: &str) -> Result<CacheKey> {
        let key = match entity.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Some(CacheKey::Text(s.clone())),
            Some(Value::Number(n)) => n.as_i64().map(CacheKey::Int),
            _ => None,
        };
        key.ok_or_else(|| Error::MissingCacheKey {
            collection: collection.to_string(),
            field: field.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
