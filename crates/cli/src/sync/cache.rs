// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read cache for offline list views.
//!
//! Snapshots are refreshed after every successful online list fetch and read
//! back only while offline. There is no staleness bound and no invalidation.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tether_core::{CachedEntity, Result, Store};

/// Default entity field used as the cache key.
pub const DEFAULT_KEY_FIELD: &str = "id";

/// Put/get contract over the store's cache collection.
#[derive(Debug, Clone)]
pub struct ReadCache {
    store: Store,
    key_field: String,
}

impl ReadCache {
    /// Create a cache keyed by the default `id` field.
    pub fn new(store: Store) -> Self {
        Self::with_key_field(store, DEFAULT_KEY_FIELD)
    }

    /// Create a cache keyed by a custom entity field.
    pub fn with_key_field(store: Store, key_field: impl Into<String>) -> Self {
        ReadCache {
            store,
            key_field: key_field.into(),
        }
    }

    /// Store the latest snapshot of each entity, one upsert per entity.
    ///
    /// Entities absent from `entities` keep their previous snapshot. Every
    /// key is validated before the first write.
    pub fn refresh(&self, collection: &str, entities: &[Value]) -> Result<usize> {
        let keyed = entities
            .iter()
            .map(|entity| {
                CachedEntity::key_of(collection, entity, &self.key_field).map(|key| (key, entity))
            })
            .collect::<Result<Vec<_>>>()?;

        for (key, entity) in &keyed {
            self.store.put(collection, key, entity)?;
        }
        tracing::debug!(collection, count = keyed.len(), "refreshed cache");
        Ok(keyed.len())
    }

    /// Whatever was last cached for the collection.
    pub fn read(&self, collection: &str) -> Result<Vec<Value>> {
        Ok(self
            .store
            .get_all(collection)?
            .into_iter()
            .map(|cached| cached.entity)
            .collect())
    }

    /// Cached entities deserialized into `T`.
    pub fn read_as<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        self.read(collection)?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(Into::into))
            .collect()
    }
}
