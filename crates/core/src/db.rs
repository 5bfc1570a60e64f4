// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed durable store.
//!
//! The [`Store`] owns two independent collections: the FIFO mutation queue
//! and the keyed read cache. Every write is a single statement, so a failed
//! call never leaves a partial record behind.

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row, ToSql};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::entity::{CacheKey, CachedEntity};
use crate::error::{Error, Result};
use crate::mutation::{HttpMethod, MutationRequest, PendingMutation};

/// SQL schema for the durable store.
pub const SCHEMA: &str = r#"
-- Mutation queue; AUTOINCREMENT keeps ids strictly increasing and never reused
CREATE TABLE IF NOT EXISTS mutations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    method TEXT NOT NULL,
    payload TEXT,
    headers TEXT,
    enqueued_at TEXT NOT NULL
);

-- Read cache, last write wins per key. The key column has no declared type
-- so integer and text ids keep their storage class: 1 and '1' are distinct,
-- and ORDER BY sorts integers numerically ahead of text.
CREATE TABLE IF NOT EXISTS cache (
    collection TEXT NOT NULL,
    key NOT NULL,
    entity TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (collection, key)
);
"#;

/// Layout version recorded in `PRAGMA user_version`.
pub const LAYOUT_VERSION: i64 = 2;

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| corrupted(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupted(format!("invalid timestamp '{value}' in column '{column}'")))
}

/// Parse a JSON column from the database.
fn parse_json<T: serde::de::DeserializeOwned>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    serde_json::from_str(value)
        .map_err(|e| corrupted(format!("invalid JSON in column '{column}': {e}")))
}

impl ToSql for CacheKey {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CacheKey::Int(n) => ToSqlOutput::from(*n),
            CacheKey::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

impl FromSql for CacheKey {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(n) => Ok(CacheKey::Int(n)),
            ValueRef::Text(_) => value.as_str().map(CacheKey::from),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

fn row_to_mutation(row: &Row<'_>) -> std::result::Result<PendingMutation, rusqlite::Error> {
    let method_str: String = row.get(2)?;
    let payload_str: Option<String> = row.get(3)?;
    let headers_str: Option<String> = row.get(4)?;
    let enqueued_str: String = row.get(5)?;

    let payload = match payload_str {
        Some(s) => Some(parse_json::<Value>(&s, "payload")?),
        None => None,
    };
    let headers = match headers_str {
        Some(s) => parse_json::<BTreeMap<String, String>>(&s, "headers")?,
        None => BTreeMap::new(),
    };

    Ok(PendingMutation {
        id: row.get(0)?,
        request: MutationRequest {
            url: row.get(1)?,
            method: parse_db::<HttpMethod>(&method_str, "method")?,
            payload,
            headers,
        },
        enqueued_at: parse_timestamp(&enqueued_str, "enqueued_at")?,
    })
}

fn row_to_entity(row: &Row<'_>) -> std::result::Result<CachedEntity, rusqlite::Error> {
    let entity_str: String = row.get(2)?;
    let updated_str: String = row.get(3)?;
    Ok(CachedEntity {
        collection: row.get(0)?,
        key: row.get(1)?,
        entity: parse_json(&entity_str, "entity")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

/// Unwrap a rusqlite conversion failure that carries one of our own errors.
fn lift(err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::FromSqlConversionFailure(_, _, inner) => match inner.downcast::<Error>() {
            Ok(e) => *e,
            Err(other) => Error::CorruptedData(other.to_string()),
        },
        other => Error::Storage(other),
    }
}

/// Apply the schema and record the layout version.
///
/// Layout 1 stored cache keys as TEXT. The cache only holds snapshots that
/// the next online fetch restores, so it is dropped and recreated; the
/// mutation queue is untouched.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version == 1 {
        conn.execute_batch("DROP TABLE IF EXISTS cache;")?;
    }
    conn.execute_batch(SCHEMA)?;
    conn.execute_batch(&format!("PRAGMA user_version = {LAYOUT_VERSION};"))?;
    Ok(())
}

/// Handle to the durable store.
///
/// Cloning the handle shares the same connection; [`Store::close`] closes it
/// for every clone.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Open the store at the given path, creating it if needed.
    ///
    /// Fails with [`Error::StorageUnavailable`] when the location cannot hold
    /// a database.
    pub fn open(path: &Path) -> Result<Self> {
        let unavailable =
            |reason: String| Error::StorageUnavailable(format!("{}: {}", path.display(), reason));

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| unavailable(e.to_string()))?;
            }
        }

        let conn = Connection::open(path).map_err(|e| unavailable(e.to_string()))?;

        // FULL sync so a committed append survives power loss in WAL mode
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = FULL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(|e| unavailable(e.to_string()))?;

        run_migrations(&conn)?;
        Ok(Store::from_connection(conn))
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Store::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Store {
            conn: Arc::new(Mutex::new(Some(conn))),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let conn = guard.as_ref().ok_or(Error::StoreClosed)?;
        f(conn)
    }

    /// Returns true until [`Store::close`] has been called on any clone.
    pub fn is_open(&self) -> bool {
        self.conn.lock().map(|g| g.is_some()).unwrap_or(false)
    }

    /// Close the store. Later calls through any handle fail with [`Error::StoreClosed`].
    pub fn close(&self) -> Result<()> {
        let mut guard = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        match guard.take() {
            Some(conn) => conn.close().map_err(|(_, e)| Error::Storage(e)),
            None => Ok(()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutation queue
    // ─────────────────────────────────────────────────────────────────────

    /// Persist a request at the tail of the queue and return the stored record.
    pub fn append(
        &self,
        request: &MutationRequest,
        enqueued_at: DateTime<Utc>,
    ) -> Result<PendingMutation> {
        let payload = request
            .payload
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let headers = if request.headers.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&request.headers)?)
        };

        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO mutations (url, method, payload, headers, enqueued_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    request.url,
                    request.method.as_str(),
                    payload,
                    headers,
                    enqueued_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        Ok(PendingMutation {
            id,
            request: request.clone(),
            enqueued_at,
        })
    }

    /// All queued mutations in ascending id order.
    ///
    /// Each call reads a fresh snapshot.
    pub fn list_all(&self) -> Result<Vec<PendingMutation>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, url, method, payload, headers, enqueued_at
                 FROM mutations ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], row_to_mutation)?;
            let mut mutations = Vec::new();
            for row in rows {
                mutations.push(row.map_err(lift)?);
            }
            Ok(mutations)
        })
    }

    /// Delete one queued mutation.
    ///
    /// Removing an absent id is not an error; returns whether a row was deleted.
    pub fn remove(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM mutations WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
    }

    /// Number of queued mutations.
    pub fn pending_count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM mutations", [], |row| row.get(0))?;
            Ok(usize::try_from(count).unwrap_or(0))
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read cache
    // ─────────────────────────────────────────────────────────────────────

    /// Upsert one entity snapshot.
    pub fn put(&self, collection: &str, key: &CacheKey, entity: &Value) -> Result<()> {
        let json = serde_json::to_string(entity)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO cache (collection, key, entity, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (collection, key)
                 DO UPDATE SET entity = excluded.entity, updated_at = excluded.updated_at",
                params![collection, key, json, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
    }

    /// All cached entities of a collection in key order: integer keys
    /// numerically, then string keys lexically.
    pub fn get_all(&self, collection: &str) -> Result<Vec<CachedEntity>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT collection, key, entity, updated_at
                 FROM cache WHERE collection = ?1 ORDER BY key ASC",
            )?;
            let rows = stmt.query_map(params![collection], row_to_entity)?;
            let mut entities = Vec::new();
            for row in rows {
                entities.push(row.map_err(lift)?);
            }
            Ok(entities)
        })
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
