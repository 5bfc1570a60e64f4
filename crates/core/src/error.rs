// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tether-core operations.

use thiserror::Error;

/// All possible errors that can occur in tether-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("storage unavailable: {0}\n  hint: check that the store directory exists and is writable")]
    StorageUnavailable(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("store is closed")]
    StoreClosed,

    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("invalid HTTP method: '{0}'\n  hint: valid methods are: GET, POST, PUT, PATCH, DELETE")]
    InvalidMethod(String),

    #[error("entity in '{collection}' has no usable '{field}' key")]
    MissingCacheKey { collection: String, field: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the durable store failed, meaning nothing was saved.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::StorageUnavailable(_)
                | Error::Storage(_)
                | Error::StoreClosed
                | Error::LockPoisoned
                | Error::CorruptedData(_)
                | Error::Io(_)
        )
    }
}

/// A specialized Result type for tether-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
