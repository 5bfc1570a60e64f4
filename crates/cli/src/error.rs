// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::TransportError;

/// All errors surfaced by the tether CLI and library.
///
/// Storage failures mean the write was not saved. Transport failures reach
/// this type only from direct attempts, never from a background drain.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] tether_core::Error),

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("config error: {0}")]
    Config(String),

    #[error("no remote configured\n  hint: set [remote] base_url in the config file")]
    NoRemote,

    #[error("invalid header '{0}'\n  hint: headers are written as NAME:VALUE")]
    InvalidHeader(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("expected a JSON array from {url}")]
    NotAList { url: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the failure came from the local store.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_storage())
    }
}

/// A specialized Result type for tether operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
