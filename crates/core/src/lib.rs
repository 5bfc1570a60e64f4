// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tether-core: durable storage for the offline mutation queue and read cache.
//!
//! This crate provides the data model and the SQLite-backed [`Store`] used by
//! the tether sync engine.

pub mod db;
pub mod entity;
pub mod error;
pub mod mutation;

pub use db::Store;
pub use entity::{CacheKey, CachedEntity};
pub use error::{Error, Result};
pub use mutation::{HttpMethod, MutationRequest, PendingMutation};
