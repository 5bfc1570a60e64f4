// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    unavailable = { Error::StorageUnavailable("permission denied".into()), "permission denied" },
    closed = { Error::StoreClosed, "closed" },
    invalid_method = { Error::InvalidMethod("FETCH".into()), "FETCH" },
    corrupted = { Error::CorruptedData("bad row".into()), "bad row" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_missing_cache_key_display() {
    let err = Error::MissingCacheKey {
        collection: "projects".into(),
        field: "id".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("projects"));
    assert!(msg.contains("'id'"));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.is_storage());
}

#[test]
fn error_from_json_is_not_storage() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
    assert!(!err.is_storage());
}

#[parameterized(
    unavailable = { Error::StorageUnavailable("x".into()), true },
    closed = { Error::StoreClosed, true },
    poisoned = { Error::LockPoisoned, true },
    invalid_method = { Error::InvalidMethod("x".into()), false },
    missing_key = { Error::MissingCacheKey { collection: "c".into(), field: "id".into() }, false },
)]
fn error_is_storage(err: Error, expected: bool) {
    assert_eq!(err.is_storage(), expected);
}
