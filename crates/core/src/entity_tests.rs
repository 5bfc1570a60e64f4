// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    string_id = { json!({"id": "prj-1"}), CacheKey::from("prj-1") },
    numeric_string_id = { json!({"id": "1"}), CacheKey::from("1") },
    integer_id = { json!({"id": 42}), CacheKey::Int(42) },
    negative_id = { json!({"id": -3}), CacheKey::Int(-3) },
)]
fn key_of_valid(entity: Value, expected: CacheKey) {
    assert_eq!(CachedEntity::key_of("projects", &entity, "id").unwrap(), expected);
}

#[parameterized(
    missing = { json!({"name": "Acme"}) },
    empty_string = { json!({"id": ""}) },
    float = { json!({"id": 1.5}) },
    beyond_i64 = { json!({"id": u64::MAX}) },
    nested = { json!({"id": {"value": 1}}) },
    not_object = { json!([1, 2]) },
)]
fn key_of_invalid(entity: Value) {
    let err = CachedEntity::key_of("projects", &entity, "id").unwrap_err();
    assert!(matches!(err, Error::MissingCacheKey { .. }));
}

#[test]
fn key_of_uses_configured_field() {
    let entity = json!({"id": 1, "uuid": "a-b-c"});
    assert_eq!(
        CachedEntity::key_of("samples", &entity, "uuid").unwrap(),
        CacheKey::from("a-b-c")
    );
}

#[test]
fn integer_and_string_keys_differ() {
    let int = CachedEntity::key_of("projects", &json!({"id": 1}), "id").unwrap();
    let text = CachedEntity::key_of("projects", &json!({"id": "1"}), "id").unwrap();
    assert_ne!(int, text);
    assert_eq!(int.to_string(), text.to_string());
}

#[test]
fn keys_order_integers_numerically_before_strings() {
    let mut keys = vec![
        CacheKey::from("b"),
        CacheKey::Int(10),
        CacheKey::from("10"),
        CacheKey::Int(2),
        CacheKey::from("a"),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            CacheKey::Int(2),
            CacheKey::Int(10),
            CacheKey::from("10"),
            CacheKey::from("a"),
            CacheKey::from("b"),
        ]
    );
}

#[test]
fn key_serializes_with_its_json_type() {
    assert_eq!(serde_json::to_value(CacheKey::Int(7)).unwrap(), json!(7));
    assert_eq!(serde_json::to_value(CacheKey::from("7")).unwrap(), json!("7"));
}
