// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::commands::testing::TestContext;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tether_core::{HttpMethod, MutationRequest};

fn output_of(ctx: &TestContext, format: OutputFormat) -> String {
    let mut out = Vec::new();
    run_impl(&ctx.queue(), format, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_empty_queue_text() {
    let ctx = TestContext::new();
    assert_eq!(output_of(&ctx, OutputFormat::Text), "no pending requests\n");
}

#[test]
fn test_text_lists_in_replay_order() {
    let ctx = TestContext::new();
    let queue = ctx.queue();
    queue
        .enqueue(&MutationRequest::new(HttpMethod::Post, "/a"))
        .unwrap();
    queue
        .enqueue(&MutationRequest::new(HttpMethod::Put, "/b"))
        .unwrap();

    let text = output_of(&ctx, OutputFormat::Text);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("#1 POST /a ("));
    assert!(lines[1].starts_with("#2 PUT /b ("));
}

#[test]
fn test_json_output() {
    let ctx = TestContext::new();
    ctx.queue()
        .enqueue(
            &MutationRequest::new(HttpMethod::Post, "/service-requests")
                .with_payload(json!({"name": "Acme"})),
        )
        .unwrap();

    let parsed: Value = serde_json::from_str(&output_of(&ctx, OutputFormat::Json)).unwrap();
    let entry = &parsed.as_array().unwrap()[0];

    assert_eq!(entry["id"], 1);
    assert_eq!(entry["method"], "POST");
    assert_eq!(entry["url"], "/service-requests");
    assert_eq!(entry["payload"], json!({"name": "Acme"}));
}

#[test]
fn test_format_mutation_line() {
    let mutation = PendingMutation {
        id: 12,
        request: MutationRequest::new(HttpMethod::Delete, "/expenses/4"),
        enqueued_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
    };
    assert_eq!(
        format_mutation_line(&mutation),
        "#12 DELETE /expenses/4 (2026-03-01 09:30:00 UTC)"
    );
}
