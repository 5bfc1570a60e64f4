// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::commands::testing::{unreachable_base_url, TestContext};
use crate::sync::TransportError;
use tether_core::{HttpMethod, MutationRequest};
use yare::parameterized;

#[parameterized(
    already_running = { DrainReport::AlreadyRunning, "a drain is already running" },
    empty = { DrainReport::Completed { replayed: 0 }, "nothing to replay" },
    completed = { DrainReport::Completed { replayed: 3 }, "replayed 3" },
)]
fn test_describe(report: DrainReport, expected: &str) {
    assert_eq!(describe(&report), expected);
}

#[test]
fn test_describe_halted() {
    let text = describe(&DrainReport::Halted {
        replayed: 1,
        failed_id: 2,
        error: TransportError::Rejected {
            status: 500,
            body: "boom".into(),
        },
    });
    assert!(text.starts_with("replayed 1, halted at #2: request rejected with status 500"));
    assert!(text.contains("#2 and everything after it remain queued"));
}

#[tokio::test]
async fn test_drain_unreachable_remote_keeps_queue() {
    let ctx = TestContext::with_remote(&unreachable_base_url());
    ctx.queue()
        .enqueue(&MutationRequest::new(HttpMethod::Post, "/a"))
        .unwrap();
    let coordinator = ctx.context().coordinator().unwrap();

    let mut out = Vec::new();
    run_impl(coordinator.as_ref(), &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("replayed 0, halted at #1: connectivity failure"));
    assert_eq!(ctx.queue().len().unwrap(), 1);
}

#[test]
fn test_drain_requires_remote() {
    let ctx = TestContext::new();
    assert!(run(&ctx.context()).is_err());
}
