// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::coordinator::{DrainReport, SyncCoordinator};
use super::monitor::{ConnectivityState, NetworkMonitor};
use super::queue::MutationQueue;
use super::test_helpers::{make_request, memory_store};
use super::transport_tests::MockTransport;
use std::sync::Arc;
use std::time::Duration;
use yare::parameterized;

fn setup(
    initial: ConnectivityState,
    transport: MockTransport,
) -> (MutationQueue, NetworkMonitor<MockTransport>) {
    let store = memory_store();
    let queue = MutationQueue::new(store.clone());
    let coordinator = Arc::new(SyncCoordinator::new(store, Arc::new(transport)));
    (queue, NetworkMonitor::new(initial, coordinator))
}

#[parameterized(
    online = { ConnectivityState::Online, "online" },
    offline = { ConnectivityState::Offline, "offline" },
)]
fn state_labels(state: ConnectivityState, expected: &str) {
    assert_eq!(state.to_string(), expected);
    assert_eq!(
        serde_json::to_string(&state).unwrap(),
        format!("\"{}\"", expected)
    );
}

#[test]
fn initial_state_is_reported() {
    let (_, monitor) = setup(ConnectivityState::Offline, MockTransport::new());
    assert_eq!(monitor.state(), ConnectivityState::Offline);
    assert!(!monitor.is_online());

    let (_, monitor) = setup(ConnectivityState::Online, MockTransport::new());
    assert!(monitor.is_online());
}

#[tokio::test]
async fn reconnect_drains_queue() {
    let transport = MockTransport::new();
    let (queue, monitor) = setup(ConnectivityState::Offline, transport.clone());
    queue.enqueue(&make_request("/a")).unwrap();
    queue.enqueue(&make_request("/b")).unwrap();

    let handle = monitor
        .observe(ConnectivityState::Online)
        .expect("offline to online spawns a drain");

    let report = handle.wait().await.unwrap().unwrap();
    assert_eq!(report, DrainReport::Completed { replayed: 2 });
    assert!(queue.is_empty().unwrap());
    assert_eq!(transport.urls(), vec!["/a", "/b"]);
    assert!(monitor.is_online());
}

#[tokio::test]
async fn other_transitions_do_not_drain() {
    use ConnectivityState::{Offline, Online};

    for (from, to) in [(Online, Online), (Online, Offline), (Offline, Offline)] {
        let transport = MockTransport::new();
        let (queue, monitor) = setup(from, transport.clone());
        queue.enqueue(&make_request("/a")).unwrap();

        assert!(monitor.observe(to).is_none());
        tokio::task::yield_now().await;

        assert_eq!(monitor.state(), to);
        assert_eq!(queue.len().unwrap(), 1);
        assert!(transport.calls().is_empty());
    }
}

#[tokio::test]
async fn flapping_drains_once_per_reconnect() {
    let transport = MockTransport::new();
    let (queue, monitor) = setup(ConnectivityState::Offline, transport.clone());
    queue.enqueue(&make_request("/a")).unwrap();

    let first = monitor.observe(ConnectivityState::Online).unwrap();
    first.wait().await.unwrap().unwrap();

    monitor.observe(ConnectivityState::Offline);
    queue.enqueue(&make_request("/b")).unwrap();
    let second = monitor.observe(ConnectivityState::Online).unwrap();
    let report = second.wait().await.unwrap().unwrap();

    assert_eq!(report, DrainReport::Completed { replayed: 1 });
    assert_eq!(transport.urls(), vec!["/a", "/b"]);
}

#[tokio::test]
async fn overlapping_reconnects_share_one_drain() {
    let (transport, gate) = MockTransport::gated();
    let (queue, monitor) = setup(ConnectivityState::Offline, transport.clone());
    queue.enqueue(&make_request("/a")).unwrap();

    let first = monitor.observe(ConnectivityState::Online).unwrap();
    while transport.calls().is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    monitor.observe(ConnectivityState::Offline);
    let second = monitor.observe(ConnectivityState::Online).unwrap();

    let report = second.wait().await.unwrap().unwrap();
    assert_eq!(report, DrainReport::AlreadyRunning);

    gate.add_permits(1);
    let report = first.wait().await.unwrap().unwrap();
    assert_eq!(report, DrainReport::Completed { replayed: 1 });
    assert_eq!(transport.urls(), vec!["/a"]);
}

#[tokio::test]
async fn trigger_drain_runs_while_online() {
    let transport = MockTransport::new();
    let (queue, monitor) = setup(ConnectivityState::Online, transport.clone());
    queue.enqueue(&make_request("/a")).unwrap();

    let report = monitor.trigger_drain().wait().await.unwrap().unwrap();

    assert_eq!(report.replayed(), 1);
    assert!(queue.is_empty().unwrap());
}

#[tokio::test]
async fn cancelled_drain_leaves_entries_queued() {
    let (transport, _gate) = MockTransport::gated();
    let (queue, monitor) = setup(ConnectivityState::Offline, transport.clone());
    queue.enqueue(&make_request("/a")).unwrap();
    queue.enqueue(&make_request("/b")).unwrap();

    let handle = monitor.observe(ConnectivityState::Online).unwrap();
    while transport.calls().is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    handle.cancel();

    assert!(handle.wait().await.is_none());
    assert_eq!(queue.len().unwrap(), 2);
    assert!(!monitor.coordinator().is_draining());
}

#[tokio::test]
async fn shutdown_cancels_running_and_future_drains() {
    let (transport, _gate) = MockTransport::gated();
    let (queue, monitor) = setup(ConnectivityState::Offline, transport.clone());
    queue.enqueue(&make_request("/a")).unwrap();

    let running = monitor.observe(ConnectivityState::Online).unwrap();
    while transport.calls().is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    monitor.shutdown();

    assert!(running.wait().await.is_none());
    assert!(monitor.trigger_drain().wait().await.is_none());
    assert_eq!(queue.len().unwrap(), 1);
}

#[tokio::test]
async fn dropped_handle_does_not_stop_drain() {
    let transport = MockTransport::new();
    let (queue, monitor) = setup(ConnectivityState::Offline, transport.clone());
    queue.enqueue(&make_request("/a")).unwrap();

    drop(monitor.observe(ConnectivityState::Online));

    for _ in 0..200 {
        if queue.is_empty().unwrap() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(queue.is_empty().unwrap());
}
