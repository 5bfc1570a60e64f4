// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::path::PathBuf;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn cargo_bin() -> Command {
    cargo_bin_cmd!("tether")
}

/// The `tether` binary pointed at a temp state directory.
///
/// Store and config both live under `temp`. `RUST_LOG` and proxy settings
/// are cleared so the host environment does not leak into assertions.
pub fn tether(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin();
    cmd.env("TETHER_STATE_DIR", temp.path())
        .env_remove("RUST_LOG")
        .env_remove("XDG_STATE_HOME")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .arg("--store")
        .arg(store_path(temp))
        .arg("--config")
        .arg(config_path(temp));
    cmd
}

pub fn store_path(temp: &TempDir) -> PathBuf {
    temp.path().join("store.db")
}

pub fn config_path(temp: &TempDir) -> PathBuf {
    temp.path().join("config.toml")
}

/// Write a config whose remote is `base_url`.
pub fn write_remote_config(temp: &TempDir, base_url: &str) {
    let config = format!(
        "[remote]\nbase_url = \"{}\"\nprobe_timeout_ms = 500\n",
        base_url
    );
    std::fs::write(config_path(temp), config).unwrap();
}

/// An `http://` base URL on a local port with nothing listening.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    format!("http://{}", listener.local_addr().unwrap())
}

/// Queue a request and return the printed line.
pub fn enqueue(temp: &TempDir, method: &str, url: &str) -> String {
    let output = tether(temp)
        .args(["enqueue", method, url])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
