// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions.

use std::path::PathBuf;

/// Environment variable names.
pub mod vars {
    /// Overrides the state directory holding the store and default config.
    pub const TETHER_STATE_DIR: &str = "TETHER_STATE_DIR";
    /// XDG base directory for state files.
    pub const XDG_STATE_HOME: &str = "XDG_STATE_HOME";
    /// Log filter directives, read by `tracing-subscriber`.
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Returns the value of `TETHER_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    non_empty(vars::TETHER_STATE_DIR)
}

/// Returns the value of `XDG_STATE_HOME` if set.
pub fn xdg_state_home() -> Option<PathBuf> {
    non_empty(vars::XDG_STATE_HOME)
}

fn non_empty(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
