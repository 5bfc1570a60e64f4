// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use args::RequestArgs;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "tether")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first mutation queue and sync engine")]
#[command(
    long_about = "Offline-first mutation queue and sync engine.\n\n\
    Writes that cannot reach the remote API are saved locally and replayed in order \
    once the connection returns. List views fall back to the last cached snapshot."
)]
pub struct Cli {
    /// Config file (default: <state dir>/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store database, overriding [store] path from the config
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Queue
    // ─────────────────────────────────────────────────────────────────────────
    /// Queue a request for later replay without touching the network
    #[command(after_help = "\
Examples:
  tether enqueue POST /service-requests -d '{\"name\":\"Acme\"}'
  tether enqueue DELETE /expenses/4 -H 'Authorization: Bearer t0ken'")]
    Enqueue {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Send a request now, saving it locally if the remote is unreachable
    #[command(after_help = "\
Examples:
  tether submit POST /samples -d '{\"code\":\"S-1\",\"ph\":7}'")]
    Submit {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// List queued requests in replay order
    Pending {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Replay the queue once, stopping at the first failure
    Drain,

    // ─────────────────────────────────────────────────────────────────────────
    // Cache
    // ─────────────────────────────────────────────────────────────────────────
    /// Load a list view: fetch and cache when online, read the cache offline
    #[command(after_help = "\
Examples:
  tether fetch projects /projects
  tether fetch projects /projects -o json")]
    Fetch {
        /// Cache collection name
        collection: String,

        /// List URL, absolute or relative to the configured base_url
        url: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Inspect or seed the read cache
    #[command(subcommand)]
    Cache(CacheCommand),

    // ─────────────────────────────────────────────────────────────────────────
    // Sync
    // ─────────────────────────────────────────────────────────────────────────
    /// Watch connectivity and drain the queue on every reconnect
    ///
    /// Runs until interrupted with Ctrl-C.
    Watch,

    /// Show queue length and connectivity
    Status {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

/// Read cache commands.
#[derive(Subcommand)]
pub enum CacheCommand {
    /// Store entities in a collection, replacing snapshots with the same key
    #[command(after_help = "\
Examples:
  tether cache put projects '[{\"id\":1,\"name\":\"Alpha\"}]'")]
    Put {
        /// Cache collection name
        collection: String,

        /// JSON array of entities
        entities: String,
    },

    /// Print the cached entities of a collection
    List {
        /// Cache collection name
        collection: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
