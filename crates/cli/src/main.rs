// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use tether_sync::Cli;

fn main() {
    let cli = Cli::parse();
    tether_sync::setup_logging(cli.log_file.as_deref());
    if let Err(e) = tether_sync::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
