// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use tzclk::Cli;

fn main() {
    let cli = Cli::parse();

    let state_dir = tzclk::config::state_dir();
    tzclk::logging::setup_logging(&tzclk::config::log_path(&state_dir));

    if let Err(e) = tzclk::run(cli.command) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
