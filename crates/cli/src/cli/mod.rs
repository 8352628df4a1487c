// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.trim().to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "tzclock")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An offline-first world clock backed by a cached time zone directory")]
#[command(
    long_about = "An offline-first world clock backed by a cached time zone directory.\n\n\
    The directory is fetched from TimeZoneDB once and cached locally, so every \
    command works without a network connection."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the current time in the selected zone
    #[command(after_help = "\
Examples:
  tzclock now                     Time in the selected zone (or local time)
  tzclock now -z Asia/Tokyo       Time in a specific zone
  tzclock now --analog            Include analog hand angles")]
    Now {
        /// Zone to show instead of the selected one
        #[arg(short, long, value_parser = non_empty_string)]
        zone: Option<String>,

        /// Include analog clock hand angles
        #[arg(long)]
        analog: bool,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// List cached time zones, grouped by region
    #[command(after_help = "\
Examples:
  tzclock list                    All zones
  tzclock list india              Zones matching a country, city or zone name
  tzclock list -o json            Machine readable output")]
    List {
        /// Filter by zone name, country name, country code or city
        query: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Select the zone shown by `now`
    Select {
        /// Zone name, e.g. Asia/Kolkata
        #[arg(
            value_parser = non_empty_string,
            required_unless_present = "clear",
            conflicts_with = "clear"
        )]
        zone: Option<String>,

        /// Forget the current selection
        #[arg(long)]
        clear: bool,
    },

    /// Fetch the latest directory from the API
    Refresh,

    /// Show sync status
    Status {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Keep syncing and print state changes until interrupted
    Watch,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
