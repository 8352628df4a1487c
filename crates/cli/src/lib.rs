// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tzclk - An offline-first world clock library.
//!
//! This crate provides the functionality behind the `tzclock` CLI: a clock
//! for a user-selected time zone, backed by a time zone directory that is
//! fetched once from TimeZoneDB and cached in a local SQLite database.
//!
//! # Main Components
//!
//! - [`sync::SyncCoordinator`] - Reconciles cache, remote API and connectivity
//!   into one observable [`sync::SyncState`]
//! - [`Config`] - User configuration (API key, API base, database location)
//! - [`display`] - Directory search, grouping and text rendering
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tz_core::StoreHandle;
//! use tzclk::sync::{HttpFetcher, ManualMonitor, SyncConfig, SyncCoordinator};
//!
//! let coordinator = SyncCoordinator::start(
//!     SyncConfig { has_credential: config.has_usable_api_key() },
//!     StoreHandle::at_path(config.db_path(&state_dir)),
//!     HttpFetcher::new(config.fetcher_config())?,
//!     Arc::new(ManualMonitor::new(true)),
//! )
//! .await;
//! let state = coordinator.state();
//! ```

mod cli;
pub mod colors;
mod commands;
pub mod display;
pub mod logging;

pub mod config;
pub mod env;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use error::{Error, Result};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Now {
            zone,
            analog,
            output,
        } => commands::now::run(zone, analog, output),
        Command::List { query, output } => commands::list::run(query, output),
        Command::Select { zone, clear } => commands::select::run(zone, clear),
        Command::Refresh => commands::refresh::run(),
        Command::Status { output } => commands::status::run(output),
        Command::Watch => commands::watch::run(),
    }
}
