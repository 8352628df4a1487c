// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::{FetchError, SyncError};

/// All possible errors that can occur in the tzclk library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("time zone not found: {0}\n  hint: run 'tzclock list' to see available zones")]
    ZoneNotFound(String),

    #[error("no time zones available\n  hint: configure an API key and run 'tzclock refresh'")]
    EmptyDirectory,

    #[error("no API key configured\n  hint: set TZCLOCK_API_KEY or api_key in config.toml")]
    MissingApiKey,

    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("store error: {0}")]
    Store(#[from] tz_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for tzclk operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
