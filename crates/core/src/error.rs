// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tz-core operations.

use thiserror::Error;

/// All possible errors that can occur in tz-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("invalid time zone record: {0}")]
    InvalidRecord(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// A specialized Result type for tz-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
