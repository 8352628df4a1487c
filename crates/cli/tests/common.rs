// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tz_core::{Database, Directory, Store, TimezoneRecord};

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `tzclock` rooted in `state_dir`, with no API key and no colors.
pub fn tzclock(state_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tzclock");
    cmd.env("TZCLOCK_STATE_DIR", state_dir.path())
        .env("NO_COLOR", "1")
        .env_remove("TZCLOCK_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Open the database the CLI uses for `state_dir`.
pub fn open_db(state_dir: &TempDir) -> Database {
    Database::open(&state_dir.path().join("tzclock.db")).unwrap()
}

/// Temp state directory with a small cached directory.
pub fn seeded_state() -> TempDir {
    let temp = TempDir::new().unwrap();
    let records = [
        ("IN", "India", "Asia/Kolkata", 19800),
        ("JP", "Japan", "Asia/Tokyo", 32400),
        ("GB", "United Kingdom", "Europe/London", 0),
        ("US", "United States", "America/New_York", -18000),
    ]
    .iter()
    .map(|(code, country, zone, offset)| {
        TimezoneRecord::new(*code, *country, *zone, *offset, false).unwrap()
    })
    .collect();
    open_db(&temp)
        .replace_directory(&Directory::from_records(records))
        .unwrap();
    temp
}

/// Write `config.toml` into the state directory.
pub fn write_config(state_dir: &TempDir, content: &str) {
    std::fs::write(state_dir.path().join("config.toml"), content).unwrap();
}
