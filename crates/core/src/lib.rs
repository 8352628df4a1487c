// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tz-core: Shared library for the tzclock time zone clock
//!
//! This crate provides the time zone record types, the SQLite-backed
//! directory cache, and the wall clock helpers used by the tzclock CLI.

pub mod clock;
pub mod db;
pub mod error;
pub mod handle;
pub mod record;

pub use clock::{format_gmt_offset, format_utc_offset, ClockReading, HandAngles, Period};
pub use db::{Database, Store};
pub use error::{Error, Result};
pub use handle::{default_db_path, StoreHandle};
pub use record::{city_name, Directory, TimezoneRecord};
