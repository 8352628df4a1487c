// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The reactive state published by the sync coordinator.

use serde::Serialize;
use std::fmt;
use tz_core::{Directory, TimezoneRecord};

/// Lifecycle phase of the coordinator. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    /// Session start or manual refresh in progress.
    Loading,
    /// Idle with a usable (possibly empty) directory.
    Ready,
    /// Reconnect sync in progress after coming back online.
    Syncing,
    /// Last operation failed; see the error message.
    Error,
}

impl SyncPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPhase::Loading => "loading",
            SyncPhase::Ready => "ready",
            SyncPhase::Syncing => "syncing",
            SyncPhase::Error => "error",
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the current directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// No directory has been loaded.
    #[default]
    None,
    /// Loaded from the local cache.
    Cache,
    /// Fetched from the remote directory API.
    Remote,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataOrigin::None => "none",
            DataOrigin::Cache => "cache",
            DataOrigin::Remote => "remote",
        }
    }
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of everything the presentation layer reads.
///
/// `selected` is either `None` or a member of `directory`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncState {
    pub directory: Directory,
    pub selected: Option<TimezoneRecord>,
    pub phase: SyncPhase,
    pub origin: DataOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SyncState {
    /// State at session start, before anything is known.
    pub fn loading() -> Self {
        SyncState {
            directory: Directory::empty(),
            selected: None,
            phase: SyncPhase::Loading,
            origin: DataOrigin::None,
            error_message: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SyncPhase::Loading | SyncPhase::Syncing)
    }

    /// GMT offset of the selected zone, if any.
    pub fn selected_offset(&self) -> Option<i32> {
        self.selected.as_ref().map(|r| r.gmt_offset)
    }

    /// Replace the directory and re-resolve the selection against it.
    pub(crate) fn apply_directory(&mut self, directory: Directory, origin: DataOrigin) {
        self.selected = self
            .selected
            .as_ref()
            .and_then(|current| directory.find(&current.zone_name).cloned());
        self.directory = directory;
        self.origin = origin;
    }
}

impl Default for SyncState {
    fn default() -> Self {
        SyncState::loading()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
