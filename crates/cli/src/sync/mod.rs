// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync of the time zone directory.
//!
//! Reconciles the local SQLite cache, the remote directory API and
//! connectivity transitions into one observable [`SyncState`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Coordinator    │────►│   Fetcher   │────►│ Directory   │
//! │(SyncCoordinator) │     │   (trait)   │     │    API      │
//! └──────────────────┘     └─────────────┘     └─────────────┘
//!     │          ▲
//!     ▼          │ online/offline
//! ┌─────────┐  ┌──────────────────────┐
//! │  Store  │  │ ConnectivityMonitor  │
//! │(tz-core)│  │       (trait)        │
//! └─────────┘  └──────────────────────┘
//! ```
//!
//! # Features
//!
//! - Cache-first startup; remote fetch only when the cache is empty
//! - Reconnect sync while the directory is empty
//! - Manual refresh that never clears existing data on failure
//! - Selection persisted in the background
//! - Injectable fetcher, store and monitor for testing

mod connectivity;
mod coordinator;
mod fetcher;
mod state;

pub use connectivity::{
    probe, ConnectivityMonitor, Listener, ListenerRegistry, ManualMonitor, ProbeMonitor,
    Subscription,
};
pub use coordinator::{SelectionWrite, SyncConfig, SyncCoordinator, SyncError, SyncResult};
pub use fetcher::{
    fetch_or_empty, parse_list_response, FetchError, FetchResult, Fetcher, FetcherConfig,
    HttpFetcher, DEFAULT_API_BASE,
};
pub use state::{DataOrigin, SyncPhase, SyncState};

#[cfg(test)]
mod test_helpers;
