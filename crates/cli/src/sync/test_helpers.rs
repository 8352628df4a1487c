// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tz_core::{Database, Directory, Store, TimezoneRecord};

use super::connectivity::{ConnectivityMonitor, Listener, ListenerRegistry, Subscription};
use super::fetcher::{FetchError, FetchResult, Fetcher};
use super::state::{SyncPhase, SyncState};

/// Create a record for `zone_name` with a country derived from its region.
pub fn make_zone(zone_name: &str) -> TimezoneRecord {
    let region = zone_name.split('/').next().unwrap_or(zone_name);
    TimezoneRecord::new("XX", region, zone_name, 0, false).unwrap()
}

/// Create a directory holding one record per zone name.
pub fn make_directory(zone_names: &[&str]) -> Directory {
    Directory::from_records(zone_names.iter().map(|z| make_zone(z)).collect())
}

/// Mock fetcher returning queued results.
///
/// Clones share the queue, the call counter and the gate, so a test can
/// keep a clone after handing one to the coordinator.
#[derive(Clone, Default)]
pub struct MockFetcher {
    responses: Arc<Mutex<VecDeque<FetchResult<Directory>>>>,
    calls: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher whose calls block until the returned gate is notified.
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let fetcher = MockFetcher {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (fetcher, gate)
    }

    pub fn queue_ok(&self, directory: Directory) {
        self.responses.lock().unwrap().push_back(Ok(directory));
    }

    pub fn queue_error(&self, error: FetchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = FetchResult<Directory>> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.clone();
        let responses = Arc::clone(&self.responses);
        Box::pin(async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Request("no response queued".into())))
        })
    }
}

/// Monitor that calls late subscribers with `true` when last seen online,
/// the way [`ProbeMonitor`](super::connectivity::ProbeMonitor) does.
pub struct ReplayingMonitor {
    registry: ListenerRegistry,
}

impl ReplayingMonitor {
    pub fn new() -> Arc<Self> {
        Arc::new(ReplayingMonitor {
            registry: ListenerRegistry::replaying_online(),
        })
    }

    pub fn set_online(&self, online: bool) {
        self.registry.notify(online);
    }

    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }
}

impl ConnectivityMonitor for ReplayingMonitor {
    fn subscribe(&self, listener: Listener) -> Subscription {
        self.registry.add(listener)
    }
}

/// In-memory store with switchable failures.
pub struct FlakyStore {
    db: Database,
    pub fail_read_directory: AtomicBool,
    pub fail_replace_directory: AtomicBool,
    pub fail_read_selection: AtomicBool,
    pub fail_write_selection: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(FlakyStore {
            db: Database::open_in_memory().unwrap(),
            fail_read_directory: AtomicBool::new(false),
            fail_replace_directory: AtomicBool::new(false),
            fail_read_selection: AtomicBool::new(false),
            fail_write_selection: AtomicBool::new(false),
        })
    }

    /// Store pre-filled with a cached directory.
    pub fn with_cache(zone_names: &[&str]) -> Arc<Self> {
        let store = FlakyStore::new();
        store.db.replace_directory(&make_directory(zone_names)).unwrap();
        store
    }

    fn check(flag: &AtomicBool, what: &str) -> tz_core::Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(tz_core::Error::StoreUnavailable(format!("injected {what} failure")))
        } else {
            Ok(())
        }
    }
}

impl Store for FlakyStore {
    fn read_directory(&self) -> tz_core::Result<Directory> {
        Self::check(&self.fail_read_directory, "read")?;
        self.db.read_directory()
    }

    fn replace_directory(&self, directory: &Directory) -> tz_core::Result<()> {
        Self::check(&self.fail_replace_directory, "replace")?;
        self.db.replace_directory(directory)
    }

    fn read_selection(&self) -> tz_core::Result<Option<String>> {
        Self::check(&self.fail_read_selection, "selection read")?;
        self.db.read_selection()
    }

    fn write_selection(&self, zone_name: &str) -> tz_core::Result<()> {
        Self::check(&self.fail_write_selection, "selection write")?;
        self.db.write_selection(zone_name)
    }

    fn clear_selection(&self) -> tz_core::Result<()> {
        Self::check(&self.fail_write_selection, "selection clear")?;
        self.db.clear_selection()
    }
}

/// Wait until the published state reaches `phase`, failing after 5 seconds.
pub async fn wait_for_phase(rx: &mut watch::Receiver<SyncState>, phase: SyncPhase) -> SyncState {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.phase == phase))
        .await
        .expect("timed out waiting for phase")
        .expect("state channel closed")
        .clone()
}

/// Wait for the next published change, then for `phase`.
///
/// Unlike [`wait_for_phase`], a state that was already current when the
/// receiver was last marked seen does not satisfy the wait.
pub async fn wait_for_next_phase(
    rx: &mut watch::Receiver<SyncState>,
    phase: SyncPhase,
) -> SyncState {
    let next = async {
        rx.changed().await.expect("state channel closed");
        rx.wait_for(|s| s.phase == phase)
            .await
            .expect("state channel closed")
            .clone()
    };
    tokio::time::timeout(Duration::from_secs(5), next)
        .await
        .expect("timed out waiting for phase")
}

/// Let spawned tasks on the current-thread runtime run to their next await.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
