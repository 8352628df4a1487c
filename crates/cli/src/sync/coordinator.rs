// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync coordinator.
//!
//! Reconciles the local cache, the remote directory API and connectivity
//! transitions into one [`SyncState`], published through a watch channel.
//!
//! - Startup reads the cache first and only fetches when the cache is empty
//!   and an API key is configured.
//! - While the directory is empty, an "online" transition triggers a sync
//!   (cache, then remote). The subscription is dropped after the first
//!   success.
//! - Manual refresh always goes to the remote and never clears existing
//!   data on failure.
//! - At most one fetch is outstanding at any time.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tz_core::{Database, Directory, Store, StoreHandle, TimezoneRecord};

use super::connectivity::{ConnectivityMonitor, Listener, Subscription};
use super::fetcher::{FetchError, Fetcher};
use super::state::{DataOrigin, SyncPhase, SyncState};

/// Configuration for the sync coordinator.
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Whether a usable API key is configured. Gates the startup fetch.
    pub has_credential: bool,
}

/// Error type for coordinator operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Another fetch is outstanding.
    #[error("a directory fetch is already in progress")]
    FetchInFlight,

    /// The remote fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The remote answered with no zones.
    #[error("the directory API returned no time zones")]
    EmptyDirectory,

    /// The coordinator was torn down.
    #[error("sync coordinator has been shut down")]
    ShutDown,
}

/// Result type for coordinator operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Clears the in-flight flag when dropped.
struct FetchGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Completion handle for a background selection write.
///
/// Dropping it does not cancel the write.
pub struct SelectionWrite {
    task: Option<JoinHandle<()>>,
}

impl SelectionWrite {
    fn done() -> Self {
        SelectionWrite { task: None }
    }

    /// Wait for the write to finish. Failures have already been logged.
    pub async fn wait(self) {
        if let Some(task) = self.task {
            if let Err(e) = task.await {
                tracing::warn!("selection write task failed: {}", e);
            }
        }
    }
}

struct Inner<F, S: Store> {
    config: SyncConfig,
    store: StoreHandle<S>,
    fetcher: F,
    monitor: Arc<dyn ConnectivityMonitor>,
    state: watch::Sender<SyncState>,
    fetch_in_flight: AtomicBool,
    alive: AtomicBool,
    reconnect: Mutex<Option<Subscription>>,
    selection_seq: AtomicU64,
    selection_written: Mutex<u64>,
}

/// Owner of the session's [`SyncState`].
///
/// Dropping the coordinator tears it down: the connectivity subscription is
/// removed and results of fetches still in flight are discarded.
pub struct SyncCoordinator<F: Fetcher + 'static, S: Store + 'static = Database> {
    inner: Arc<Inner<F, S>>,
}

impl<F: Fetcher + 'static, S: Store + 'static> SyncCoordinator<F, S> {
    /// Create a coordinator in the `Loading` phase. Call [`load`](Self::load)
    /// to run the startup sequence.
    pub fn new(
        config: SyncConfig,
        store: StoreHandle<S>,
        fetcher: F,
        monitor: Arc<dyn ConnectivityMonitor>,
    ) -> Self {
        let (state, _) = watch::channel(SyncState::loading());
        SyncCoordinator {
            inner: Arc::new(Inner {
                config,
                store,
                fetcher,
                monitor,
                state,
                fetch_in_flight: AtomicBool::new(false),
                alive: AtomicBool::new(true),
                reconnect: Mutex::new(None),
                selection_seq: AtomicU64::new(0),
                selection_written: Mutex::new(0),
            }),
        }
    }

    /// Create a coordinator and run the startup sequence.
    pub async fn start(
        config: SyncConfig,
        store: StoreHandle<S>,
        fetcher: F,
        monitor: Arc<dyn ConnectivityMonitor>,
    ) -> Self {
        let coordinator = SyncCoordinator::new(config, store, fetcher, monitor);
        coordinator.load().await;
        coordinator
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SyncState {
        self.inner.snapshot()
    }

    /// Receiver that observes every published state.
    pub fn watch_state(&self) -> watch::Receiver<SyncState> {
        self.inner.state.subscribe()
    }

    /// The store handle backing this coordinator.
    pub fn store(&self) -> &StoreHandle<S> {
        &self.inner.store
    }

    pub fn is_alive(&self) -> bool {
        self.inner.is_alive()
    }

    /// Returns true while the reconnect listener is subscribed.
    pub fn is_reconnect_armed(&self) -> bool {
        self.inner
            .reconnect
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Run the startup sequence and return the resulting phase.
    pub async fn load(&self) -> SyncPhase {
        self.inner.load().await
    }

    /// Fetch the latest directory from the remote, bypassing the cache.
    pub async fn refresh(&self) -> SyncResult<()> {
        self.inner.refresh().await
    }

    /// Select a zone, or clear the selection with `None`.
    ///
    /// The in-memory selection changes immediately; persisting it happens in
    /// the background and failures are only logged. A record that is not in
    /// the current directory is ignored.
    pub fn select(&self, record: Option<&TimezoneRecord>) -> SelectionWrite {
        Inner::select(&self.inner, record)
    }

    /// Tear down: drop the connectivity subscription and discard the
    /// results of any fetch still in flight.
    pub fn shutdown(&self) {
        self.inner.shutdown();
    }
}

impl<F: Fetcher + 'static, S: Store + 'static> Drop for SyncCoordinator<F, S> {
    fn drop(&mut self) {
        self.inner.shutdown();
    }
}

impl<F: Fetcher + 'static, S: Store + 'static> Inner<F, S> {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Apply `update` to the published state unless torn down.
    fn publish(&self, update: impl FnOnce(&mut SyncState)) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.state.send_modify(update);
        true
    }

    fn try_begin_fetch(&self) -> Option<FetchGuard<'_>> {
        self.fetch_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| FetchGuard {
                flag: &self.fetch_in_flight,
            })
    }

    fn read_cache(&self) -> Directory {
        match self.store.init().and_then(|store| store.read_directory()) {
            Ok(directory) => directory,
            Err(e) => {
                tracing::warn!("failed to read cached directory: {}", e);
                Directory::empty()
            }
        }
    }

    fn persist(&self, directory: &Directory) {
        if let Err(e) = self
            .store
            .init()
            .and_then(|store| store.replace_directory(directory))
        {
            tracing::warn!("failed to cache directory: {}", e);
        }
    }

    /// Resolve the persisted selection against `directory`.
    fn restore_selection(&self, directory: &Directory) -> Option<TimezoneRecord> {
        let zone_name = match self.store.init().and_then(|store| store.read_selection()) {
            Ok(Some(zone_name)) => zone_name,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("failed to restore last selected zone: {}", e);
                return None;
            }
        };
        let found = directory.find(&zone_name).cloned();
        if found.is_none() {
            tracing::debug!("last selected zone {} is not in the directory", zone_name);
        }
        found
    }

    async fn load(self: &Arc<Self>) -> SyncPhase {
        if !self.publish(|s| {
            s.phase = SyncPhase::Loading;
            s.error_message = None;
        }) {
            return self.snapshot().phase;
        }

        let store = match self.store.init() {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("failed to open time zone store: {}", e);
                self.publish(|s| {
                    s.directory = Directory::empty();
                    s.selected = None;
                    s.origin = DataOrigin::None;
                    s.phase = SyncPhase::Error;
                    s.error_message = Some(format!("failed to open time zone store: {e}"));
                });
                self.update_reconnect();
                return SyncPhase::Error;
            }
        };

        let mut directory = match store.read_directory() {
            Ok(directory) => directory,
            Err(e) => {
                tracing::warn!("failed to read cached directory: {}", e);
                Directory::empty()
            }
        };
        let mut origin = if directory.is_empty() {
            DataOrigin::None
        } else {
            DataOrigin::Cache
        };

        if directory.is_empty() && self.config.has_credential {
            match self.try_begin_fetch() {
                Some(_guard) => match self.fetcher.fetch().await {
                    Ok(fetched) if !fetched.is_empty() => {
                        if let Err(e) = store.replace_directory(&fetched) {
                            tracing::warn!("failed to cache directory: {}", e);
                        }
                        directory = fetched;
                        origin = DataOrigin::Remote;
                    }
                    Ok(_) => tracing::debug!("directory API returned no time zones"),
                    Err(e) => tracing::warn!("startup fetch failed: {}", e),
                },
                None => tracing::debug!("skipping startup fetch; another fetch is in flight"),
            }
            if !self.is_alive() {
                tracing::debug!("discarding startup result after shutdown");
                return self.snapshot().phase;
            }
        } else if directory.is_empty() {
            tracing::debug!("no API key configured; skipping directory fetch");
        }

        let selected = self.restore_selection(&directory);
        tracing::info!(
            "loaded {} zones (origin: {})",
            directory.len(),
            origin.as_str()
        );
        self.publish(|s| {
            s.directory = directory;
            s.selected = selected;
            s.origin = origin;
            s.phase = SyncPhase::Ready;
            s.error_message = None;
        });
        self.update_reconnect();
        SyncPhase::Ready
    }

    async fn refresh(self: &Arc<Self>) -> SyncResult<()> {
        if !self.is_alive() {
            return Err(SyncError::ShutDown);
        }
        let Some(guard) = self.try_begin_fetch() else {
            return Err(SyncError::FetchInFlight);
        };

        self.publish(|s| {
            s.phase = SyncPhase::Loading;
            s.error_message = None;
        });

        let result = self.fetcher.fetch().await;
        if !self.is_alive() {
            tracing::debug!("discarding refresh result after shutdown");
            return Err(SyncError::ShutDown);
        }

        let outcome = match result {
            Ok(directory) if !directory.is_empty() => {
                self.persist(&directory);
                let count = directory.len();
                self.publish(|s| {
                    s.apply_directory(directory, DataOrigin::Remote);
                    s.phase = SyncPhase::Ready;
                    s.error_message = None;
                });
                tracing::info!("refreshed directory ({} zones)", count);
                Ok(())
            }
            Ok(_) => Err(SyncError::EmptyDirectory),
            Err(e) => Err(SyncError::Fetch(e)),
        };

        if let Err(e) = &outcome {
            tracing::warn!("refresh failed: {}", e);
            let message = e.to_string();
            self.publish(|s| {
                s.phase = SyncPhase::Error;
                s.error_message = Some(message);
            });
        }

        drop(guard);
        self.update_reconnect();
        outcome
    }

    async fn on_online(self: Arc<Self>) {
        if !self.is_alive() {
            return;
        }
        if !self.snapshot().directory.is_empty() {
            self.disarm_reconnect();
            return;
        }
        let Some(_guard) = self.try_begin_fetch() else {
            tracing::debug!("reconnect sync skipped; a fetch is already in flight");
            return;
        };

        self.publish(|s| {
            s.phase = SyncPhase::Syncing;
            s.error_message = None;
        });

        let cached = self.read_cache();
        if !cached.is_empty() {
            self.finish_reconnect(cached, DataOrigin::Cache);
            return;
        }

        let result = self.fetcher.fetch().await;
        if !self.is_alive() {
            tracing::debug!("discarding reconnect result after shutdown");
            return;
        }

        match result {
            Ok(directory) if !directory.is_empty() => {
                self.persist(&directory);
                self.finish_reconnect(directory, DataOrigin::Remote);
            }
            Ok(_) => self.fail_reconnect(&SyncError::EmptyDirectory.to_string()),
            Err(e) => {
                tracing::warn!("reconnect sync failed: {}", e);
                self.fail_reconnect(&e.to_string());
            }
        }
    }

    fn finish_reconnect(&self, directory: Directory, origin: DataOrigin) {
        let selected = self.restore_selection(&directory);
        tracing::info!(
            "reconnect sync loaded {} zones (origin: {})",
            directory.len(),
            origin.as_str()
        );
        self.disarm_reconnect();
        self.publish(|s| {
            s.directory = directory;
            s.selected = selected;
            s.origin = origin;
            s.phase = SyncPhase::Ready;
            s.error_message = None;
        });
    }

    fn fail_reconnect(&self, reason: &str) {
        self.publish(|s| {
            s.phase = SyncPhase::Error;
            s.error_message = Some(format!("{reason}; will retry when back online"));
        });
    }

    /// Keep the reconnect listener subscribed exactly while the directory
    /// is empty and no load is running.
    fn update_reconnect(self: &Arc<Self>) {
        let state = self.state.borrow();
        let wanted = state.directory.is_empty() && state.phase != SyncPhase::Loading;
        drop(state);

        if wanted {
            self.arm_reconnect();
        } else {
            self.disarm_reconnect();
        }
    }

    fn arm_reconnect(self: &Arc<Self>) {
        let Ok(mut slot) = self.reconnect.lock() else {
            return;
        };
        if slot.is_some() || !self.is_alive() {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime; reconnect sync disabled");
            return;
        };

        let weak = Arc::downgrade(self);
        let listener: Listener = Arc::new(move |online| {
            if !online {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                runtime.spawn(inner.on_online());
            }
        });
        *slot = Some(self.monitor.subscribe(listener));
        tracing::debug!("reconnect sync armed");
    }

    fn disarm_reconnect(&self) {
        let subscription = match self.reconnect.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(subscription) = subscription {
            subscription.cancel();
            tracing::debug!("reconnect sync disarmed");
        }
    }

    fn select(this: &Arc<Self>, record: Option<&TimezoneRecord>) -> SelectionWrite {
        if !this.is_alive() {
            return SelectionWrite::done();
        }

        let mut accepted = true;
        this.state.send_if_modified(|s| match record {
            Some(record) => match s.directory.find(&record.zone_name) {
                Some(found) => {
                    s.selected = Some(found.clone());
                    true
                }
                None => {
                    accepted = false;
                    false
                }
            },
            None => {
                s.selected = None;
                true
            }
        });

        if !accepted {
            if let Some(record) = record {
                tracing::warn!(
                    "ignoring selection of {}: not in the current directory",
                    record.zone_name
                );
            }
            return SelectionWrite::done();
        }

        let zone_name = record.map(|r| r.zone_name.clone());
        let seq = this.selection_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(this);
        let write = move || inner.persist_selection(seq, zone_name.as_deref());

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => SelectionWrite {
                task: Some(runtime.spawn_blocking(write)),
            },
            Err(_) => {
                write();
                SelectionWrite::done()
            }
        }
    }

    /// Persist selection number `seq`. Writes run one at a time, and a write
    /// older than the last one persisted is dropped.
    fn persist_selection(&self, seq: u64, zone_name: Option<&str>) {
        let Ok(mut written) = self.selection_written.lock() else {
            tracing::warn!("selection write lock poisoned; selection not persisted");
            return;
        };
        if seq < *written {
            tracing::debug!("skipping stale selection write {}", seq);
            return;
        }
        *written = seq;
        let result = self.store.init().and_then(|store| match zone_name {
            Some(zone_name) => store.write_selection(zone_name),
            None => store.clear_selection(),
        });
        if let Err(e) = result {
            tracing::warn!("failed to persist selection: {}", e);
        }
    }

    fn shutdown(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            tracing::debug!("sync coordinator shut down");
        }
        self.disarm_reconnect();
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
