// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod list;
pub mod now;
pub mod refresh;
pub mod select;
pub mod status;
pub mod watch;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tz_core::{StoreHandle, TimezoneRecord};

use crate::colors;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::sync::{
    ConnectivityMonitor, HttpFetcher, ManualMonitor, SyncConfig, SyncCoordinator, SyncPhase,
};

/// Coordinator type used by the commands.
pub type Coordinator = SyncCoordinator<HttpFetcher>;

/// Everything a command needs to reach the cache and the API.
pub struct Session {
    pub state_dir: PathBuf,
    pub config: Config,
    pub color: bool,
}

impl Session {
    /// Session for this process: state directory and config from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        let state_dir = config::state_dir();
        let config = config::load_config(&state_dir)?;
        Ok(Session {
            state_dir,
            config,
            color: colors::should_colorize(),
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.config.db_path(&self.state_dir)
    }

    pub fn has_api_key(&self) -> bool {
        self.config.has_usable_api_key()
    }

    /// Build a coordinator over this session's database and API settings.
    ///
    /// With `allow_fetch` false the startup never goes to the network.
    pub fn coordinator(
        &self,
        allow_fetch: bool,
        monitor: Arc<dyn ConnectivityMonitor>,
    ) -> Result<Coordinator> {
        Ok(SyncCoordinator::new(
            SyncConfig {
                has_credential: allow_fetch && self.has_api_key(),
            },
            StoreHandle::at_path(self.db_path()),
            HttpFetcher::new(self.config.fetcher_config())?,
            monitor,
        ))
    }

    /// Build a coordinator and run its startup sequence. A store that
    /// cannot be opened is reported as an error.
    pub async fn start(
        &self,
        allow_fetch: bool,
        monitor: Arc<dyn ConnectivityMonitor>,
    ) -> Result<Coordinator> {
        let coordinator = self.coordinator(allow_fetch, monitor)?;
        if coordinator.load().await == SyncPhase::Error {
            let message = coordinator
                .state()
                .error_message
                .unwrap_or_else(|| "failed to open time zone store".to_string());
            return Err(Error::Store(tz_core::Error::StoreUnavailable(message)));
        }
        Ok(coordinator)
    }

    /// Start a coordinator for a one-shot command that never sees
    /// connectivity changes.
    pub async fn start_oneshot(&self, allow_fetch: bool) -> Result<Coordinator> {
        self.start(allow_fetch, Arc::new(ManualMonitor::new(true)))
            .await
    }
}

/// Run `future` to completion on a current-thread runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Find `zone` in the current directory: exact match first, then a
/// case-insensitive one.
pub fn lookup_zone(coordinator: &Coordinator, zone: &str) -> Result<TimezoneRecord> {
    let state = coordinator.state();
    if let Some(record) = state.directory.find(zone) {
        return Ok(record.clone());
    }
    state
        .directory
        .iter()
        .find(|r| r.zone_name.eq_ignore_ascii_case(zone))
        .cloned()
        .ok_or_else(|| {
            if state.directory.is_empty() {
                Error::EmptyDirectory
            } else {
                Error::ZoneNotFound(zone.to_string())
            }
        })
}
