// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lazily opened, shareable handle to a [`Store`].
//!
//! The first successful [`StoreHandle::init`] opens the store and applies the
//! schema; later calls return the same `Arc` without reopening. A failed open
//! leaves the handle empty so the next call tries again.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::db::{Database, Store};
use crate::error::{Error, Result};

type Opener<S> = Box<dyn Fn() -> Result<S> + Send + Sync>;

/// Owned handle that opens its store on first use.
pub struct StoreHandle<S: Store = Database> {
    opener: Opener<S>,
    slot: Mutex<Option<Arc<S>>>,
}

impl StoreHandle<Database> {
    /// Handle to an on-disk SQLite database at `path`.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        StoreHandle::with_opener(move || Database::open(&path))
    }

    /// Handle to a private in-memory database.
    pub fn in_memory() -> Self {
        StoreHandle::with_opener(Database::open_in_memory)
    }
}

impl<S: Store> StoreHandle<S> {
    /// Handle using a custom open function.
    pub fn with_opener<F>(opener: F) -> Self
    where
        F: Fn() -> Result<S> + Send + Sync + 'static,
    {
        StoreHandle {
            opener: Box::new(opener),
            slot: Mutex::new(None),
        }
    }

    /// Handle wrapping an already opened store.
    pub fn from_store(store: Arc<S>) -> Self {
        StoreHandle {
            opener: Box::new(|| {
                Err(Error::StoreUnavailable(
                    "pre-opened store cannot be reopened".to_string(),
                ))
            }),
            slot: Mutex::new(Some(store)),
        }
    }

    /// Open the store if needed and return it.
    pub fn init(&self) -> Result<Arc<S>> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| Error::StoreUnavailable("store handle lock poisoned".to_string()))?;

        if let Some(store) = slot.as_ref() {
            return Ok(Arc::clone(store));
        }

        let store = Arc::new((self.opener)()?);
        *slot = Some(Arc::clone(&store));
        Ok(store)
    }

    /// The store, if it has already been opened.
    pub fn get(&self) -> Option<Arc<S>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Returns true once `init` has succeeded.
    pub fn is_open(&self) -> bool {
        self.get().is_some()
    }
}

/// Default database path within a state directory.
pub fn default_db_path(state_dir: &Path) -> PathBuf {
    state_dir.join("tzclock.db")
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
