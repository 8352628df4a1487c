// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitoring.
//!
//! A [`ConnectivityMonitor`] delivers online/offline transitions to
//! subscribed listeners. Subscribing returns a [`Subscription`] that removes
//! the listener when cancelled or dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Callback invoked with `true` when the device comes online.
pub type Listener = Arc<dyn Fn(bool) + Send + Sync>;

/// Source of connectivity transition events.
pub trait ConnectivityMonitor: Send + Sync {
    /// Register a listener for connectivity transitions.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Disposal handle for a registered listener.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Subscription that runs `cancel` once when disposed.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Subscription {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Subscription with nothing to release.
    pub fn noop() -> Self {
        Subscription { cancel: None }
    }

    /// Remove the listener now.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    last: Option<bool>,
    replay_online: bool,
}

/// Listener bookkeeping shared by monitor implementations.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that calls a new listener with `true` right away when the
    /// last notified state was online.
    pub fn replaying_online() -> Self {
        let registry = Self::default();
        if let Ok(mut inner) = registry.inner.lock() {
            inner.replay_online = true;
        }
        registry
    }

    /// Last state passed to [`notify`](Self::notify), if any.
    pub fn last(&self) -> Option<bool> {
        self.inner.lock().ok().and_then(|i| i.last)
    }

    /// Add a listener and return its disposal handle.
    pub fn add(&self, listener: Listener) -> Subscription {
        let (id, replay) = {
            let Ok(mut inner) = self.inner.lock() else {
                tracing::warn!("connectivity registry lock poisoned; listener not added");
                return Subscription::noop();
            };
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.replay_online && inner.last == Some(true))
        };
        if replay {
            listener(true);
        }

        let weak: Weak<Mutex<RegistryInner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut inner) = inner.lock() {
                    inner.listeners.retain(|(lid, _)| *lid != id);
                }
            }
        })
    }

    /// Invoke every listener with `online`.
    ///
    /// Listeners are called outside the lock so they may unsubscribe
    /// themselves.
    pub fn notify(&self, online: bool) {
        let listeners: Vec<Listener> = match self.inner.lock() {
            Ok(mut inner) => {
                inner.last = Some(online);
                inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
            }
            Err(_) => return,
        };
        for listener in listeners {
            listener(online);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|i| i.listeners.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Monitor whose state is set explicitly by its owner.
///
/// Listeners are notified only when the state actually changes.
pub struct ManualMonitor {
    registry: ListenerRegistry,
    online: AtomicBool,
}

impl ManualMonitor {
    /// Monitor starting in the given state.
    pub fn new(online: bool) -> Self {
        ManualMonitor {
            registry: ListenerRegistry::new(),
            online: AtomicBool::new(online),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Record a connectivity change, notifying listeners on a transition.
    pub fn set_online(&self, online: bool) {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous != online {
            tracing::debug!("connectivity changed: online={}", online);
            self.registry.notify(online);
        }
    }

    /// Number of active subscriptions.
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }
}

impl ConnectivityMonitor for ManualMonitor {
    fn subscribe(&self, listener: Listener) -> Subscription {
        self.registry.add(listener)
    }
}

/// Monitor that probes a TCP endpoint at a fixed interval.
///
/// The first probe result is reported as a transition. A listener that
/// subscribes while the endpoint is reachable is called with `true` at once.
pub struct ProbeMonitor {
    registry: ListenerRegistry,
    task: JoinHandle<()>,
}

impl ProbeMonitor {
    /// Start probing `target` ("host:port") every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(target: String, interval: Duration, connect_timeout: Duration) -> Self {
        let registry = ListenerRegistry::replaying_online();
        let task_registry = registry.clone();
        let task = tokio::spawn(async move {
            let mut last: Option<bool> = None;
            loop {
                let online = probe(&target, connect_timeout).await;
                if last != Some(online) {
                    tracing::debug!("probe {} online={}", target, online);
                    last = Some(online);
                    task_registry.notify(online);
                }
                tokio::time::sleep(interval).await;
            }
        });
        ProbeMonitor { registry, task }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }
}

impl ConnectivityMonitor for ProbeMonitor {
    fn subscribe(&self, listener: Listener) -> Subscription {
        self.registry.add(listener)
    }
}

impl Drop for ProbeMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Returns true if a TCP connection to `target` succeeds within `timeout`.
pub async fn probe(target: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(target)).await,
        Ok(Ok(_))
    )
}
