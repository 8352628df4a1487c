// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Long-running sync session driven by a TCP connectivity probe.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::display::format_state_line;
use crate::error::Result;
use crate::sync::{ConnectivityMonitor, ProbeMonitor};

use super::{block_on, Session};

/// Upper bound for a single connectivity probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

pub fn run() -> Result<()> {
    let session = Session::from_env()?;
    let mut stdout = std::io::stdout();
    block_on(execute(&session, &mut stdout))?
}

pub(crate) async fn execute(session: &Session, out: &mut dyn Write) -> Result<()> {
    let monitor = Arc::new(ProbeMonitor::spawn(
        session.config.probe_host.clone(),
        session.config.probe_interval(),
        PROBE_TIMEOUT,
    ));
    tracing::info!("watching with probe target {}", session.config.probe_host);

    // A store that fails to open is retried on the next reconnect
    let coordinator =
        session.coordinator(true, Arc::clone(&monitor) as Arc<dyn ConnectivityMonitor>)?;
    let mut rx = coordinator.watch_state();
    coordinator.load().await;

    writeln!(out, "{}", format_state_line(&rx.borrow_and_update()))?;
    out.flush()?;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let line = format_state_line(&rx.borrow_and_update());
                writeln!(out, "{line}")?;
                out.flush()?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted");
                break;
            }
        }
    }

    coordinator.shutdown();
    Ok(())
}
