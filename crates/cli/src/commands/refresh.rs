// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use crate::error::{Error, Result};
use crate::sync::DataOrigin;

use super::{block_on, Session};

pub fn run() -> Result<()> {
    let session = Session::from_env()?;
    let mut stdout = std::io::stdout().lock();
    block_on(execute(&session, &mut stdout))?
}

pub(crate) async fn execute(session: &Session, out: &mut dyn Write) -> Result<()> {
    if !session.has_api_key() {
        return Err(Error::MissingApiKey);
    }

    let coordinator = session.start_oneshot(true).await?;

    // An empty cache was just filled by the startup fetch
    if coordinator.state().origin != DataOrigin::Remote {
        coordinator.refresh().await?;
    }

    let state = coordinator.state();
    writeln!(out, "Refreshed {} time zones", state.directory.len())?;
    if let Some(selected) = &state.selected {
        writeln!(out, "Selected: {}", selected.zone_name)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "refresh_tests.rs"]
mod tests;
