// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::display::format_status;
use crate::error::Result;
use crate::sync::SyncState;

use super::{block_on, Session};

/// JSON output structure for the status command.
#[derive(Serialize)]
struct StatusJson<'a> {
    phase: crate::sync::SyncPhase,
    origin: crate::sync::DataOrigin,
    zones: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cached_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
    api_key_configured: bool,
    database: String,
}

pub fn run(output: OutputFormat) -> Result<()> {
    let session = Session::from_env()?;
    let mut stdout = std::io::stdout().lock();
    block_on(execute(&session, output, &mut stdout))?
}

/// Report the cached state. Never goes to the network.
pub(crate) async fn execute(
    session: &Session,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let coordinator = session.start_oneshot(false).await?;
    let state: SyncState = coordinator.state();
    let cached_at = match coordinator.store().get() {
        Some(db) => db.directory_cached_at()?,
        None => None,
    };
    let database = session.db_path().display().to_string();

    match output {
        OutputFormat::Text => {
            for line in format_status(&state, cached_at, session.color) {
                writeln!(out, "{line}")?;
            }
            writeln!(
                out,
                "api key: {}",
                if session.has_api_key() {
                    "configured"
                } else {
                    "missing"
                }
            )?;
            writeln!(out, "database: {database}")?;
        }
        OutputFormat::Json => {
            let json = StatusJson {
                phase: state.phase,
                origin: state.origin,
                zones: state.directory.len(),
                selected: state.selected.as_ref().map(|r| r.zone_name.as_str()),
                cached_at,
                error_message: state.error_message.as_deref(),
                api_key_configured: session.has_api_key(),
                database,
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
