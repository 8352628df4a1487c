// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use serde::Serialize;
use tz_core::TimezoneRecord;

use crate::cli::OutputFormat;
use crate::display::{filter_directory, format_listing};
use crate::error::Result;

use super::{block_on, Session};

/// JSON output structure for the list command.
#[derive(Serialize)]
struct ListOutputJson<'a> {
    zones: Vec<&'a TimezoneRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
}

pub fn run(query: Option<String>, output: OutputFormat) -> Result<()> {
    let session = Session::from_env()?;
    let mut stdout = std::io::stdout().lock();
    block_on(execute(&session, query.as_deref(), output, &mut stdout))?
}

pub(crate) async fn execute(
    session: &Session,
    query: Option<&str>,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let coordinator = session.start_oneshot(true).await?;
    let state = coordinator.state();
    let records = filter_directory(&state.directory, query.unwrap_or(""));

    match output {
        OutputFormat::Text => {
            if state.directory.is_empty() {
                writeln!(out, "No time zones cached.")?;
                writeln!(
                    out,
                    "Configure an API key and run 'tzclock refresh' to download the directory."
                )?;
                return Ok(());
            }
            if records.is_empty() {
                writeln!(out, "No time zones match '{}'.", query.unwrap_or(""))?;
                return Ok(());
            }
            for line in format_listing(&records, state.selected.as_ref(), session.color) {
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            let json = ListOutputJson {
                zones: records,
                selected: state.selected.as_ref().map(|r| r.zone_name.as_str()),
                query,
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
