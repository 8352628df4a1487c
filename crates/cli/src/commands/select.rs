// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use tz_core::format_gmt_offset;

use crate::error::Result;

use super::{block_on, lookup_zone, Session};

pub fn run(zone: Option<String>, clear: bool) -> Result<()> {
    let session = Session::from_env()?;
    let mut stdout = std::io::stdout().lock();
    block_on(execute(&session, zone.as_deref(), clear, &mut stdout))?
}

pub(crate) async fn execute(
    session: &Session,
    zone: Option<&str>,
    clear: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let coordinator = session.start_oneshot(true).await?;

    match zone {
        Some(zone) if !clear => {
            let record = lookup_zone(&coordinator, zone)?;
            coordinator.select(Some(&record)).wait().await;
            writeln!(
                out,
                "Selected {} ({}, {})",
                record.zone_name,
                record.country_name,
                format_gmt_offset(record.gmt_offset)
            )?;
        }
        _ => {
            coordinator.select(None).wait().await;
            writeln!(out, "Selection cleared")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
