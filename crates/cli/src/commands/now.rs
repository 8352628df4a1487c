// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tz_core::{format_utc_offset, ClockReading, HandAngles};

use crate::cli::OutputFormat;
use crate::display::format_clock;
use crate::error::Result;

use super::{block_on, lookup_zone, Session};

/// JSON output structure for the now command.
#[derive(Serialize)]
struct NowJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    utc_offset: Option<String>,
    time: String,
    period: &'static str,
    #[serde(flatten)]
    reading: ClockReading,
    #[serde(skip_serializing_if = "Option::is_none")]
    hands: Option<HandAngles>,
}

pub fn run(zone: Option<String>, analog: bool, output: OutputFormat) -> Result<()> {
    let session = Session::from_env()?;
    let mut stdout = std::io::stdout().lock();
    block_on(execute(
        &session,
        zone.as_deref(),
        analog,
        output,
        Utc::now(),
        &mut stdout,
    ))?
}

pub(crate) async fn execute(
    session: &Session,
    zone: Option<&str>,
    analog: bool,
    output: OutputFormat,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    let coordinator = session.start_oneshot(true).await?;
    let record = match zone {
        Some(zone) => Some(lookup_zone(&coordinator, zone)?),
        None => coordinator.state().selected,
    };

    let reading = ClockReading::at(now, record.as_ref().map(|r| r.gmt_offset));
    let hands = analog.then(|| reading.hand_angles());

    match output {
        OutputFormat::Text => {
            writeln!(out, "{}", format_clock(now, record.as_ref()))?;
            if let Some(hands) = hands {
                writeln!(
                    out,
                    "hands: hour {:.1}°  minute {:.1}°  second {:.1}°",
                    hands.hour, hands.minute, hands.second
                )?;
            }
        }
        OutputFormat::Json => {
            let (time, period) = reading.twelve_hour();
            let json = NowJson {
                zone: record.as_ref().map(|r| r.zone_name.clone()),
                utc_offset: record.as_ref().map(|r| format_utc_offset(r.gmt_offset)),
                time,
                period: period.as_str(),
                reading,
                hands,
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "now_tests.rs"]
mod tests;
