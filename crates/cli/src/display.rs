// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering of directory listings, clock readings and sync state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tz_core::{format_gmt_offset, format_utc_offset, ClockReading, Directory, TimezoneRecord};

use crate::colors;
use crate::sync::SyncState;

/// Returns true if `record` matches `query` by zone name, country name,
/// country code or city name, ignoring case.
pub fn matches_query(record: &TimezoneRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [
        record.zone_name.to_lowercase(),
        record.country_name.to_lowercase(),
        record.country_code.to_lowercase(),
        record.city_name().to_lowercase(),
    ]
    .iter()
    .any(|field| field.contains(&query))
}

/// Records of `directory` matching `query`, in directory order.
pub fn filter_directory<'a>(directory: &'a Directory, query: &str) -> Vec<&'a TimezoneRecord> {
    directory
        .iter()
        .filter(|record| matches_query(record, query))
        .collect()
}

/// Group records by region, with regions in sorted order.
pub fn group_by_region<'a>(
    records: &[&'a TimezoneRecord],
) -> Vec<(&'a str, Vec<&'a TimezoneRecord>)> {
    let mut groups: BTreeMap<&'a str, Vec<&'a TimezoneRecord>> = BTreeMap::new();
    for &record in records {
        groups.entry(record.region()).or_default().push(record);
    }
    groups.into_iter().collect()
}

/// One listing line: zone name, GMT offset, city and country.
pub fn format_zone_line(record: &TimezoneRecord, selected: bool, color: bool) -> String {
    let marker = if selected { '*' } else { ' ' };
    let dst = if record.dst { " (DST)" } else { "" };
    format!(
        "{} {:<32} {}  {}, {}{}",
        marker,
        record.zone_name,
        colors::context(&format_gmt_offset(record.gmt_offset), color),
        record.city_name(),
        record.country_name,
        dst
    )
}

/// Grouped listing of `records`, one region header per group.
pub fn format_listing(
    records: &[&TimezoneRecord],
    selected: Option<&TimezoneRecord>,
    color: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    for (region, group) in group_by_region(records) {
        lines.push(colors::header(&format!("{region}:"), color));
        for record in group {
            let is_selected = selected.is_some_and(|s| s.zone_name == record.zone_name);
            lines.push(format_zone_line(record, is_selected, color));
        }
    }
    lines
}

/// Digital clock line for the selected zone, or local time when none.
pub fn format_clock(now: DateTime<Utc>, selected: Option<&TimezoneRecord>) -> String {
    match selected {
        Some(record) => {
            let reading = ClockReading::at_offset(now, record.gmt_offset);
            format!(
                "{}  {}  {} ({})",
                reading,
                format_utc_offset(record.gmt_offset),
                record.city_name(),
                record.zone_name
            )
        }
        None => format!("{}  local time", ClockReading::at(now, None)),
    }
}

/// Human readable summary of a sync state.
pub fn format_status(
    state: &SyncState,
    cached_at: Option<DateTime<Utc>>,
    color: bool,
) -> Vec<String> {
    let mut lines = vec![
        format!("phase: {}", state.phase),
        format!("origin: {}", state.origin),
        format!("zones: {}", state.directory.len()),
    ];

    lines.push(match &state.selected {
        Some(record) => format!(
            "selected: {} ({}, {})",
            record.zone_name,
            record.country_name,
            format_gmt_offset(record.gmt_offset)
        ),
        None => "selected: none".to_string(),
    });

    if let Some(cached_at) = cached_at {
        lines.push(format!(
            "cached at: {}",
            cached_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    if let Some(message) = &state.error_message {
        lines.push(colors::error(&format!("error: {message}"), color));
    }

    lines
}

/// Single-line summary of a state, as printed by `watch`.
pub fn format_state_line(state: &SyncState) -> String {
    let mut line = format!(
        "[{}] origin={} zones={}",
        state.phase,
        state.origin,
        state.directory.len()
    );
    if let Some(selected) = &state.selected {
        line.push_str(&format!(" selected={}", selected.zone_name));
    }
    if let Some(message) = &state.error_message {
        line.push_str(&format!(" error=\"{message}\""));
    }
    line
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
