// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wall clock readings for a fixed GMT offset.
//!
//! A reading is plain hour/minute/second integers; formatting helpers turn
//! it into the strings a digital display shows and the hand angles an
//! analog face needs.

use chrono::{DateTime, Duration, Local, Timelike, Utc};
use serde::Serialize;
use std::fmt;

/// Hour, minute, second and millisecond of a wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockReading {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

/// Morning or afternoon half of a twelve-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rotation of each analog hand in degrees clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl ClockReading {
    /// Reading at `gmt_offset` seconds from UTC, or in the local time zone
    /// when no offset is given.
    pub fn at(now: DateTime<Utc>, gmt_offset: Option<i32>) -> Self {
        match gmt_offset {
            Some(offset) => ClockReading::at_offset(now, offset),
            None => ClockReading::from_time(&now.with_timezone(&Local)),
        }
    }

    /// Reading at a fixed offset from UTC.
    pub fn at_offset(now: DateTime<Utc>, gmt_offset: i32) -> Self {
        let shifted = now + Duration::seconds(i64::from(gmt_offset));
        ClockReading::from_time(&shifted)
    }

    /// Reading for the current instant.
    pub fn now(gmt_offset: Option<i32>) -> Self {
        ClockReading::at(Utc::now(), gmt_offset)
    }

    fn from_time<T: Timelike>(time: &T) -> Self {
        ClockReading {
            hours: time.hour(),
            minutes: time.minute(),
            seconds: time.second(),
            // chrono reports leap seconds as nanos >= 1e9
            millis: (time.nanosecond() / 1_000_000).min(999),
        }
    }

    /// Twelve-hour "hh:mm:ss" plus the AM/PM period. Midnight and noon read 12.
    pub fn twelve_hour(&self) -> (String, Period) {
        let period = if self.hours >= 12 { Period::Pm } else { Period::Am };
        let hour12 = match self.hours % 12 {
            0 => 12,
            h => h,
        };
        (
            format!("{:02}:{:02}:{:02}", hour12, self.minutes, self.seconds),
            period,
        )
    }

    /// Hand angles; the hour and minute hands sweep smoothly.
    pub fn hand_angles(&self) -> HandAngles {
        let hour12 = f64::from(self.hours % 12);
        let minutes = f64::from(self.minutes);
        let seconds = f64::from(self.seconds);
        HandAngles {
            hour: hour12 * 30.0 + minutes * 0.5,
            minute: minutes * 6.0 + seconds * 0.1,
            second: seconds * 6.0,
        }
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (time, period) = self.twelve_hour();
        write!(f, "{time} {period}")
    }
}

fn format_offset(prefix: &str, offset_seconds: i32) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let abs = offset_seconds.unsigned_abs();
    format!("{prefix}{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
}

/// "GMT+05:30" style offset label.
pub fn format_gmt_offset(offset_seconds: i32) -> String {
    format_offset("GMT", offset_seconds)
}

/// "UTC-05:00" style offset label.
pub fn format_utc_offset(offset_seconds: i32) -> String {
    format_offset("UTC", offset_seconds)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
