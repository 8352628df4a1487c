// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time zone records and the directory that holds them.
//!
//! A [`Directory`] is always sorted ascending by zone name and never holds
//! two records with the same zone name. It is built wholesale and never
//! patched in place, so every clone a reader holds is internally consistent.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// One IANA time zone entry with country and offset metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimezoneRecord {
    /// ISO 3166 country code (e.g., "IN").
    pub country_code: String,
    /// Human readable country name.
    pub country_name: String,
    /// IANA identifier, unique within a directory (e.g., "Asia/Kolkata").
    pub zone_name: String,
    /// Offset from GMT in seconds, negative west of Greenwich.
    pub gmt_offset: i32,
    /// Whether daylight saving time is currently in effect.
    pub dst: bool,
}

impl TimezoneRecord {
    /// Create a record, rejecting an empty zone name.
    pub fn new(
        country_code: impl Into<String>,
        country_name: impl Into<String>,
        zone_name: impl Into<String>,
        gmt_offset: i32,
        dst: bool,
    ) -> Result<Self> {
        let zone_name = zone_name.into();
        if zone_name.trim().is_empty() {
            return Err(Error::InvalidRecord("zone name is empty".to_string()));
        }
        Ok(TimezoneRecord {
            country_code: country_code.into(),
            country_name: country_name.into(),
            zone_name,
            gmt_offset,
            dst,
        })
    }

    /// Region prefix of the zone name ("Asia" for "Asia/Kolkata").
    pub fn region(&self) -> &str {
        self.zone_name
            .split('/')
            .next()
            .unwrap_or(self.zone_name.as_str())
    }

    /// City portion of the zone name with underscores as spaces.
    ///
    /// "America/Argentina/Buenos_Aires" becomes "Buenos Aires".
    pub fn city_name(&self) -> String {
        city_name(&self.zone_name)
    }
}

impl fmt::Display for TimezoneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.zone_name)
    }
}

/// City portion of an IANA zone name with underscores replaced by spaces.
pub fn city_name(zone_name: &str) -> String {
    zone_name
        .rsplit('/')
        .next()
        .unwrap_or(zone_name)
        .replace('_', " ")
}

/// Sorted, duplicate-free collection of time zone records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory(Arc<[TimezoneRecord]>);

impl Directory {
    /// An empty directory.
    pub fn empty() -> Self {
        Directory(Arc::from(Vec::new()))
    }

    /// Build a directory from records in any order.
    ///
    /// Records are sorted by zone name; when a zone name appears more than
    /// once the first occurrence wins.
    pub fn from_records(mut records: Vec<TimezoneRecord>) -> Self {
        records.sort_by(|a, b| a.zone_name.cmp(&b.zone_name));
        records.dedup_by(|later, earlier| later.zone_name == earlier.zone_name);
        Directory(Arc::from(records))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimezoneRecord> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TimezoneRecord] {
        &self.0
    }

    /// Look up a record by zone name.
    pub fn find(&self, zone_name: &str) -> Option<&TimezoneRecord> {
        self.0
            .binary_search_by(|r| r.zone_name.as_str().cmp(zone_name))
            .ok()
            .and_then(|idx| self.0.get(idx))
    }

    pub fn contains(&self, zone_name: &str) -> bool {
        self.find(zone_name).is_some()
    }

    /// Returns true if both handles share the same backing records.
    pub fn ptr_eq(&self, other: &Directory) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Directory::empty()
    }
}

impl From<Vec<TimezoneRecord>> for Directory {
    fn from(records: Vec<TimezoneRecord>) -> Self {
        Directory::from_records(records)
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a TimezoneRecord;
    type IntoIter = std::slice::Iter<'a, TimezoneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Directory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
