// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed persistent store for the time zone directory.
//!
//! The [`Store`] trait is the contract the sync layer depends on; the
//! [`Database`] struct is its SQLite implementation. The directory table is
//! only ever replaced inside a single transaction, so a reader sees either
//! the previous snapshot or the new one.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::record::{Directory, TimezoneRecord};

/// SQL schema for the directory cache and user preferences.
pub const SCHEMA: &str = r#"
-- Last successful directory snapshot
CREATE TABLE IF NOT EXISTS timezones (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    country_code TEXT NOT NULL,
    country_name TEXT NOT NULL,
    zone_name TEXT NOT NULL UNIQUE,
    gmt_offset INTEGER NOT NULL,
    dst INTEGER NOT NULL DEFAULT 0
);

-- Key/value user preferences
CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Preference key holding the last selected zone name.
pub const LAST_TIMEZONE_KEY: &str = "last_timezone";

/// Preference key holding the time the directory cache was last replaced.
pub const CACHED_AT_KEY: &str = "directory_cached_at";

/// Persistent storage for the directory snapshot and the selection.
pub trait Store: Send + Sync {
    /// Read the cached directory. Empty when nothing has been cached.
    fn read_directory(&self) -> Result<Directory>;

    /// Atomically replace the cached directory with `directory`.
    fn replace_directory(&self, directory: &Directory) -> Result<()>;

    /// Read the persisted selection, if any.
    fn read_selection(&self) -> Result<Option<String>>;

    /// Persist `zone_name` as the selection, overwriting any previous value.
    fn write_selection(&self, zone_name: &str) -> Result<()>;

    /// Forget the persisted selection.
    fn clear_selection(&self) -> Result<()>;
}

/// Apply the schema to a connection. Safe to run repeatedly.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Build a record from a row, reporting invalid data as a conversion failure.
fn record_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<TimezoneRecord, rusqlite::Error> {
    let dst: i64 = row.get(4)?;
    TimezoneRecord::new(
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get(3)?,
        dst != 0,
    )
    .map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(e.to_string())),
        )
    })
}

/// SQLite database holding the directory cache and preferences.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open a database at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        run_migrations(&conn)?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::StoreUnavailable("connection lock poisoned".to_string()))
    }

    /// Number of cached directory rows.
    pub fn directory_len(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM timezones", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// When the cached directory was last replaced.
    pub fn directory_cached_at(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(value) = self.read_preference(CACHED_AT_KEY)? else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(&value)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| Error::CorruptedData(format!("invalid timestamp '{value}' in preferences")))
    }

    fn read_preference(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl Store for Database {
    fn read_directory(&self) -> Result<Directory> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT country_code, country_name, zone_name, gmt_offset, dst
             FROM timezones ORDER BY zone_name ASC",
        )?;
        let records = stmt
            .query_map([], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Directory::from_records(records))
    }

    fn replace_directory(&self, directory: &Directory) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM timezones", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT OR REPLACE INTO timezones
                 (country_code, country_name, zone_name, gmt_offset, dst)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in directory {
                insert.execute(params![
                    record.country_code,
                    record.country_name,
                    record.zone_name,
                    record.gmt_offset,
                    i64::from(record.dst),
                ])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![CACHED_AT_KEY, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn read_selection(&self) -> Result<Option<String>> {
        self.read_preference(LAST_TIMEZONE_KEY)
    }

    fn write_selection(&self, zone_name: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![LAST_TIMEZONE_KEY, zone_name],
        )?;
        Ok(())
    }

    fn clear_selection(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM preferences WHERE key = ?1",
            params![LAST_TIMEZONE_KEY],
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
