// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::tempdir;

fn zone(name: &str, offset: i32, dst: bool) -> TimezoneRecord {
    TimezoneRecord::new("XX", "Testland", name, offset, dst).unwrap()
}

fn sample_directory() -> Directory {
    Directory::from_records(vec![
        zone("Europe/London", 0, true),
        zone("Asia/Kolkata", 19800, false),
        zone("America/St_Johns", -12600, true),
    ])
}

#[test]
fn empty_database_has_no_directory() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.read_directory().unwrap().is_empty());
    assert_eq!(db.directory_len().unwrap(), 0);
    assert!(db.directory_cached_at().unwrap().is_none());
}

#[test]
fn replace_and_read_directory() {
    let db = Database::open_in_memory().unwrap();
    let dir = sample_directory();

    db.replace_directory(&dir).unwrap();
    let read = db.read_directory().unwrap();

    assert_eq!(read, dir);
    assert_eq!(read.find("America/St_Johns").unwrap().gmt_offset, -12600);
    assert!(read.find("Europe/London").unwrap().dst);
    assert!(!read.find("Asia/Kolkata").unwrap().dst);
    assert!(db.directory_cached_at().unwrap().is_some());
}

#[test]
fn replace_clears_previous_snapshot() {
    let db = Database::open_in_memory().unwrap();
    db.replace_directory(&sample_directory()).unwrap();

    let smaller = Directory::from_records(vec![zone("UTC", 0, false)]);
    db.replace_directory(&smaller).unwrap();

    let read = db.read_directory().unwrap();
    assert_eq!(read.len(), 1);
    assert!(read.contains("UTC"));
    assert!(!read.contains("Asia/Kolkata"));
}

#[test]
fn replace_with_empty_directory_clears_table() {
    let db = Database::open_in_memory().unwrap();
    db.replace_directory(&sample_directory()).unwrap();
    db.replace_directory(&Directory::empty()).unwrap();
    assert_eq!(db.directory_len().unwrap(), 0);
}

#[test]
fn read_directory_is_sorted() {
    let db = Database::open_in_memory().unwrap();
    {
        let conn = db.lock().unwrap();
        for name in ["Pacific/Auckland", "Africa/Cairo", "Europe/Paris"] {
            conn.execute(
                "INSERT INTO timezones (country_code, country_name, zone_name, gmt_offset, dst)
                 VALUES ('XX', 'Testland', ?1, 0, 0)",
                params![name],
            )
            .unwrap();
        }
    }
    let names: Vec<_> = db
        .read_directory()
        .unwrap()
        .iter()
        .map(|r| r.zone_name.clone())
        .collect();
    assert_eq!(names, ["Africa/Cairo", "Europe/Paris", "Pacific/Auckland"]);
}

#[test]
fn corrupted_row_fails_read() {
    let db = Database::open_in_memory().unwrap();
    {
        let conn = db.lock().unwrap();
        conn.execute(
            "INSERT INTO timezones (country_code, country_name, zone_name, gmt_offset, dst)
             VALUES ('XX', 'Testland', '', 0, 0)",
            [],
        )
        .unwrap();
    }
    assert!(db.read_directory().is_err());
}

#[test]
fn selection_round_trip() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.read_selection().unwrap().is_none());

    db.write_selection("Asia/Kolkata").unwrap();
    assert_eq!(db.read_selection().unwrap().as_deref(), Some("Asia/Kolkata"));

    db.write_selection("Europe/London").unwrap();
    assert_eq!(db.read_selection().unwrap().as_deref(), Some("Europe/London"));

    db.clear_selection().unwrap();
    assert!(db.read_selection().unwrap().is_none());
}

#[test]
fn selection_survives_directory_replace() {
    let db = Database::open_in_memory().unwrap();
    db.write_selection("Asia/Kolkata").unwrap();
    db.replace_directory(&Directory::empty()).unwrap();
    assert_eq!(db.read_selection().unwrap().as_deref(), Some("Asia/Kolkata"));
}

#[test]
fn open_on_disk_persists_across_connections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("tzclock.db");

    {
        let db = Database::open(&path).unwrap();
        db.replace_directory(&sample_directory()).unwrap();
        db.write_selection("Europe/London").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.read_directory().unwrap().len(), 3);
    assert_eq!(db.read_selection().unwrap().as_deref(), Some("Europe/London"));
}

#[test]
fn migrations_are_idempotent() {
    let db = Database::open_in_memory().unwrap();
    let conn = db.lock().unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();
}

#[test]
fn open_fails_when_parent_is_a_file() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let result = Database::open(&blocker.join("tzclock.db"));
    assert!(result.is_err());
}
