// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_load_missing_config_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load(temp.path()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert!(config.api_key.is_none());
}

#[test]
fn test_save_and_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let state_dir = temp.path().join("nested");
    let config = Config {
        api_key: Some("ABCDEFGH12".to_string()),
        database: Some("cache.db".to_string()),
        probe_interval_ms: 250,
        ..Config::default()
    };

    config.save(&state_dir).unwrap();
    let loaded = Config::load(&state_dir).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_load_partial_config_fills_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "api_key = \"XYZ123456\"\n").unwrap();

    let config = Config::load(temp.path()).unwrap();

    assert_eq!(config.api_key.as_deref(), Some("XYZ123456"));
    assert_eq!(config.probe_interval_ms, 5000);
    assert_eq!(config.request_timeout_secs, 15);
}

#[test]
fn test_load_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "api_key = [").unwrap();

    let err = Config::load(temp.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[parameterized(
    missing = { None, false },
    empty = { Some(""), false },
    blank = { Some("     "), false },
    placeholder = { Some("YOUR_API_KEY"), false },
    five_chars = { Some("ABCDE"), false },
    six_chars = { Some("ABCDEF"), true },
    real_key = { Some("1A2B3C4D5E6F"), true },
)]
fn test_is_usable_api_key(key: Option<&str>, expected: bool) {
    assert_eq!(is_usable_api_key(key), expected);
}

#[test]
fn test_api_key_override() {
    let config = Config {
        api_key: Some("FROMFILE1".to_string()),
        ..Config::default()
    };

    let kept = config.clone().with_api_key_override(None);
    assert_eq!(kept.api_key.as_deref(), Some("FROMFILE1"));

    let blank = config.clone().with_api_key_override(Some("  ".to_string()));
    assert_eq!(blank.api_key.as_deref(), Some("FROMFILE1"));

    let replaced = config.with_api_key_override(Some("FROMENV99".to_string()));
    assert_eq!(replaced.api_key.as_deref(), Some("FROMENV99"));
}

#[test]
fn test_fetcher_config_drops_unusable_key() {
    let config = Config {
        api_key: Some("YOUR_API_KEY".to_string()),
        api_base: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    };
    let fetcher = config.fetcher_config();
    assert!(fetcher.api_key.is_none());
    assert_eq!(fetcher.api_base, "http://127.0.0.1:9");
    assert_eq!(fetcher.timeout, Duration::from_secs(15));
}

#[test]
fn test_db_path() {
    let state_dir = PathBuf::from("/state/tzclock");

    let default = Config::default();
    assert_eq!(
        default.db_path(&state_dir),
        PathBuf::from("/state/tzclock/tzclock.db")
    );

    let relative = Config {
        database: Some("other.db".to_string()),
        ..Config::default()
    };
    assert_eq!(
        relative.db_path(&state_dir),
        PathBuf::from("/state/tzclock/other.db")
    );

    let absolute = Config {
        database: Some("/var/cache/zones.db".to_string()),
        ..Config::default()
    };
    assert_eq!(
        absolute.db_path(&state_dir),
        PathBuf::from("/var/cache/zones.db")
    );
}

#[test]
fn test_resolve_state_dir_precedence() {
    assert_eq!(
        resolve_state_dir(Some("/explicit".into()), Some("/xdg".into())),
        PathBuf::from("/explicit")
    );
    assert_eq!(
        resolve_state_dir(None, Some("/xdg".into())),
        PathBuf::from("/xdg/tzclock")
    );
    assert!(resolve_state_dir(None, None).ends_with(".local/state/tzclock"));
}

#[test]
fn test_probe_interval_has_floor() {
    let config = Config {
        probe_interval_ms: 0,
        ..Config::default()
    };
    assert_eq!(config.probe_interval(), Duration::from_millis(100));
}
