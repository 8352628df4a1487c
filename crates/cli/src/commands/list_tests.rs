// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{output, TestContext};

#[tokio::test]
async fn test_list_groups_by_region() {
    let ctx = TestContext::new();
    ctx.seed_sample();
    ctx.persist_selection("Asia/Tokyo");

    let mut buf = Vec::new();
    execute(&ctx.session, None, OutputFormat::Text, &mut buf)
        .await
        .unwrap();

    let text = output(buf);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "America:");
    assert_eq!(lines[2], "Asia:");
    assert!(lines[4].starts_with("* Asia/Tokyo"));
    assert_eq!(lines[5], "Europe:");
}

#[tokio::test]
async fn test_list_filters_by_query() {
    let ctx = TestContext::new();
    ctx.seed_sample();

    let mut buf = Vec::new();
    execute(&ctx.session, Some("india"), OutputFormat::Text, &mut buf)
        .await
        .unwrap();

    let text = output(buf);
    assert!(text.contains("Asia/Kolkata"));
    assert!(!text.contains("Asia/Tokyo"));
}

#[tokio::test]
async fn test_list_no_match() {
    let ctx = TestContext::new();
    ctx.seed_sample();

    let mut buf = Vec::new();
    execute(&ctx.session, Some("atlantis"), OutputFormat::Text, &mut buf)
        .await
        .unwrap();

    assert_eq!(output(buf), "No time zones match 'atlantis'.\n");
}

#[tokio::test]
async fn test_list_empty_cache_prints_hint() {
    let ctx = TestContext::new();

    let mut buf = Vec::new();
    execute(&ctx.session, None, OutputFormat::Text, &mut buf)
        .await
        .unwrap();

    let text = output(buf);
    assert!(text.starts_with("No time zones cached."));
    assert!(text.contains("tzclock refresh"));
}

#[tokio::test]
async fn test_list_json() {
    let ctx = TestContext::new();
    ctx.seed_sample();
    ctx.persist_selection("Europe/London");

    let mut buf = Vec::new();
    execute(&ctx.session, Some("asia"), OutputFormat::Json, &mut buf)
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&output(buf)).unwrap();
    let zones = json["zones"].as_array().unwrap();
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0]["zone_name"], "Asia/Kolkata");
    assert_eq!(zones[0]["gmt_offset"], 19800);
    assert_eq!(json["selected"], "Europe/London");
    assert_eq!(json["query"], "asia");
}
