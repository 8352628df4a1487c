// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{output, TestContext};

#[tokio::test]
async fn test_status_text() {
    let ctx = TestContext::new();
    ctx.seed_sample();
    ctx.persist_selection("Asia/Kolkata");

    let mut buf = Vec::new();
    execute(&ctx.session, OutputFormat::Text, &mut buf)
        .await
        .unwrap();

    let text = output(buf);
    assert!(text.contains("phase: ready"));
    assert!(text.contains("origin: cache"));
    assert!(text.contains("zones: 4"));
    assert!(text.contains("selected: Asia/Kolkata (India, GMT+05:30)"));
    assert!(text.contains("cached at: "));
    assert!(text.contains("api key: missing"));
    assert!(text.contains("tzclock.db"));
}

#[tokio::test]
async fn test_status_never_fetches() {
    // Usable key, closed port
    let ctx = TestContext::with_api("http://127.0.0.1:1");

    let mut buf = Vec::new();
    execute(&ctx.session, OutputFormat::Json, &mut buf)
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&output(buf)).unwrap();
    assert_eq!(json["phase"], "ready");
    assert_eq!(json["origin"], "none");
    assert_eq!(json["zones"], 0);
    assert_eq!(json["api_key_configured"], true);
    assert!(json.get("selected").is_none());
    assert!(json.get("cached_at").is_none());
}
