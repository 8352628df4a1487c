// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn test_disabled_colors_leave_text_untouched() {
    assert_eq!(header("Asia", false), "Asia");
    assert_eq!(context("GMT+09:00", false), "GMT+09:00");
    assert_eq!(error("error", false), "error");
}

#[test]
fn test_enabled_colors_wrap_text() {
    assert_eq!(header("Asia", true), "\x1b[38;5;74mAsia\x1b[0m");
    assert_eq!(context("x", true), "\x1b[38;5;245mx\x1b[0m");
    assert_eq!(error("x", true), "\x1b[38;5;167mx\x1b[0m");
}
