// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for command output.
//!
//! Colors are disabled by `NO_COLOR=1` or when stdout is not a terminal.

use std::io::IsTerminal;

use crate::env;

/// ANSI 256-color codes.
pub mod codes {
    /// Region headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Offsets and secondary details: medium grey
    pub const CONTEXT: u8 = 245;
    /// Error phase and messages: soft red
    pub const ERROR: u8 = 167;
}

/// ANSI reset sequence.
const RESET: &str = "\x1b[0m";

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn paint(code: u8, text: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Apply header color to text.
pub fn header(text: &str, enabled: bool) -> String {
    paint(codes::HEADER, text, enabled)
}

/// Apply context color to text.
pub fn context(text: &str, enabled: bool) -> String {
    paint(codes::CONTEXT, text, enabled)
}

/// Apply error color to text.
pub fn error(text: &str, enabled: bool) -> String {
    paint(codes::ERROR, text, enabled)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
