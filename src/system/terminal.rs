// src/system/terminal.rs

//! Terminal facts, captured once per invocation.
//!
//! The answers feed `--isatty`, `--terminal_columns` and `--emacs` in the
//! assembled argument block. Everything except the tty probe itself is
//! derived from the environment snapshot, so results are reproducible for
//! a given snapshot.

use crate::constants::DEFAULT_TERMINAL_COLUMNS;
use crate::models::TerminalInfo;
use std::collections::BTreeMap;

/// `TERM` values that mean "no cursor control", even on a real tty.
const DUMB_TERMINALS: &[&str] = &[
    "",
    "dumb",
    "emacs",
    "xterm-mono",
    "symbolics",
    "9term",
    "Apple_Terminal",
];

/// Captures the terminal state for this invocation.
pub fn detect(env: &BTreeMap<String, String>) -> TerminalInfo {
    TerminalInfo {
        is_tty: is_standard_terminal(env),
        columns: terminal_columns(env),
        emacs: is_emacs_terminal(env),
    }
}

fn is_standard_terminal(env: &BTreeMap<String, String>) -> bool {
    let term = env.get("TERM").map(String::as_str).unwrap_or_default();
    if DUMB_TERMINALS.contains(&term) {
        return false;
    }
    atty::is(atty::Stream::Stderr)
}

fn terminal_columns(env: &BTreeMap<String, String>) -> u32 {
    env.get("COLUMNS")
        .and_then(|columns| columns.parse::<u32>().ok())
        .unwrap_or(DEFAULT_TERMINAL_COLUMNS)
}

fn is_emacs_terminal(env: &BTreeMap<String, String>) -> bool {
    let emacs = env.get("EMACS").map(String::as_str);
    let inside_emacs = env.get("INSIDE_EMACS").map(String::as_str);
    emacs == Some("t") || inside_emacs.is_some_and(|value| !value.is_empty())
}
