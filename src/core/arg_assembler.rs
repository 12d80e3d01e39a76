// src/core/arg_assembler.rs

//! Assembly of the internal argument block handed to the engine.
//!
//! After the merge phase the client owns facts the engine cannot recover on
//! its own: which rc files were read, which raw options each contributed,
//! and what the invoking terminal and environment look like. This module
//! renders those facts as `--rc_source`, `--default_override`,
//! `--client_env` and friends, in a fixed order the engine relies on.

use crate::models::{OptionsBySource, RcFile, TerminalInfo};
use crate::system::paths;
use std::collections::BTreeMap;
use std::path::Path;

/// Renders the internal argument block.
///
/// The result is spliced between the command word and the user's residual
/// arguments, so every entry here reads as "least important": anything the
/// user typed later overrides it.
///
/// Source index 0 is reserved for the synthetic `client` source carrying
/// terminal defaults; file-backed sources are numbered from 1 in discovery
/// order.
pub fn assemble(
    rcfiles: &[RcFile],
    rcoptions: &OptionsBySource,
    batch: bool,
    cwd: &Path,
    env: &BTreeMap<String, String>,
    terminal: &TerminalInfo,
) -> Vec<String> {
    let mut arguments = Vec::new();

    arguments.push("--rc_source=client".to_string());
    arguments.push(format!(
        "--default_override=0:common=--isatty={}",
        u8::from(terminal.is_tty)
    ));
    arguments.push(format!(
        "--default_override=0:common=--terminal_columns={}",
        terminal.columns
    ));

    for rcfile in rcfiles {
        arguments.push(format!(
            "--rc_source={}",
            paths::convert_path(Path::new(&rcfile.filename))
        ));
    }

    for (command, options) in rcoptions {
        if command == "startup" {
            // Already consumed by the merge phase; the engine never sees
            // startup options as overrides.
            continue;
        }
        for option in options {
            arguments.push(format!(
                "--default_override={}:{}={}",
                option.rcfile_index + 1,
                command,
                option.option
            ));
        }
    }

    if batch {
        arguments.push("--ignore_client_env".to_string());
    } else {
        for (name, value) in env {
            let value = match name.as_str() {
                "PATH" => paths::convert_path_list(value),
                // A single Windows path also parses as a two-entry Unix
                // path list, so TMP must be treated as one path.
                "TMP" => paths::convert_path(Path::new(value)),
                _ => value.clone(),
            };
            arguments.push(format!("--client_env={name}={value}"));
        }
    }

    arguments.push(format!(
        "--client_cwd={}",
        paths::convert_path(cwd)
    ));

    if terminal.emacs {
        arguments.push("--emacs".to_string());
    }

    arguments
}
