// src/system/paths.rs

//! Path normalization for values crossing the client/engine boundary.
//!
//! Everything the client forwards (rc file names, `--client_cwd`, `PATH`
//! entries) goes through [`convert_path`] so the engine never sees UNC
//! prefixes or other platform decoration.

use std::path::Path;

/// Separator between entries of a path-list value, as in `PATH`.
pub const PATH_LIST_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Renders `path` in its simplest printable form.
///
/// On Windows this strips the `\\?\` verbatim prefix; elsewhere it is the
/// path unchanged.
pub fn convert_path(path: &Path) -> String {
    dunce::simplified(path).to_string_lossy().into_owned()
}

/// Normalizes every entry of a `PATH`-style list, preserving entry order.
///
/// A single path like `c:/foo` parses as a valid two-entry Unix list, so
/// callers must know whether their value is a list or one path and pick
/// the matching function.
pub fn convert_path_list(value: &str) -> String {
    std::env::split_paths(value)
        .map(|entry| convert_path(&entry))
        .collect::<Vec<_>>()
        .join(PATH_LIST_SEPARATOR)
}
