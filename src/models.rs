// src/models.rs

use std::collections::BTreeMap;
use thiserror::Error;

// --- RC FILE MODELS ---
// These are the primary structures produced by rc-file resolution and
// consumed by the startup-option merge and the argument assembler.

/// One rc source file, discovered directly or through an `import` line.
///
/// The `index` is assigned in discovery order and identifies this file for
/// the rest of the run: `--rc_source` lines are emitted in index order, and
/// `--default_override` entries reference `index + 1` (0 is reserved for
/// synthetic client-origin defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcFile {
    /// Path of the file as it was discovered or imported.
    pub filename: String,
    /// Stable, 0-based position in the discovery order.
    pub index: usize,
}

impl RcFile {
    pub fn new(filename: &str, index: usize) -> Self {
        Self {
            filename: filename.to_string(),
            index,
        }
    }
}

/// One raw option token together with the rc file that produced it.
///
/// The token is stored unexpanded; interpretation is left to the engine or
/// to the startup-option validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcOption {
    /// Index of the producing [`RcFile`].
    pub rcfile_index: usize,
    /// The raw token, exactly as tokenized from the file.
    pub option: String,
}

impl RcOption {
    pub fn new(rcfile_index: usize, option: &str) -> Self {
        Self {
            rcfile_index,
            option: option.to_string(),
        }
    }
}

/// Options keyed by the command word they apply to (`startup`, `build`,
/// `common`, ...).
///
/// Each command's sequence keeps insertion order, which is file processing
/// order. Command keys iterate in sorted order, so downstream emission is
/// deterministic across runs.
pub type OptionsBySource = BTreeMap<String, Vec<RcOption>>;

/// Terminal facts forwarded to the engine as client defaults.
///
/// Captured once at startup and treated as plain data afterwards, so the
/// merge and assembly stages stay free of environment reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalInfo {
    /// Whether stderr talks to a smart terminal.
    pub is_tty: bool,
    /// Best-effort output width, in columns.
    pub columns: u32,
    /// Whether the client was started from inside Emacs.
    pub emacs: bool,
}

// --- EXIT CODES & ERRORS ---

/// Process exit codes reported to the caller, shared with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    /// The user passed something unusable: malformed imports, cycles,
    /// unknown or ill-valued startup options, unreadable explicit rc paths.
    BadArgv,
    /// The environment misbehaved, e.g. a file verified readable moments
    /// ago failed to read.
    InternalError,
}

impl ExitCode {
    /// Numeric value handed to `std::process::exit`.
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::BadArgv => 2,
            Self::InternalError => 37,
        }
    }
}

/// Any failure raised while resolving rc files and startup options.
///
/// Every variant maps to an [`ExitCode`]; the binary prints the message and
/// exits with that code.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid import declaration in .bazelrc file '{path}': '{line}'")]
    InvalidImport { path: String, line: String },

    #[error("Import loop detected:\n{chain}")]
    ImportCycle {
        /// Preformatted chain, one file per line, in import order.
        chain: String,
    },

    #[error("Unable to read .bazelrc file '{path}'.")]
    UnreadableRc { path: String },

    #[error("Unexpected error reading .bazelrc file '{path}'")]
    RcReadFailed { path: String },

    #[error("Unknown startup option: '{arg}'.\n  For more info, run 'bzl help startup_options'.")]
    UnknownStartupOption { arg: String },

    #[error("Invalid argument to {flag}: '{value}'.")]
    InvalidStartupValue { flag: String, value: String },

    #[error("Invalid argument to --io_nice_level: '{value}'. Must not exceed 7.")]
    InvalidNiceLevel { value: String },

    #[error("Options were already parsed for this invocation.")]
    AlreadyParsed,
}

impl ClientError {
    /// The exit code this failure reports at the process boundary.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::RcReadFailed { .. } | Self::AlreadyParsed => ExitCode::InternalError,
            _ => ExitCode::BadArgv,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
