// src/constants.rs

/// The marker file whose nearest ancestor directory defines the workspace root.
pub const WORKSPACE_MARKER: &str = "WORKSPACE";

/// Prefix that rewrites an rc import path relative to the workspace root.
pub const WORKSPACE_PREFIX: &str = "%workspace%/";

/// The name of the user-level rc file (in the workspace root or `$HOME`).
pub const RC_BASENAME: &str = ".bazelrc";

/// The name of the workspace-provided master rc file (inside tools/).
pub const MASTER_RC_BASENAME: &str = "bazel.rc";

/// The machine-wide rc file consulted after workspace and binary candidates.
pub const SYSTEM_RC_PATH: &str = "/etc/bazel.bazelrc";

/// Environment variable overriding the downstream engine command line.
pub const ENGINE_ENV_VAR: &str = "BZL_ENGINE";

/// The engine binary searched for next to the client when no override is set.
pub const ENGINE_BINARY_NAME: &str = "bzl-engine";

/// Terminal width reported when no real measurement is available.
pub const DEFAULT_TERMINAL_COLUMNS: u32 = 80;
