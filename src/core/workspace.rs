// src/core/workspace.rs

//! Workspace detection and rc-file discovery.
//!
//! Everything here answers one question: which rc files apply to this
//! invocation, and in what order. Master candidates come first (workspace,
//! binary directory, machine-wide), then the user's own rc file.

use crate::constants::{
    MASTER_RC_BASENAME, RC_BASENAME, SYSTEM_RC_PATH, WORKSPACE_MARKER, WORKSPACE_PREFIX,
};
use crate::models::{ClientError, ClientResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the ordered master rc candidates consulted before the user rc.
///
/// Implementations must only return readable files; unreadable or absent
/// candidates are dropped silently at this seam, never reported.
pub trait RcPathDiscovery: std::fmt::Debug {
    fn candidate_rc_paths(&self, workspace: &str, cwd: &Path, args: &[String]) -> Vec<String>;
}

/// Default discovery over the workspace tree, the client binary's
/// directory, and the machine-wide location.
#[derive(Debug, Default)]
pub struct WorkspaceLayout;

impl RcPathDiscovery for WorkspaceLayout {
    fn candidate_rc_paths(&self, workspace: &str, cwd: &Path, args: &[String]) -> Vec<String> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if !workspace.is_empty() {
            candidates.push(Path::new(workspace).join("tools").join(MASTER_RC_BASENAME));
        }

        // A master rc can sit next to the client binary itself. Duplicates
        // with the workspace candidate are fine; the processor dedupes.
        if let Some(arg0) = args.first() {
            let binary = make_absolute(cwd, arg0);
            if let Some(dir) = binary.parent() {
                candidates.push(dir.join(MASTER_RC_BASENAME));
            }
        }

        candidates.push(PathBuf::from(SYSTEM_RC_PATH));

        candidates
            .into_iter()
            .filter(|path| is_readable(path))
            .map(|path| path.to_string_lossy().into_owned())
            .collect()
    }
}

/// Walks from `cwd` upward to the nearest directory containing the
/// workspace marker file. Returns an empty string when there is none; the
/// client still runs, it just has no workspace-relative rc sources.
pub fn find_workspace(cwd: &Path) -> String {
    cwd.ancestors()
        .find(|dir| dir.join(WORKSPACE_MARKER).is_file())
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Rewrites a `%workspace%/`-prefixed import path against the workspace
/// root. Paths without the prefix pass through untouched. `None` means the
/// prefix was present but either there is no workspace to resolve it
/// against or nothing follows the prefix.
pub fn rewrite_workspace_path(workspace: &str, path: &str) -> Option<String> {
    match path.strip_prefix(WORKSPACE_PREFIX) {
        Some(rest) if workspace.is_empty() || rest.is_empty() => None,
        Some(rest) => Some(Path::new(workspace).join(rest).to_string_lossy().into_owned()),
        None => Some(path.to_string()),
    }
}

/// Resolves the user's rc file.
///
/// An explicitly given path must be readable, otherwise the whole
/// invocation is rejected. Without one, the workspace rc is preferred over
/// `$HOME`, and having neither is not an error.
pub fn find_user_rc(
    cmdline_rc: Option<&str>,
    workspace: &str,
    cwd: &Path,
) -> ClientResult<Option<String>> {
    if let Some(path) = cmdline_rc {
        let absolute = make_absolute(cwd, path);
        if !is_readable(&absolute) {
            return Err(ClientError::UnreadableRc {
                path: absolute.to_string_lossy().into_owned(),
            });
        }
        return Ok(Some(absolute.to_string_lossy().into_owned()));
    }

    if !workspace.is_empty() {
        let workspace_rc = Path::new(workspace).join(RC_BASENAME);
        if is_readable(&workspace_rc) {
            return Ok(Some(workspace_rc.to_string_lossy().into_owned()));
        }
    }

    if let Some(home) = dirs::home_dir() {
        let home_rc = home.join(RC_BASENAME);
        if is_readable(&home_rc) {
            return Ok(Some(home_rc.to_string_lossy().into_owned()));
        }
    }

    Ok(None)
}

/// Resolves `path` against `cwd` unless it is already absolute.
pub fn make_absolute(cwd: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn is_readable(path: &Path) -> bool {
    path.is_file() && fs::File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").expect("failed to create fixture file");
    }

    #[test]
    fn workspace_is_nearest_marked_ancestor() {
        let root = TempDir::new().expect("tempdir");
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("mkdirs");
        touch(&root.path().join(WORKSPACE_MARKER));

        assert_eq!(
            find_workspace(&nested),
            root.path().to_string_lossy().into_owned()
        );
    }

    #[test]
    fn no_marker_means_no_workspace() {
        let root = TempDir::new().expect("tempdir");
        assert_eq!(find_workspace(root.path()), "");
    }

    #[test]
    fn workspace_prefix_is_rewritten() {
        let rewritten = rewrite_workspace_path("/ws", "%workspace%/tools/extra.rc")
            .expect("rewrite should succeed");
        assert_eq!(rewritten, Path::new("/ws").join("tools/extra.rc").to_string_lossy());
    }

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(
            rewrite_workspace_path("/ws", "/abs/file.rc").as_deref(),
            Some("/abs/file.rc")
        );
        assert_eq!(
            rewrite_workspace_path("", "relative.rc").as_deref(),
            Some("relative.rc")
        );
    }

    #[test]
    fn prefix_without_workspace_fails() {
        assert_eq!(rewrite_workspace_path("", "%workspace%/x.rc"), None);
    }

    #[test]
    fn prefix_alone_is_not_an_import_path() {
        // With no remainder the rewrite would name the workspace directory
        // itself, which is never a readable rc file.
        assert_eq!(rewrite_workspace_path("/ws", "%workspace%/"), None);
    }

    #[test]
    fn explicit_rc_must_be_readable() {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("no-such-rc");
        let err = find_user_rc(Some(&missing.to_string_lossy()), "", dir.path())
            .expect_err("unreadable explicit rc must be rejected");
        assert!(matches!(err, ClientError::UnreadableRc { .. }));
    }

    #[test]
    fn explicit_relative_rc_resolves_against_cwd() {
        let dir = TempDir::new().expect("tempdir");
        touch(&dir.path().join("my.rc"));

        let found = find_user_rc(Some("my.rc"), "", dir.path())
            .expect("lookup should succeed")
            .expect("rc should be found");
        assert_eq!(found, dir.path().join("my.rc").to_string_lossy());
    }

    #[test]
    fn workspace_rc_wins_over_home() {
        let ws = TempDir::new().expect("tempdir");
        touch(&ws.path().join(RC_BASENAME));

        let found = find_user_rc(None, &ws.path().to_string_lossy(), ws.path())
            .expect("lookup should succeed")
            .expect("workspace rc should be found");
        assert_eq!(found, ws.path().join(RC_BASENAME).to_string_lossy());
    }

    #[test]
    fn discovery_only_returns_readable_candidates() {
        let ws = TempDir::new().expect("tempdir");
        let tools = ws.path().join("tools");
        fs::create_dir_all(&tools).expect("mkdirs");
        touch(&tools.join(MASTER_RC_BASENAME));

        let layout = WorkspaceLayout;
        let args = vec!["bzl".to_string()];
        let found =
            layout.candidate_rc_paths(&ws.path().to_string_lossy(), ws.path(), &args);

        let tools_rc = tools.join(MASTER_RC_BASENAME).to_string_lossy().into_owned();
        assert!(found.contains(&tools_rc));
        // The binary-directory candidate does not exist here.
        assert!(!found.iter().any(|p| p.ends_with("bzl/bazel.rc")));
    }

    #[test]
    fn discovery_finds_rc_next_to_the_binary() {
        let bin_dir = TempDir::new().expect("tempdir");
        touch(&bin_dir.path().join(MASTER_RC_BASENAME));
        let binary = bin_dir.path().join("bzl");
        touch(&binary);

        let layout = WorkspaceLayout;
        let args = vec![binary.to_string_lossy().into_owned()];
        let found = layout.candidate_rc_paths("", bin_dir.path(), &args);

        let alongside = bin_dir
            .path()
            .join(MASTER_RC_BASENAME)
            .to_string_lossy()
            .into_owned();
        assert_eq!(found.first(), Some(&alongside));
    }
}
