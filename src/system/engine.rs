// src/system/engine.rs

use crate::constants::{ENGINE_BINARY_NAME, ENGINE_ENV_VAR};
use crate::models::ExitCode;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Could not parse the engine command line: '{0}'")]
    CommandParse(String),
    #[error("No engine command to run.")]
    EmptyCommand,
    #[error(
        "No engine found; set {ENGINE_ENV_VAR} or install '{ENGINE_BINARY_NAME}' next to the client."
    )]
    NotFound,
    #[error("Engine '{command}' could not be started: {source}")]
    LaunchFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Engine '{command}' terminated without an exit status.")]
    NoStatus { command: String },
}

impl EngineError {
    /// The exit code this failure reports at the process boundary.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::CommandParse(_) => ExitCode::BadArgv,
            _ => ExitCode::InternalError,
        }
    }
}

/// Decides which engine to run.
///
/// A non-empty `BZL_ENGINE` in the snapshot wins and is split like a shell
/// word list, so it can carry a wrapper and flags. Otherwise the engine is
/// expected to sit next to the client binary.
pub fn engine_command(
    env: &BTreeMap<String, String>,
    client_binary: &Path,
) -> Result<Vec<String>, EngineError> {
    if let Some(raw) = env.get(ENGINE_ENV_VAR) {
        if !raw.trim().is_empty() {
            let words = shlex::split(raw)
                .ok_or_else(|| EngineError::CommandParse(raw.clone()))?;
            if words.is_empty() {
                return Err(EngineError::CommandParse(raw.clone()));
            }
            return Ok(words);
        }
    }

    let sibling = client_binary
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(ENGINE_BINARY_NAME);
    if !sibling.is_file() {
        return Err(EngineError::NotFound);
    }
    Ok(vec![sibling.to_string_lossy().into_owned()])
}

/// Runs the engine and waits for it, returning its exit code.
///
/// The engine argv is the engine command followed by the command word and
/// the assembled argument vector. Stdout and stderr are the client's own,
/// so engine output reaches the user untouched.
pub fn launch(
    engine: &[String],
    command: &str,
    command_arguments: &[String],
    cwd: &Path,
) -> Result<i32, EngineError> {
    let Some((program, prefix_args)) = engine.split_first() else {
        return Err(EngineError::EmptyCommand);
    };
    let clean_cwd = dunce::simplified(cwd);

    log::debug!("launching engine {program} for command '{command}'");
    let mut child = StdCommand::new(program)
        .args(prefix_args)
        .arg(command)
        .args(command_arguments)
        .current_dir(clean_cwd)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                EngineError::NotFound
            } else {
                EngineError::LaunchFailed {
                    command: program.clone(),
                    source,
                }
            }
        })?;

    let status = child.wait().map_err(|source| EngineError::LaunchFailed {
        command: program.clone(),
        source,
    })?;
    status.code().ok_or_else(|| EngineError::NoStatus {
        command: program.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn env_override_wins_and_splits_like_a_shell() {
        let env = env(&[(ENGINE_ENV_VAR, "/opt/engine --experimental")]);
        let command = engine_command(&env, Path::new("/usr/bin/bzl")).expect("valid override");
        assert_eq!(command, vec!["/opt/engine", "--experimental"]);
    }

    #[test]
    fn malformed_env_override_is_rejected() {
        let env = env(&[(ENGINE_ENV_VAR, "/opt/engine 'unterminated")]);
        let err = engine_command(&env, Path::new("/usr/bin/bzl"))
            .expect_err("unterminated quote must fail");
        assert!(matches!(err, EngineError::CommandParse(_)));
        assert_eq!(err.exit_code(), ExitCode::BadArgv);
    }

    #[test]
    fn sibling_binary_is_the_fallback() {
        let dir = TempDir::new().expect("tempdir");
        let sibling = dir.path().join(ENGINE_BINARY_NAME);
        fs::write(&sibling, "").expect("fake engine");

        let command = engine_command(&env(&[]), &dir.path().join("bzl"))
            .expect("sibling engine resolves");
        assert_eq!(command, vec![sibling.to_string_lossy().into_owned()]);
    }

    #[test]
    fn blank_env_override_falls_back_to_the_sibling() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join(ENGINE_BINARY_NAME), "").expect("fake engine");

        let command = engine_command(&env(&[(ENGINE_ENV_VAR, "  ")]), &dir.path().join("bzl"))
            .expect("blank override is ignored");
        assert_eq!(command.len(), 1);
    }

    #[test]
    fn a_missing_engine_is_an_internal_error() {
        let dir = TempDir::new().expect("tempdir");
        let err = engine_command(&env(&[]), &dir.path().join("bzl"))
            .expect_err("no engine anywhere");
        assert!(matches!(err, EngineError::NotFound));
        assert_eq!(err.exit_code(), ExitCode::InternalError);
    }

    #[test]
    fn empty_engine_command_is_rejected() {
        let err = launch(&[], "build", &[], Path::new("."))
            .expect_err("nothing to launch");
        assert!(matches!(err, EngineError::EmptyCommand));
    }

    #[cfg(unix)]
    #[test]
    fn engine_exit_codes_are_propagated() {
        let engine = vec![
            "/bin/sh".to_string(),
            "-c".to_string(),
            "exit 7".to_string(),
        ];
        let code = launch(&engine, "build", &[], Path::new("/"))
            .expect("shell launches");
        assert_eq!(code, 7);
    }
}
