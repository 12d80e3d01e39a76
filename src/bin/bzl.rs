// src/bin/bzl.rs

use anyhow::{Context, Result};
use bzl_client::{
    cli::{self, Cli},
    core::{option_processor::OptionProcessor, workspace},
    models::{ClientError, ExitCode},
    system::{engine, terminal},
};
use clap::Parser;
use colored::*;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

/// The entry point of the `bzl` launcher.
///
/// Sets up logging, runs the pipeline, and performs centralized error
/// handling: every failure is printed once, and the process exit code
/// comes from the error itself (or from the engine, on success).
fn main() {
    env_logger::init();

    // clap's positional collection consumes a leading literal `--`, and
    // the startup region must still see that token. The surface stays
    // declarative; the pipeline runs on the raw argv.
    Cli::parse();

    match run_cli(env::args().collect()) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let code = if let Some(client_err) = e.downcast_ref::<ClientError>() {
                client_err.exit_code()
            } else if let Some(engine_err) = e.downcast_ref::<engine::EngineError>() {
                engine_err.exit_code()
            } else {
                ExitCode::InternalError
            };
            eprintln!("\n{}: {}", "Error".red().bold(), e);
            std::process::exit(code.code());
        }
    }
}

/// Runs one invocation end to end and returns the process exit code.
///
/// `argv` is the full vector, binary name included. The environment and
/// terminal are snapshotted here, once; everything downstream works from
/// the snapshots.
fn run_cli(argv: Vec<String>) -> Result<i32> {
    log::debug!("raw argv: {argv:?}");

    let cwd = env::current_dir().context("Failed to determine the current working directory")?;
    let env_snapshot: BTreeMap<String, String> = env::vars().collect();
    let terminal_info = terminal::detect(&env_snapshot);
    let workspace = workspace::find_workspace(&cwd);
    if workspace.is_empty() {
        log::debug!("no workspace marker above {}", cwd.display());
    }

    let mut processor = OptionProcessor::default();
    processor.parse_options(&argv, &workspace, &cwd, &env_snapshot, &terminal_info)?;

    if processor.command().is_empty() {
        println!("{}", cli::usage());
        return Ok(ExitCode::Success.code());
    }

    let client_binary = env::current_exe().unwrap_or_else(|_| PathBuf::from("bzl"));
    let engine_cmd = engine::engine_command(&env_snapshot, &client_binary)?;
    let code = engine::launch(
        &engine_cmd,
        processor.command(),
        processor.command_arguments(),
        &cwd,
    )?;
    Ok(code)
}
