// src/cli.rs

use clap::Parser;
use colored::Colorize;

/// bzl: workspace-aware launcher for the build engine.
///
/// The command line has three position-dependent regions:
///
/// - `bzl [startup options] <command> [command arguments]`
///
/// The startup-option region ends at the first token that is not
/// option-shaped; that token is the command. Which startup options exist,
/// and what they mean, also depends on rc files that have not been read at
/// parse time. clap therefore only declares the surface; interpretation
/// happens in the option processor, which the binary feeds from the raw
/// argv (the collector consumes a leading literal `--` that the startup
/// region must still reject).
#[derive(Parser, Debug)]
#[command(name = "bzl", about, long_about = None)]
#[command(
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Every token after the binary name, in order, except a leading
    /// literal `--`, which clap consumes as its positional escape.
    ///
    /// Help and version flags are not intercepted: `--help` and friends end
    /// the startup-option region like any non-option token and reach the
    /// engine as a command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Short usage block shown when the invocation carries no command.
pub fn usage() -> String {
    format!(
        "{}\n  bzl [startup options] <command> [command arguments]\n\n\
         Startup options come from rc files first and the command line last;\n\
         later values win. Commands and their options are handled by the engine.",
        "Usage:".bold()
    )
}
