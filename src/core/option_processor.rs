// src/core/option_processor.rs

//! Orchestration of a single invocation.
//!
//! One [`OptionProcessor`] takes the raw command line and turns it into
//! three things the launcher needs: merged startup options (via the
//! injected validator), the command word, and the argument vector for the
//! engine. The sequence is fixed: pre-scan for rc selection flags, resolve
//! and parse rc files, merge startup options in precedence order, split
//! off the command, then assemble the internal argument block.

use crate::core::startup_options::{StartupOptionValidator, StartupOptions};
use crate::core::workspace::{self, RcPathDiscovery, WorkspaceLayout};
use crate::core::{arg_assembler, commons, rc_resolver};
use crate::models::{ClientError, ClientResult, OptionsBySource, RcFile, TerminalInfo};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Single-use processor for one command line.
///
/// Collaborators are injected: the discovery strategy decides where master
/// rc files live, the validator decides which startup options exist. A
/// processor parses exactly once; a second attempt is an internal error.
#[derive(Debug)]
pub struct OptionProcessor {
    discovery: Box<dyn RcPathDiscovery>,
    validator: Box<dyn StartupOptionValidator>,
    rcfiles: Vec<RcFile>,
    rcoptions: OptionsBySource,
    args: Vec<String>,
    command: String,
    command_arguments: Vec<String>,
    /// Index of the last startup token in `args`; the command word, if
    /// any, sits right after it.
    startup_args_end: usize,
    initialized: bool,
}

impl Default for OptionProcessor {
    fn default() -> Self {
        Self::new(Box::new(WorkspaceLayout), Box::<StartupOptions>::default())
    }
}

impl OptionProcessor {
    pub fn new(
        discovery: Box<dyn RcPathDiscovery>,
        validator: Box<dyn StartupOptionValidator>,
    ) -> Self {
        Self {
            discovery,
            validator,
            rcfiles: Vec::new(),
            rcoptions: OptionsBySource::new(),
            args: Vec::new(),
            command: String::new(),
            command_arguments: Vec::new(),
            startup_args_end: 0,
            initialized: false,
        }
    }

    /// Runs the whole pipeline for `args` (`args[0]` is the binary).
    ///
    /// `workspace` may be empty when the invocation is outside any
    /// workspace. `env` and `terminal` are snapshots taken at startup; no
    /// stage after this call reads the live environment.
    pub fn parse_options(
        &mut self,
        args: &[String],
        workspace: &str,
        cwd: &Path,
        env: &BTreeMap<String, String>,
        terminal: &TerminalInfo,
    ) -> ClientResult<()> {
        if self.initialized {
            return Err(ClientError::AlreadyParsed);
        }
        self.initialized = true;
        self.args = args.to_vec();

        // Rc selection flags act before any file is read, so they are
        // found by a dedicated scan of the whole command line. The first
        // occurrence wins, under either spelling.
        let mut cmdline_rc: Option<String> = None;
        let mut use_master = true;
        let mut scan = args.iter().skip(1).peekable();
        while let Some(arg) = scan.next() {
            let next = scan.peek().map(|next| next.as_str());
            if cmdline_rc.is_none() {
                cmdline_rc = commons::unary_option(arg, next, "--blazerc")
                    .or_else(|| commons::unary_option(arg, next, "--bazelrc"))
                    .map(|(value, _)| value.to_string());
            }
            if use_master
                && (commons::nullary_option(arg, "--nomaster_blazerc")
                    || commons::nullary_option(arg, "--nomaster_bazelrc"))
            {
                use_master = false;
            }
        }

        let mut candidates = if use_master {
            self.discovery.candidate_rc_paths(workspace, cwd, args)
        } else {
            Vec::new()
        };
        if let Some(user_rc) = workspace::find_user_rc(cmdline_rc.as_deref(), workspace, cwd)? {
            candidates.push(user_rc);
        }
        log::debug!("rc candidates in order: {candidates:?}");

        // Dedupe while preserving order. Duplicates are normal, e.g. when
        // the binary sits inside the workspace.
        let mut seen = BTreeSet::new();
        for candidate in candidates {
            if candidate.is_empty() || !seen.insert(candidate.clone()) {
                continue;
            }
            rc_resolver::parse_rc_file(
                workspace,
                &candidate,
                &mut self.rcfiles,
                &mut self.rcoptions,
            )?;
        }

        self.parse_startup_options()?;

        let command_index = self.startup_args_end + 1;
        let Some(command) = self.args.get(command_index) else {
            // Startup options alone are a valid invocation; there is
            // nothing to assemble for the engine.
            self.command = String::new();
            return Ok(());
        };
        self.command = command.clone();

        self.command_arguments = arg_assembler::assemble(
            &self.rcfiles,
            &self.rcoptions,
            self.validator.batch_mode(),
            cwd,
            env,
            terminal,
        );
        self.command_arguments
            .extend(self.args.iter().skip(command_index + 1).cloned());

        log::debug!(
            "command '{}': {} rc file(s), {} argument(s) for the engine",
            self.command,
            self.rcfiles.len(),
            self.command_arguments.len()
        );
        Ok(())
    }

    /// Feeds startup tokens to the validator in precedence order: rc file
    /// options first, command-line options second, so the command line
    /// wins whenever both set the same option.
    fn parse_startup_options(&mut self) -> ClientResult<()> {
        // Rc-sourced startup options form one flat sequence; a value may
        // therefore sit in a different file than its flag.
        if let Some(startup_options) = self.rcoptions.get("startup") {
            let mut i = 0;
            while let Some(option) = startup_options.get(i) {
                let rcfile = self
                    .rcfiles
                    .get(option.rcfile_index)
                    .map(|rcfile| rcfile.filename.as_str())
                    .unwrap_or_default();
                match startup_options.get(i + 1) {
                    Some(next_option) => {
                        let consumed_next = self.validator.process_arg(
                            &option.option,
                            Some(next_option.option.as_str()),
                            rcfile,
                        )?;
                        i += 1;
                        if consumed_next {
                            i += 1;
                        }
                    }
                    None => {
                        // A trailing token that does not look like a flag
                        // is a leftover value; drop it without complaint.
                        if commons::is_arg(&option.option) {
                            self.validator.process_arg(&option.option, None, rcfile)?;
                        }
                        i += 1;
                    }
                }
            }
        }

        // Command-line startup options end at the first token that is not
        // flag-shaped; that token is the command.
        let mut i = 1;
        loop {
            let Some(arg) = self.args.get(i) else { break };
            if !commons::is_arg(arg) {
                break;
            }
            match self.args.get(i + 1) {
                Some(next_arg) => {
                    let consumed_next =
                        self.validator
                            .process_arg(arg, Some(next_arg.as_str()), "")?;
                    i += 1;
                    if consumed_next {
                        i += 1;
                    }
                }
                None => {
                    self.validator.process_arg(arg, None, "")?;
                    i += 1;
                    break;
                }
            }
        }
        self.startup_args_end = i - 1;

        Ok(())
    }

    // --- ACCESSORS ---

    /// The command word, or the empty string when none was given.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments for the engine: the assembled internal block followed by
    /// the user's residual arguments, verbatim.
    pub fn command_arguments(&self) -> &[String] {
        &self.command_arguments
    }

    /// Every rc file read this invocation, in discovery order.
    pub fn rc_files(&self) -> &[RcFile] {
        &self.rcfiles
    }
}
