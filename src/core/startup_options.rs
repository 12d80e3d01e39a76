// src/core/startup_options.rs

//! Startup-option validation.
//!
//! The merge engine does not know which startup flags exist; it only feeds
//! candidate tokens (with their potential space-separated values) to a
//! validator and honors its verdict. [`StartupOptions`] is the stock
//! validator covering the launcher's own surface.

use crate::core::commons::{nullary_option, unary_option};
use crate::models::{ClientError, ClientResult};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Verdict source for startup tokens, applied in precedence order: rc files
/// first, command line last, so later applications win.
pub trait StartupOptionValidator: std::fmt::Debug {
    /// Applies `arg`, with `next_arg` available for the `--flag value`
    /// form. Returns `true` when the value was consumed from `next_arg`.
    ///
    /// `rcfile` is the provenance label of the token; the empty string
    /// stands for the command line.
    fn process_arg(&mut self, arg: &str, next_arg: Option<&str>, rcfile: &str)
    -> ClientResult<bool>;

    /// Whether batch mode ended up requested; the assembler consults this
    /// after both phases have run.
    fn batch_mode(&self) -> bool;
}

/// The launcher's own startup options.
///
/// Values are stored as given; resolving relative paths is left to the
/// consumer, which knows the relevant working directory.
#[derive(Debug)]
pub struct StartupOptions {
    pub output_base: Option<PathBuf>,
    pub install_base: Option<PathBuf>,
    pub output_user_root: Option<PathBuf>,
    pub host_jvm_debug: bool,
    pub host_jvm_args: Vec<String>,
    pub batch: bool,
    pub watchfs: bool,
    pub max_idle_secs: i32,
    pub io_nice_level: i32,
    /// Where each option's winning value came from, keyed by option name.
    /// The empty string marks the command line.
    pub option_sources: BTreeMap<String, String>,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            output_base: None,
            install_base: None,
            output_user_root: None,
            host_jvm_debug: false,
            host_jvm_args: Vec::new(),
            batch: false,
            watchfs: false,
            max_idle_secs: 3 * 3600,
            io_nice_level: -1,
            option_sources: BTreeMap::new(),
        }
    }
}

impl StartupOptions {
    fn record_source(&mut self, name: &str, rcfile: &str) {
        self.option_sources
            .insert(name.to_string(), rcfile.to_string());
    }
}

impl StartupOptionValidator for StartupOptions {
    fn process_arg(
        &mut self,
        arg: &str,
        next_arg: Option<&str>,
        rcfile: &str,
    ) -> ClientResult<bool> {
        let mut from_next = false;

        if let Some((value, space)) = unary_option(arg, next_arg, "--output_base") {
            self.output_base = Some(PathBuf::from(value));
            self.record_source("output_base", rcfile);
            from_next = space;
        } else if let Some((value, space)) = unary_option(arg, next_arg, "--install_base") {
            self.install_base = Some(PathBuf::from(value));
            self.record_source("install_base", rcfile);
            from_next = space;
        } else if let Some((value, space)) = unary_option(arg, next_arg, "--output_user_root") {
            self.output_user_root = Some(PathBuf::from(value));
            self.record_source("output_user_root", rcfile);
            from_next = space;
        } else if nullary_option(arg, "--host_jvm_debug") {
            self.host_jvm_debug = true;
            self.record_source("host_jvm_debug", rcfile);
        } else if let Some((value, space)) = unary_option(arg, next_arg, "--host_jvm_args") {
            self.host_jvm_args.push(value.to_string());
            self.record_source("host_jvm_args", rcfile);
            from_next = space;
        } else if nullary_option(arg, "--batch") {
            self.batch = true;
            self.record_source("batch", rcfile);
        } else if nullary_option(arg, "--nobatch") {
            self.batch = false;
            self.record_source("batch", rcfile);
        } else if nullary_option(arg, "--watchfs") {
            self.watchfs = true;
            self.record_source("watchfs", rcfile);
        } else if nullary_option(arg, "--nowatchfs") {
            self.watchfs = false;
            self.record_source("watchfs", rcfile);
        } else if let Some((value, space)) = unary_option(arg, next_arg, "--max_idle_secs") {
            self.max_idle_secs =
                value
                    .parse::<i32>()
                    .map_err(|_| ClientError::InvalidStartupValue {
                        flag: "--max_idle_secs".to_string(),
                        value: value.to_string(),
                    })?;
            self.record_source("max_idle_secs", rcfile);
            from_next = space;
        } else if let Some((value, space)) = unary_option(arg, next_arg, "--io_nice_level") {
            // Negative levels are as good as the unset default of -1; the
            // scheduler only caps the upper end.
            let level = value
                .parse::<i32>()
                .ok()
                .filter(|level| *level <= 7)
                .ok_or_else(|| ClientError::InvalidNiceLevel {
                    value: value.to_string(),
                })?;
            self.io_nice_level = level;
            self.record_source("io_nice_level", rcfile);
            from_next = space;
        } else if let Some((_, space)) = unary_option(arg, next_arg, "--blazerc") {
            // Consumed by the rc discovery pre-scan; accepted here so the
            // token does not read as unknown during the merge phases.
            from_next = space;
        } else if let Some((_, space)) = unary_option(arg, next_arg, "--bazelrc") {
            from_next = space;
        } else if nullary_option(arg, "--nomaster_blazerc")
            || nullary_option(arg, "--nomaster_bazelrc")
        {
            // Also handled by the pre-scan.
        } else {
            return Err(ClientError::UnknownStartupOption {
                arg: arg.to_string(),
            });
        }

        Ok(from_next)
    }

    fn batch_mode(&self) -> bool {
        self.batch
    }
}
