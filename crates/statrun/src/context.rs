//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: the effective
//! configuration (file and environment layered under the global flags) and
//! the output switches.

use std::path::PathBuf;

use anyhow::{Context, Result};
use statrun_config::{StatrunConfig, config_file, load_config};
use statrun_core::runner::RunOptions;
use statrun_core::{Catalog, ResolutionPolicy};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Effective configuration, with CLI overrides applied.
    pub config: StatrunConfig,

    /// The file the configuration was loaded from, if any.
    pub config_path: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// The config file is `--config` (or `STATRUN_CONFIG`) when given,
    /// otherwise the nearest `statrun.yaml` above the working directory.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read the working directory")?;
        let config_path = config_file::resolve_config_file(global.config.as_deref(), &cwd);
        debug!(path = ?config_path, "loading configuration");

        let mut config = load_config(config_path.as_deref()).context("failed to load configuration")?;
        if global.fail_fast {
            config.catalog.policy = ResolutionPolicy::FailFast;
        }
        if global.json {
            config.output.json = true;
        }
        if global.precision.is_some() {
            config.output.precision = global.precision;
        }

        Ok(Self {
            json: config.output.json,
            config,
            config_path,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// Decimal places for float results.
    pub fn precision(&self) -> Option<usize> {
        self.config.output.precision
    }

    /// Build the formula catalog under the configured resolution policy.
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::build(&statrun_formulas::stats(), self.config.catalog.policy)
            .context("failed to build the formula catalog")
    }

    /// Options for the interactive loop.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            exit_words: self.config.prompt.exit_words.clone(),
            precision: self.precision(),
        }
    }
}
