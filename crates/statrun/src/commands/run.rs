//! `statrun run` -- the interactive loop on stdin/stdout.

use std::io;

use anyhow::{Context, Result};
use statrun_core::FormulaRunner;
use tracing::info;

use crate::context::RuntimeContext;

/// Execute the `statrun run` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let catalog = ctx.catalog()?;
    let runner = FormulaRunner::new(&catalog);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = runner
        .run(stdin.lock(), stdout.lock(), &ctx.run_options())
        .context("interactive session failed")?;

    info!(
        invocations = summary.invocations,
        failures = summary.failures,
        "session finished"
    );
    if !ctx.quiet {
        eprintln!(
            "\n{} invocation(s), {} failed",
            summary.invocations, summary.failures
        );
    }
    Ok(())
}
