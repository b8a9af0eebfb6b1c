//! `statrun list` -- the catalog's operations in declaration order.

use anyhow::Result;
use statrun_ui::styles::{render_category, render_signature, render_warn};

use crate::context::RuntimeContext;
use crate::output::{OperationView, output_json};

/// Execute the `statrun list` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let catalog = ctx.catalog()?;

    if ctx.json {
        let views: Vec<OperationView<'_>> =
            catalog.iter().map(OperationView::from_operation).collect();
        output_json(&views);
        return Ok(());
    }

    if !ctx.quiet {
        println!("{}", render_category("formulas"));
    }
    for operation in catalog.iter() {
        println!("  {}", render_signature(operation));
    }

    if ctx.verbose {
        for dropped in catalog.dropped() {
            eprintln!(
                "{}",
                render_warn(&format!("skipped {}: {}", dropped.operation, dropped.reason))
            );
        }
    }

    Ok(())
}
