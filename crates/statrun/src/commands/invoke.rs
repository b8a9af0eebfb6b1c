//! `statrun invoke` -- run one formula on raw text arguments.

use anyhow::{Result, bail};
use statrun_core::{FormulaRunner, RawArguments};
use statrun_ui::styles::render_value;

use crate::cli::InvokeArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `statrun invoke` command.
///
/// Invocation failures propagate as [`statrun_core::InvokeError`] so `main`
/// can report their kind.
pub fn run(ctx: &RuntimeContext, args: &InvokeArgs) -> Result<()> {
    let raw = raw_arguments(args)?;
    let catalog = ctx.catalog()?;
    let runner = FormulaRunner::new(&catalog);

    let value = runner.invoke(&args.operation, raw)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "operation": args.operation,
            "result": value,
        }));
    } else {
        println!("{}", render_value(&value, ctx.precision()));
    }
    Ok(())
}

fn raw_arguments(args: &InvokeArgs) -> Result<RawArguments> {
    match (args.values.is_empty(), args.named.is_empty()) {
        (false, false) => bail!("use either positional values or --arg, not both"),
        (true, false) => Ok(RawArguments::named(args.named.iter().cloned())),
        _ => Ok(RawArguments::positional(args.values.iter().cloned())),
    }
}
