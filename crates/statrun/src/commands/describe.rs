//! `statrun describe` -- the parameters of one operation.

use anyhow::Result;
use statrun_core::InvokeError;
use statrun_core::schema::SchemaForm;
use statrun_ui::styles::{render_muted, render_signature};

use crate::cli::DescribeArgs;
use crate::context::RuntimeContext;
use crate::output::{OperationView, output_json, output_table};

/// Execute the `statrun describe` command.
pub fn run(ctx: &RuntimeContext, args: &DescribeArgs) -> Result<()> {
    let catalog = ctx.catalog()?;
    let operation = catalog
        .get(&args.operation)
        .ok_or_else(|| InvokeError::UnknownOperation(args.operation.clone()))?;
    let schema = operation.schema();

    if ctx.json {
        output_json(&OperationView::from_operation(operation));
        return Ok(());
    }

    println!("{}", render_signature(operation));
    if !ctx.quiet {
        let form = match schema.form() {
            SchemaForm::Positional => "positional: values bind in order, all required",
            SchemaForm::Structured => "structured: values bind by name, optional ones may be left blank",
        };
        println!("{}", render_muted(form));
    }
    println!();

    let rows: Vec<Vec<String>> = schema
        .params()
        .iter()
        .map(|spec| {
            vec![
                spec.name.clone(),
                spec.kind.to_string(),
                if spec.optional { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    output_table(&["NAME", "TYPE", "OPTIONAL"], &rows);

    Ok(())
}
