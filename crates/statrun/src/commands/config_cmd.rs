//! `statrun config` -- show the effective configuration or write a default one.

use std::path::PathBuf;

use anyhow::{Context, Result};
use statrun_config::config::to_yaml;
use statrun_config::{CONFIG_FILE_NAME, init_config};

use crate::cli::{ConfigArgs, ConfigCommands, ConfigInitArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `statrun config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Init(init_args) => init(ctx, init_args),
    }
}

fn show(ctx: &RuntimeContext) -> Result<()> {
    if ctx.json {
        output_json(&ctx.config);
        return Ok(());
    }

    if !ctx.quiet {
        match &ctx.config_path {
            Some(path) => println!("# loaded from {}", path.display()),
            None => println!("# no {CONFIG_FILE_NAME} found; showing defaults"),
        }
    }
    print!("{}", to_yaml(&ctx.config)?);
    Ok(())
}

fn init(ctx: &RuntimeContext, args: &ConfigInitArgs) -> Result<()> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    init_config(&path, args.force)
        .with_context(|| format!("failed to initialize {}", path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({ "path": path }));
    } else if !ctx.quiet {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
