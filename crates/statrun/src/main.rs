//! `statrun` -- list, describe and run statistics formulas.
//!
//! Parses CLI arguments with clap, loads the layered configuration into a
//! runtime context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use statrun_core::InvokeError;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, GlobalArgs};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Filter used under `--verbose`.
const VERBOSE_FILTER: &str =
    "statrun=debug,statrun_core=debug,statrun_config=debug,statrun_formulas=debug";

fn main() {
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        std::process::exit(0);
    });

    let cli = Cli::parse();

    init_logging(&cli.global);

    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => {
            report_error(&e, cli.global.json);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::List) => commands::list::run(&ctx),
        Some(Commands::Describe(args)) => commands::describe::run(&ctx, &args),
        Some(Commands::Invoke(args)) => commands::invoke::run(&ctx, &args),
        Some(Commands::Run) => commands::run::run(&ctx),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, &args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, &args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    // `output.json` from the config file applies to errors too.
    if let Err(e) = result {
        report_error(&e, ctx.json);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for results.
fn init_logging(global: &GlobalArgs) {
    let filter = if global.verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if global.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print a failed command to stderr. Invocation failures carry their kind.
fn report_error(err: &anyhow::Error, json: bool) {
    let invoke = err.downcast_ref::<InvokeError>();
    if json {
        let mut err_json = serde_json::json!({
            "error": format!("{:#}", err),
        });
        if let Some(invoke) = invoke {
            err_json["kind"] = invoke.kind().into();
        }
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{}", s);
        }
    } else if let Some(invoke) = invoke {
        eprintln!("{}", statrun_ui::styles::render_error(invoke));
    } else {
        eprintln!("Error: {:#}", err);
    }
}
