//! Clap CLI definitions for the `statrun` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// statrun -- a catalog of statistics formulas.
///
/// Every formula declares its parameters; raw text arguments are parsed
/// against them before the formula runs.
#[derive(Parser, Debug)]
#[command(
    name = "statrun",
    about = "Run statistics formulas from the command line",
    long_about = "A catalog of statistics formulas. Each formula declares typed parameters; statrun parses raw text arguments against them, invokes the formula and reports the result or a structured error.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: nearest statrun.yaml).
    #[arg(long, global = true, env = "STATRUN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail if any formula's parameters cannot be resolved.
    #[arg(long, global = true)]
    pub fail_fast: bool,

    /// Decimal places for floating-point results.
    #[arg(long, global = true, value_name = "N")]
    pub precision: Option<usize>,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available formulas with their signatures.
    #[command(alias = "ls")]
    List,

    /// Show the parameters of a formula.
    #[command(alias = "show")]
    Describe(DescribeArgs),

    /// Invoke a formula with raw text arguments.
    #[command(alias = "call")]
    Invoke(InvokeArgs),

    /// Interactive loop: pick a formula, enter its inputs, see the result.
    Run,

    /// Show or initialize configuration.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Arguments for `statrun describe`.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Formula name.
    pub operation: String,
}

/// Arguments for `statrun invoke`.
#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Formula name.
    pub operation: String,

    /// Values in parameter order. Extra values fill a trailing list parameter.
    #[arg(allow_negative_numbers = true, value_name = "VALUE")]
    pub values: Vec<String>,

    /// A named value; may be repeated.
    #[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_named_arg)]
    pub named: Vec<(String, String)>,
}

fn parse_named_arg(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Arguments for `statrun config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Write a default statrun.yaml.
    Init(ConfigInitArgs),
}

/// Arguments for `statrun config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (default: ./statrun.yaml).
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `statrun completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
