//! Command handlers, one module per subcommand.

pub mod completion;
pub mod config_cmd;
pub mod describe;
pub mod invoke;
pub mod list;
pub mod run;
pub mod version;
