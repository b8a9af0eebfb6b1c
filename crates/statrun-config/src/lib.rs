//! Configuration management for the statrun system.
//!
//! This crate handles discovering `statrun.yaml`, layering it and
//! `STATRUN_*` environment overrides over the defaults, and saving it back.

pub mod config;
pub mod config_file;

pub use config::{ConfigError, StatrunConfig, init_config, load_config, save_config};
pub use config_file::{CONFIG_FILE_NAME, find_config_file};
