//! Configuration types and loading for the statrun system.
//!
//! The main entry point is [`StatrunConfig`], which represents the contents of
//! `statrun.yaml`. Configuration is loaded with [`load_config`], which layers
//! the file and `STATRUN_*` environment variables over the defaults, and saved
//! with [`save_config`].

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use statrun_core::ResolutionPolicy;
use thiserror::Error;

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "STATRUN_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An explicitly named configuration file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The layered configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),

    /// The configuration could not be rendered as YAML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The configuration file could not be written.
    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `config init` would overwrite an existing file.
    #[error("config file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Catalog construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// What to do with operations whose schema cannot be resolved.
    #[serde(default)]
    pub policy: ResolutionPolicy,
}

/// Result rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Emit JSON instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    /// Decimal places for floating-point results. `None` prints the shortest
    /// exact representation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
}

/// Interactive loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Words that end the interactive loop at the selection prompt.
    #[serde(default = "default_exit_words", rename = "exit-words")]
    pub exit_words: Vec<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            exit_words: default_exit_words(),
        }
    }
}

fn default_exit_words() -> Vec<String> {
    ["quit", "exit", "q"].map(String::from).to_vec()
}

/// The complete statrun configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatrunConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub prompt: PromptConfig,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the layered figment: defaults, then the YAML file at `path` (if
/// any), then `STATRUN_*` environment variables with `__` separating
/// sections (`STATRUN_OUTPUT__PRECISION=4`).
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if `path` does not exist and
/// [`ConfigError::Read`] if it cannot be read.
pub fn figment(path: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(StatrunConfig::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty file is valid and contributes nothing.
        if !content.trim().is_empty() {
            figment = figment.merge(Yaml::string(&content));
        }
    }

    // STATRUN_CONFIG names the file itself, not a setting.
    Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&["CONFIG"])))
}

/// Load the effective configuration.
///
/// # Errors
///
/// Returns the errors of [`figment`], or [`ConfigError::Invalid`] if a layer
/// holds a value of the wrong shape.
pub fn load_config(path: Option<&Path>) -> Result<StatrunConfig> {
    Ok(figment(path)?.extract()?)
}

/// Render a configuration as YAML.
///
/// # Errors
///
/// Returns [`ConfigError::Serialize`] if serialization fails.
pub fn to_yaml(config: &StatrunConfig) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Save configuration to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Write`] on I/O failure or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &StatrunConfig) -> Result<()> {
    let yaml = to_yaml(config)?;
    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, yaml).map_err(write_error)
}

/// Write a default configuration to `path`.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] if `path` exists and `force` is
/// not set, or the errors of [`save_config`].
pub fn init_config(path: &Path, force: bool) -> Result<StatrunConfig> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let config = StatrunConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
