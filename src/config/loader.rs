//! Configuration file loading with precedence handling.
//!
//! Precedence chain: defaults → config file → environment → CLI flags.

use super::{GridConfig, GridOptions};
use crate::model::{GridError, Orientation};
use crate::state::ScrollAlignmentPolicy;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TVGRID_CONFIG";
/// Environment override for the focus scroll strategy.
pub const FOCUS_SCROLL_ENV: &str = "TVGRID_FOCUS_SCROLL";
/// Environment override for the orientation.
pub const ORIENTATION_ENV: &str = "TVGRID_ORIENTATION";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read the config file.
    #[error("failed to read config file at {path}: {source}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`GridConfig`].
    #[error("invalid TOML in {path}: {source}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed but failed validation.
    #[error(transparent)]
    Invalid(#[from] GridError),
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Validated grid options.
    pub grid: GridOptions,
    /// Path to the tracing output file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            grid: GridOptions::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Flags from the command line that override file and environment values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--lanes`
    pub lanes: Option<usize>,
    /// `--strategy`
    pub strategy: Option<ScrollAlignmentPolicy>,
    /// `--orientation`
    pub orientation: Option<Orientation>,
}

/// Resolve the default log file path.
///
/// Returns `~/.local/state/tvgrid/tvgrid.log` on Linux. Falls back to the
/// config directory, then to the current directory.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("tvgrid").join("tvgrid.log"))
        .unwrap_or_else(|| PathBuf::from("tvgrid.log"))
}

/// Resolve the default config file path (`~/.config/tvgrid/config.toml`).
///
/// Returns `None` if the platform has no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tvgrid").join("config.toml"))
}

/// Load a config file.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
/// `ReadError` or `ParseError` if the file exists but is unusable.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<Option<GridConfig>, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let config = toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "loaded config file");
    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`), which must exist
/// 2. `TVGRID_CONFIG` environment variable
/// 3. Default path `~/.config/tvgrid/config.toml`
///
/// # Errors
/// `NotFound` for a missing explicit path; read and parse errors otherwise.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<GridConfig>, ConfigError> {
    if let Some(path) = config_path {
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Apply environment variable overrides.
///
/// Checks `TVGRID_FOCUS_SCROLL` and `TVGRID_ORIENTATION`.
///
/// # Errors
/// `Invalid` when a variable is set to an unknown value.
pub fn apply_env_overrides(mut config: GridConfig) -> Result<GridConfig, ConfigError> {
    if let Ok(value) = std::env::var(FOCUS_SCROLL_ENV) {
        config.focus_scroll_strategy = Some(value.parse()?);
    }
    if let Ok(value) = std::env::var(ORIENTATION_ENV) {
        config.orientation = Some(value.parse()?);
    }
    Ok(config)
}

/// Apply CLI overrides. Only flags the user actually passed are applied.
pub fn apply_cli_overrides(mut config: GridConfig, cli: &CliOverrides) -> GridConfig {
    if let Some(lanes) = cli.lanes {
        config.lanes = Some(lanes);
    }
    if let Some(strategy) = cli.strategy {
        config.focus_scroll_strategy = Some(strategy);
    }
    if let Some(orientation) = cli.orientation {
        config.orientation = Some(orientation);
    }
    config
}

/// Validate a merged config into its resolved form.
///
/// # Errors
/// `Invalid` when any grid option fails validation.
pub fn resolve(config: &GridConfig) -> Result<ResolvedConfig, ConfigError> {
    Ok(ResolvedConfig {
        grid: GridOptions::from_config(config)?,
        log_file_path: config.log_file.clone().unwrap_or_else(default_log_path),
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
