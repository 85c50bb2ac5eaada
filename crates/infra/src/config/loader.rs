//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! [`load_or_default`] adds a last step: if neither source is available the
//! defaults rooted at [`default_data_dir`](super::paths::default_data_dir)
//! are used.
//!
//! ## Environment Variables
//! - `BARALGA_DATA_DIR`: Directory holding settings, data and lock files
//!   (required)
//! - `BARALGA_SETTINGS_FILE`: Settings file name inside the data directory
//! - `BARALGA_LOG_LEVEL`: Log filter directive (default `info`)
//! - `BARALGA_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./baralga.json` or `./baralga.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use baralga_domain::{BaralgaError, Config, LoggingConfig, Result, StorageConfig};

use super::paths::default_data_dir;
use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `BaralgaError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration, falling back to defaults when no source exists
///
/// A config file that exists but cannot be parsed is still an error.
///
/// # Errors
/// Returns `BaralgaError::Config` if a config file is malformed or no home
/// directory can be resolved for the defaults.
pub fn load_or_default() -> Result<Config> {
    if let Ok(config) = load_from_env() {
        return Ok(config);
    }
    if let Some(path) = probe_config_paths() {
        return load_from_file(Some(path));
    }

    let data_dir = default_data_dir()?;
    tracing::info!(data_dir = %data_dir.display(), "No configuration found, using defaults");
    Ok(Config { storage: StorageConfig::in_dir(data_dir), logging: LoggingConfig::default() })
}

/// Load configuration from environment variables
///
/// `BARALGA_DATA_DIR` must be present; everything else has a default.
///
/// # Errors
/// Returns `BaralgaError::Config` if `BARALGA_DATA_DIR` is missing or empty.
pub fn load_from_env() -> Result<Config> {
    let data_dir = env_var("BARALGA_DATA_DIR")?;
    if data_dir.trim().is_empty() {
        return Err(BaralgaError::Config("BARALGA_DATA_DIR is empty".to_string()));
    }

    let mut storage = StorageConfig::in_dir(PathBuf::from(data_dir));
    if let Ok(settings_file) = std::env::var("BARALGA_SETTINGS_FILE") {
        storage.settings_file = settings_file;
    }

    let mut logging = LoggingConfig::default();
    if let Ok(level) = std::env::var("BARALGA_LOG_LEVEL") {
        logging.level = level;
    }
    logging.json = env_bool("BARALGA_LOG_JSON", false);

    Ok(Config { storage, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BaralgaError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BaralgaError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BaralgaError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BaralgaError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents).map_err(InfraError::from)?),
        "json" => Ok(serde_json::from_str(contents).map_err(InfraError::from)?),
        _ => Err(BaralgaError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
        candidates.extend([cwd.join("../config.json"), cwd.join("../config.toml")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("baralga.json"),
        dir.join("baralga.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        BaralgaError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
