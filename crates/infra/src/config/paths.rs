//! Well-known locations

use std::path::PathBuf;

use baralga_domain::constants::{DEFAULT_DIRECTORY_NAME, HOME_ENV_VAR};
use baralga_domain::{BaralgaError, Result};

/// Resolve the Baralga data directory.
///
/// Checks `$BARALGA_HOME` first, then falls back to `~/.ProTrack`.
///
/// # Errors
/// Returns `BaralgaError::Config` if no home directory can be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(override_dir) = std::env::var_os(HOME_ENV_VAR) {
        let path = PathBuf::from(override_dir);
        if !path.as_os_str().is_empty() {
            return Ok(path);
        }
    }
    Ok(user_home_dir()?.join(DEFAULT_DIRECTORY_NAME))
}

/// The current user's home directory.
///
/// # Errors
/// Returns `BaralgaError::Config` if the platform reports no home directory.
pub fn user_home_dir() -> Result<PathBuf> {
    let base_dirs = directories::BaseDirs::new()
        .ok_or_else(|| BaralgaError::Config("could not resolve home directory".to_string()))?;
    Ok(base_dirs.home_dir().to_path_buf())
}
