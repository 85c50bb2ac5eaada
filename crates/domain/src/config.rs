//! Configuration management

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DATA_FILE_NAME, DEFAULT_DIRECTORY_NAME, DEFAULT_LOG_LEVEL, LOCK_FILE_NAME,
    SETTINGS_FILE_NAME,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where Baralga keeps its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    #[serde(default = "default_settings_file")]
    pub settings_file: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_lock_file")]
    pub lock_file: String,
}

impl StorageConfig {
    /// Storage rooted at `data_dir` with the default file names
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            settings_file: default_settings_file(),
            data_file: default_data_file(),
            lock_file: default_lock_file(),
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings_file)
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(&self.lock_file)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::in_dir(PathBuf::from(DEFAULT_DIRECTORY_NAME)),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_settings_file() -> String {
    SETTINGS_FILE_NAME.to_string()
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE_NAME.to_string()
}

fn default_lock_file() -> String {
    LOCK_FILE_NAME.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_paths_join_data_dir() {
        let storage = StorageConfig::in_dir("/var/baralga");

        assert_eq!(storage.settings_path(), PathBuf::from("/var/baralga/baralga.properties"));
        assert_eq!(storage.data_path(), PathBuf::from("/var/baralga/ProTrack.ptd"));
        assert_eq!(storage.lock_path(), PathBuf::from("/var/baralga/lock"));
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "storage": { "data_dir": "/tmp/b" } }"#).unwrap();

        assert_eq!(config.storage.settings_file, SETTINGS_FILE_NAME);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }
}
