//! Configuration loading and management
//!
//! This module provides utilities for loading application configuration
//! from environment variables and files, and for resolving the default
//! data directory.

pub mod loader;
pub mod paths;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, load_or_default, probe_config_paths};
pub use paths::{default_data_dir, user_home_dir};
