//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Data locations
pub const DEFAULT_DIRECTORY_NAME: &str = ".ProTrack";
pub const DEFAULT_DATA_FILE_NAME: &str = "ProTrack.ptd";
pub const SETTINGS_FILE_NAME: &str = "baralga.properties";
pub const LOCK_FILE_NAME: &str = "lock";
pub const HOME_ENV_VAR: &str = "BARALGA_HOME";

// Settings keys
pub const LAST_EXCEL_EXPORT_LOCATION: &str = "export.excel";
pub const LAST_DESCRIPTION: &str = "description";
pub const SELECTED_MONTH: &str = "filter.month";
pub const SELECTED_YEAR: &str = "filter.year";
pub const SELECTED_PROJECT_ID: &str = "filter.projectId";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
