//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use baralga_domain::BaralgaError;
use serde_json::error::Category as JsonCategory;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BaralgaError);

impl From<InfraError> for BaralgaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BaralgaError> for InfraError {
    fn from(value: BaralgaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBaralgaError {
    fn into_baralga(self) -> BaralgaError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → BaralgaError */
/* -------------------------------------------------------------------------- */

impl IntoBaralgaError for IoError {
    fn into_baralga(self) -> BaralgaError {
        match self.kind() {
            ErrorKind::NotFound => BaralgaError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => BaralgaError::Io(format!("permission denied: {self}")),
            ErrorKind::InvalidData => BaralgaError::Io(format!("invalid file contents: {self}")),
            _ => BaralgaError::Io(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_baralga())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → BaralgaError */
/* -------------------------------------------------------------------------- */

impl IntoBaralgaError for TomlError {
    fn into_baralga(self) -> BaralgaError {
        BaralgaError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_baralga())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → BaralgaError */
/* -------------------------------------------------------------------------- */

impl IntoBaralgaError for JsonError {
    fn into_baralga(self) -> BaralgaError {
        match self.classify() {
            JsonCategory::Io => BaralgaError::Io(format!("failed to read JSON: {self}")),
            JsonCategory::Syntax | JsonCategory::Data | JsonCategory::Eof => {
                BaralgaError::Config(format!("Invalid JSON format: {self}"))
            }
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_baralga())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
