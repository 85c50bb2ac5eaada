//! File-backed settings store

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use baralga_domain::constants::{
    LAST_DESCRIPTION, LAST_EXCEL_EXPORT_LOCATION, SELECTED_MONTH, SELECTED_PROJECT_ID,
    SELECTED_YEAR,
};
use baralga_domain::{Filter, Result};

use super::properties;
use crate::config::user_home_dir;
use crate::errors::InfraError;

const FILE_HEADER: &str = "Baralga user settings";

/// Key/value settings that save themselves on every change.
#[derive(Debug, Clone)]
pub struct Settings {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Settings {
    /// Open the settings file at `path`. A missing file yields an empty store.
    ///
    /// # Errors
    /// Returns `BaralgaError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => properties::parse(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings.file_missing");
                BTreeMap::new()
            }
            Err(err) => return Err(InfraError::from(err).into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "settings.loaded");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write all entries to disk through a temporary file and rename.
    ///
    /// # Errors
    /// Returns `BaralgaError::Io` if the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.write_entries(&self.entries)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(InfraError::from)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, properties::render(FILE_HEADER, entries))
            .map_err(InfraError::from)?;
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(InfraError::from(err).into());
        }

        tracing::debug!(path = %self.path.display(), keys = entries.len(), "settings.saved");
        Ok(())
    }

    /// Save `entries` and adopt them only once they are on disk.
    fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<()> {
        if let Err(err) = self.write_entries(&entries) {
            tracing::warn!(path = %self.path.display(), error = %err, "settings.save_failed");
            return Err(err);
        }
        self.entries = entries;
        Ok(())
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_string(key).unwrap_or(default)
    }

    /// Integer value for `key`; unparsable values are logged and ignored.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        let raw = self.get_string(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, value = raw, error = %err, "settings.invalid_integer");
                None
            }
        }
    }

    /// Store `value` under `key` and save.
    ///
    /// # Errors
    /// Returns `BaralgaError::Io` if saving fails; the store is left unchanged.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value.into());
        self.commit(entries)
    }

    pub fn set_i64(&mut self, key: &str, value: i64) -> Result<()> {
        self.set(key, value.to_string())
    }

    /// Remove `key` and save if it was present.
    ///
    /// # Errors
    /// Returns `BaralgaError::Io` if saving fails; the store is left unchanged.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.commit(entries)
    }

    /// Directory of the last spreadsheet export, defaulting to the user's home.
    pub fn last_excel_export_location(&self) -> String {
        if let Some(location) = self.get_string(LAST_EXCEL_EXPORT_LOCATION) {
            return location.to_string();
        }
        user_home_dir().map(|home| home.display().to_string()).unwrap_or_default()
    }

    pub fn set_last_excel_export_location(&mut self, location: impl Into<String>) -> Result<()> {
        self.set(LAST_EXCEL_EXPORT_LOCATION, location)
    }

    pub fn last_description(&self) -> &str {
        self.get_string_or(LAST_DESCRIPTION, "")
    }

    pub fn set_last_description(&mut self, description: impl Into<String>) -> Result<()> {
        self.set(LAST_DESCRIPTION, description)
    }

    pub fn filter_selected_month(&self) -> Option<&str> {
        self.get_string(SELECTED_MONTH)
    }

    pub fn set_filter_selected_month(&mut self, month: impl Into<String>) -> Result<()> {
        self.set(SELECTED_MONTH, month)
    }

    pub fn filter_selected_year(&self) -> Option<&str> {
        self.get_string(SELECTED_YEAR)
    }

    pub fn set_filter_selected_year(&mut self, year: impl Into<String>) -> Result<()> {
        self.set(SELECTED_YEAR, year)
    }

    pub fn filter_selected_project_id(&self) -> Option<i64> {
        self.get_i64(SELECTED_PROJECT_ID)
    }

    pub fn set_filter_selected_project_id(&mut self, project_id: i64) -> Result<()> {
        self.set_i64(SELECTED_PROJECT_ID, project_id)
    }

    /// The persisted filter, or `None` when no criterion is stored.
    ///
    /// Values that do not parse are skipped with a warning.
    pub fn filter(&self) -> Option<Filter> {
        let mut filter = Filter::new();

        if let Some(month) = self.filter_selected_month() {
            match month.trim().parse::<u32>() {
                Ok(month) if (1..=12).contains(&month) => filter = filter.with_month(month),
                _ => tracing::warn!(value = month, "settings.invalid_filter_month"),
            }
        }
        if let Some(year) = self.filter_selected_year() {
            match year.trim().parse::<i32>() {
                Ok(year) => filter = filter.with_year(year),
                Err(_) => tracing::warn!(value = year, "settings.invalid_filter_year"),
            }
        }
        if let Some(project_id) = self.filter_selected_project_id() {
            filter = filter.with_project(project_id);
        }

        (!filter.is_empty()).then_some(filter)
    }

    /// Replace the persisted filter criteria with one save.
    ///
    /// # Errors
    /// Returns `BaralgaError::Io` if saving fails; the store is left unchanged.
    pub fn store_filter(&mut self, filter: Option<&Filter>) -> Result<()> {
        let mut entries = self.entries.clone();
        for key in [SELECTED_MONTH, SELECTED_YEAR, SELECTED_PROJECT_ID] {
            entries.remove(key);
        }

        if let Some(filter) = filter {
            if let Some(month) = filter.month() {
                entries.insert(SELECTED_MONTH.to_string(), month.to_string());
            }
            if let Some(year) = filter.year() {
                entries.insert(SELECTED_YEAR.to_string(), year.to_string());
            }
            if let Some(project_id) = filter.project_id() {
                entries.insert(SELECTED_PROJECT_ID.to_string(), project_id.to_string());
            }
        }

        self.commit(entries)
    }
}
