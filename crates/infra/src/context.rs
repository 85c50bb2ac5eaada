//! Application context - wires configuration, settings and the activity model

use std::fs;
use std::sync::Arc;

use baralga_core::{ActivityModel, ProjectionRenderer, ProjectionService};
use baralga_domain::{ActivityId, ActivityRecord, BaralgaError, Config, Filter, Result};

use crate::instance_lock::InstanceLock;
use crate::settings::Settings;

/// Application context - holds the model and the services around it
pub struct AppContext {
    config: Config,
    settings: Settings,
    model: ActivityModel,
    _instance_lock: InstanceLock,
}

impl AppContext {
    /// Open the data directory named by `config`.
    ///
    /// Takes the instance lock, loads settings and restores the persisted
    /// filter onto a fresh model.
    ///
    /// # Errors
    /// Returns `BaralgaError::Lock` if another instance holds the data
    /// directory, or `BaralgaError::Io` if it cannot be created or read.
    pub fn open(config: Config) -> Result<Self> {
        let data_dir = config.storage.data_dir();
        fs::create_dir_all(data_dir).map_err(|err| {
            BaralgaError::Io(format!(
                "Failed to create data directory {}: {}",
                data_dir.display(),
                err
            ))
        })?;

        let instance_lock = InstanceLock::acquire(config.storage.lock_path())?;
        let settings = Settings::open(config.storage.settings_path())?;
        let filter = settings.filter();
        tracing::info!(
            data_dir = %data_dir.display(),
            filter = ?filter,
            "app_context.opened"
        );

        Ok(Self {
            model: ActivityModel::new().with_filter(filter),
            config,
            settings,
            _instance_lock: instance_lock,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn model(&self) -> &ActivityModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ActivityModel {
        &mut self.model
    }

    /// Attach a renderer to the model.
    pub fn attach<R: ProjectionRenderer>(&mut self, renderer: R) -> ProjectionService<R> {
        ProjectionService::attach(&mut self.model, renderer)
    }

    /// Persist `filter` and then apply it to the model.
    ///
    /// # Errors
    /// Returns `BaralgaError::Io` if the settings cannot be saved; the model
    /// keeps its previous filter in that case.
    pub fn set_filter(&mut self, filter: Option<Filter>) -> Result<()> {
        self.settings.store_filter(filter.as_ref())?;
        self.model.set_filter(filter);
        Ok(())
    }

    /// Remember a description for the next activity, then apply it to the record.
    ///
    /// # Errors
    /// Returns `BaralgaError::NotFound` for an unknown id, or
    /// `BaralgaError::Io` if the settings cannot be saved. The record is left
    /// untouched in both cases.
    pub fn update_description(
        &mut self,
        id: ActivityId,
        description: impl Into<String>,
    ) -> Result<Arc<ActivityRecord>> {
        if self.model.get(id).is_none() {
            return Err(BaralgaError::NotFound(format!("activity {id} not found")));
        }

        let description = description.into();
        self.settings.set_last_description(description.clone())?;
        self.model.update_description(id, description)
    }
}
