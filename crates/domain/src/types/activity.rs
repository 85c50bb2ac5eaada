//! Tracked activity records
//!
//! An [`ActivityRecord`] is one unit of tracked work: a project, a time span
//! and a free-text description. Records are identified by [`ActivityId`],
//! which never changes when the description or times are edited, so it is
//! safe to use as a map key while the record itself is replaced.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BaralgaError, Result};

/// Stable identifier of an activity record (UUIDv7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(Uuid);

impl ActivityId {
    /// Allocate a fresh, time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to the project an activity was booked on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: i64,
    pub title: String,
}

impl ProjectRef {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self { id, title: title.into() }
    }
}

/// One tracked unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub project: ProjectRef,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl ActivityRecord {
    /// Create a record with a fresh id and an empty description
    ///
    /// # Errors
    /// Returns `BaralgaError::InvalidInput` if `end_time` is before
    /// `start_time`.
    pub fn new(
        project: ProjectRef,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self> {
        if end_time < start_time {
            return Err(BaralgaError::InvalidInput(format!(
                "activity ends ({end_time}) before it starts ({start_time})"
            )));
        }

        Ok(Self {
            id: ActivityId::new(),
            project,
            start_time,
            end_time,
            description: String::new(),
        })
    }

    /// Replace the generated id, e.g. when loading persisted records
    #[must_use]
    pub fn with_id(mut self, id: ActivityId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Calendar day the activity started on
    pub fn day(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Month (1-12) the activity started in
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    pub fn year(&self) -> i32 {
        self.start_time.year()
    }

    /// Tracked time; never negative
    pub fn duration(&self) -> Duration {
        (self.end_time - self.start_time).max(Duration::zero())
    }

    /// Tracked time in fractional hours
    pub fn hours(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }
}
