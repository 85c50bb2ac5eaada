//! Change notifications published by the activity model
//!
//! Each event carries a kind and its payload. Decoding an event whose kind is
//! not known to this version yields [`ActivityEvent::Unknown`], which
//! consumers ignore.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::activity::{ActivityId, ActivityRecord};
use super::filter::Filter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ActivityEvent {
    /// A record was appended to the source collection
    ActivityAdded(Arc<ActivityRecord>),
    /// A record was edited in place; carries the new snapshot
    ActivityChanged(Arc<ActivityRecord>),
    ActivityRemoved(Arc<ActivityRecord>),
    /// The active filter was replaced (`None` clears it)
    FilterChanged(Option<Filter>),
    #[serde(other)]
    Unknown,
}

impl ActivityEvent {
    /// Stable name of the event kind, used in logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ActivityAdded(_) => "activity_added",
            Self::ActivityChanged(_) => "activity_changed",
            Self::ActivityRemoved(_) => "activity_removed",
            Self::FilterChanged(_) => "filter_changed",
            Self::Unknown => "unknown",
        }
    }

    /// Record payload, if this is a record event
    pub fn record(&self) -> Option<&Arc<ActivityRecord>> {
        match self {
            Self::ActivityAdded(record)
            | Self::ActivityChanged(record)
            | Self::ActivityRemoved(record) => Some(record),
            Self::FilterChanged(_) | Self::Unknown => None,
        }
    }

    pub fn activity_id(&self) -> Option<ActivityId> {
        self.record().map(|record| record.id)
    }
}
