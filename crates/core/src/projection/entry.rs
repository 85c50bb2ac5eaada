//! Per-record presentation state

use std::sync::Arc;

use baralga_domain::{ActivityId, ActivityRecord, Band};

/// One visible row of the projection
///
/// Holds a read-only snapshot of its record and the band it was given when
/// it entered the view. The row's place in the view is fixed by the snapshot
/// it was admitted with and its admission sequence number; later refreshes
/// do not move it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionEntry {
    record: Arc<ActivityRecord>,
    placed: Arc<ActivityRecord>,
    sequence: u64,
    band: Band,
}

impl ProjectionEntry {
    pub(crate) fn new(record: Arc<ActivityRecord>, band: Band, sequence: u64) -> Self {
        Self { placed: Arc::clone(&record), record, sequence, band }
    }

    pub fn record(&self) -> &Arc<ActivityRecord> {
        &self.record
    }

    pub fn id(&self) -> ActivityId {
        self.record.id
    }

    pub const fn band(&self) -> Band {
        self.band
    }

    /// Snapshot the row was ordered by when it entered the view
    pub(crate) fn placed(&self) -> &ActivityRecord {
        &self.placed
    }

    /// Admission order, used to locate rows in an unfiltered view
    pub(crate) const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Swap in a newer snapshot; band and position are kept
    pub(crate) fn refresh(&mut self, record: Arc<ActivityRecord>) {
        self.record = record;
    }
}
