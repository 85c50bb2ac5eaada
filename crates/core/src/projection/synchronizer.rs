//! Filtered projection synchronizer
//!
//! Keeps an ordered, filtered view of activity records consistent with model
//! events. Record events are applied incrementally; only a filter change
//! rebuilds the view from the full source list.
//!
//! # Invariants
//! - The id set of `entries` equals the id set of `visible`, which equals the
//!   records of the source admitted by the active filter.
//! - `visible` follows the filter's order, or source order without a filter.
//! - Each row is ordered by the snapshot it was admitted with. A refresh
//!   swaps the displayed snapshot but never the ordering key, so `visible`
//!   stays sorted by the keys that insertion and lookup search on.
//!
//! # Banding
//! A row's band is the parity of its zero-based index at the moment it was
//! inserted. Rows are not re-banded when earlier rows come or go; only a
//! rebuild assigns fresh bands.
//!
//! # Membership on change
//! `ActivityChanged` refreshes a visible row in place. It does not re-check
//! the filter, so a record edited out of the filter's criteria stays visible
//! until the next filter change.

use std::cmp::Ordering;
use std::sync::Arc;

use ahash::AHashMap as HashMap;
use baralga_domain::{ActivityEvent, ActivityId, ActivityRecord, Band, Filter};
use tracing::{debug, trace};

use super::entry::ProjectionEntry;
use super::ports::ActivitySource;

/// What a single event did to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    Inserted { index: usize, id: ActivityId, band: Band },
    Refreshed { index: usize, id: ActivityId },
    Removed { index: usize, id: ActivityId },
    Rebuilt { len: usize },
    Unchanged,
}

/// Derived, filtered, ordered view over an activity source
#[derive(Debug, Clone)]
pub struct ProjectionSynchronizer {
    filter: Option<Filter>,
    visible: Vec<ActivityId>,
    entries: HashMap<ActivityId, ProjectionEntry>,
    next_sequence: u64,
}

impl ProjectionSynchronizer {
    /// Build the view from scratch
    ///
    /// `None` means no filtering: every record, in source order.
    pub fn initialize<S>(source: &S, filter: Option<Filter>) -> Self
    where
        S: ActivitySource + ?Sized,
    {
        let mut projection =
            Self { filter, visible: Vec::new(), entries: HashMap::new(), next_sequence: 0 };
        projection.rebuild(source.activities());
        projection
    }

    /// Apply one model event and report the resulting view change
    pub fn handle<S>(&mut self, source: &S, event: ActivityEvent) -> ViewChange
    where
        S: ActivitySource + ?Sized,
    {
        trace!(kind = event.kind(), "projection.event_received");

        match event {
            ActivityEvent::ActivityAdded(record) => self.on_added(record),
            ActivityEvent::ActivityChanged(record) => self.on_changed(record),
            ActivityEvent::ActivityRemoved(record) => self.on_removed(record.id),
            ActivityEvent::FilterChanged(filter) => {
                self.filter = filter;
                self.reinitialize(source)
            }
            ActivityEvent::Unknown => ViewChange::Unchanged,
        }
    }

    /// Rebuild the view from `source` under the current filter
    pub fn reinitialize<S>(&mut self, source: &S) -> ViewChange
    where
        S: ActivitySource + ?Sized,
    {
        self.rebuild(source.activities());
        debug!(len = self.visible.len(), filter = ?self.filter, "projection.rebuilt");
        ViewChange::Rebuilt { len: self.visible.len() }
    }

    pub const fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn contains(&self, id: ActivityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn entry(&self, id: ActivityId) -> Option<&ProjectionEntry> {
        self.entries.get(&id)
    }

    /// Ids of visible records, in presentation order
    pub fn visible_ids(&self) -> &[ActivityId] {
        &self.visible
    }

    /// Visible entries, in presentation order
    pub fn entries(&self) -> impl Iterator<Item = &ProjectionEntry> + '_ {
        self.visible.iter().filter_map(|id| self.entries.get(id))
    }

    /// Zero-based position of a visible record
    ///
    /// Binary search over the ordering keys; a linear scan is only the
    /// fallback if the keys ever disagree with `visible`.
    pub fn index_of(&self, id: ActivityId) -> Option<usize> {
        let target = self.entries.get(&id)?;
        let index = match &self.filter {
            Some(filter) => self.visible.partition_point(|other| {
                self.entries.get(other).map_or(true, |entry| {
                    filter.compare(entry.placed(), target.placed()) == Ordering::Less
                })
            }),
            None => self.visible.partition_point(|other| {
                self.entries.get(other).map_or(true, |entry| entry.sequence() < target.sequence())
            }),
        };

        if self.visible.get(index) == Some(&id) {
            return Some(index);
        }
        debug!(activity = %id, "projection.index_search_missed");
        self.visible.iter().position(|visible| *visible == id)
    }

    fn rebuild(&mut self, source: &[Arc<ActivityRecord>]) {
        let admitted = match &self.filter {
            Some(filter) => filter.apply(source),
            None => source.to_vec(),
        };

        self.visible.clear();
        self.entries.clear();
        self.next_sequence = 0;
        self.visible.reserve(admitted.len());

        for record in admitted {
            let id = record.id;
            if self.entries.contains_key(&id) {
                continue;
            }
            let band = Band::for_position(self.visible.len());
            let sequence = self.take_sequence();
            self.entries.insert(id, ProjectionEntry::new(record, band, sequence));
            self.visible.push(id);
        }
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn admits(&self, record: &ActivityRecord) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter.admits(record))
    }

    /// Index at which `record` enters the view: after every entry that does
    /// not sort after it, or at the end without a filter
    fn insertion_index(&self, record: &ActivityRecord) -> usize {
        let Some(filter) = &self.filter else {
            return self.visible.len();
        };

        self.visible.partition_point(|id| {
            self.entries
                .get(id)
                .map_or(true, |entry| filter.compare(entry.placed(), record) != Ordering::Greater)
        })
    }

    fn on_added(&mut self, record: Arc<ActivityRecord>) -> ViewChange {
        if !self.admits(&record) {
            trace!(activity = %record.id, "projection.added_outside_filter");
            return ViewChange::Unchanged;
        }
        if self.entries.contains_key(&record.id) {
            return self.on_changed(record);
        }

        let id = record.id;
        let index = self.insertion_index(&record);
        let band = Band::for_position(index);
        let sequence = self.take_sequence();

        self.visible.insert(index, id);
        self.entries.insert(id, ProjectionEntry::new(record, band, sequence));

        debug!(activity = %id, index, band = %band, "projection.entry_inserted");
        ViewChange::Inserted { index, id, band }
    }

    fn on_changed(&mut self, record: Arc<ActivityRecord>) -> ViewChange {
        let id = record.id;
        let Some(index) = self.index_of(id) else {
            trace!(activity = %id, "projection.changed_not_visible");
            return ViewChange::Unchanged;
        };

        if let Some(entry) = self.entries.get_mut(&id) {
            entry.refresh(record);
        }

        debug!(activity = %id, index, "projection.entry_refreshed");
        ViewChange::Refreshed { index, id }
    }

    fn on_removed(&mut self, id: ActivityId) -> ViewChange {
        let Some(index) = self.index_of(id) else {
            trace!(activity = %id, "projection.removed_not_visible");
            return ViewChange::Unchanged;
        };

        self.visible.remove(index);
        self.entries.remove(&id);

        debug!(activity = %id, index, "projection.entry_removed");
        ViewChange::Removed { index, id }
    }
}
