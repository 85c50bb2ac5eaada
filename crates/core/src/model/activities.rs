//! Canonical activity list with change publication

use std::sync::Arc;

use baralga_domain::{ActivityEvent, ActivityId, ActivityRecord, BaralgaError, Filter, Result};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::subscription::{Subscription, SubscriptionId};
use crate::projection::ports::ActivitySource;

/// Owner of the activity list and the active filter
///
/// Insertion order is the natural order of the list. Every successful
/// mutation publishes exactly one event, in mutation order.
#[derive(Debug, Default)]
pub struct ActivityModel {
    activities: Vec<Arc<ActivityRecord>>,
    filter: Option<Filter>,
    subscribers: Vec<(SubscriptionId, UnboundedSender<ActivityEvent>)>,
    next_subscription: u64,
}

impl ActivityModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the model with existing records without publishing anything
    ///
    /// # Errors
    /// Returns `BaralgaError::InvalidInput` if two records share an id.
    pub fn with_activities(records: impl IntoIterator<Item = ActivityRecord>) -> Result<Self> {
        let mut model = Self::new();
        for record in records {
            if model.position(record.id).is_some() {
                return Err(BaralgaError::InvalidInput(format!(
                    "duplicate activity id {}",
                    record.id
                )));
            }
            model.activities.push(Arc::new(record));
        }
        Ok(model)
    }

    /// Seed the active filter without publishing anything
    #[must_use]
    pub fn with_filter(mut self, filter: Option<Filter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn activities(&self) -> &[Arc<ActivityRecord>] {
        &self.activities
    }

    pub const fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn get(&self, id: ActivityId) -> Option<&Arc<ActivityRecord>> {
        self.activities.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Register a new consumer of change events
    pub fn subscribe(&mut self) -> Subscription {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;

        let (sender, subscription) = Subscription::channel(id);
        self.subscribers.push((id, sender));
        debug!(subscription = %id, "activity_model.subscribed");
        subscription
    }

    /// Number of subscriptions that have not been dropped or closed
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|(_, sender)| !sender.is_closed()).count()
    }

    /// Append a record
    ///
    /// # Errors
    /// Returns `BaralgaError::InvalidInput` if a record with the same id is
    /// already present.
    pub fn add_activity(&mut self, record: ActivityRecord) -> Result<Arc<ActivityRecord>> {
        if self.position(record.id).is_some() {
            return Err(BaralgaError::InvalidInput(format!(
                "activity {} is already tracked",
                record.id
            )));
        }

        let record = Arc::new(record);
        self.activities.push(Arc::clone(&record));
        info!(activity = %record.id, project = record.project.id, "activity_model.added");
        self.publish(ActivityEvent::ActivityAdded(Arc::clone(&record)));
        Ok(record)
    }

    /// Replace the record carrying the same id, keeping its list position
    ///
    /// # Errors
    /// Returns `BaralgaError::NotFound` if no record has that id.
    pub fn replace_activity(&mut self, record: ActivityRecord) -> Result<Arc<ActivityRecord>> {
        let index = self.require(record.id)?;

        let record = Arc::new(record);
        self.activities[index] = Arc::clone(&record);
        debug!(activity = %record.id, "activity_model.changed");
        self.publish(ActivityEvent::ActivityChanged(Arc::clone(&record)));
        Ok(record)
    }

    /// Edit the description of a record
    ///
    /// # Errors
    /// Returns `BaralgaError::NotFound` if no record has that id.
    pub fn update_description(
        &mut self,
        id: ActivityId,
        description: impl Into<String>,
    ) -> Result<Arc<ActivityRecord>> {
        let index = self.require(id)?;
        let edited = self.activities[index].as_ref().clone().with_description(description);
        self.replace_activity(edited)
    }

    /// Delete a record
    ///
    /// # Errors
    /// Returns `BaralgaError::NotFound` if no record has that id.
    pub fn remove_activity(&mut self, id: ActivityId) -> Result<Arc<ActivityRecord>> {
        let index = self.require(id)?;

        let record = self.activities.remove(index);
        info!(activity = %id, "activity_model.removed");
        self.publish(ActivityEvent::ActivityRemoved(Arc::clone(&record)));
        Ok(record)
    }

    /// Replace the active filter (`None` clears it)
    pub fn set_filter(&mut self, filter: Option<Filter>) {
        info!(filter = ?filter, "activity_model.filter_changed");
        self.filter = filter.clone();
        self.publish(ActivityEvent::FilterChanged(filter));
    }

    fn position(&self, id: ActivityId) -> Option<usize> {
        self.activities.iter().position(|record| record.id == id)
    }

    fn require(&self, id: ActivityId) -> Result<usize> {
        self.position(id).ok_or_else(|| BaralgaError::NotFound(format!("activity {id}")))
    }

    fn publish(&mut self, event: ActivityEvent) {
        self.subscribers.retain(|(id, sender)| match sender.send(event.clone()) {
            Ok(()) => true,
            Err(_) => {
                debug!(subscription = %id, "activity_model.subscription_released");
                false
            }
        });
    }
}

impl ActivitySource for ActivityModel {
    fn activities(&self) -> &[Arc<ActivityRecord>] {
        &self.activities
    }
}
