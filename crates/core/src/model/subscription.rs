//! Subscription handles
//!
//! A subscription is the receiving half of a single-consumer channel fed by
//! the [`ActivityModel`](super::ActivityModel). Dropping or closing it
//! releases the subscription; the model forgets closed subscribers the next
//! time it publishes.

use std::fmt;

use baralga_domain::ActivityEvent;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Identifier of a subscription within one model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Receiving end of the model's change notifications
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: UnboundedReceiver<ActivityEvent>,
}

impl Subscription {
    pub(crate) fn channel(id: SubscriptionId) -> (UnboundedSender<ActivityEvent>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { id, receiver })
    }

    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Next pending event without waiting
    ///
    /// Returns `None` when nothing is queued or the model is gone.
    pub fn try_next(&mut self) -> Option<ActivityEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the next event; `None` once the model has been dropped
    /// and the queue is empty
    pub async fn recv(&mut self) -> Option<ActivityEvent> {
        self.receiver.recv().await
    }

    /// All currently queued events, in publication order
    pub fn drain(&mut self) -> Vec<ActivityEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Stop receiving. Events already queued can still be drained.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
