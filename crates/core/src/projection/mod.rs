//! Filtered projection over the activity list
//!
//! The projection is the derived, filtered, ordered view the description
//! list renders. It is patched incrementally from model events and rebuilt
//! only when the filter changes.

pub mod entry;
pub mod ports;
pub mod service;
pub mod synchronizer;

pub use entry::ProjectionEntry;
pub use service::ProjectionService;
pub use synchronizer::{ProjectionSynchronizer, ViewChange};
