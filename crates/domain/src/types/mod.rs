//! Domain types and models

pub mod activity;
pub mod band;
pub mod event;
pub mod filter;

pub use activity::{ActivityId, ActivityRecord, ProjectRef};
pub use band::Band;
pub use event::ActivityEvent;
pub use filter::Filter;
