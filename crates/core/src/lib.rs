//! # Baralga Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The activity model that owns the canonical activity list
//! - Subscription handles delivering change events to consumers
//! - The filtered projection kept in sync with the model
//! - Port interfaces (traits) for sources and renderers
//!
//! ## Architecture Principles
//! - Only depends on `baralga-domain`
//! - No file, settings, or display code
//! - All external collaborators via traits
//! - Pure, testable business logic

pub mod model;
pub mod projection;

// Re-export specific items to avoid ambiguity
pub use model::{ActivityModel, Subscription, SubscriptionId};
pub use projection::ports::{ActivitySource, ProjectionRenderer};
pub use projection::{ProjectionEntry, ProjectionService, ProjectionSynchronizer, ViewChange};
