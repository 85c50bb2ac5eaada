//! Activity model
//!
//! The model owns the canonical list of activities and the active filter and
//! publishes one [`ActivityEvent`](baralga_domain::ActivityEvent) per
//! mutation to every live subscription.

pub mod activities;
pub mod subscription;

pub use activities::ActivityModel;
pub use subscription::{Subscription, SubscriptionId};
