//! Port interfaces for the projection
//!
//! These traits define the boundaries between the projection and the
//! surrounding application: where records come from and who draws them.

use std::sync::Arc;

use baralga_domain::ActivityRecord;

use super::synchronizer::{ProjectionSynchronizer, ViewChange};

/// Read access to the canonical activity list, in its natural order
pub trait ActivitySource {
    fn activities(&self) -> &[Arc<ActivityRecord>];
}

impl ActivitySource for [Arc<ActivityRecord>] {
    fn activities(&self) -> &[Arc<ActivityRecord>] {
        self
    }
}

impl ActivitySource for Vec<Arc<ActivityRecord>> {
    fn activities(&self) -> &[Arc<ActivityRecord>] {
        self
    }
}

/// Rendering layer fed with projection changes
///
/// Implementations draw, move or drop visual rows; the projection itself
/// never touches a display surface.
pub trait ProjectionRenderer {
    /// Apply one change. `projection` already reflects it.
    fn apply(&mut self, change: &ViewChange, projection: &ProjectionSynchronizer);
}
