//! Renderer doubles

use baralga_core::{ProjectionRenderer, ProjectionSynchronizer, ViewChange};
use baralga_domain::{ActivityId, Band};

/// Keeps its own list of rows, patched only from the changes it receives.
#[derive(Debug, Default)]
pub struct MirrorRenderer {
    pub rows: Vec<(ActivityId, Band)>,
    pub rebuilds: usize,
}

impl ProjectionRenderer for MirrorRenderer {
    fn apply(&mut self, change: &ViewChange, projection: &ProjectionSynchronizer) {
        match *change {
            ViewChange::Inserted { index, id, band } => self.rows.insert(index, (id, band)),
            ViewChange::Removed { index, id } => {
                let (removed, _) = self.rows.remove(index);
                assert_eq!(removed, id, "renderer removed the wrong row");
            }
            ViewChange::Refreshed { index, id } => {
                assert_eq!(self.rows[index].0, id, "renderer refreshed the wrong row");
            }
            ViewChange::Rebuilt { .. } => {
                self.rebuilds += 1;
                self.rows =
                    projection.entries().map(|entry| (entry.id(), entry.band())).collect();
            }
            ViewChange::Unchanged => {}
        }
    }
}
