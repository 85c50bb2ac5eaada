//! Projection service - wires model events into a renderer

use baralga_domain::ActivityEvent;
use tracing::{debug, info};

use super::ports::ProjectionRenderer;
use super::synchronizer::{ProjectionSynchronizer, ViewChange};
use crate::model::{ActivityModel, Subscription};

/// Keeps one renderer in step with an [`ActivityModel`]
///
/// Events are pulled from the service's own subscription and applied one at
/// a time, in publication order, on the caller's thread.
pub struct ProjectionService<R: ProjectionRenderer> {
    synchronizer: ProjectionSynchronizer,
    subscription: Subscription,
    renderer: R,
}

impl<R: ProjectionRenderer> ProjectionService<R> {
    /// Subscribe to `model` and render its current state
    pub fn attach(model: &mut ActivityModel, mut renderer: R) -> Self {
        let subscription = model.subscribe();
        let synchronizer = ProjectionSynchronizer::initialize(&*model, model.filter().cloned());

        renderer.apply(&ViewChange::Rebuilt { len: synchronizer.len() }, &synchronizer);
        info!(
            subscription = %subscription.id(),
            visible = synchronizer.len(),
            "projection_service.attached"
        );

        Self { synchronizer, subscription, renderer }
    }

    /// Apply every queued event; returns how many were handled
    pub fn pump(&mut self, model: &ActivityModel) -> usize {
        let mut handled = 0;
        while let Some(event) = self.subscription.try_next() {
            self.dispatch(model, event);
            handled += 1;
        }
        handled
    }

    /// Apply a single event, forwarding any view change to the renderer
    pub fn dispatch(&mut self, model: &ActivityModel, event: ActivityEvent) -> ViewChange {
        let change = self.synchronizer.handle(model, event);
        if change != ViewChange::Unchanged {
            self.renderer.apply(&change, &self.synchronizer);
        }
        change
    }

    pub fn projection(&self) -> &ProjectionSynchronizer {
        &self.synchronizer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Release the subscription and hand back the renderer
    pub fn detach(mut self) -> R {
        self.subscription.close();
        debug!(subscription = %self.subscription.id(), "projection_service.detached");
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use baralga_domain::{ActivityRecord, Band, Filter, ProjectRef};
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[derive(Default)]
    struct RecordingRenderer {
        changes: Vec<ViewChange>,
    }

    impl ProjectionRenderer for RecordingRenderer {
        fn apply(&mut self, change: &ViewChange, _projection: &ProjectionSynchronizer) {
            self.changes.push(*change);
        }
    }

    fn record(year: i32) -> ActivityRecord {
        let start = Utc.with_ymd_and_hms(year, 4, 1, 9, 0, 0).unwrap();
        ActivityRecord::new(ProjectRef::new(2, "Ops"), start, start + Duration::minutes(30))
            .unwrap()
    }

    #[test]
    fn test_attach_renders_initial_state() {
        let mut model = ActivityModel::with_activities([record(2024), record(2023)]).unwrap();

        let service = ProjectionService::attach(&mut model, RecordingRenderer::default());

        assert_eq!(service.renderer().changes, vec![ViewChange::Rebuilt { len: 2 }]);
        assert_eq!(model.subscriber_count(), 1);
    }

    #[test]
    fn test_pump_forwards_changes_in_order() {
        let mut model = ActivityModel::new();
        let mut service = ProjectionService::attach(&mut model, RecordingRenderer::default());

        let added = model.add_activity(record(2024)).unwrap();
        model.set_filter(Some(Filter::new().with_year(2023)));
        model.add_activity(record(2023)).unwrap();

        assert_eq!(service.pump(&model), 3);
        assert_eq!(service.projection().len(), 1);
        assert!(!service.projection().contains(added.id));
        assert_eq!(
            service.renderer().changes[1],
            ViewChange::Inserted { index: 0, id: added.id, band: Band::Even }
        );
    }

    #[test]
    fn test_unchanged_events_are_not_rendered() {
        let mut model = ActivityModel::new().with_filter(Some(Filter::new().with_year(2030)));
        let mut service = ProjectionService::attach(&mut model, RecordingRenderer::default());

        model.add_activity(record(2024)).unwrap();
        service.pump(&model);

        assert_eq!(service.renderer().changes.len(), 1);
    }

    #[test]
    fn test_detach_releases_subscription() {
        let mut model = ActivityModel::new();
        let service = ProjectionService::attach(&mut model, RecordingRenderer::default());

        let renderer = service.detach();

        assert_eq!(model.subscriber_count(), 0);
        assert_eq!(renderer.changes.len(), 1);
    }
}
