//! Integration tests for the filtered projection
//!
//! Covers the projection contract end to end: initial build, incremental
//! record events, filter replacement, and the service that feeds a renderer
//! from model subscriptions.

mod support;

use baralga_core::{ActivityModel, ProjectionService, ProjectionSynchronizer, ViewChange};
use baralga_domain::{ActivityEvent, ActivityId, Band, Filter};
use chrono::{Duration, TimeZone, Utc};
use support::fixtures::{activity, expected_visible, shared, year_filter};
use support::init_test_tracing;
use support::renderer::MirrorRenderer;

fn bands(projection: &ProjectionSynchronizer) -> Vec<Band> {
    projection.entries().map(|entry| entry.band()).collect()
}

/// Asserts the projection shows exactly what the model says it should and
/// that the renderer has followed every change.
fn assert_consistent(service: &ProjectionService<MirrorRenderer>, model: &ActivityModel) {
    let projection = service.projection();
    assert_eq!(projection.visible_ids(), expected_visible(model).as_slice());
    assert_eq!(projection.entries().count(), projection.len());

    let rendered: Vec<_> = projection.entries().map(|entry| (entry.id(), entry.band())).collect();
    assert_eq!(service.renderer().rows, rendered);
}

#[test]
fn test_unfiltered_initialize_uses_source_order_and_alternating_bands() {
    let a = shared(&activity(1, 2024, 5, 1, "x"));
    let b = shared(&activity(1, 2024, 5, 2, "y"));
    let source = vec![a.clone(), b.clone()];

    let projection = ProjectionSynchronizer::initialize(&source, None);

    assert_eq!(projection.visible_ids(), &[a.id, b.id]);
    assert_eq!(bands(&projection), vec![Band::Even, Band::Odd]);
}

#[test]
fn test_added_record_takes_band_of_its_insertion_position() {
    let a = shared(&activity(1, 2024, 5, 1, "x"));
    let b = shared(&activity(1, 2024, 5, 2, "y"));
    let mut source = vec![a, b];
    let mut projection = ProjectionSynchronizer::initialize(&source, None);

    let c = shared(&activity(1, 2024, 5, 3, "z"));
    source.push(c.clone());
    let change = projection.handle(&source, ActivityEvent::ActivityAdded(c.clone()));

    assert_eq!(projection.len(), 3);
    assert_eq!(change, ViewChange::Inserted { index: 2, id: c.id, band: Band::Even });
    assert_eq!(projection.entry(c.id).map(|entry| entry.band()), Some(Band::Even));
}

#[test]
fn test_removed_record_leaves_map_and_view() {
    let a = shared(&activity(1, 2024, 5, 1, "x"));
    let b = shared(&activity(1, 2024, 5, 2, "y"));
    let mut source = vec![a.clone(), b.clone()];
    let mut projection = ProjectionSynchronizer::initialize(&source, None);

    source.remove(0);
    projection.handle(&source, ActivityEvent::ActivityRemoved(a.clone()));

    assert_eq!(projection.visible_ids(), &[b.id]);
    assert!(!projection.contains(a.id));
    assert!(projection.entry(a.id).is_none());
}

#[test]
fn test_filter_change_admits_only_matching_year() {
    let a = shared(&activity(1, 2023, 5, 1, "x"));
    let b = shared(&activity(1, 2024, 5, 2, "y"));
    let source = vec![a.clone(), b.clone()];
    let mut projection = ProjectionSynchronizer::initialize(&source, None);

    let change = projection.handle(&source, ActivityEvent::FilterChanged(year_filter(2024)));

    assert_eq!(change, ViewChange::Rebuilt { len: 1 });
    assert_eq!(projection.visible_ids(), &[b.id]);
    assert!(!projection.contains(a.id));
}

#[test]
fn test_change_of_invisible_record_is_a_no_op() {
    let a = shared(&activity(1, 2023, 5, 1, "x"));
    let b = shared(&activity(1, 2024, 5, 2, "y"));
    let source = vec![a.clone(), b.clone()];
    let mut projection = ProjectionSynchronizer::initialize(&source, year_filter(2024));
    let before: Vec<_> = projection.entries().cloned().collect();

    let change = projection.handle(&source, ActivityEvent::ActivityChanged(a));

    assert_eq!(change, ViewChange::Unchanged);
    assert_eq!(projection.entries().cloned().collect::<Vec<_>>(), before);
}

#[test]
fn test_repeated_change_is_idempotent() {
    let a = shared(&activity(1, 2024, 5, 1, "x"));
    let b = shared(&activity(1, 2024, 5, 2, "y"));
    let source = vec![a, b.clone()];
    let mut projection = ProjectionSynchronizer::initialize(&source, None);
    let edited = shared(&b.as_ref().clone().with_description("edited"));

    projection.handle(&source, ActivityEvent::ActivityChanged(edited.clone()));
    let after_first: Vec<_> = projection.entries().cloned().collect();
    projection.handle(&source, ActivityEvent::ActivityChanged(edited));

    assert_eq!(projection.entries().cloned().collect::<Vec<_>>(), after_first);
}

#[test]
fn test_reapplying_same_filter_reproduces_initial_projection() {
    let source = vec![
        shared(&activity(1, 2024, 3, 9, "c")),
        shared(&activity(2, 2024, 3, 1, "a")),
        shared(&activity(1, 2023, 3, 5, "old")),
        shared(&activity(1, 2024, 4, 2, "d")),
    ];
    let filter = Some(Filter::new().with_year(2024).with_month(3));
    let initial = ProjectionSynchronizer::initialize(&source, filter.clone());
    let mut reapplied = initial.clone();

    reapplied.handle(&source, ActivityEvent::FilterChanged(filter));

    assert_eq!(reapplied.visible_ids(), initial.visible_ids());
    assert_eq!(
        reapplied.entries().cloned().collect::<Vec<_>>(),
        initial.entries().cloned().collect::<Vec<_>>()
    );
}

#[test]
fn test_service_stays_consistent_across_mutations() {
    init_test_tracing();
    let mut model = ActivityModel::with_activities([
        activity(1, 2024, 1, 10, "planning"),
        activity(2, 2023, 12, 4, "retro"),
    ])
    .unwrap();
    let mut service = ProjectionService::attach(&mut model, MirrorRenderer::default());
    assert_consistent(&service, &model);

    let added = model.add_activity(activity(1, 2024, 1, 12, "review")).unwrap();
    service.pump(&model);
    assert_consistent(&service, &model);

    model.set_filter(Some(Filter::new().with_year(2024)));
    service.pump(&model);
    assert_consistent(&service, &model);

    model.add_activity(activity(3, 2024, 1, 11, "pairing")).unwrap();
    model.add_activity(activity(3, 2022, 1, 11, "archived")).unwrap();
    service.pump(&model);
    assert_consistent(&service, &model);

    model.update_description(added.id, "review notes").unwrap();
    service.pump(&model);
    assert_consistent(&service, &model);
    assert_eq!(
        service.projection().entry(added.id).map(|entry| entry.record().description.clone()),
        Some("review notes".to_string())
    );

    model.remove_activity(added.id).unwrap();
    service.pump(&model);
    assert_consistent(&service, &model);

    model.set_filter(None);
    service.pump(&model);
    assert_consistent(&service, &model);
    assert_eq!(service.renderer().rebuilds, 3);
}

#[test]
fn test_service_catches_up_after_batched_events() {
    init_test_tracing();
    let mut model = ActivityModel::new();
    let mut service = ProjectionService::attach(&mut model, MirrorRenderer::default());

    let first = model.add_activity(activity(1, 2024, 2, 1, "a")).unwrap();
    let second = model.add_activity(activity(1, 2024, 2, 2, "b")).unwrap();
    model.set_filter(Some(Filter::new().with_project(1)));
    model.add_activity(activity(2, 2024, 2, 3, "other project")).unwrap();
    model.remove_activity(first.id).unwrap();
    model.update_description(second.id, "b2").unwrap();

    assert_eq!(service.pump(&model), 6);
    assert_consistent(&service, &model);
    assert_eq!(service.projection().visible_ids(), &[second.id]);
}

/// Rows not in `edited` must still appear in the filter's order, the view must
/// hold exactly the admitted records, and the renderer must match.
fn assert_consistent_except(
    service: &ProjectionService<MirrorRenderer>,
    model: &ActivityModel,
    edited: &[ActivityId],
) {
    let projection = service.projection();

    let mut shown = projection.visible_ids().to_vec();
    let mut admitted = expected_visible(model);
    shown.sort();
    admitted.sort();
    assert_eq!(shown, admitted, "view must hold exactly the admitted records");

    let untouched_shown: Vec<_> =
        projection.visible_ids().iter().copied().filter(|id| !edited.contains(id)).collect();
    let untouched_expected: Vec<_> =
        expected_visible(model).into_iter().filter(|id| !edited.contains(id)).collect();
    assert_eq!(untouched_shown, untouched_expected);

    let rendered: Vec<_> = projection.entries().map(|entry| (entry.id(), entry.band())).collect();
    assert_eq!(service.renderer().rows, rendered);
}

#[test]
fn test_inserts_after_start_time_edit_keep_filter_order() {
    init_test_tracing();
    let mut model = ActivityModel::with_activities(
        (1..=5).map(|day| activity(1, 2024, 3, day, &format!("day {day}"))),
    )
    .unwrap()
    .with_filter(year_filter(2024));
    let mut service = ProjectionService::attach(&mut model, MirrorRenderer::default());
    let moved_id = model.activities()[2].id;

    let mut moved = model.get(moved_id).unwrap().as_ref().clone();
    moved.start_time = Utc.with_ymd_and_hms(2024, 3, 25, 9, 0, 0).unwrap();
    moved.end_time = moved.start_time + Duration::hours(1);
    model.replace_activity(moved).unwrap();
    service.pump(&model);
    assert_eq!(service.projection().index_of(moved_id), Some(2));

    // before the old position, between old and new, and after the new one
    model.add_activity(activity(2, 2024, 3, 2, "early")).unwrap();
    model.add_activity(activity(2, 2024, 3, 4, "middle")).unwrap();
    model.add_activity(activity(2, 2024, 3, 26, "late")).unwrap();
    model.add_activity(activity(2, 2023, 3, 4, "other year")).unwrap();
    assert_eq!(service.pump(&model), 4);
    assert_consistent_except(&service, &model, &[moved_id]);

    // a rebuild orders the edited row by its new start time
    model.set_filter(year_filter(2024));
    service.pump(&model);
    assert_consistent(&service, &model);
    assert_eq!(service.projection().index_of(moved_id), Some(service.projection().len() - 2));
}
