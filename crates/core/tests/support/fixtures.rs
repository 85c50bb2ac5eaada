//! Activity fixtures

use std::sync::Arc;

use baralga_core::ActivityModel;
use baralga_domain::{ActivityId, ActivityRecord, Filter, ProjectRef};
use chrono::{Duration, TimeZone, Utc};

/// One-hour activity on `project_id`, starting 09:00 on the given day.
pub fn activity(
    project_id: i64,
    year: i32,
    month: u32,
    day: u32,
    description: &str,
) -> ActivityRecord {
    let start = Utc
        .with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("fixture date should be valid");
    let project = ProjectRef::new(project_id, format!("project-{project_id}"));

    ActivityRecord::new(project, start, start + Duration::hours(1))
        .expect("fixture span should be valid")
        .with_description(description)
}

/// Ids the projection should show for `model` right now.
pub fn expected_visible(model: &ActivityModel) -> Vec<ActivityId> {
    match model.filter() {
        Some(filter) => filter.apply(model.activities()).iter().map(|record| record.id).collect(),
        None => model.activities().iter().map(|record| record.id).collect(),
    }
}

pub fn shared(record: &ActivityRecord) -> Arc<ActivityRecord> {
    Arc::new(record.clone())
}

pub fn year_filter(year: i32) -> Option<Filter> {
    Some(Filter::new().with_year(year))
}
