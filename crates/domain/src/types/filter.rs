//! Activity filter
//!
//! A [`Filter`] restricts which activities are visible and defines the order
//! admitted activities are presented in. Filters are immutable values: the
//! builder methods consume the filter and return a new one, so a filter held
//! by a projection can never change underneath it.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::activity::ActivityRecord;

/// Month/year/project restriction plus presentation order
///
/// Absent criteria do not restrict. Admitted records are ordered by start
/// time, ties broken by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_id: Option<i64>,
}

impl Filter {
    /// Filter without criteria; admits everything but still orders
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_project(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub const fn month(&self) -> Option<u32> {
        self.month
    }

    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    pub const fn project_id(&self) -> Option<i64> {
        self.project_id
    }

    /// True when no criterion is set
    pub const fn is_empty(&self) -> bool {
        self.month.is_none() && self.year.is_none() && self.project_id.is_none()
    }

    /// Does `record` pass every present criterion?
    pub fn admits(&self, record: &ActivityRecord) -> bool {
        self.month.map_or(true, |month| record.month() == month)
            && self.year.map_or(true, |year| record.year() == year)
            && self.project_id.map_or(true, |project_id| record.project.id == project_id)
    }

    /// Presentation order of admitted records
    pub fn compare(&self, a: &ActivityRecord, b: &ActivityRecord) -> Ordering {
        a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id))
    }

    /// Admitted records of `records`, in presentation order
    pub fn apply(&self, records: &[Arc<ActivityRecord>]) -> Vec<Arc<ActivityRecord>> {
        let mut admitted: Vec<Arc<ActivityRecord>> =
            records.iter().filter(|record| self.admits(record)).cloned().collect();
        admitted.sort_by(|a, b| self.compare(a, b));
        admitted
    }
}
