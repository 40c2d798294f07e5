use crate::snapshot::Snapshot;
use crate::types::{Category, Priority, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A blocking requirement that has not reached a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockingGap {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub gap_description: String,
    pub mitigation_plan: String,
    pub responsible_party: String,
    pub target_date: Option<NaiveDate>,
    /// Target date already passed on the as-of date.
    pub overdue: bool,
}

impl BlockingGap {
    pub fn has_mitigation(&self) -> bool {
        !self.mitigation_plan.trim().is_empty()
    }
}

/// Blocking gaps in input order.
pub fn blocking_gaps(snapshot: &Snapshot, as_of: NaiveDate) -> Vec<BlockingGap> {
    snapshot
        .iter()
        .filter(|r| r.is_blocking_gap())
        .map(|r| BlockingGap {
            id: r.id.clone(),
            title: r.title.clone(),
            category: r.category,
            priority: r.priority,
            status: r.status,
            gap_description: r.gap_description.clone(),
            mitigation_plan: r.mitigation_plan.clone(),
            responsible_party: r.responsible_party.clone(),
            target_date: r.target_date,
            overdue: r.target_date.is_some_and(|d| d < as_of),
        })
        .collect()
}
