use crate::score::round_half_even;
use crate::snapshot::Snapshot;
use crate::types::Status;
use serde::{Deserialize, Serialize};

/// Remaining effort, split by non-terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortEstimate {
    pub not_started_hours: f64,
    pub in_progress_hours: f64,
    pub partially_compliant_hours: f64,
    pub total_hours: f64,
    pub hours_per_week: f64,
    pub weeks: f64,
}

pub fn estimate_effort(snapshot: &Snapshot, hours_per_week: f64) -> EffortEstimate {
    let (mut not_started, mut in_progress, mut partial) = (0.0, 0.0, 0.0);
    for r in snapshot.iter().filter(|r| r.status.is_remaining()) {
        match r.status {
            Status::NotStarted => not_started += r.effort_hours,
            Status::InProgress => in_progress += r.effort_hours,
            _ => partial += r.effort_hours,
        }
    }
    let total = not_started + in_progress + partial;
    // A non-positive week length yields zero weeks, never infinity.
    let weeks = if hours_per_week > 0.0 {
        total / hours_per_week
    } else {
        0.0
    };
    EffortEstimate {
        not_started_hours: round_half_even(not_started, 1),
        in_progress_hours: round_half_even(in_progress, 1),
        partially_compliant_hours: round_half_even(partial, 1),
        total_hours: round_half_even(total, 1),
        hours_per_week,
        weeks: round_half_even(weeks, 2),
    }
}
