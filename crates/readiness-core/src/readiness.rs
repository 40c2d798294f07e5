use crate::coverage::CategoryCoverage;
use crate::gap::BlockingGap;
use crate::types::{Category, ReadinessState};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessAssessment {
    pub state: ReadinessState,
    pub blocking_gap_count: usize,
    /// Last date a mitigated gap may target and still count as near ready.
    pub horizon_end: NaiveDate,
    /// Blocking gaps with a blank mitigation plan.
    pub unmitigated: Vec<String>,
    /// Blocking gaps with no target date, an overdue one, or one past the horizon.
    pub outside_horizon: Vec<String>,
    pub blocking_categories: Vec<Category>,
}

/// Derive the go/no-go state.
///
/// * `Ready`: no blocking gaps.
/// * `NearReady`: every blocking gap has a mitigation plan and a target
///   date in `as_of ..= as_of + horizon_days`.
/// * `NotReady`: anything else.
pub fn assess_readiness(
    gaps: &[BlockingGap],
    coverage: &[CategoryCoverage],
    as_of: NaiveDate,
    horizon_days: u32,
) -> ReadinessAssessment {
    let horizon_end = as_of
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);

    let unmitigated: Vec<String> = gaps
        .iter()
        .filter(|g| !g.has_mitigation())
        .map(|g| g.id.clone())
        .collect();

    let outside_horizon: Vec<String> = gaps
        .iter()
        .filter(|g| match g.target_date {
            Some(d) => d < as_of || d > horizon_end,
            None => true,
        })
        .map(|g| g.id.clone())
        .collect();

    let blocking_categories = coverage
        .iter()
        .filter(|c| !c.blocking_gap_ids.is_empty())
        .map(|c| c.category)
        .collect();

    let state = if gaps.is_empty() {
        ReadinessState::Ready
    } else if unmitigated.is_empty() && outside_horizon.is_empty() {
        ReadinessState::NearReady
    } else {
        ReadinessState::NotReady
    };

    ReadinessAssessment {
        state,
        blocking_gap_count: gaps.len(),
        horizon_end,
        unmitigated,
        outside_horizon,
        blocking_categories,
    }
}
