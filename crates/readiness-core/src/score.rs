use crate::config::WeightTable;
use crate::snapshot::Snapshot;
use crate::types::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Round to `places` decimals, ties to even.
///
/// The scaled value is first snapped to 1e-6 so binary noise such as
/// `12.249999999` still reads as the tie `12.25`. Values too large to scale
/// carry no fractional digits and are returned unchanged.
pub fn round_half_even(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let snapped = value * factor * 1e6;
    if !snapped.is_finite() {
        return value;
    }
    let scaled = snapped.round() / 1e6;
    scaled.round_ties_even() / factor
}

/// Percentage `numerator / denominator × 100` at one decimal, or `None`
/// when the denominator is zero.
pub fn percent(numerator: f64, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(round_half_even(numerator / denominator as f64 * 100.0, 1))
}

// ---------------------------------------------------------------------------
// ReadinessScore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    /// Weighted completion over applicable requirements; `None` means no data.
    pub percent: Option<f64>,
    pub weighted_sum: f64,
    pub applicable_count: usize,
}

pub fn score(snapshot: &Snapshot, weights: &WeightTable) -> ReadinessScore {
    let mut weighted_sum = 0.0;
    let mut applicable_count = 0usize;
    for r in snapshot.applicable() {
        weighted_sum += weights.weight(r.status);
        applicable_count += 1;
    }
    ReadinessScore {
        percent: percent(weighted_sum, applicable_count),
        weighted_sum: round_half_even(weighted_sum, 4),
        applicable_count,
    }
}

/// Count of requirements per status, every status present even at zero.
pub fn status_distribution(snapshot: &Snapshot) -> BTreeMap<Status, usize> {
    let mut counts: BTreeMap<Status, usize> = Status::all().iter().map(|s| (*s, 0)).collect();
    for r in snapshot {
        *counts.entry(r.status).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
