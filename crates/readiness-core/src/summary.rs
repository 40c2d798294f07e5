//! Assembles every analysis over one snapshot into the value object the
//! renderers consume.

use crate::checklist::{prioritize, standard_questions, PrioritizedQuestion};
use crate::config::ReadinessConfig;
use crate::coverage::{category_coverage, CategoryCoverage};
use crate::effort::{estimate_effort, EffortEstimate};
use crate::followup::{follow_ups, FollowUp};
use crate::gap::{blocking_gaps, BlockingGap};
use crate::io::AuditInput;
use crate::readiness::{assess_readiness, ReadinessAssessment};
use crate::score::{score, status_distribution, ReadinessScore};
use crate::snapshot::Snapshot;
use crate::timeline::{Timeline, TimelineBucket};
use crate::types::{Category, FindingStatus, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// ReadinessSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub as_of: NaiveDate,
    pub requirement_count: usize,
    pub applicable_count: usize,
    /// `None` (JSON `null`) when no requirement is applicable.
    pub overall_readiness_pct: Option<f64>,
    pub weighted_sum: f64,
    pub status_distribution: BTreeMap<Status, usize>,
    pub readiness: ReadinessAssessment,
    pub blocking_gaps: Vec<BlockingGap>,
    pub effort: EffortEstimate,
    pub timeline: Vec<TimelineBucket>,
    pub categories: Vec<CategoryCoverage>,
}

pub fn summarize(snapshot: &Snapshot, config: &ReadinessConfig, as_of: NaiveDate) -> ReadinessSummary {
    let ReadinessScore {
        percent,
        weighted_sum,
        applicable_count,
    } = score(snapshot, &config.weights);
    let gaps = blocking_gaps(snapshot, as_of);
    let categories = category_coverage(snapshot, &gaps, config.verified_counts_as_compliant);
    let readiness = assess_readiness(&gaps, &categories, as_of, config.near_ready_horizon_days);

    ReadinessSummary {
        title: snapshot.title().map(str::to_string),
        as_of,
        requirement_count: snapshot.len(),
        applicable_count,
        overall_readiness_pct: percent,
        weighted_sum,
        status_distribution: status_distribution(snapshot),
        readiness,
        blocking_gaps: gaps,
        effort: estimate_effort(snapshot, config.hours_per_week),
        timeline: Timeline::new(snapshot).iter().collect(),
        categories,
    }
}

// ---------------------------------------------------------------------------
// AuditSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub as_of: NaiveDate,
    pub risk_areas: Vec<Category>,
    /// True when the built-in question bank was used.
    pub standard_checklist: bool,
    pub checklist: Vec<PrioritizedQuestion>,
    pub finding_counts: BTreeMap<FindingStatus, usize>,
    pub overdue_findings: Vec<String>,
    pub follow_ups: Vec<FollowUp>,
}

pub fn summarize_audit(input: &AuditInput, as_of: NaiveDate) -> AuditSummary {
    let (questions, standard_checklist) = match &input.questions {
        Some(qs) => (prioritize(qs, &input.risk_areas), false),
        None => (prioritize(&standard_questions(), &input.risk_areas), true),
    };

    let mut finding_counts: BTreeMap<FindingStatus, usize> =
        FindingStatus::all().iter().map(|s| (*s, 0)).collect();
    for f in &input.findings {
        *finding_counts.entry(f.status).or_insert(0) += 1;
    }

    let follow_ups = follow_ups(&input.findings, as_of);
    let overdue_findings = follow_ups
        .iter()
        .filter(|f| f.overdue)
        .map(|f| f.finding_id.clone())
        .collect();

    AuditSummary {
        title: input.title.clone(),
        as_of,
        risk_areas: input.risk_areas.iter().copied().collect(),
        standard_checklist,
        checklist: questions,
        finding_counts,
        overdue_findings,
        follow_ups,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
