use crate::gap::BlockingGap;
use crate::score::percent;
use crate::snapshot::Snapshot;
use crate::types::{Category, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCoverage {
    pub category: Category,
    /// In-scope requirements: applicable and not marked NOT_APPLICABLE.
    pub total: usize,
    pub compliant: usize,
    /// IN_PROGRESS plus PARTIALLY_COMPLIANT.
    pub in_progress: usize,
    pub not_started: usize,
    /// Out-of-scope requirements kept for the audit trail.
    pub excluded: usize,
    pub percent_complete: Option<f64>,
    pub blocking_gap_ids: Vec<String>,
}

impl CategoryCoverage {
    fn empty(category: Category) -> Self {
        Self {
            category,
            total: 0,
            compliant: 0,
            in_progress: 0,
            not_started: 0,
            excluded: 0,
            percent_complete: None,
            blocking_gap_ids: Vec::new(),
        }
    }
}

/// Per-category statistics for every category present in the snapshot,
/// in category order. Blocking ids are taken from `gaps`, so they always
/// agree with the gap list.
pub fn category_coverage(
    snapshot: &Snapshot,
    gaps: &[BlockingGap],
    verified_counts_as_compliant: bool,
) -> Vec<CategoryCoverage> {
    let mut by_category: BTreeMap<Category, CategoryCoverage> = BTreeMap::new();

    for r in snapshot {
        let entry = by_category
            .entry(r.category)
            .or_insert_with(|| CategoryCoverage::empty(r.category));
        if !r.applicable || r.status == Status::NotApplicable {
            entry.excluded += 1;
            continue;
        }
        entry.total += 1;
        match r.status {
            Status::Compliant => entry.compliant += 1,
            Status::Verified if verified_counts_as_compliant => entry.compliant += 1,
            Status::InProgress | Status::PartiallyCompliant => entry.in_progress += 1,
            Status::NotStarted => entry.not_started += 1,
            Status::Verified | Status::NotApplicable => {}
        }
    }

    for gap in gaps {
        if let Some(entry) = by_category.get_mut(&gap.category) {
            entry.blocking_gap_ids.push(gap.id.clone());
        }
    }

    by_category
        .into_values()
        .map(|mut c| {
            c.percent_complete = percent(c.compliant as f64, c.total);
            c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gap::blocking_gaps;
    use crate::model::Requirement;
    use crate::types::Priority;
    use chrono::NaiveDate;

    fn req(id: &str, category: Category, status: Status) -> Requirement {
        Requirement::new(id, category, Priority::Medium, status)
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn counts_and_percent() {
        let snap = Snapshot::new(vec![
            req("A", Category::RiskManagement, Status::Compliant),
            req("B", Category::RiskManagement, Status::Verified),
            req("C", Category::RiskManagement, Status::InProgress),
            req("D", Category::RiskManagement, Status::PartiallyCompliant),
            req("E", Category::Labeling, Status::NotStarted),
        ])
        .unwrap();
        let cov = category_coverage(&snap, &[], true);
        assert_eq!(cov.len(), 2);

        let risk = &cov[0];
        assert_eq!(risk.category, Category::RiskManagement);
        assert_eq!(risk.total, 4);
        assert_eq!(risk.compliant, 2);
        assert_eq!(risk.in_progress, 2);
        assert_eq!(risk.percent_complete, Some(50.0));

        let labeling = &cov[1];
        assert_eq!(labeling.not_started, 1);
        assert_eq!(labeling.percent_complete, Some(0.0));
    }

    #[test]
    fn verified_bucket_is_configurable() {
        let snap = Snapshot::new(vec![
            req("A", Category::Vigilance, Status::Verified),
            req("B", Category::Vigilance, Status::Compliant),
        ])
        .unwrap();
        let cov = category_coverage(&snap, &[], false);
        assert_eq!(cov[0].compliant, 1);
        assert_eq!(cov[0].total, 2);
    }

    #[test]
    fn only_excluded_category_has_no_data() {
        let mut a = req("A", Category::UdiRegistration, Status::NotStarted);
        a.applicable = false;
        let b = req("B", Category::UdiRegistration, Status::NotApplicable);
        let snap = Snapshot::new(vec![a, b]).unwrap();
        let cov = category_coverage(&snap, &[], true);
        assert_eq!(cov[0].excluded, 2);
        assert_eq!(cov[0].total, 0);
        assert_eq!(cov[0].percent_complete, None);
    }

    #[test]
    fn blocking_ids_follow_gap_list() {
        let mut a = req("A", Category::DesignControls, Status::InProgress);
        a.blocking = true;
        let mut b = req("B", Category::Labeling, Status::NotStarted);
        b.blocking = true;
        let mut c = req("C", Category::DesignControls, Status::Verified);
        c.blocking = true;
        let snap = Snapshot::new(vec![a, b, c]).unwrap();
        let gaps = blocking_gaps(&snap, as_of());
        let cov = category_coverage(&snap, &gaps, true);
        let design = cov.iter().find(|c| c.category == Category::DesignControls).unwrap();
        assert_eq!(design.blocking_gap_ids, vec!["A".to_string()]);
        let labeling = cov.iter().find(|c| c.category == Category::Labeling).unwrap();
        assert_eq!(labeling.blocking_gap_ids, vec!["B".to_string()]);
    }
}
