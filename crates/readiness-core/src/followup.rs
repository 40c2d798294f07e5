use crate::model::Finding;
use crate::types::{Category, FindingStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Question templates asked for every open finding. `{id}`, `{category}`
/// and `{description}` are substituted from the finding.
pub const FOLLOW_UP_QUESTIONS: [&str; 4] = [
    "Has the root cause of finding {id} ({description}) been identified and documented?",
    "Have the corrective actions for finding {id} been implemented?",
    "Has the effectiveness of the corrective actions for finding {id} been verified?",
    "Could similar issues to finding {id} exist elsewhere in {category}?",
];

pub const REQUIRED_EVIDENCE: [&str; 4] = [
    "CAPA record",
    "Root cause analysis",
    "Implementation evidence",
    "Effectiveness verification",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub finding_id: String,
    pub category: Category,
    pub status: FindingStatus,
    pub description: String,
    pub target_closure_date: Option<NaiveDate>,
    pub overdue: bool,
    pub questions: Vec<String>,
    pub required_evidence: Vec<String>,
}

fn render(template: &str, finding: &Finding) -> String {
    let description = if finding.description.trim().is_empty() {
        "no description"
    } else {
        finding.description.trim()
    };
    template
        .replace("{id}", &finding.id)
        .replace("{category}", finding.category.label())
        .replace("{description}", description)
}

/// Follow-ups for findings still OPEN or under CAR, in input order.
pub fn follow_ups(findings: &[Finding], as_of: NaiveDate) -> Vec<FollowUp> {
    findings
        .iter()
        .filter(|f| f.status.needs_follow_up())
        .map(|f| FollowUp {
            finding_id: f.id.clone(),
            category: f.category,
            status: f.status,
            description: f.description.clone(),
            target_closure_date: f.target_closure_date,
            overdue: f.target_closure_date.is_some_and(|d| d < as_of),
            questions: FOLLOW_UP_QUESTIONS.iter().map(|t| render(t, f)).collect(),
            required_evidence: REQUIRED_EVIDENCE.iter().map(|e| e.to_string()).collect(),
        })
        .collect()
}
