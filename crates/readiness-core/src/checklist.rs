use crate::model::ChecklistQuestion;
use crate::types::{Category, Priority};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Bonus added to a question whose category is a declared risk area.
pub const RISK_AREA_BONUS: u32 = 2;

// ---------------------------------------------------------------------------
// Standard question bank
// ---------------------------------------------------------------------------

const STANDARD_QUESTIONS: &[(Category, Priority, &str)] = &[
    (Category::QualityManagement, Priority::High, "Is the quality manual current and approved by top management?"),
    (Category::QualityManagement, Priority::Medium, "Are management reviews held at the planned intervals with recorded outputs?"),
    (Category::RiskManagement, Priority::Critical, "Is the risk management file maintained across the full product lifecycle?"),
    (Category::RiskManagement, Priority::High, "Are residual risks evaluated against the documented acceptability criteria?"),
    (Category::DesignControls, Priority::High, "Are design inputs traceable to verification and validation results?"),
    (Category::DesignControls, Priority::Medium, "Are design changes reviewed, verified and approved before implementation?"),
    (Category::TechnicalDocumentation, Priority::High, "Does the technical documentation cover every device variant placed on the market?"),
    (Category::TechnicalDocumentation, Priority::Medium, "Is the declaration of conformity consistent with the technical documentation?"),
    (Category::ClinicalEvaluation, Priority::Critical, "Is the clinical evaluation report updated with current clinical data?"),
    (Category::ClinicalEvaluation, Priority::High, "Is sufficient clinical evidence available for each intended purpose claimed?"),
    (Category::PostMarketSurveillance, Priority::High, "Is the post-market surveillance plan implemented and producing periodic reports?"),
    (Category::PostMarketSurveillance, Priority::Medium, "Are trend analyses performed on complaint and feedback data?"),
    (Category::Vigilance, Priority::Critical, "Are serious incidents reported within the regulatory deadlines?"),
    (Category::Vigilance, Priority::High, "Are field safety corrective actions tracked to closure?"),
    (Category::Labeling, Priority::Medium, "Do labels and instructions for use carry all mandatory information?"),
    (Category::Labeling, Priority::Low, "Are translations of labeling controlled and approved?"),
    (Category::UdiRegistration, Priority::Medium, "Are UDI carriers applied on every packaging level?"),
    (Category::UdiRegistration, Priority::Low, "Is device registration data kept current in the regulatory database?"),
    (Category::SupplierControl, Priority::High, "Are critical suppliers qualified and periodically re-evaluated?"),
    (Category::SupplierControl, Priority::Medium, "Do supplier agreements define change-notification obligations?"),
];

/// The built-in checklist, in category order.
pub fn standard_questions() -> Vec<ChecklistQuestion> {
    let mut per_category = BTreeMap::<Category, usize>::new();
    STANDARD_QUESTIONS
        .iter()
        .map(|(category, risk_level, text)| {
            let n = per_category.entry(*category).or_insert(0);
            *n += 1;
            ChecklistQuestion {
                id: format!("{}-{:02}", category.as_str().to_ascii_uppercase(), n),
                category: *category,
                question: text.to_string(),
                risk_level: *risk_level,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Prioritization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedQuestion {
    pub id: String,
    pub category: Category,
    pub question: String,
    pub risk_level: Priority,
    pub in_risk_area: bool,
    pub priority_score: u32,
}

/// Score every question and sort descending; equal scores keep input order.
pub fn prioritize(
    questions: &[ChecklistQuestion],
    risk_areas: &BTreeSet<Category>,
) -> Vec<PrioritizedQuestion> {
    let mut scored: Vec<PrioritizedQuestion> = questions
        .iter()
        .map(|q| {
            let in_risk_area = risk_areas.contains(&q.category);
            let bonus = if in_risk_area { RISK_AREA_BONUS } else { 0 };
            PrioritizedQuestion {
                id: q.id.clone(),
                category: q.category,
                question: q.question.clone(),
                risk_level: q.risk_level,
                in_risk_area,
                priority_score: q.risk_level.base_score() + bonus,
            }
        })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
    scored
}
