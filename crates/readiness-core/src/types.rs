use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A literal that does not name any member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLiteral {
    pub kind: &'static str,
    pub value: String,
}

/// Lower-cases and maps `-` and spaces to `_`, so `In Progress`,
/// `in-progress` and `IN_PROGRESS` all read the same.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    NotStarted,
    InProgress,
    PartiallyCompliant,
    Compliant,
    Verified,
    NotApplicable,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[
            Status::NotStarted,
            Status::InProgress,
            Status::PartiallyCompliant,
            Status::Compliant,
            Status::Verified,
            Status::NotApplicable,
        ]
    }

    /// Terminal statuses carry no remaining work and never form a gap.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Status::Compliant | Status::Verified | Status::NotApplicable
        )
    }

    /// Statuses that still carry remaining effort.
    pub fn is_remaining(self) -> bool {
        !self.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::NotStarted => "NOT_STARTED",
            Status::InProgress => "IN_PROGRESS",
            Status::PartiallyCompliant => "PARTIALLY_COMPLIANT",
            Status::Compliant => "COMPLIANT",
            Status::Verified => "VERIFIED",
            Status::NotApplicable => "NOT_APPLICABLE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "not_started" => Ok(Status::NotStarted),
            "in_progress" => Ok(Status::InProgress),
            "partially_compliant" => Ok(Status::PartiallyCompliant),
            "compliant" => Ok(Status::Compliant),
            "verified" => Ok(Status::Verified),
            "not_applicable" => Ok(Status::NotApplicable),
            _ => Err(UnknownLiteral {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Requirement priority; doubles as the risk level of a checklist question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    #[serde(alias = "BLOCKING")]
    Critical,
}

impl Priority {
    pub fn base_score(self) -> u32 {
        match self {
            Priority::Critical => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" | "blocking" => Ok(Priority::Critical),
            _ => Err(UnknownLiteral {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    QualityManagement,
    RiskManagement,
    DesignControls,
    TechnicalDocumentation,
    ClinicalEvaluation,
    PostMarketSurveillance,
    Vigilance,
    Labeling,
    UdiRegistration,
    SupplierControl,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::QualityManagement,
            Category::RiskManagement,
            Category::DesignControls,
            Category::TechnicalDocumentation,
            Category::ClinicalEvaluation,
            Category::PostMarketSurveillance,
            Category::Vigilance,
            Category::Labeling,
            Category::UdiRegistration,
            Category::SupplierControl,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::QualityManagement => "quality_management",
            Category::RiskManagement => "risk_management",
            Category::DesignControls => "design_controls",
            Category::TechnicalDocumentation => "technical_documentation",
            Category::ClinicalEvaluation => "clinical_evaluation",
            Category::PostMarketSurveillance => "post_market_surveillance",
            Category::Vigilance => "vigilance",
            Category::Labeling => "labeling",
            Category::UdiRegistration => "udi_registration",
            Category::SupplierControl => "supplier_control",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::QualityManagement => "Quality Management",
            Category::RiskManagement => "Risk Management",
            Category::DesignControls => "Design Controls",
            Category::TechnicalDocumentation => "Technical Documentation",
            Category::ClinicalEvaluation => "Clinical Evaluation",
            Category::PostMarketSurveillance => "Post-Market Surveillance",
            Category::Vigilance => "Vigilance",
            Category::Labeling => "Labeling",
            Category::UdiRegistration => "UDI Registration",
            Category::SupplierControl => "Supplier Control",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| UnknownLiteral {
                kind: "category",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// FindingStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingStatus {
    Open,
    Closed,
    /// Corrective action request raised, not yet closed.
    Car,
    Verified,
}

impl FindingStatus {
    pub fn all() -> &'static [FindingStatus] {
        &[
            FindingStatus::Open,
            FindingStatus::Closed,
            FindingStatus::Car,
            FindingStatus::Verified,
        ]
    }

    pub fn needs_follow_up(self) -> bool {
        matches!(self, FindingStatus::Open | FindingStatus::Car)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FindingStatus::Open => "OPEN",
            FindingStatus::Closed => "CLOSED",
            FindingStatus::Car => "CAR",
            FindingStatus::Verified => "VERIFIED",
        }
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FindingStatus {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" => Ok(FindingStatus::Open),
            "closed" => Ok(FindingStatus::Closed),
            "car" => Ok(FindingStatus::Car),
            "verified" => Ok(FindingStatus::Verified),
            _ => Err(UnknownLiteral {
                kind: "finding status",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ReadinessState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessState {
    Ready,
    NearReady,
    NotReady,
}

impl ReadinessState {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadinessState::Ready => "READY",
            ReadinessState::NearReady => "NEAR_READY",
            ReadinessState::NotReady => "NOT_READY",
        }
    }
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
