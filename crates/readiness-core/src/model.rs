use crate::error::{ReadinessError, Result};
use crate::types::{Category, FindingStatus, Priority, Status, UnknownLiteral};
use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Requirement
// ---------------------------------------------------------------------------

/// Upper bound on a single record's effort. Keeps every effort sum finite.
pub const MAX_EFFORT_HOURS: f64 = 1.0e9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirement {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    /// When false the requirement stays in the snapshot for the audit trail
    /// but drops out of every denominator.
    pub applicable: bool,
    /// Must reach a terminal status before the overall process may proceed.
    pub blocking: bool,
    pub effort_hours: f64,
    pub target_date: Option<NaiveDate>,
    pub responsible_party: String,
    pub evidence_reference: String,
    pub gap_description: String,
    pub mitigation_plan: String,
    pub verification_method: String,
    pub notes: String,
}

impl Requirement {
    pub fn new(id: impl Into<String>, category: Category, priority: Priority, status: Status) -> Self {
        Self {
            id: id.into(),
            category,
            title: String::new(),
            description: String::new(),
            priority,
            status,
            applicable: true,
            blocking: false,
            effort_hours: 0.0,
            target_date: None,
            responsible_party: String::new(),
            evidence_reference: String::new(),
            gap_description: String::new(),
            mitigation_plan: String::new(),
            verification_method: String::new(),
            notes: String::new(),
        }
    }

    pub fn is_blocking_gap(&self) -> bool {
        self.blocking && !self.status.is_terminal()
    }

    /// Validate a loosely-typed record. `position` is the zero-based index in
    /// the input and names the record when its id is missing.
    pub fn from_raw(position: usize, raw: RawRequirement) -> Result<Self> {
        let id = required_id(position, raw.id)?;
        let category = parse_literal::<Category>(&id, "category", raw.category)?;
        let priority = parse_literal::<Priority>(&id, "priority", raw.priority)?;
        let status = parse_literal::<Status>(&id, "status", raw.status)?;

        let effort_hours = raw.effort_hours.unwrap_or(0.0);
        if !effort_hours.is_finite() || effort_hours < 0.0 {
            return Err(ReadinessError::schema(
                &id,
                "effort_hours",
                format!("must be a non-negative number, got {effort_hours}"),
            ));
        }
        if effort_hours > MAX_EFFORT_HOURS {
            return Err(ReadinessError::schema(
                &id,
                "effort_hours",
                format!("must not exceed {MAX_EFFORT_HOURS} hours, got {effort_hours}"),
            ));
        }

        let target_date = parse_date(&id, "target_date", raw.target_date)?;

        Ok(Self {
            category,
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            priority,
            status,
            applicable: raw.applicable.unwrap_or(true),
            blocking: raw.blocking.unwrap_or(false),
            effort_hours,
            target_date,
            responsible_party: raw.responsible_party.unwrap_or_default(),
            evidence_reference: raw.evidence_reference.unwrap_or_default(),
            gap_description: raw.gap_description.unwrap_or_default(),
            mitigation_plan: raw.mitigation_plan.unwrap_or_default(),
            verification_method: raw.verification_method.unwrap_or_default(),
            notes: raw.notes.unwrap_or_default(),
            id,
        })
    }
}

/// A requirement record as it appears on the wire, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawRequirement {
    pub id: Option<String>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub applicable: Option<bool>,
    pub blocking: Option<bool>,
    pub effort_hours: Option<f64>,
    pub target_date: Option<String>,
    pub responsible_party: Option<String>,
    pub evidence_reference: Option<String>,
    pub gap_description: Option<String>,
    pub mitigation_plan: Option<String>,
    pub verification_method: Option<String>,
    pub notes: Option<String>,
}

impl RawRequirement {
    /// Read one record field by field; a mistyped field names the record.
    pub fn from_value(position: usize, value: &Value) -> Result<Self> {
        let fields = RecordFields::new(position, value)?;
        Ok(Self {
            id: fields.get("id")?,
            category: fields.get("category")?,
            title: fields.get("title")?,
            description: fields.get("description")?,
            priority: fields.get("priority")?,
            status: fields.get("status")?,
            applicable: fields.get("applicable")?,
            blocking: fields.get("blocking")?,
            effort_hours: fields.get("effort_hours")?,
            target_date: fields.get("target_date")?,
            responsible_party: fields.get("responsible_party")?,
            evidence_reference: fields.get("evidence_reference")?,
            gap_description: fields.get("gap_description")?,
            mitigation_plan: fields.get("mitigation_plan")?,
            verification_method: fields.get("verification_method")?,
            notes: fields.get("notes")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Finding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub id: String,
    pub category: Category,
    pub description: String,
    pub status: FindingStatus,
    pub target_closure_date: Option<NaiveDate>,
}

impl Finding {
    pub fn from_raw(position: usize, raw: RawFinding) -> Result<Self> {
        let id = required_id(position, raw.id)?;
        let category = parse_literal::<Category>(&id, "category", raw.category)?;
        let status = parse_literal::<FindingStatus>(&id, "status", raw.status)?;
        let target_closure_date = parse_date(&id, "target_closure_date", raw.target_closure_date)?;
        Ok(Self {
            category,
            description: raw.description.unwrap_or_default(),
            status,
            target_closure_date,
            id,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawFinding {
    pub id: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub target_closure_date: Option<String>,
}

impl RawFinding {
    pub fn from_value(position: usize, value: &Value) -> Result<Self> {
        let fields = RecordFields::new(position, value)?;
        Ok(Self {
            id: fields.get("id")?,
            category: fields.get("category")?,
            description: fields.get("description")?,
            status: fields.get("status")?,
            target_closure_date: fields.get("target_closure_date")?,
        })
    }
}

// ---------------------------------------------------------------------------
// ChecklistQuestion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistQuestion {
    pub id: String,
    pub category: Category,
    pub question: String,
    pub risk_level: Priority,
}

impl ChecklistQuestion {
    pub fn from_raw(position: usize, raw: RawChecklistQuestion) -> Result<Self> {
        let id = required_id(position, raw.id)?;
        let category = parse_literal::<Category>(&id, "category", raw.category)?;
        let risk_level = parse_literal::<Priority>(&id, "risk_level", raw.risk_level)?;
        let question = raw.question.unwrap_or_default();
        if question.trim().is_empty() {
            return Err(ReadinessError::schema(&id, "question", "must not be empty"));
        }
        Ok(Self {
            id,
            category,
            question,
            risk_level,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawChecklistQuestion {
    pub id: Option<String>,
    pub category: Option<String>,
    pub question: Option<String>,
    pub risk_level: Option<String>,
}

impl RawChecklistQuestion {
    pub fn from_value(position: usize, value: &Value) -> Result<Self> {
        let fields = RecordFields::new(position, value)?;
        Ok(Self {
            id: fields.get("id")?,
            category: fields.get("category")?,
            question: fields.get("question")?,
            risk_level: fields.get("risk_level")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Field validation helpers
// ---------------------------------------------------------------------------

/// A record as a JSON object, read one field at a time so a type error
/// names the record and the field. Null and absent fields read as `None`.
struct RecordFields<'a> {
    record: String,
    map: &'a Map<String, Value>,
}

impl<'a> RecordFields<'a> {
    fn new(position: usize, value: &'a Value) -> Result<Self> {
        let fallback = format!("#{}", position + 1);
        let Value::Object(map) = value else {
            return Err(ReadinessError::schema(fallback, "record", "expected an object"));
        };
        let record = match map.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            _ => fallback,
        };
        Ok(Self { record, map })
    }

    fn get<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>> {
        match self.map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ReadinessError::schema(&self.record, field, e.to_string())),
        }
    }
}

fn required_id(position: usize, id: Option<String>) -> Result<String> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id.trim().to_string()),
        _ => Err(ReadinessError::schema(
            format!("#{}", position + 1),
            "id",
            "missing or empty id",
        )),
    }
}

fn parse_literal<T>(record: &str, field: &str, value: Option<String>) -> Result<T>
where
    T: FromStr<Err = UnknownLiteral>,
{
    let Some(value) = value else {
        return Err(ReadinessError::schema(record, field, "missing required value"));
    };
    value
        .parse::<T>()
        .map_err(|e| ReadinessError::schema(record, field, e.to_string()))
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (the date part is kept).
/// Blank strings read as absent.
pub(crate) fn parse_date(record: &str, field: &str, value: Option<String>) -> Result<Option<NaiveDate>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| {
            ReadinessError::schema(
                record,
                field,
                format!("'{trimmed}' is not an ISO 8601 date"),
            )
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
