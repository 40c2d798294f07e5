use crate::error::{ReadinessError, Result};
use crate::model::{ChecklistQuestion, Finding, RawChecklistQuestion, RawFinding, RawRequirement};
use crate::snapshot::Snapshot;
use crate::types::Category;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// A reader never observes a half-written report.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// InputFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// `.yaml` / `.yml` read as YAML, everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            _ => InputFormat::Json,
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ReadinessError::InputNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| ReadinessError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse into a format-neutral value tree. Records are read one at a time
/// afterwards, so type errors can name the record and field.
fn parse_document(path: &Path, data: &str) -> Result<Value> {
    let parsed = match InputFormat::from_path(path) {
        InputFormat::Json => serde_json::from_str(data).map_err(|e| e.to_string()),
        InputFormat::Yaml => serde_yaml::from_str(data).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| malformed(path, message))
}

fn malformed(path: &Path, message: impl Into<String>) -> ReadinessError {
    ReadinessError::Malformed {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn take_title(path: &Path, doc: &mut Map<String, Value>) -> Result<Option<String>> {
    match doc.remove("title") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(title)) => Ok(Some(title)),
        Some(_) => Err(malformed(path, "`title` must be a string")),
    }
}

fn take_list(path: &Path, doc: &mut Map<String, Value>, key: &str) -> Result<Option<Vec<Value>>> {
    match doc.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(malformed(path, format!("`{key}` must be a list"))),
    }
}

// ---------------------------------------------------------------------------
// Requirements
// ---------------------------------------------------------------------------

/// Accepts either a bare list of records or `{ title, requirements: [...] }`.
pub fn parse_requirements(path: &Path, data: &str) -> Result<Snapshot> {
    let (title, records) = match parse_document(path, data)? {
        Value::Array(records) => (None, records),
        Value::Object(mut doc) => {
            let title = take_title(path, &mut doc)?;
            let records = take_list(path, &mut doc, "requirements")?.ok_or_else(|| {
                malformed(path, "expected a list of requirements or a `requirements` key")
            })?;
            (title, records)
        }
        _ => {
            return Err(malformed(
                path,
                "expected a list of requirements or a `requirements` key",
            ))
        }
    };
    let raw = records
        .iter()
        .enumerate()
        .map(|(i, v)| RawRequirement::from_value(i, v))
        .collect::<Result<Vec<_>>>()?;
    Ok(Snapshot::from_raw(raw)?.with_title(title))
}

pub fn load_requirements(path: &Path) -> Result<Snapshot> {
    let data = read_input(path)?;
    parse_requirements(path, &data)
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// Validated input of the audit-checklist generator.
#[derive(Debug, Clone, Default)]
pub struct AuditInput {
    pub title: Option<String>,
    pub findings: Vec<Finding>,
    /// `None` when the document carries no question list; the standard
    /// question bank applies then.
    pub questions: Option<Vec<ChecklistQuestion>>,
    pub risk_areas: BTreeSet<Category>,
}

/// Reads `{ title, findings, questions, risk_areas }`; every key is optional.
pub fn parse_audit(path: &Path, data: &str) -> Result<AuditInput> {
    let mut doc = match parse_document(path, data)? {
        Value::Object(doc) => doc,
        Value::Null => Map::new(),
        _ => return Err(malformed(path, "expected an audit document object")),
    };
    let title = take_title(path, &mut doc)?;

    let findings = take_list(path, &mut doc, "findings")?
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, v)| RawFinding::from_value(i, v).and_then(|raw| Finding::from_raw(i, raw)))
        .collect::<Result<Vec<_>>>()?;
    let mut seen = BTreeSet::new();
    for f in &findings {
        if !seen.insert(f.id.as_str()) {
            return Err(ReadinessError::schema(&f.id, "id", "duplicate id"));
        }
    }

    let questions = take_list(path, &mut doc, "questions")?
        .map(|qs| {
            qs.iter()
                .enumerate()
                .map(|(i, v)| {
                    RawChecklistQuestion::from_value(i, v)
                        .and_then(|raw| ChecklistQuestion::from_raw(i, raw))
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    let risk_areas = take_list(path, &mut doc, "risk_areas")?
        .unwrap_or_default()
        .iter()
        .map(|v| {
            let literal = v.as_str().ok_or_else(|| {
                ReadinessError::schema(
                    "risk_areas",
                    "risk_areas",
                    format!("expected a category name, got {v}"),
                )
            })?;
            literal
                .parse::<Category>()
                .map_err(|e| ReadinessError::schema("risk_areas", "risk_areas", e.to_string()))
        })
        .collect::<Result<BTreeSet<_>>>()?;

    Ok(AuditInput {
        title: title.filter(|t| !t.trim().is_empty()),
        findings,
        questions,
        risk_areas,
    })
}

pub fn load_audit(path: &Path) -> Result<AuditInput> {
    let data = read_input(path)?;
    parse_audit(path, &data)
}
