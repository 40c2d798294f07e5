use readiness_core::snapshot::Snapshot;
use readiness_core::summary::AuditSummary;

/// Quote a field when it holds a delimiter, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn line(fields: &[String]) -> String {
    let escaped: Vec<String> = fields.iter().map(|f| escape(f)).collect();
    let mut row = escaped.join(",");
    row.push_str("\r\n");
    row
}

pub const REQUIREMENT_HEADERS: [&str; 10] = [
    "id",
    "category",
    "priority",
    "status",
    "applicable",
    "blocking",
    "blocking_gap",
    "effort_hours",
    "target_date",
    "responsible_party",
];

pub fn requirements(snapshot: &Snapshot) -> String {
    let mut out = line(&REQUIREMENT_HEADERS.map(String::from));
    for r in snapshot {
        out.push_str(&line(&[
            r.id.clone(),
            r.category.to_string(),
            r.priority.to_string(),
            r.status.to_string(),
            r.applicable.to_string(),
            r.blocking.to_string(),
            r.is_blocking_gap().to_string(),
            r.effort_hours.to_string(),
            r.target_date.map(|d| d.to_string()).unwrap_or_default(),
            r.responsible_party.clone(),
        ]));
    }
    out
}

pub fn checklist(summary: &AuditSummary) -> String {
    let mut out = line(
        &[
            "rank",
            "id",
            "category",
            "risk_level",
            "in_risk_area",
            "priority_score",
            "question",
        ]
        .map(String::from),
    );
    for (i, q) in summary.checklist.iter().enumerate() {
        out.push_str(&line(&[
            (i + 1).to_string(),
            q.id.clone(),
            q.category.to_string(),
            q.risk_level.to_string(),
            q.in_risk_area.to_string(),
            q.priority_score.to_string(),
            q.question.clone(),
        ]));
    }
    out
}
