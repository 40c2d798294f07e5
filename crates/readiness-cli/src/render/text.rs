use crate::output::format_table;
use readiness_core::summary::{AuditSummary, ReadinessSummary};
use std::fmt::Write as _;

pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(p) => format!("{p:.1}%"),
        None => "no data".to_string(),
    }
}

fn or_dash(s: &str) -> String {
    if s.trim().is_empty() {
        "-".to_string()
    } else {
        s.trim().to_string()
    }
}

pub fn readiness(summary: &ReadinessSummary) -> String {
    let mut out = String::new();
    match &summary.title {
        Some(title) => {
            let _ = writeln!(out, "COMPLIANCE READINESS REPORT: {title}");
        }
        None => out.push_str("COMPLIANCE READINESS REPORT\n"),
    }
    let _ = writeln!(out, "As of: {}", summary.as_of);
    let _ = writeln!(
        out,
        "Requirements: {} (applicable: {})",
        summary.requirement_count, summary.applicable_count
    );
    out.push('\n');

    let _ = writeln!(
        out,
        "Overall readiness: {}",
        percent(summary.overall_readiness_pct)
    );
    let _ = writeln!(
        out,
        "Readiness state:   {} ({} blocking gap(s))",
        summary.readiness.state, summary.readiness.blocking_gap_count
    );
    out.push('\n');

    out.push_str("STATUS DISTRIBUTION\n");
    for (status, count) in &summary.status_distribution {
        let _ = writeln!(out, "  {:<22} {}", status, count);
    }
    out.push('\n');

    if summary.blocking_gaps.is_empty() {
        out.push_str("BLOCKING GAPS  None\n");
    } else {
        let _ = writeln!(out, "BLOCKING GAPS  {}", summary.blocking_gaps.len());
        let rows: Vec<Vec<String>> = summary
            .blocking_gaps
            .iter()
            .map(|g| {
                let target = match g.target_date {
                    Some(d) if g.overdue => format!("{d} (overdue)"),
                    Some(d) => d.to_string(),
                    None => "-".to_string(),
                };
                vec![
                    g.id.clone(),
                    g.category.to_string(),
                    g.status.to_string(),
                    target,
                    or_dash(&g.responsible_party),
                    or_dash(&g.gap_description),
                    or_dash(&g.mitigation_plan),
                ]
            })
            .collect();
        out.push_str(&format_table(
            &["ID", "CATEGORY", "STATUS", "TARGET", "OWNER", "GAP", "MITIGATION"],
            &rows,
        ));
    }
    if !summary.readiness.blocking_categories.is_empty() {
        let cats: Vec<String> = summary
            .readiness
            .blocking_categories
            .iter()
            .map(|c| c.to_string())
            .collect();
        let _ = writeln!(out, "Blocked categories: {}", cats.join(", "));
    }
    out.push('\n');

    let e = &summary.effort;
    out.push_str("REMAINING EFFORT\n");
    let _ = writeln!(
        out,
        "  Not started: {:.1} h | In progress: {:.1} h | Partially compliant: {:.1} h",
        e.not_started_hours, e.in_progress_hours, e.partially_compliant_hours
    );
    let _ = writeln!(
        out,
        "  Total: {:.1} h = {:.2} weeks at {} h/week",
        e.total_hours, e.weeks, e.hours_per_week
    );
    out.push('\n');

    if summary.timeline.is_empty() {
        out.push_str("TIMELINE  No dated requirements\n");
    } else {
        out.push_str("TIMELINE\n");
        for bucket in &summary.timeline {
            let ids: Vec<&str> = bucket.items.iter().map(|i| i.id.as_str()).collect();
            let _ = writeln!(
                out,
                "  {}  {} item(s), {} blocking: {}",
                bucket.month,
                bucket.total_count,
                bucket.blocking_count,
                ids.join(", ")
            );
        }
    }
    out.push('\n');

    out.push_str("CATEGORY COVERAGE\n");
    if summary.categories.is_empty() {
        out.push_str("  No requirements\n");
    } else {
        let rows: Vec<Vec<String>> = summary
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.label().to_string(),
                    c.total.to_string(),
                    c.compliant.to_string(),
                    c.in_progress.to_string(),
                    c.not_started.to_string(),
                    c.excluded.to_string(),
                    percent(c.percent_complete),
                    c.blocking_gap_ids.len().to_string(),
                ]
            })
            .collect();
        out.push_str(&format_table(
            &[
                "CATEGORY",
                "TOTAL",
                "COMPLIANT",
                "IN PROGRESS",
                "NOT STARTED",
                "EXCLUDED",
                "COMPLETE",
                "BLOCKING",
            ],
            &rows,
        ));
    }
    out
}

pub fn audit(summary: &AuditSummary) -> String {
    let mut out = String::new();
    match &summary.title {
        Some(title) => {
            let _ = writeln!(out, "AUDIT CHECKLIST: {title}");
        }
        None => out.push_str("AUDIT CHECKLIST\n"),
    }
    let _ = writeln!(out, "As of: {}", summary.as_of);
    if summary.risk_areas.is_empty() {
        out.push_str("Risk areas: none\n");
    } else {
        let areas: Vec<String> = summary.risk_areas.iter().map(|c| c.to_string()).collect();
        let _ = writeln!(out, "Risk areas: {}", areas.join(", "));
    }
    let counts: Vec<String> = summary
        .finding_counts
        .iter()
        .map(|(status, n)| format!("{status} {n}"))
        .collect();
    let _ = writeln!(out, "Findings: {}", counts.join(" | "));
    out.push('\n');

    let source = if summary.standard_checklist {
        "standard question bank"
    } else {
        "supplied questions"
    };
    let _ = writeln!(out, "PRIORITIZED CHECKLIST ({source})");
    let rows: Vec<Vec<String>> = summary
        .checklist
        .iter()
        .enumerate()
        .map(|(i, q)| {
            vec![
                (i + 1).to_string(),
                q.priority_score.to_string(),
                q.risk_level.to_string(),
                q.category.to_string(),
                q.id.clone(),
                q.question.clone(),
            ]
        })
        .collect();
    out.push_str(&format_table(
        &["#", "SCORE", "RISK", "CATEGORY", "ID", "QUESTION"],
        &rows,
    ));
    out.push('\n');

    if summary.follow_ups.is_empty() {
        out.push_str("FOLLOW-UP  No open findings\n");
        return out;
    }
    out.push_str("FOLLOW-UP\n");
    for f in &summary.follow_ups {
        let target = match f.target_closure_date {
            Some(d) if f.overdue => format!(", target {d}, OVERDUE"),
            Some(d) => format!(", target {d}"),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "  {} [{}] {}: {}{}",
            f.finding_id,
            f.status,
            f.category,
            or_dash(&f.description),
            target
        );
        for (i, q) in f.questions.iter().enumerate() {
            let _ = writeln!(out, "    {}. {}", i + 1, q);
        }
        let _ = writeln!(
            out,
            "    Required evidence: {}",
            f.required_evidence.join(", ")
        );
    }
    out
}
