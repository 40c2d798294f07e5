#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const AS_OF: &str = "2025-03-01";

fn readiness(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("readiness").unwrap();
    cmd.current_dir(dir.path()).env_remove("READINESS_CONFIG");
    cmd
}

fn audit_checklist(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("audit-checklist").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// 15 requirements: 5 COMPLIANT, 2 VERIFIED, 5 IN_PROGRESS,
/// 2 PARTIALLY_COMPLIANT, 1 NOT_STARTED; seven of them are blocking gaps.
fn fifteen_json() -> String {
    let rows: [(&str, &str, bool, f64, Option<&str>, &str); 15] = [
        ("REQ-01", "COMPLIANT", true, 0.0, Some("2025-01-10"), ""),
        ("REQ-02", "COMPLIANT", false, 0.0, None, ""),
        ("REQ-03", "COMPLIANT", true, 0.0, None, ""),
        ("REQ-04", "COMPLIANT", false, 0.0, Some("2025-02-01"), ""),
        ("REQ-05", "COMPLIANT", false, 0.0, None, ""),
        ("REQ-06", "VERIFIED", true, 0.0, None, ""),
        ("REQ-07", "VERIFIED", false, 0.0, None, ""),
        ("REQ-08", "IN_PROGRESS", true, 120.0, Some("2025-03-20"), "Complete hazard analysis"),
        ("REQ-09", "IN_PROGRESS", true, 100.0, Some("2025-04-15"), "Update CER"),
        ("REQ-10", "IN_PROGRESS", true, 80.0, Some("2025-03-05"), ""),
        ("REQ-11", "IN_PROGRESS", true, 90.0, Some("2025-05-01"), "Add literature review"),
        ("REQ-12", "IN_PROGRESS", false, 120.0, None, ""),
        ("REQ-13", "PARTIALLY_COMPLIANT", true, 80.0, Some("2025-04-30"), "Rework GSPR checklist"),
        ("REQ-14", "PARTIALLY_COMPLIANT", true, 0.0, None, ""),
        ("REQ-15", "NOT_STARTED", true, 40.0, Some("2025-06-30"), ""),
    ];
    let categories = ["risk_management", "clinical_evaluation", "technical_documentation"];
    let records: Vec<serde_json::Value> = rows
        .iter()
        .enumerate()
        .map(|(i, (id, status, blocking, hours, date, plan))| {
            serde_json::json!({
                "id": id,
                "category": categories[i % 3],
                "title": format!("Requirement {}", i + 1),
                "priority": "HIGH",
                "status": status,
                "blocking": blocking,
                "effort_hours": hours,
                "target_date": date,
                "mitigation_plan": plan,
            })
        })
        .collect();
    serde_json::json!({ "title": "MDR transition", "requirements": records }).to_string()
}

fn run_json(dir: &TempDir, input: &PathBuf) -> serde_json::Value {
    let out = readiness(dir)
        .arg(input)
        .args(["--output", "json", "--as-of", AS_OF])
        .output()
        .unwrap();
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// readiness: text output
// ---------------------------------------------------------------------------

#[test]
fn text_report_for_fifteen_requirements() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", &fifteen_json());

    readiness(&dir)
        .arg(&input)
        .args(["--as-of", AS_OF])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMPLIANCE READINESS REPORT: MDR transition"))
        .stdout(predicate::str::contains("Overall readiness: 61.3%"))
        .stdout(predicate::str::contains("NOT_READY (7 blocking gap(s))"))
        .stdout(predicate::str::contains("Total: 630.0 h = 15.75 weeks"))
        .stdout(predicate::str::contains("2025-03  2 item(s)"));
}

#[test]
fn empty_collection_reports_no_data() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "empty.json", "[]");

    readiness(&dir)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall readiness: no data"))
        .stdout(predicate::str::contains("READY (0 blocking gap(s))"));

    let json = run_json(&dir, &input);
    assert!(json["overall_readiness_pct"].is_null());
}

#[test]
fn yaml_input_is_accepted() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "reqs.yaml",
        "- id: A\n  category: labeling\n  priority: LOW\n  status: verified\n",
    );
    readiness(&dir)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall readiness: 100.0%"));
}

// ---------------------------------------------------------------------------
// readiness: JSON and round-trip
// ---------------------------------------------------------------------------

#[test]
fn json_matches_text_figures() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", &fifteen_json());

    let json = run_json(&dir, &input);
    assert_eq!(json["overall_readiness_pct"].as_f64(), Some(61.3));
    assert_eq!(json["blocking_gaps"].as_array().unwrap().len(), 7);
    assert_eq!(json["effort"]["total_hours"].as_f64(), Some(630.0));
    assert_eq!(json["effort"]["weeks"].as_f64(), Some(15.75));
    assert_eq!(json["readiness"]["state"], "NOT_READY");

    let text = readiness(&dir)
        .arg(&input)
        .args(["--as-of", AS_OF])
        .output()
        .unwrap();
    let text = String::from_utf8(text.stdout).unwrap();
    let pct = json["overall_readiness_pct"].as_f64().unwrap();
    assert!(text.contains(&format!("Overall readiness: {pct:.1}%")));
    let gaps = json["blocking_gaps"].as_array().unwrap().len();
    assert!(text.contains(&format!("({gaps} blocking gap(s))")));
    let hours = json["effort"]["total_hours"].as_f64().unwrap();
    assert!(text.contains(&format!("Total: {hours:.1} h")));
}

#[test]
fn blocking_gaps_in_input_order() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", &fifteen_json());
    let json = run_json(&dir, &input);
    let ids: Vec<&str> = json["blocking_gaps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["REQ-08", "REQ-09", "REQ-10", "REQ-11", "REQ-13", "REQ-14", "REQ-15"]
    );
}

#[test]
fn json_output_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", &fifteen_json());
    let first = readiness(&dir)
        .arg(&input)
        .args(["-o", "json", "--as-of", AS_OF])
        .output()
        .unwrap();
    let second = readiness(&dir)
        .arg(&input)
        .args(["-o", "json", "--as-of", AS_OF])
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn near_ready_within_horizon() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "reqs.json",
        r#"[{"id":"A","category":"vigilance","priority":"CRITICAL","status":"IN_PROGRESS",
             "blocking":true,"target_date":"2025-03-20","mitigation_plan":"Submit MIR form"}]"#,
    );
    let json = run_json(&dir, &input);
    assert_eq!(json["readiness"]["state"], "NEAR_READY");
}

// ---------------------------------------------------------------------------
// readiness: CSV and --file
// ---------------------------------------------------------------------------

#[test]
fn csv_has_one_row_per_requirement() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", &fifteen_json());
    let out = readiness(&dir)
        .arg(&input)
        .args(["--output", "csv"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let csv = String::from_utf8(out.stdout).unwrap();
    assert_eq!(csv.lines().count(), 16);
    assert!(csv.starts_with("id,category,priority,status"));
    assert!(csv.contains("REQ-15,technical_documentation,HIGH,NOT_STARTED,true,true,true,40,2025-06-30,"));
}

#[test]
fn file_flag_writes_report() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", &fifteen_json());
    readiness(&dir)
        .arg(&input)
        .args(["-f", "out/report.json", "-o", "json", "--as-of", AS_OF])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(dir.path().join("out/report.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["overall_readiness_pct"].as_f64(), Some(61.3));
}

// ---------------------------------------------------------------------------
// readiness: configuration
// ---------------------------------------------------------------------------

#[test]
fn config_overrides_weights_and_week_length() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", &fifteen_json());
    let config = write(
        &dir,
        "readiness.yaml",
        "weights:\n  compliant: 1.0\nhours_per_week: 30\n",
    );
    let out = readiness(&dir)
        .arg(&input)
        .args(["-o", "json", "--as-of", AS_OF, "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    // (5 × 1.0 + 2 × 1.0 + 5 × 0.3 + 2 × 0.6) / 15 = 64.67%
    assert_eq!(json["overall_readiness_pct"].as_f64(), Some(64.7));
    assert_eq!(json["effort"]["weeks"].as_f64(), Some(21.0));
}

#[test]
fn invalid_config_exits_3() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", "[]");
    let config = write(&dir, "readiness.yaml", "hours_per_week: 0\n");
    readiness(&dir)
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("hours_per_week"));
}

// ---------------------------------------------------------------------------
// readiness: failures
// ---------------------------------------------------------------------------

#[test]
fn missing_input_exits_1() {
    let dir = TempDir::new().unwrap();
    readiness(&dir)
        .arg("nope.json")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("input not found"));
}

#[test]
fn unknown_status_exits_3_naming_record() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "reqs.json",
        r#"[{"id":"REQ-1","category":"labeling","priority":"LOW","status":"COMPLIANT"},
            {"id":"REQ-2","category":"labeling","priority":"LOW","status":"DONE"}]"#,
    );
    readiness(&dir)
        .arg(&input)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("REQ-2"))
        .stderr(predicate::str::contains("status"));
}

#[test]
fn negative_effort_exits_3() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "reqs.json",
        r#"[{"id":"REQ-1","category":"labeling","priority":"LOW","status":"NOT_STARTED","effort_hours":-1}]"#,
    );
    readiness(&dir)
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("effort_hours"));
}

#[test]
fn mistyped_field_exits_3_naming_record_and_field() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "reqs.json",
        r#"{"title":"MDR","requirements":[
            {"id":"REQ-1","category":"labeling","priority":"LOW","status":"COMPLIANT"},
            {"id":"REQ-2","category":"labeling","priority":"LOW","status":"NOT_STARTED","effort_hours":"ten"}
        ]}"#,
    );
    readiness(&dir)
        .arg(&input)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("REQ-2"))
        .stderr(predicate::str::contains("effort_hours"));
}

#[test]
fn oversized_effort_exits_3() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "reqs.json",
        r#"[{"id":"REQ-1","category":"labeling","priority":"LOW","status":"NOT_STARTED","effort_hours":1e302}]"#,
    );
    readiness(&dir)
        .arg(&input)
        .args(["-o", "json"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("effort_hours"));
}

#[test]
fn malformed_json_exits_3() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", "{\"requirements\": [");
    readiness(&dir).arg(&input).assert().code(3);
}

#[test]
fn failure_does_not_create_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reqs.json", r#"[{"id":"A"}]"#);
    readiness(&dir)
        .arg(&input)
        .args(["-f", "report.txt"])
        .assert()
        .code(3);
    assert!(!dir.path().join("report.txt").exists());
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    readiness(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("readiness"));
}

// ---------------------------------------------------------------------------
// audit-checklist
// ---------------------------------------------------------------------------

const AUDIT_DOC: &str = r#"{
  "title": "Supplier audit",
  "risk_areas": ["supplier_control"],
  "findings": [
    {"id":"F-1","category":"supplier_control","description":"Unqualified supplier","status":"OPEN","target_closure_date":"2025-02-15"},
    {"id":"F-2","category":"labeling","description":"IFU outdated","status":"CLOSED"},
    {"id":"F-3","category":"design_controls","description":"Missing DHF entry","status":"CAR","target_closure_date":"2025-04-01"}
  ],
  "questions": [
    {"id":"Q-1","category":"labeling","question":"Are labels reviewed?","risk_level":"LOW"},
    {"id":"Q-2","category":"vigilance","question":"Are incidents reported on time?","risk_level":"CRITICAL"},
    {"id":"Q-3","category":"supplier_control","question":"Are suppliers qualified?","risk_level":"MEDIUM"},
    {"id":"Q-4","category":"design_controls","question":"Are design reviews held?","risk_level":"HIGH"}
  ]
}"#;

#[test]
fn audit_prioritizes_and_follows_up() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "audit.json", AUDIT_DOC);
    let out = audit_checklist(&dir)
        .arg(&input)
        .args(["-o", "json", "--as-of", AS_OF])
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();

    let order: Vec<&str> = json["checklist"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["Q-2", "Q-3", "Q-4", "Q-1"]);

    let follow: Vec<&str> = json["follow_ups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["finding_id"].as_str().unwrap())
        .collect();
    assert_eq!(follow, vec!["F-1", "F-3"]);
    assert_eq!(json["follow_ups"][0]["questions"].as_array().unwrap().len(), 4);
    assert_eq!(json["overdue_findings"], serde_json::json!(["F-1"]));
}

#[test]
fn audit_risk_area_flag_adds_bonus() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "audit.json", AUDIT_DOC);
    let out = audit_checklist(&dir)
        .arg(&input)
        .args(["-o", "csv", "--risk-area", "labeling"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let csv = String::from_utf8(out.stdout).unwrap();
    assert!(csv.contains("Q-1,labeling,LOW,true,3,"));
}

#[test]
fn audit_text_uses_standard_bank_without_questions() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "audit.yaml", "findings: []\n");
    audit_checklist(&dir)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("standard question bank"))
        .stdout(predicate::str::contains("No open findings"));
}

#[test]
fn audit_mistyped_finding_exits_3() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "audit.yaml",
        "findings:\n  - id: F-4\n    category: labeling\n    status: OPEN\n    description: [a, b]\n",
    );
    audit_checklist(&dir)
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("F-4"))
        .stderr(predicate::str::contains("description"));
}

#[test]
fn audit_unknown_finding_status_exits_3() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "audit.json",
        r#"{"findings":[{"id":"F-7","category":"labeling","status":"PENDING"}]}"#,
    );
    audit_checklist(&dir)
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("F-7"));
}
