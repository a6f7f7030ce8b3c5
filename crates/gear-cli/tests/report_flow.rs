//! End-to-end tests for the report and mounted commands.
//!
//! Runs the `gear` binary against rule and activity files in a temp directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn gear_binary() -> String {
    env!("CARGO_BIN_EXE_gear").to_string()
}

const RULES: &str = r#"{
    "bike_names": {"B1": "Road", "B2": "Gravel"},
    "components": [
        {"ident": "W1", "name": "Front wheel"},
        {"ident": "C1", "name": "Chain"}
    ],
    "rules": [
        {"since": "2024-01-01T00:00:00Z", "bikes": {"B1": {"wheel": "W1", "chain": "C1"}}},
        {"since": "2024-02-01T00:00:00Z", "bikes": {"B2": {"wheel": "W1"}}}
    ]
}"#;

const ACTIVITIES: &str = r#"[
    {"id": "1", "name": "Morning ride", "start_date": "2024-01-10T07:00:00Z",
     "bike": "B1", "distance": 30000.0, "moving_time": 3600.0},
    {"id": "2", "name": "Gravel loop", "start_date": "2024-02-01T00:00:00Z",
     "bike": "B2", "distance": 10000.0, "moving_time": 1800.0},
    {"id": "3", "name": "Run", "start_date": "2024-02-03T07:00:00Z",
     "distance": 8000.0, "moving_time": 2400.0}
]"#;

fn write_fixtures(dir: &Path, rules: &str) {
    std::fs::write(dir.join("rules.json"), rules).unwrap();
    std::fs::write(dir.join("activities.json"), ACTIVITIES).unwrap();
}

fn run_gear(temp: &TempDir, args: &[&str]) -> Output {
    Command::new(gear_binary())
        .env("HOME", temp.path())
        .env_remove("GEAR_RULES_PATH")
        .env_remove("GEAR_ACTIVITIES_PATH")
        .arg("--rules")
        .arg(temp.path().join("rules.json"))
        .arg("--activities")
        .arg(temp.path().join("activities.json"))
        .args(args)
        .output()
        .expect("failed to run gear")
}

#[test]
fn test_report_totals_follow_reassignment() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), RULES);

    let output = run_gear(&temp, &["report"]);

    assert!(
        output.status.success(),
        "gear report should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "Front wheel     40.0 km     1.5 h");
    assert_eq!(lines[2], "Chain           30.0 km     1.0 h");
    assert!(stdout.contains("1 activity had no components mounted."));
}

#[test]
#[expect(
    clippy::float_cmp,
    reason = "integral meters and seconds are exact in f64"
)]
fn test_report_json() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), RULES);

    let output = run_gear(&temp, &["report", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["unassigned_activities"], 1);
    assert_eq!(json["components"][0]["ident"], "W1");
    assert_eq!(json["components"][0]["distance"].as_f64().unwrap(), 40_000.0);
    assert_eq!(json["components"][1]["time"].as_f64().unwrap(), 3_600.0);
}

#[test]
fn test_report_rejects_misordered_rules() {
    let temp = TempDir::new().unwrap();
    let misordered = RULES.replace("2024-02-01T00:00:00Z", "2023-12-01T00:00:00Z");
    write_fixtures(temp.path(), &misordered);

    let output = run_gear(&temp, &["report"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to replay activities"), "{stderr}");
    assert!(stderr.contains("cannot follow"), "{stderr}");
}

#[test]
fn test_mounted_at_past_time() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), RULES);

    let output = run_gear(&temp, &["mounted", "--at", "2024-01-15T00:00:00Z"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("  Road (B1)\n    chain: Chain (C1)\n    wheel: Front wheel (W1)\n"));
    assert!(!stdout.contains("Gravel"));
}

#[test]
fn test_missing_rules_file_fails_with_path() {
    let temp = TempDir::new().unwrap();

    let output = run_gear(&temp, &["report"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rules.json"), "{stderr}");
}
