//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ROSTER: &str = "Name,Marks,Attendance,StudyHours
Alice,85,92,4.5
Bob,40,80,2
Carol,70,76,3
";

/// A command isolated from the caller's config and credentials.
fn edupulse(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("edupulse").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("EDUPULSE_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn write_roster(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("roster.csv");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_valid_roster() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, ROSTER);

    edupulse(dir.path())
        .arg("validate")
        .arg("--input")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 students"))
        .stdout(predicate::str::contains("All records valid"))
        .stdout(predicate::str::contains("1 student(s) currently below"));
}

#[test]
fn validate_header_only_roster() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "Name,Marks,Attendance,StudyHours\n");

    edupulse(dir.path())
        .arg("validate")
        .arg("--input")
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid file format"))
        .stderr(predicate::str::contains("Name, Marks, Attendance, StudyHours"));
}

#[test]
fn validate_out_of_range_marks() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "Name,Marks,Attendance,StudyHours\nAlice,101,90,2\n");

    edupulse(dir.path())
        .arg("validate")
        .arg("--input")
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("marks must be between 0 and 100"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    edupulse(dir.path())
        .arg("validate")
        .arg("--input")
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn analyze_text_without_insight() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, ROSTER);

    edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .arg("--no-insight")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pass Rate"))
        .stdout(predicate::str::contains("67%"))
        .stdout(predicate::str::contains("82.7%"))
        .stdout(predicate::str::contains("87 pts"))
        .stdout(predicate::str::contains("Passed: 2  Failed: 1"))
        .stdout(predicate::str::contains("Insights").not());
}

#[test]
fn analyze_json_output() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, ROSTER);

    let output = edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .arg("--no-insight")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["total"], 3);
    assert_eq!(json["stats"]["pass_rate"], 67);
    assert_eq!(json["stats"]["avg_marks"].as_f64(), Some(65.0));
    assert_eq!(json["stats"]["avg_study_hours"].as_f64(), Some(3.2));
    assert_eq!(json["pass_fail"]["passed"], 2);
    let ranking: Vec<&str> = json["ranking"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(ranking, ["Alice", "Carol", "Bob"]);
    assert!(json["insight"].is_null());
}

#[test]
fn analyze_without_credentials_uses_fallback() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, ROSTER);

    edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Class Performance Report"))
        .stdout(predicate::str::contains("## Insights"))
        .stdout(predicate::str::contains(
            "AI insights currently unavailable. Please try again later.",
        ));
}

#[test]
fn analyze_respects_disabled_insights() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, ROSTER);
    std::fs::write(dir.path().join("edupulse.toml"), "insights = false\n").unwrap();

    edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("Insights").not());
}

#[test]
fn analyze_with_broken_config_still_reports() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, ROSTER);
    std::fs::write(dir.path().join("edupulse.toml"), "model = [oops\n").unwrap();

    edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pass Rate"))
        .stdout(predicate::str::contains("87 pts"))
        .stdout(predicate::str::contains(
            "AI insights currently unavailable. Please try again later.",
        ))
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn analyze_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, ROSTER);

    edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .arg("--config")
        .arg("missing.toml")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn analyze_invalid_roster_fails() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "Name,Marks,Attendance,StudyHours\n,50,80,2\n");

    edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid file format"));
}

#[test]
fn analyze_rejects_negative_study_hours() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "Name,Marks,Attendance,StudyHours\nAl,50,80,-2\n");

    edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .arg("--no-insight")
        .assert()
        .failure()
        .stderr(predicate::str::contains("study hours must not be negative"));
}

#[test]
fn analyze_unknown_format() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, ROSTER);

    edupulse(dir.path())
        .arg("analyze")
        .arg("--input")
        .arg(&roster)
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    edupulse(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created edupulse.toml"))
        .stdout(predicate::str::contains("Created students.csv"));

    assert!(dir.path().join("edupulse.toml").exists());
    assert!(dir.path().join("students.csv").exists());

    // The sample roster is itself valid.
    edupulse(dir.path())
        .arg("validate")
        .arg("--input")
        .arg("students.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 students"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    edupulse(dir.path()).arg("init").assert().success();

    edupulse(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn list_models_without_key() {
    let dir = TempDir::new().unwrap();

    edupulse(dir.path())
        .arg("list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: gemini"))
        .stdout(predicate::str::contains("gemini-3-flash-preview"))
        .stdout(predicate::str::contains("(configured)"))
        .stdout(predicate::str::contains("No API key configured"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    edupulse(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Student performance analytics"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();

    edupulse(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edupulse"));
}
