//! CLI integration tests
//!
//! Each test runs the `roadmap` binary against `tests/fixtures/roadmap.json`
//! with a fixed reference date, so output does not depend on the clock.

use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/roadmap.json")
}

fn roadmap(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_roadmap"))
        .args(args)
        .env_remove("ROADMAP_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute roadmap")
}

/// Run `command` on the fixture for January 2025
fn run(command: &str, extra: &[&str]) -> Output {
    let data = fixture();
    let mut args = vec![
        command,
        data.to_str().unwrap(),
        "--date",
        "2025-01-15",
        "--today",
        "2025-01-15",
    ];
    args.extend_from_slice(extra);
    roadmap(&args)
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

// =============================================================================
// export
// =============================================================================

#[test]
fn export_prints_csv() {
    let csv = stdout(&run("export", &[]));
    assert_eq!(
        csv,
        [
            "Sprint,Produit,Début,Fin,Durée (jours),Statut,Stories,Points,Progrès (%)",
            "\"Sprint 1\",\"[ABC] Alpha\",2025-01-01,2025-01-10,10,active,3,8,50",
            "\"Sprint 2\",\"\",2025-01-13,2025-01-24,12,planned,1,5,0",
        ]
        .join("\n")
    );
}

#[test]
fn export_to_file_with_bom() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmap.csv");
    let output = run("export", &["--bom", "-o", path.to_str().unwrap()]);
    assert!(stdout(&output).is_empty());

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 3);
}

#[test]
fn export_respects_filters() {
    let csv = stdout(&run("export", &["--team", "mobile"]));
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("\"Sprint 2\""));

    let csv = stdout(&run("export", &["--granularity", "quarter"]));
    assert_eq!(csv.lines().count(), 4);
}

// =============================================================================
// layout
// =============================================================================

#[test]
fn layout_prints_view_json() {
    let json = stdout(&run("layout", &["--width", "1280", "--container-width", "620"]));
    let view: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(view["window"]["label"], "Janvier 2025");
    assert_eq!(view["sprints"].as_array().unwrap().len(), 2);
    assert_eq!(view["sprints"][0]["bar"]["left"], 0.0);
    assert_eq!(view["sprints"][0]["bar"]["width"], 200.0);
    assert_eq!(view["today"]["date"], "2025-01-15");
    assert_eq!(view["canScroll"], true);
}

#[test]
fn layout_expands_and_collapses() {
    let json = stdout(&run(
        "layout",
        &["--expand-story", "us1", "--collapse-sprint", "s2", "--zoom", "2"],
    ));
    let view: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(view["zoom"], 2.0);
    let tasks = view["sprints"][0]["stories"][0]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["assignee"], "Ada Lovelace");
    assert_eq!(view["sprints"][1]["expanded"], false);
}

#[test]
fn layout_reports_data_issues() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("broken.json");
    std::fs::write(
        &data,
        r#"{"sprints":[{"id":"x","startDate":"2025-01-09","endDate":"2025-01-02","teamId":"ghost"}]}"#,
    )
    .unwrap();

    let output = roadmap(&[
        "layout",
        data.to_str().unwrap(),
        "--date",
        "2025-01-15",
        "--today",
        "2025-01-15",
    ]);
    let view: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let kinds: Vec<&str> = view["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["missingTeam", "degenerateInterval"]);
    // logged as warnings too
    assert!(String::from_utf8_lossy(&output.stderr).contains("WARN"));
}

// =============================================================================
// stats / cards
// =============================================================================

#[test]
fn stats_prints_table() {
    let text = stdout(&run("stats", &[]));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Janvier 2025 (2025-01-01 → 2025-01-31, 31 jours)");
    assert!(lines.iter().any(|l| l.starts_with("Sprint 1") && l.ends_with("50%")));
    assert!(lines.iter().any(|l| l.starts_with("Total (2 sprints)")));
}

#[test]
fn cards_follow_viewport_width() {
    let json = stdout(&run("cards", &["--width", "375"]));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["mode"], "mobile");
    assert_eq!(value["content"][0]["period"], "01/01/2025 – 10/01/2025");

    let json = stdout(&run("cards", &["--width", "1280"]));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["mode"], "desktop");
    assert_eq!(value["content"]["rows"][0]["kind"], "sprint");
}

// =============================================================================
// config and errors
// =============================================================================

#[test]
fn config_supplies_defaults_and_flags_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("roadmap.toml");
    std::fs::write(&config, "[filters]\nteam = \"mobile\"\n").unwrap();

    let csv = stdout(&run("export", &["--config", config.to_str().unwrap()]));
    assert_eq!(csv.lines().count(), 2);

    let csv = stdout(&run(
        "export",
        &["--config", config.to_str().unwrap(), "--team", "all"],
    ));
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn missing_dataset_fails() {
    let output = roadmap(&["layout", "/nonexistent/roadmap.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read dataset"));
}

#[test]
fn unknown_granularity_is_rejected() {
    let output = run("layout", &["--granularity", "week"]);
    assert!(!output.status.success());
}
