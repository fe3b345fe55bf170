//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify outputs.

use chrono::Duration;
use daylog_core::time::logical_today;
use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_daylog"))
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

const ENTRIES: &str = r##"[
    {"id": "1", "tags": ["#sleep"], "timestamp": "2024-01-01T23:10:00+09:00"},
    {"id": "2", "tags": ["#wake"], "timestamp": "2024-01-02T07:00:00+09:00"},
    {"id": "3", "tags": ["#sleep"], "timestamp": "2024-01-02T23:30:00+09:00"},
    {"id": "4", "tags": ["#wake"], "timestamp": "2024-01-03T07:00:00+09:00"}
]"##;

#[test]
fn test_sleep_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("entries.json");
    std::fs::write(&input, ENTRIES).unwrap();

    let records = run_json(&["sleep", "records", "--input", path_str(&input)]);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["date"], "2024-01-03");
    assert_eq!(records[1]["duration_minutes"], 470);
}

#[test]
fn test_sleep_score_and_streak() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("entries.json");
    let config = dir.path().join("config.toml");
    std::fs::write(&input, ENTRIES).unwrap();

    let report = run_json(&[
        "sleep",
        "score",
        "--input",
        path_str(&input),
        "--week",
        "2024-01-03",
        "--config",
        path_str(&config),
    ]);
    assert_eq!(report["week_start"], "2024-01-01");
    let total = report["current"]["total"].as_u64().unwrap();
    assert!(total > 0 && total <= 100);
    assert_eq!(report["previous"]["total"], 0);

    let streak = run_json(&[
        "sleep",
        "streak",
        "--input",
        path_str(&input),
        "--week",
        "2024-01-03",
        "--config",
        path_str(&config),
    ]);
    assert_eq!(streak["sleep_streak"], 2);
    assert_eq!(streak["sleep_streak_met"], false);
}

#[test]
fn test_sleep_missing_input_fails() {
    let (code, _, stderr) = run_cli(&["sleep", "records", "--input", "/nonexistent/entries.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error"));
}

#[test]
fn test_todo_rate_and_toggle() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("today.md");
    std::fs::write(&input, "- [x] a\n\t- [ ] b\n\t- [x] c\n").unwrap();

    let rate = run_json(&["todo", "rate", "--input", path_str(&input)]);
    assert_eq!(rate["rate"], 50);
    assert_eq!(rate["level"]["level"], 3);

    let (code, _, stderr) = run_cli(&["todo", "toggle", "--input", path_str(&input), "1", "--in-place"]);
    assert_eq!(code, 0, "toggle failed: {stderr}");
    assert_eq!(
        std::fs::read_to_string(&input).unwrap(),
        "- [x] a\n\t- [x] b\n\t- [x] c\n"
    );

    let rate = run_json(&["todo", "rate", "--input", path_str(&input)]);
    assert_eq!(rate["rate"], 100);
}

#[test]
fn test_todo_parse_and_quadrants() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("today.md");
    std::fs::write(&input, "- [ ] buy milk #q2\nnote\n- [ ] ==urgent call==\n").unwrap();

    let items = run_json(&["todo", "parse", "--input", path_str(&input)]);
    assert_eq!(items[0]["text"], "buy milk");
    assert_eq!(items[0]["quadrant"], "q2");
    assert_eq!(items[1]["line_index"], 2);
    assert_eq!(items[1]["weight"], 2);

    let quadrants = run_json(&["todo", "quadrants", "--input", path_str(&input)]);
    assert_eq!(quadrants.as_array().unwrap().len(), 5);
    assert_eq!(quadrants[1]["total"], 1);
}

#[test]
fn test_todo_toggle_non_item_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("today.md");
    std::fs::write(&input, "just a note\n").unwrap();
    let (code, _, _) = run_cli(&["todo", "toggle", "--input", path_str(&input), "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_level_commands() {
    let level = run_json(&["level", "lifetime", "130"]);
    assert_eq!(level["level"], 4);
    assert_eq!(level["next"], 210);

    let level = run_json(&["level", "daily", "100"]);
    assert_eq!(level["level"], 5);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let config = path_str(&config);

    let (code, stdout, _) = run_cli(&["config", "get", "sleep.target_duration_minutes", "--config", config]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "450");

    let (code, _, _) = run_cli(&["config", "set", "sleep.target_duration_minutes", "480", "--config", config]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(&["config", "get", "sleep.target_duration_minutes", "--config", config]);
    assert_eq!(stdout.trim(), "480");

    let (code, _, _) = run_cli(&["config", "get", "sleep.bogus", "--config", config]);
    assert_ne!(code, 0);
}

#[test]
fn test_sleep_records_from_content_hashtags() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("entries.json");
    std::fs::write(
        &input,
        r##"[
            {"content": "lights out #sleep", "timestamp": "2024-01-01T23:10:00+09:00"},
            {"content": "up #Wake", "timestamp": "2024-01-02T07:00:00+09:00"},
            {"content": "coffee", "timestamp": "2024-01-02T08:00:00+09:00"}
        ]"##,
    )
    .unwrap();

    let records = run_json(&["sleep", "records", "--input", path_str(&input)]);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["date"], "2024-01-02");
    assert_eq!(records[0]["duration_minutes"], 470);
}

#[test]
fn test_sleep_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("entries.json");
    let night = logical_today() - Duration::days(3);
    let morning = night + Duration::days(1);
    let entries = format!(
        r##"[
            {{"id": "1", "tags": ["#sleep"], "timestamp": "{night}T23:30:00+00:00"}},
            {{"id": "2", "tags": ["#wake"], "timestamp": "{morning}T07:00:00+00:00"}}
        ]"##
    );
    std::fs::write(&input, entries).unwrap();

    let summary = run_json(&["sleep", "summary", "--input", path_str(&input)]);
    assert_eq!(summary["record_count"], 1);
    assert_eq!(summary["complete_count"], 1);
    assert_eq!(summary["average_duration_hours"], 7.5);
    assert_eq!(summary["average_sleep_time"], "23:30");
    assert_eq!(summary["average_wake_time"], "07:00");

    let summary = run_json(&["sleep", "summary", "--input", path_str(&input), "--days", "1"]);
    assert_eq!(summary["record_count"], 0);
    assert!(summary["average_sleep_time"].is_null());
}

#[test]
fn test_todo_tree() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("today.md");
    std::fs::write(&input, "- [ ] parent\n\t- [x] child\n\t\t- [ ] grandchild\n- [x] sibling\n").unwrap();

    let tree = run_json(&["todo", "tree", "--input", path_str(&input)]);
    let roots = tree.as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["item"]["text"], "parent");
    assert_eq!(roots[0]["children"][0]["item"]["text"], "child");
    assert_eq!(roots[0]["children"][0]["children"][0]["item"]["text"], "grandchild");
    assert_eq!(roots[1]["item"]["checked"], true);
    assert!(roots[1]["children"].as_array().unwrap().is_empty());
}

#[test]
fn test_config_show_reset_path() {
    let dir = tempfile::tempdir().unwrap();
    let config_file = dir.path().join("config.toml");
    let config = path_str(&config_file);

    let (code, stdout, _) = run_cli(&["config", "path", "--config", config]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), config);

    let (code, _, _) = run_cli(&["config", "set", "calendar.week_start", "sunday", "--config", config]);
    assert_eq!(code, 0);
    let shown = run_json(&["config", "show", "--config", config]);
    assert_eq!(shown["calendar"]["week_start"], "sunday");
    assert_eq!(shown["sleep"]["sleep_window_start"], "23:00");

    let (code, _, _) = run_cli(&["config", "reset", "--config", config]);
    assert_eq!(code, 0);
    let shown = run_json(&["config", "show", "--config", config]);
    assert_eq!(shown["calendar"]["week_start"], "monday");
    assert_eq!(shown["sleep"]["target_duration_minutes"], 450);
}

#[test]
fn test_config_set_rejects_inverted_window() {
    let dir = tempfile::tempdir().unwrap();
    let config_file = dir.path().join("config.toml");
    let config = path_str(&config_file);

    let (code, _, stderr) = run_cli(&["config", "set", "sleep.wake_window_start", "09:00", "--config", config]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error"));

    let (_, stdout, _) = run_cli(&["config", "get", "sleep.wake_window_start", "--config", config]);
    assert_eq!(stdout.trim(), "06:00");
}
