//! End-to-end tests for `dashboardtool log` commands.

use std::fs;

mod fixtures;
use fixtures::*;

#[test]
fn test_log_add_and_recent() {
    let env = TestEnv::new();

    assert_success(&env.run(&["log", "add", "Started"]), "log add");
    assert_success(
        &env.run(&["log", "add", "Disk full", "-l", "error", "-s", "storage"]),
        "log add error",
    );
    assert!(env.data_path("logs/debug.log").exists());

    let recent = env.run(&["log", "recent"]);
    assert_success(&recent, "log recent");
    let stdout = String::from_utf8_lossy(&recent.stdout);
    assert!(stdout.contains("[info] cli: Started"), "stdout: {stdout}");
    assert!(stdout.contains("[error] storage: Disk full"), "stdout: {stdout}");
}

#[test]
fn test_log_recent_json_with_filters() {
    let env = TestEnv::new();
    for (message, level) in [("a", "debug"), ("b", "warning"), ("c", "info"), ("d", "critical")] {
        assert_success(&env.run(&["log", "add", message, "--level", level]), "log add");
    }

    let output = env.run(&["log", "recent", "--json", "-n", "3", "--min-level", "warning"]);
    assert_success(&output, "log recent --json");
    let entries = stdout_json(&output);
    let messages: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["b", "d"]);
    assert_eq!(entries[1]["level"], "critical");
}

#[test]
fn test_log_unknown_level_is_usage_error() {
    let env = TestEnv::new();

    let output = env.run(&["log", "add", "x", "--level", "loud"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("loud"));
}

#[test]
fn test_log_clear_removes_file() {
    let env = TestEnv::new();
    assert_success(&env.run(&["log", "add", "Temporary"]), "log add");

    let clear = env.run(&["log", "clear"]);
    assert_success(&clear, "log clear");
    assert!(!env.data_path("logs/debug.log").exists());

    let recent = env.run(&["log", "recent"]);
    assert_success(&recent, "log recent");
    assert!(String::from_utf8_lossy(&recent.stdout).contains("No events recorded."));
}

#[test]
fn test_log_snapshot_writes_json_lines() {
    let env = TestEnv::new();
    assert_success(&env.run(&["log", "add", "One"]), "log add");
    assert_success(&env.run(&["log", "add", "Two"]), "log add");

    let snapshot = env.data_path("exports/snapshot.jsonl");
    let output = env.run(&["log", "snapshot", "-o", snapshot.to_str().unwrap()]);
    assert_success(&output, "log snapshot");

    let content = fs::read_to_string(&snapshot).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["message"], "Two");
}

#[test]
fn test_log_reload_skips_corrupt_lines() {
    let env = TestEnv::new();
    fs::create_dir_all(env.data_path("logs")).unwrap();
    fs::write(
        env.data_path("logs/debug.log"),
        "{\"message\": \"Old\", \"timestamp\": \"2024-01-01T10:00:00\"}\ngarbage\n",
    )
    .unwrap();

    let output = env.run(&["log", "recent", "--json"]);
    assert_success(&output, "log recent");
    let entries = stdout_json(&output);
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["level"], "info");
    assert_eq!(entries[0]["source"], "dashboard");
}
