//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs. Stdin is closed, so any confirmation answers "no".

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run a CLI command and return output.
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_starboard"))
        .args(args)
        .env("STARBOARD_DATA_DIR", data_dir)
        .env_remove("STARBOARD_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn show_json(data_dir: &Path) -> serde_json::Value {
    let stdout = run_ok(data_dir, &["show", "--json"]);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn setup(data_dir: &Path, goal: &str, count: &str) {
    run_ok(
        data_dir,
        &["setup", "--goal", goal, "--skip-skill", "--count", count],
    );
}

#[test]
fn test_setup_with_flags() {
    let dir = TempDir::new().unwrap();
    let stdout = run_ok(
        dir.path(),
        &[
            "setup",
            "--goal",
            "Zoo trip",
            "--skill",
            "Share toys",
            "--count",
            "10",
        ],
    );
    assert!(stdout.contains("I am working for: Zoo trip"));
    assert_eq!(stdout.matches("+ star").count(), 10);

    let board = show_json(dir.path());
    assert_eq!(board["goal"], "Zoo trip");
    assert_eq!(board["skill_label"], "Share toys");
    assert_eq!(board["token_count"], 10);
    assert_eq!(board["earned_count"], 0);
    assert_eq!(board["rows"][0]["label"], "Share toys");
    assert_eq!(board["rows"][0]["icon"], "empty");
}

#[test]
fn test_goal_skip_skill_six() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Clean Room", "6");

    let board = show_json(dir.path());
    assert_eq!(board["goal"], "Clean Room");
    assert_eq!(board["skill_label"], "Star to earn");
    assert_eq!(board["token_count"], 6);
}

#[test]
fn test_setup_rejects_other_counts() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["setup", "--goal", "Zoo", "--count", "7"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("5, 6, 10, 12"));
}

#[test]
fn test_setup_without_answers_and_closed_stdin_fails() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["setup"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("input closed"));
}

#[test]
fn test_toggle_until_complete() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Ice cream", "5");

    for row in 1..=4 {
        let stdout = run_ok(dir.path(), &["toggle", &row.to_string()]);
        assert!(stdout.contains("earned"));
        assert!(!stdout.contains("all stars earned"));
    }
    let stdout = run_ok(dir.path(), &["toggle", "5"]);
    assert!(stdout.contains("all stars earned for Ice cream"));
    assert!(stdout.contains("You earned: Ice cream"));

    // Closed stdin cancels the offered clear
    let board = show_json(dir.path());
    assert_eq!(board["complete"], true);
    assert_eq!(board["earned_count"], 5);
    assert_eq!(board["rows"][4]["label"], "Earned!");
}

#[test]
fn test_toggle_out_of_range() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Zoo", "5");

    let (code, _, stderr) = run_cli(dir.path(), &["toggle", "6"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no star 6 (stars are numbered 1..=5)"));

    let (code, _, stderr) = run_cli(dir.path(), &["toggle", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no star 0 (stars are numbered 1..=5)"));
}

#[test]
fn test_remove_shifts_rows() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Zoo", "5");
    run_ok(dir.path(), &["toggle", "3"]);
    run_ok(dir.path(), &["toggle", "5"]);

    run_ok(dir.path(), &["remove", "3"]);
    let board = show_json(dir.path());
    assert_eq!(board["token_count"], 4);
    assert_eq!(board["earned_count"], 1);
    assert_eq!(board["rows"][2]["earned"], false);
    assert_eq!(board["rows"][3]["earned"], true);
}

#[test]
fn test_add_appends() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Zoo", "5");
    let stdout = run_ok(dir.path(), &["add"]);
    assert!(stdout.contains("+ star 6"));
    assert_eq!(show_json(dir.path())["token_count"], 6);
}

#[test]
fn test_clear_needs_confirmation() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Zoo", "5");

    let stdout = run_ok(dir.path(), &["clear", "--count", "6"]);
    assert!(stdout.contains("Are you sure?"));
    assert!(stdout.contains("cancelled"));
    assert_eq!(show_json(dir.path())["goal"], "Zoo");
}

#[test]
fn test_clear_yes_with_blank_answers_restores_defaults() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Zoo", "10");
    run_ok(dir.path(), &["toggle", "1"]);

    run_ok(
        dir.path(),
        &[
            "clear", "--yes", "--goal", "", "--skill", "", "--count", "5",
        ],
    );
    let board = show_json(dir.path());
    assert_eq!(board["goal"], "(Goal)");
    assert_eq!(board["skill_label"], "Star to earn");
    assert_eq!(board["token_count"], 5);
    assert_eq!(board["earned_count"], 0);
}

#[test]
fn test_saved_record_layout() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Park", "5");
    run_ok(dir.path(), &["toggle", "2"]);

    let path = dir.path().join("board.json");
    let content = std::fs::read_to_string(path).unwrap();
    let record: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(record["Goal"], "Park");
    assert_eq!(record["Skill"], "Star to earn");
    assert_eq!(record["NumberTokensEarned"], 1);
    assert_eq!(record["TokenArray"][1]["earned"], true);
    assert_eq!(record["TokenArray"].as_array().unwrap().len(), 5);
}

#[test]
fn test_truncated_board_file_starts_over() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "Zoo", "5");
    run_ok(dir.path(), &["toggle", "1"]);

    let path = dir.path().join("board.json");
    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, &content[..40]).unwrap();

    run_ok(
        dir.path(),
        &[
            "clear",
            "--yes",
            "--goal",
            "Park",
            "--skip-skill",
            "--count",
            "6",
        ],
    );
    let board = show_json(dir.path());
    assert_eq!(board["goal"], "Park");
    assert_eq!(board["token_count"], 6);
    assert_eq!(board["earned_count"], 0);

    let backup = dir.path().join("board.json.corrupt");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), &content[..40]);
}

#[test]
fn test_truncated_board_file_runs_setup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(&path, "{\n  \"Goal\": \"Zo").unwrap();

    setup(dir.path(), "Park", "10");
    assert_eq!(show_json(dir.path())["token_count"], 10);
}

#[test]
fn test_one_shot_commands_need_persistence() {
    let dir = TempDir::new().unwrap();
    run_ok(
        dir.path(),
        &["config", "set", "profile.persistence_enabled", "false"],
    );

    let (code, _, stderr) = run_cli(dir.path(), &["add"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("starboard session"));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let earned = run_ok(dir.path(), &["config", "get", "labels.earned"]);
    assert_eq!(earned.trim(), "Earned!");

    let args = ["config", "set", "profile.completion", "acknowledge"];
    run_ok(dir.path(), &args);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "profile.completion"]).trim(),
        "acknowledge"
    );

    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "profile.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));

    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "profile.completion"]).trim(),
        "offer_clear"
    );
}

#[test]
fn test_custom_earned_label() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "labels.earned", "Yay!"]);
    setup(dir.path(), "Zoo", "5");
    run_ok(dir.path(), &["toggle", "1"]);
    assert_eq!(show_json(dir.path())["rows"][0]["label"], "Yay!");
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let stdout = run_ok(dir.path(), &["completions", "bash"]);
    assert!(stdout.contains("starboard"));
}
