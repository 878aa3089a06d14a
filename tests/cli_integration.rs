//! CLI integration tests for gantt
//!
//! These tests drive the binary end to end: initialise a project, add
//! tasks and relationships, and check the derived schedule.

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the gantt binary
fn gantt_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("gantt"))
}

/// Create a temporary directory and initialize a project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    gantt_cmd()
        .arg("init")
        .arg(dir.path())
        .args(["--name", "Morros", "--start-date", "2021-08-22"])
        .assert()
        .success();
    dir
}

/// Run a command inside the project and return its JSON output
fn json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = gantt_cmd()
        .current_dir(dir.path())
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn run(dir: &TempDir, args: &[&str]) {
    gantt_cmd()
        .current_dir(dir.path())
        .args(args)
        .assert()
        .success();
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    gantt_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized gantt project"));

    assert!(dir.path().join(".gantt").is_dir());
    assert!(dir.path().join(".gantt/config.toml").is_file());
    assert!(dir.path().join(".gantt/project.json").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = setup_project();
    run(&dir, &["task", "add", "Plot cleaning", "--days", "7"]);

    gantt_cmd().arg("init").arg(dir.path()).assert().success();

    let status = json(&dir, &["status"]);
    assert_eq!(status["name"], "Morros");
    assert_eq!(status["tasks"], 1);
}

#[test]
fn test_command_outside_project_fails() {
    let dir = TempDir::new().unwrap();

    gantt_cmd()
        .current_dir(dir.path())
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a gantt project"));
}

// =============================================================================
// Task Tests
// =============================================================================

#[test]
fn test_task_add_and_list() {
    let dir = setup_project();

    gantt_cmd()
        .current_dir(dir.path())
        .args(["task", "add", "Plot cleaning", "--days", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task t-1"));

    run(&dir, &["task", "add", "Fencing", "--days", "3", "--start", "4", "--color", "green"]);

    let tasks = json(&dir, &["task", "list"]);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1]["id"], "t-2");
    assert_eq!(tasks[1]["start"], 4);
    assert_eq!(tasks[1]["color"], "green");
    assert_eq!(tasks[1]["independent"], true);
}

#[test]
fn test_task_add_uses_configured_default_days() {
    let dir = setup_project();
    std::fs::write(dir.path().join(".gantt/config.toml"), "default_days = 4\n").unwrap();

    run(&dir, &["task", "add", "Digging"]);

    let task = json(&dir, &["task", "show", "1"]);
    assert_eq!(task["days"], 4);
}

#[test]
fn test_task_zero_days_rejected() {
    let dir = setup_project();

    gantt_cmd()
        .current_dir(dir.path())
        .args(["task", "add", "Nothing", "--days", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one day"));
}

#[test]
fn test_task_id_repeated_rejected() {
    let dir = setup_project();
    run(&dir, &["task", "add", "First", "--days", "1", "--id", "5"]);

    gantt_cmd()
        .current_dir(dir.path())
        .args(["task", "add", "Second", "--days", "1", "--id", "t-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already uses this id"));
}

#[test]
fn test_task_remove_missing() {
    let dir = setup_project();

    gantt_cmd()
        .current_dir(dir.path())
        .args(["task", "remove", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tasks not found: t-9"));
}

// =============================================================================
// Relationship Tests
// =============================================================================

#[test]
fn test_link_moves_dependent() {
    let dir = setup_project();
    run(&dir, &["task", "add", "T1", "--days", "5"]);
    run(&dir, &["task", "add", "T2", "--days", "3"]);

    gantt_cmd()
        .current_dir(dir.path())
        .args(["link", "add", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t-2 now starts at day 5"));

    let schedule = json(&dir, &["schedule"]);
    let days = schedule.as_array().unwrap();
    assert_eq!(days[0]["day"], 0);
    assert_eq!(days[0]["tasks"][0]["id"], "t-1");
    assert_eq!(days[1]["day"], 5);
    assert_eq!(days[1]["tasks"][0]["id"], "t-2");
}

#[test]
fn test_link_negative_gap() {
    let dir = setup_project();
    run(&dir, &["task", "add", "T1", "--days", "7"]);
    run(&dir, &["task", "add", "T2", "--days", "7"]);
    run(&dir, &["link", "add", "1", "2", "--gap", "-2"]);

    let task = json(&dir, &["task", "show", "2"]);
    assert_eq!(task["start"], 5);
    assert_eq!(task["independent"], false);
}

#[test]
fn test_link_cycle_and_redundancy_rejected() {
    let dir = setup_project();
    for name in ["T1", "T2", "T3"] {
        run(&dir, &["task", "add", name, "--days", "2"]);
    }
    run(&dir, &["link", "add", "1", "2"]);
    run(&dir, &["link", "add", "2", "3"]);

    gantt_cmd()
        .current_dir(dir.path())
        .args(["link", "add", "3", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cycle"));

    gantt_cmd()
        .current_dir(dir.path())
        .args(["link", "add", "1", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already depends on the influencer"));

    let links = json(&dir, &["link", "list"]);
    assert_eq!(links.as_array().unwrap().len(), 2);
}

#[test]
fn test_link_unknown_tasks() {
    let dir = setup_project();

    gantt_cmd()
        .current_dir(dir.path())
        .args(["link", "add", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tasks not found: t-1, t-2"));
}

#[test]
fn test_link_remove_with_start_day() {
    let dir = setup_project();
    run(&dir, &["task", "add", "T1", "--days", "5"]);
    run(&dir, &["task", "add", "T2", "--days", "3"]);
    run(&dir, &["link", "add", "1", "2"]);

    run(&dir, &["link", "remove", "r-1", "--start-day", "20"]);

    let task = json(&dir, &["task", "show", "2"]);
    assert_eq!(task["start"], 20);
    assert_eq!(task["independent"], true);
}

#[test]
fn test_link_remove_missing() {
    let dir = setup_project();

    gantt_cmd()
        .current_dir(dir.path())
        .args(["link", "remove", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Relationship not found: r-3"));
}

// =============================================================================
// Cascade Tests
// =============================================================================

#[test]
fn test_remove_influencer_rehomes_dependent() {
    let dir = setup_project();
    run(&dir, &["task", "add", "T1", "--days", "8", "--start", "2"]);
    run(&dir, &["task", "add", "T2", "--days", "1"]);
    run(&dir, &["link", "add", "1", "2", "--gap", "2"]);

    run(&dir, &["task", "remove", "1"]);

    let task = json(&dir, &["task", "show", "2"]);
    assert_eq!(task["start"], 12);
    assert_eq!(task["independent"], true);

    let links = json(&dir, &["link", "list"]);
    assert!(links.as_array().unwrap().is_empty());
}

#[test]
fn test_edit_keeps_dependents_following() {
    let dir = setup_project();
    run(&dir, &["task", "add", "T1", "--days", "10"]);
    run(&dir, &["task", "add", "T2", "--days", "3"]);
    run(&dir, &["link", "add", "1", "2", "--gap", "2"]);

    run(&dir, &["task", "edit", "1", "--days", "100"]);

    let task = json(&dir, &["task", "show", "2"]);
    assert_eq!(task["start"], 102);
    assert_eq!(task["independent"], false);

    let edited = json(&dir, &["task", "show", "1"]);
    assert_eq!(edited["days"], 100);
    assert_eq!(edited["start"], 0);
}

#[test]
fn test_edit_without_changes_rejected() {
    let dir = setup_project();
    run(&dir, &["task", "add", "T1", "--days", "10"]);

    gantt_cmd()
        .current_dir(dir.path())
        .args(["task", "edit", "1", "--days", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task already exists"));
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_schedule_empty_project() {
    let dir = setup_project();

    gantt_cmd()
        .current_dir(dir.path())
        .arg("schedule")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks scheduled"));

    let schedule = json(&dir, &["schedule"]);
    assert_eq!(schedule[0]["day"], 0);
    assert!(schedule[0]["tasks"].as_array().unwrap().is_empty());
}

#[test]
fn test_status_reports_length() {
    let dir = setup_project();
    run(&dir, &["task", "add", "T1", "--days", "4", "--start", "2"]);
    run(&dir, &["task", "add", "T2", "--days", "3"]);
    run(&dir, &["link", "add", "1", "2", "--gap", "1"]);

    let status = json(&dir, &["status"]);
    assert_eq!(status["start_date"], "2021-08-22");
    assert_eq!(status["tasks"], 2);
    assert_eq!(status["relationships"], 1);
    assert_eq!(status["independent"], 1);
    assert_eq!(status["dependent"], 1);
    assert_eq!(status["end_day"], 10);
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = setup_project();
    run(&dir, &["task", "add", "T1", "--days", "2"]);

    gantt_cmd()
        .current_dir(dir.path())
        .args(["--verbose", "task", "add", "T2", "--days", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task t-2"))
        .stderr(predicate::str::contains("[verbose]"))
        .stderr(predicate::str::contains("adding task"));
}

#[test]
fn test_corrupted_project_file_rejected() {
    let dir = setup_project();
    std::fs::write(dir.path().join(".gantt/project.json"), "{ not json").unwrap();

    gantt_cmd()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse project"));
}
