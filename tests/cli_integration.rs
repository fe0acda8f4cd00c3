//! CLI integration tests for crew
//!
//! These tests drive the `crew` binary through complete workflows: recording
//! people and their time, proposing tasks, matching and assigning.

use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Get a command instance for the crew binary
fn crew_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("crew"));
    cmd.env_remove("CREW_LOG");
    cmd
}

/// Create a temporary directory and initialize a crew project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    crew_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Run a command in the project with JSON output and parse stdout
fn run_json(dir: &TempDir, args: &[&str]) -> Value {
    let output = crew_cmd()
        .current_dir(dir.path())
        .args(["--format", "json"])
        .args(args)
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

/// Run a create command and return the new record's id as a string
fn create(dir: &TempDir, args: &[&str]) -> String {
    let value = run_json(dir, args);
    value["id"].as_i64().unwrap().to_string()
}

/// Seed the two-worker scenario: A scores 85, B scores 70
fn seed_scenario(dir: &TempDir) -> (String, String, String) {
    let chief = create(dir, &["chief", "add", "Dana", "--department", "Maintenance"]);
    let a = create(
        dir,
        &["worker", "add", "Alice", "--department", "Maintenance", "--skills", "welding"],
    );
    let b = create(
        dir,
        &["worker", "add", "Bob", "--department", "Ops", "--skills", "welding,electrical"],
    );
    create(dir, &["avail", "add", &a, "2024-01-01", "2024-01-31"]);
    create(dir, &["avail", "add", &b, "2024-01-05", "2024-01-20"]);
    let task = create(
        dir,
        &[
            "task",
            "add",
            "Fix boiler",
            "--chief",
            &chief,
            "--skills",
            "welding,electrical",
            "--department",
            "Maintenance",
            "--start",
            "2024-01-10",
            "--end",
            "2024-01-12",
        ],
    );
    (a, b, task)
}

fn candidate_ids(report: &Value, index: usize) -> Vec<i64> {
    report["matches"][index]["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["worker_id"].as_i64().unwrap())
        .collect()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    crew_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized crew project"));

    assert!(dir.path().join(".crew").is_dir());
    assert!(dir.path().join(".crew/config.toml").is_file());
    assert!(dir.path().join(".crew/.gitignore").is_file());
    assert!(dir.path().join(".crew/crew.db").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    crew_cmd().arg("init").arg(dir.path()).assert().success();
    crew_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_commands_outside_project_fail() {
    let dir = TempDir::new().unwrap();

    crew_cmd()
        .current_dir(dir.path())
        .arg("match")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a crew project"));
}

// =============================================================================
// Record Tests
// =============================================================================

#[test]
fn test_worker_add_and_list() {
    let dir = setup_project();

    crew_cmd()
        .current_dir(dir.path())
        .args(["worker", "add", "Alice", "--skills", "welding, electrical"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created worker: Alice (id 1)"));

    let workers = run_json(&dir, &["worker", "list"]);
    let workers = workers.as_array().unwrap();
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0]["name"], "Alice");
    assert_eq!(
        workers[0]["skills"],
        serde_json::json!(["electrical", "welding"])
    );
}

#[test]
fn test_worker_show_includes_availability() {
    let dir = setup_project();
    let worker = create(&dir, &["worker", "add", "Alice"]);
    create(&dir, &["avail", "add", &worker, "2024-03-01", "2024-03-15"]);

    crew_cmd()
        .current_dir(dir.path())
        .args(["worker", "show", &worker])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-01..2024-03-15"));
}

#[test]
fn test_avail_rejects_inverted_range() {
    let dir = setup_project();
    let worker = create(&dir, &["worker", "add", "Alice"]);

    crew_cmd()
        .current_dir(dir.path())
        .args(["avail", "add", &worker, "2024-03-15", "2024-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to add availability"));
}

#[test]
fn test_avail_rejects_malformed_date() {
    let dir = setup_project();
    let worker = create(&dir, &["worker", "add", "Alice"]);

    crew_cmd()
        .current_dir(dir.path())
        .args(["avail", "add", &worker, "2024-3-1", "2024-03-15"])
        .assert()
        .failure();

    let periods = run_json(&dir, &["avail", "list"]);
    assert!(periods.as_array().unwrap().is_empty());
}

#[test]
fn test_avail_for_unknown_worker_fails() {
    let dir = setup_project();

    crew_cmd()
        .current_dir(dir.path())
        .args(["avail", "add", "42", "2024-03-01", "2024-03-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No worker with id 42"));
}

#[test]
fn test_task_requires_existing_chief() {
    let dir = setup_project();

    crew_cmd()
        .current_dir(dir.path())
        .args([
            "task", "add", "Fix boiler", "--chief", "9", "--start", "2024-01-10", "--end",
            "2024-01-12",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No chief with id 9"));
}

#[test]
fn test_task_copies_chief_name() {
    let dir = setup_project();
    let (_, _, task) = seed_scenario(&dir);

    let shown = run_json(&dir, &["task", "show", &task]);
    assert_eq!(shown["chief_name"], "Dana");
    assert_eq!(shown["status"], "pending");
    assert_eq!(shown["priority"], "medium");
    assert_eq!(shown["start_date"], "2024-01-10");
}

#[test]
fn test_task_list_filters_by_status() {
    let dir = setup_project();
    let (a, _, task) = seed_scenario(&dir);

    run_json(&dir, &["task", "propose", &task, &a]);

    let matched = run_json(&dir, &["task", "list", "--status", "matched"]);
    assert_eq!(matched.as_array().unwrap().len(), 1);

    let pending = run_json(&dir, &["task", "list", "--status", "pending"]);
    assert!(pending.as_array().unwrap().is_empty());
}

#[test]
fn test_task_set_status() {
    let dir = setup_project();
    let (_, _, task) = seed_scenario(&dir);

    crew_cmd()
        .current_dir(dir.path())
        .args(["task", "set-status", &task, "assigned"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is now assigned"));
}

// =============================================================================
// Matching Tests
// =============================================================================

#[test]
fn test_match_ranks_candidates() {
    let dir = setup_project();
    let (a, b, task) = seed_scenario(&dir);

    let report = run_json(&dir, &["match"]);
    assert_eq!(report["count"], 1);
    assert_eq!(
        report["matches"][0]["task"]["id"].as_i64().unwrap().to_string(),
        task
    );

    let candidates = report["matches"][0]["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0]["worker_id"].as_i64().unwrap().to_string(), a);
    assert_eq!(candidates[0]["score"].as_f64().unwrap(), 85.0);
    assert_eq!(candidates[1]["worker_id"].as_i64().unwrap().to_string(), b);
    assert_eq!(candidates[1]["score"].as_f64().unwrap(), 70.0);
    assert_eq!(candidates[1]["breakdown"]["department"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_match_text_output() {
    let dir = setup_project();
    seed_scenario(&dir);

    crew_cmd()
        .current_dir(dir.path())
        .arg("match")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix boiler"))
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn test_match_empty_project() {
    let dir = setup_project();

    let report = run_json(&dir, &["match"]);
    assert_eq!(report["count"], 0);
    assert!(report["matches"].as_array().unwrap().is_empty());
}

#[test]
fn test_match_omits_task_without_available_workers() {
    let dir = setup_project();
    let chief = create(&dir, &["chief", "add", "Dana"]);
    create(&dir, &["worker", "add", "Alice", "--skills", "welding"]);
    create(
        &dir,
        &[
            "task", "add", "Fix boiler", "--chief", &chief, "--skills", "welding", "--start",
            "2024-01-10", "--end", "2024-01-12",
        ],
    );

    let report = run_json(&dir, &["match"]);
    assert_eq!(report["count"], 0);
}

#[test]
fn test_booked_worker_is_excluded() {
    let dir = setup_project();
    let (a, b, task) = seed_scenario(&dir);
    let chief = run_json(&dir, &["chief", "list"])[0]["id"]
        .as_i64()
        .unwrap()
        .to_string();

    // Book Alice on the first task, then propose an overlapping one
    create(&dir, &["assign", "confirm", &task, &a, "--score", "85"]);
    create(
        &dir,
        &[
            "task", "add", "Weld rail", "--chief", &chief, "--start", "2024-01-11", "--end",
            "2024-01-15",
        ],
    );

    let report = run_json(&dir, &["match"]);
    assert_eq!(report["count"], 1);
    assert_eq!(report["matches"][0]["task"]["title"], "Weld rail");
    assert_eq!(candidate_ids(&report, 0), vec![b.parse::<i64>().unwrap()]);
}

#[test]
fn test_match_respects_configured_limit() {
    let dir = setup_project();
    std::fs::write(
        dir.path().join(".crew/config.toml"),
        "[matching]\nmax_candidates = 1\n",
    )
    .unwrap();
    let (a, _, _) = seed_scenario(&dir);

    let report = run_json(&dir, &["match"]);
    assert_eq!(candidate_ids(&report, 0), vec![a.parse::<i64>().unwrap()]);
}

// =============================================================================
// Assignment Tests
// =============================================================================

#[test]
fn test_assign_confirm_and_cancel() {
    let dir = setup_project();
    let (a, _, task) = seed_scenario(&dir);

    let assignment = create(&dir, &["assign", "confirm", &task, &a, "--score", "85"]);

    let shown = run_json(&dir, &["task", "show", &task]);
    assert_eq!(shown["status"], "assigned");
    assert_eq!(shown["matched_worker_id"].as_i64().unwrap().to_string(), a);

    // Assigned tasks are no longer matched
    let report = run_json(&dir, &["match"]);
    assert_eq!(report["count"], 0);

    let listed = run_json(&dir, &["assign", "list"]);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Fix boiler");
    assert_eq!(listed[0]["worker_name"], "Alice");
    assert_eq!(listed[0]["start_date"], "2024-01-10");

    crew_cmd()
        .current_dir(dir.path())
        .args(["assign", "cancel", &assignment])
        .assert()
        .success()
        .stdout(predicate::str::contains("pending again"));

    let shown = run_json(&dir, &["task", "show", &task]);
    assert_eq!(shown["status"], "pending");
    assert!(shown["matched_worker_id"].is_null());

    let report = run_json(&dir, &["match"]);
    assert_eq!(report["count"], 1);
}

#[test]
fn test_assign_unknown_task_fails() {
    let dir = setup_project();
    let worker = create(&dir, &["worker", "add", "Alice"]);

    crew_cmd()
        .current_dir(dir.path())
        .args(["assign", "confirm", "77", &worker])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No task with id 77"));
}

#[test]
fn test_cancel_unknown_assignment_fails() {
    let dir = setup_project();

    crew_cmd()
        .current_dir(dir.path())
        .args(["assign", "cancel", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No assignment with id 5"));
}

// =============================================================================
// Deletion Tests
// =============================================================================

#[test]
fn test_worker_remove_cascades() {
    let dir = setup_project();
    let (a, _, task) = seed_scenario(&dir);
    create(&dir, &["assign", "confirm", &task, &a]);

    let removed = run_json(&dir, &["worker", "remove", &a]);
    assert_eq!(removed["removed"]["periods"], 1);
    assert_eq!(removed["removed"]["assignments"], 1);
    assert_eq!(removed["removed"]["tasks_reset"], 1);

    let shown = run_json(&dir, &["task", "show", &task]);
    assert_eq!(shown["status"], "pending");
    assert!(run_json(&dir, &["assign", "list"])
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn test_task_remove_cascades_assignments() {
    let dir = setup_project();
    let (a, _, task) = seed_scenario(&dir);
    create(&dir, &["assign", "confirm", &task, &a]);

    let removed = run_json(&dir, &["task", "remove", &task]);
    assert_eq!(removed["assignments_removed"], 1);

    crew_cmd()
        .current_dir(dir.path())
        .args(["task", "show", &task])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No task with id"));
}

#[test]
fn test_remove_unknown_worker_fails() {
    let dir = setup_project();

    crew_cmd()
        .current_dir(dir.path())
        .args(["worker", "remove", "w-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No worker with id 3"));
}

// =============================================================================
// Status Tests
// =============================================================================

#[test]
fn test_status_counts() {
    let dir = setup_project();
    let (a, _, task) = seed_scenario(&dir);
    create(&dir, &["assign", "confirm", &task, &a]);

    let status = run_json(&dir, &["status"]);
    assert_eq!(status["workers"], 2);
    assert_eq!(status["chiefs"], 1);
    assert_eq!(status["availability_periods"], 2);
    assert_eq!(status["tasks"]["total"], 1);
    assert_eq!(status["tasks"]["assigned"], 1);
    assert_eq!(status["active_assignments"], 1);
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let dir = setup_project();

    let output = crew_cmd()
        .current_dir(dir.path())
        .args(["--verbose", "--format", "json", "match"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["count"], 0);
    assert!(!output.stderr.is_empty());
}
