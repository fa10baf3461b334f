//! Integration tests for the bandish-run CLI
//!
//! These tests run the actual binary and verify output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CREDENTIAL_VAR: &str = "openai_api_key";

/// Get the binary to test, isolated from any .env in the repo
fn run_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bandish-run").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn scenario_with_workflow(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let wf = dir.path().join("workflows");
    fs::create_dir_all(&wf).unwrap();
    fs::write(wf.join("ILogger_transform_workflow.yaml"), content).unwrap();
    dir
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    run_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run a Bandish transformation scenario"));
}

#[test]
fn test_run_help_lists_engine_options() {
    let dir = TempDir::new().unwrap();
    run_cmd(&dir)
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--engine"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--scenario-file"));
}

// ============================================================================
// run
// ============================================================================

#[cfg(unix)]
#[test]
fn test_run_example_scenario_prints_done() {
    let dir = scenario_with_workflow("steps: []");

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "test-key")
        .args([
            "run",
            "--engine",
            "command",
            "--engine-program",
            "sh",
            "--engine-arg=-c",
            "--engine-arg",
            r#"cat >/dev/null; echo '{"output_info": "done"}'"#,
        ])
        .assert()
        .success()
        .stdout("done\n");
}

#[cfg(unix)]
#[test]
fn test_run_engine_sees_workflow_content() {
    let dir = scenario_with_workflow("steps: []");
    let capture = dir.path().join("params.json");
    let script = format!(
        r#"cat > '{}'; echo '{{"output_info": "ok"}}'"#,
        capture.display()
    );

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "test-key")
        .args([
            "run",
            "--engine-program",
            "sh",
            "--engine-arg=-c",
            "--engine-arg",
            script.as_str(),
        ])
        .assert()
        .success()
        .stdout("ok\n");

    let params: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(capture).unwrap()).unwrap();
    assert_eq!(params["workflow_content"], "steps: []");
    assert_eq!(params["openai_api_key"], "test-key");
    assert_eq!(params.as_object().unwrap().len(), 13);
}

#[cfg(unix)]
#[test]
fn test_run_malformed_engine_output_fails() {
    let dir = scenario_with_workflow("steps: []");

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "test-key")
        .args([
            "run",
            "--engine-program",
            "sh",
            "--engine-arg=-c",
            "--engine-arg",
            "cat >/dev/null; echo 'not json'",
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not a valid run result"));
}

#[test]
fn test_run_mock_engine() {
    let dir = scenario_with_workflow("steps: []");

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "test-key")
        .args(["run", "--engine", "mock"])
        .assert()
        .success()
        .stdout("Mock run completed\n");
}

#[test]
fn test_run_missing_credential() {
    let dir = scenario_with_workflow("steps: []");

    run_cmd(&dir)
        .env_remove(CREDENTIAL_VAR)
        .args(["run", "--engine", "mock"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("openai_api_key"));
}

#[test]
fn test_run_missing_workflow() {
    let dir = TempDir::new().unwrap();

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "test-key")
        .args(["run", "--engine", "mock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ILogger_transform_workflow.yaml"));
}

#[test]
fn test_run_unknown_engine() {
    let dir = scenario_with_workflow("steps: []");

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "test-key")
        .args(["run", "--engine", "python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown engine"));
}

#[test]
fn test_dry_run_masks_credential() {
    let dir = scenario_with_workflow("steps: []");

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "sk-very-secret")
        .args(["run", "--engine", "mock", "--dry-run", "--model", "gpt-4o"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"openai_api_key\": \"***\""))
        .stdout(predicate::str::contains("\"language_model\": \"gpt-4o\""))
        .stdout(predicate::str::contains("sk-very-secret").not());
}

#[test]
fn test_dry_run_sends_absolute_directories() {
    let dir = scenario_with_workflow("steps: []");

    let output = run_cmd(&dir)
        .env(CREDENTIAL_VAR, "test-key")
        .args(["run", "--engine", "mock", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for key in ["transform_local_dir", "kb_local_dir"] {
        let dir_value = Path::new(config[key].as_str().unwrap());
        assert!(dir_value.is_absolute(), "{key} is relative: {}", dir_value.display());
    }
    assert!(config["transform_local_dir"].as_str().unwrap().ends_with("input"));
    assert!(config["kb_local_dir"].as_str().unwrap().ends_with("kb"));
}

#[test]
fn test_dry_run_does_not_build_engine() {
    let dir = scenario_with_workflow("steps: []");

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "test-key")
        .args(["run", "--engine", "http", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"scenario\": \"ILogger\""));
}

#[test]
fn test_run_empty_credential_reaches_engine() {
    let dir = scenario_with_workflow("steps: []");

    run_cmd(&dir)
        .env(CREDENTIAL_VAR, "")
        .args(["run", "--engine", "mock"])
        .assert()
        .success()
        .stdout("Mock run completed\n");
}

#[test]
fn test_scenario_file_and_base_dir() {
    let dir = TempDir::new().unwrap();
    let scenario_root = dir.path().join("metrics");
    fs::create_dir_all(&scenario_root).unwrap();
    fs::write(scenario_root.join("flow.yaml"), "steps: []").unwrap();
    fs::write(
        dir.path().join("metrics.toml"),
        r#"
base_dir = "metrics"
scenario = "Metrics"
workflow_path = "flow.yaml"
credential_var = "METRICS_KEY"
"#,
    )
    .unwrap();

    let output = run_cmd(&dir)
        .env("METRICS_KEY", "k")
        .args(["run", "--engine", "mock", "--dry-run", "--scenario-file", "metrics.toml"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["scenario"], "Metrics");
    assert_eq!(config["workflow_content"], "steps: []");

    let input = Path::new(config["transform_local_dir"].as_str().unwrap());
    assert!(input.is_absolute());
    assert!(input.ends_with("metrics/input"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_valid_workflow() {
    let dir = scenario_with_workflow("name: ilogger\nsteps: []\n");

    run_cmd(&dir)
        .env_remove(CREDENTIAL_VAR)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid YAML"))
        .stdout(predicate::str::contains("2 top-level keys"));
}

#[test]
fn test_check_invalid_yaml() {
    let dir = scenario_with_workflow("steps: [unclosed\n  - : :");

    run_cmd(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid YAML"));
}
