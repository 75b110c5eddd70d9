use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const RUNNER_STUB: &str = "mkdir -p \"$1\"\necho pipeline-done > \"$1/marker.txt\"\n";

fn cmd(work: &Path) -> Command {
    let mut cmd = Command::cargo_bin("isoseq-regress").unwrap();
    cmd.current_dir(work)
        .env_remove("RUST_LOG")
        .env_remove("ISOSEQ_REGRESS_WORK_DIR")
        .env_remove("ISOSEQ_REGRESS_RUNNER")
        .env_remove("ISOSEQ_REGRESS_COMPARE")
        .env_remove("ISOSEQ_REGRESS_RESULTS_FILE")
        .env_remove("ISOSEQ_REGRESS_REFERENCE_DIR")
        .env_remove("ISOSEQ_REGRESS_FRESH_OUTPUT_DIR")
        .env_remove("ISOSEQ_REGRESS_ON_RUNNER_FAILURE");
    cmd
}

fn stubbed(work: &Path, runner: &str, compare: &str) -> Command {
    fs::write(work.join("runner.sh"), runner).unwrap();
    fs::write(work.join("compare.sh"), compare).unwrap();
    let mut cmd = cmd(work);
    cmd.args(["--runner", "sh runner.sh", "--compare", "sh compare.sh"]);
    cmd
}

fn last_stdout_line(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .last()
        .unwrap_or_default()
        .to_string()
}

#[test]
fn run_writes_comparison_stdout_and_prints_status() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();

    let output = stubbed(work, RUNNER_STUB, "printf 'OK\\n'\nexit 0\n")
        .assert()
        .success()
        .stdout(contains("test_bam_in"))
        .stdout(contains("test_bax_in"))
        .get_output()
        .clone();

    assert_eq!(fs::read_to_string(work.join("results.txt")).unwrap(), "OK\n");
    assert!(work.join("test_bam_in/marker.txt").exists());
    assert_eq!(last_stdout_line(&output), "0");
}

#[test]
fn failing_comparison_does_not_fail_the_driver() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();

    let output = stubbed(work, RUNNER_STUB, "exit 3\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let results = work.join("results.txt");
    assert!(results.exists());
    assert_eq!(fs::read_to_string(&results).unwrap(), "");
    assert_eq!(last_stdout_line(&output), "3");
}

#[test]
fn previous_results_are_replaced_not_appended() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();
    fs::write(work.join("results.txt"), "stale report\nfrom last week\n").unwrap();

    stubbed(work, RUNNER_STUB, "echo fresh report\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(work.join("results.txt")).unwrap(),
        "fresh report\n"
    );
}

#[test]
fn comparison_receives_fresh_and_reference_directories() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();

    stubbed(work, RUNNER_STUB, "echo \"$1\"\necho \"$2\"\n")
        .args(["--reference-dir", "/data/reference/test_bax_in"])
        .assert()
        .success();

    let results = fs::read_to_string(work.join("results.txt")).unwrap();
    let lines: Vec<&str> = results.lines().collect();
    assert!(lines[0].ends_with("test_bam_in"));
    assert_eq!(lines[1], "/data/reference/test_bax_in");
}

#[test]
fn runner_failure_stops_before_comparison() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();

    stubbed(work, "exit 7\n", "echo should-not-run\n")
        .assert()
        .failure()
        .stderr(contains("exited with status 7"));

    assert!(!work.join("results.txt").exists());
}

#[test]
fn runner_failure_can_be_ignored() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();

    stubbed(work, "exit 7\n", "echo compared anyway\n")
        .args(["--on-runner-failure", "continue"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(work.join("results.txt")).unwrap(),
        "compared anyway\n"
    );
}

#[test]
fn summary_file_records_exit_codes() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();

    stubbed(work, RUNNER_STUB, "echo diff\nexit 1\n")
        .args(["--summary", "summary.json", "--emit-script", "replay.sh"])
        .assert()
        .success();

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(work.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["runner"]["status"], 0);
    assert_eq!(summary["comparison"]["status"], 1);
    assert_eq!(summary["results_bytes"], 5);
    assert!(work.join("replay.sh").exists());
}

#[test]
fn missing_compare_program_is_reported() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();
    fs::write(work.join("runner.sh"), RUNNER_STUB).unwrap();

    cmd(work)
        .args([
            "--runner",
            "sh runner.sh",
            "--compare",
            "no-such-compare-tool-93127",
        ])
        .assert()
        .failure()
        .stderr(contains("no-such-compare-tool-93127"));
}

#[test]
fn config_init_then_show() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();

    cmd(work)
        .args(["config", "init", "--config-file", "regress.toml"])
        .assert()
        .success()
        .stdout(contains("Created configuration file"));
    assert!(work.join("regress.toml").exists());

    cmd(work)
        .args(["config", "init", "--config-file", "regress.toml"])
        .assert()
        .failure();

    cmd(work)
        .args(["config", "show", "--config-file", "regress.toml"])
        .assert()
        .success()
        .stdout(contains("run_isoseq_bam_in.sh"))
        .stdout(contains("compare_isoseq_runs"));
}

#[test]
fn config_validate_rejects_bad_file() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path();
    fs::write(work.join("bad.json"), "{ \"on_runner_failure\": \"retry\" }").unwrap();

    cmd(work)
        .args(["config", "validate", "--config-file", "bad.json"])
        .assert()
        .failure();
}
