//! End-to-end tests: run the `eiflint` binary against the fixtures and check its output and exit status.

use std::path::Path;
use std::process::{Command, Output};

fn eiflint(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eiflint"))
        .args(args)
        .current_dir(Path::new(env!("CARGO_MANIFEST_DIR")))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run eiflint")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn routine_without_contract_fails_the_run() {
    let output = eiflint(&["tests/fixtures/person.e"]);
    assert_eq!(
        stdout(&output).trim_end(),
        "tests/fixtures/person.e:12:2: error [contract-presence] make has 2 statements but no require or ensure \
         assertion"
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("1 file checked: 1 error, 0 warnings"));
}

#[test]
fn space_indentation_is_a_warning_only() {
    let output = eiflint(&["tests/fixtures/spaces.e"]);
    let out = stdout(&output);
    assert!(out.starts_with("tests/fixtures/spaces.e:5:1: warning [tab-expected]"), "{out}");
    assert_eq!(out.lines().count(), 1, "{out}");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn warning_threshold_fails_on_warnings() {
    let output = eiflint(&["--severity-threshold", "warning", "tests/fixtures/spaces.e"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn clean_source_has_no_findings() {
    let output = eiflint(&["tests/fixtures/clean.e"]);
    assert_eq!(stdout(&output), "");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn parser_recovers_after_a_malformed_feature() {
    let output = eiflint(&["tests/fixtures/broken.e"]);
    let out = stdout(&output);
    assert!(out.lines().all(|l| l.starts_with("tests/fixtures/broken.e:")), "{out}");
    let positions: Vec<String> = out
        .lines()
        .filter_map(|l| l.strip_prefix("tests/fixtures/broken.e:"))
        .map(|l| {
            let rule = l.split('[').nth(1).and_then(|r| r.split(']').next()).unwrap_or("");
            let pos: Vec<&str> = l.splitn(3, ':').take(2).collect();
            format!("{} {rule}", pos.join(":"))
        })
        .collect();
    assert_eq!(
        positions,
        [
            "9:4 assertion-labeling",
            "9:4 attachment",
            "17:3 syntax-error",
            "20:2 contract-presence",
            "24:13 invalid-escape",
        ],
        "{out}"
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn repeated_runs_are_identical() {
    let args = ["-j", "4", "tests/fixtures"];
    let first = eiflint(&args);
    let second = eiflint(&args);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
}

#[test]
fn directory_walk_skips_hidden_and_build_directories() {
    let output = eiflint(&["--format", "json", "tests/fixtures/tree"]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report, serde_json::json!([]));
    assert!(stderr(&output).contains("2 files checked: 0 errors, 0 warnings"));
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn json_report_lists_every_field() {
    let output = eiflint(&["--format", "json", "tests/fixtures/person.e"]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        serde_json::json!([{
            "file": "tests/fixtures/person.e",
            "line": 12,
            "column": 2,
            "severity": "error",
            "rule": "contract-presence",
            "message": "make has 2 statements but no require or ensure assertion",
            "fix": null,
        }])
    );
}

#[test]
fn rule_selection_narrows_the_report() {
    let output = eiflint(&["--rules", "naming", "tests/fixtures/person.e"]);
    assert_eq!(stdout(&output), "");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn missing_file_exits_with_two() {
    let output = eiflint(&["tests/fixtures/person.e", "tests/fixtures/nope.e"]);
    let out = stdout(&output);
    assert!(out.contains("tests/fixtures/nope.e:1:1: error [io-error] cannot read"), "{out}");
    assert!(out.contains("[contract-presence]"));
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unusable_invocations_exit_with_two() {
    let output = eiflint(&["tests/fixtures/tree/empty"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no `.e` source files found"));

    let output = eiflint(&["--rules", "bogus", "tests/fixtures/person.e"]);
    assert_eq!(output.status.code(), Some(2));

    let output = eiflint(&[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn list_rules_prints_the_rulebook() {
    let output = eiflint(&["--list-rules"]);
    let out = stdout(&output);
    assert!(out.starts_with("eiflint "));
    assert!(out.lines().next().unwrap_or("").contains("(rulebook "));
    assert_eq!(out.lines().count(), 17);
    assert!(out.contains("syntax-error"));
    assert!(out.contains("(always on)"));
    assert_eq!(output.status.code(), Some(0));
}
