//! CLI tests for `statusmap map`, `check` and `init`.
//!
//! Spawns the binary inside a temp directory and inspects stdout, exit
//! status and written files.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

const CONFIG: &str = "models:\n  member:\n    fields: [Name, Email, Phone]\noutput:\n  mode: stdout\n";

const REPORT: &str = r#"{
  "kind": "biz",
  "valid": false,
  "errors": [
    { "member_names": ["Email"], "message": "Invalid format" },
    { "member_names": [], "message": "General failure" }
  ]
}"#;

fn statusmap(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_statusmap"))
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run statusmap")
}

fn stdout_json(output: &Output) -> Value {
    let text = String::from_utf8(output.stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(text.trim()).expect("json stdout")
}

fn workspace() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join("statusmap.yaml"), CONFIG).expect("write config");
    std::fs::write(temp.path().join("report.json"), REPORT).expect("write report");
    temp
}

#[test]
fn map_with_model_attributes_fields() {
    let temp = workspace();

    let output = statusmap(temp.path(), &["map", "report.json", "--model", "member"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["ok"], Value::Bool(false));
    assert_eq!(json["meta"]["mode"], "scoped");
    assert_eq!(
        json["errors"],
        serde_json::json!({ "Email": ["Invalid format"], "": ["General failure"] })
    );
}

#[test]
fn map_without_model_is_summary_only() {
    let temp = workspace();

    let output = statusmap(temp.path(), &["map", "report.json"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["meta"]["mode"], "unscoped");
    assert_eq!(
        json["errors"],
        serde_json::json!({ "": ["Invalid format", "General failure"] })
    );
}

#[test]
fn map_prefix_and_simple_output() {
    let temp = workspace();

    let output = statusmap(
        temp.path(),
        &["map", "report.json", "-m", "member", "--prefix", "Input", "--output", "simple"],
    );
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("Input.Email: Invalid format"));
    assert!(text.contains("(summary): General failure"));
}

#[test]
fn map_fail_on_errors_exits_non_zero() {
    let temp = workspace();

    let output = statusmap(temp.path(), &["map", "report.json", "--fail-on-errors"]);
    assert!(!output.status.success());
}

#[test]
fn map_writes_output_file() {
    let temp = workspace();

    let output = statusmap(
        temp.path(),
        &["map", "report.json", "-m", "member", "--output-file", "out/errors.json"],
    );
    assert!(output.status.success());

    let raw = std::fs::read_to_string(temp.path().join("out/errors.json")).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["errors"]["Email"][0], "Invalid format");
}

#[test]
fn map_unknown_model_fails() {
    let temp = workspace();

    let output = statusmap(temp.path(), &["map", "report.json", "-m", "invoice"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Unknown display model 'invoice'"));
}

#[test]
fn check_reports_malformed_files() {
    let temp = workspace();
    let reports = temp.path().join("reports");
    std::fs::create_dir_all(&reports).unwrap();
    std::fs::write(reports.join("good.json"), REPORT).unwrap();
    std::fs::write(
        reports.join("bad.yaml"),
        "kind: service\nvalid: true\nerrors:\n  - error_result:\n      message: oops\n",
    )
    .unwrap();

    let output = statusmap(temp.path(), &["check", "reports"]);
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["ok"], Value::Bool(false));
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["valid"], Value::Bool(false));
    assert_eq!(results[0]["errors"][0]["code"], "STATUS_FLAG_MISMATCH");
    assert_eq!(results[1]["valid"], Value::Bool(true));
}

#[test]
fn check_flags_misspelled_errors_key() {
    let temp = workspace();
    std::fs::write(
        temp.path().join("typo.json"),
        r#"{"kind":"biz","Errors":[{"member_names":["Email"],"message":"Invalid format"}]}"#,
    )
    .unwrap();

    let output = statusmap(temp.path(), &["check", "typo.json"]);
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["ok"], Value::Bool(false));
    assert_eq!(json["results"][0]["errors"][0]["code"], "REPORT_UNREADABLE");

    let output = statusmap(temp.path(), &["map", "typo.json"]);
    assert!(!output.status.success());
}

#[test]
fn map_rejects_malformed_cli_prefix() {
    let temp = workspace();

    let output = statusmap(
        temp.path(),
        &["map", "report.json", "-m", "member", "--prefix", ".Input"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("prefix must not start or end with '.'"));
}

#[test]
fn init_scaffold_then_map() {
    let temp = tempfile::tempdir().unwrap();

    let output = statusmap(temp.path(), &["init"]);
    assert!(output.status.success());
    assert!(temp.path().join("statusmap.yaml").exists());
    assert!(temp.path().join("reports/example.json").exists());

    let output = statusmap(
        temp.path(),
        &["map", "reports/example.json", "-m", "member", "--output", "stdout"],
    );
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["errors"]["Email"][0], "Invalid format");
}
