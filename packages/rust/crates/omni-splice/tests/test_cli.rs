//! Tests for the omni-splice binary - exit codes and output.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn omni_splice(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_omni-splice"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Run omni-splice")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("UTF-8 temp path")
}

#[test]
fn test_insert_success() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = dir.path().join("Reports.js");
    let payload = dir.path().join("new_code.txt");
    std::fs::write(&source, "alpha\nexport default X;\n").expect("Write source");
    std::fs::write(&payload, "const y = 1;\n").expect("Write payload");

    let output = omni_splice(&[
        "insert",
        "--anchor",
        "export default X;",
        "--before",
        "--source",
        path_str(&source),
        "--payload",
        path_str(&payload),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("// INSERT:"));
    assert_eq!(
        std::fs::read_to_string(&source).expect("Read source"),
        "alpha\nconst y = 1;\nexport default X;\n"
    );
}

#[test]
fn test_replace_not_found_exit_code() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = dir.path().join("ReportDisplay.js");
    let payload = dir.path().join("update.txt");
    std::fs::write(&source, "head\ntail\n").expect("Write source");
    std::fs::write(&payload, "new").expect("Write payload");

    let output = omni_splice(&[
        "replace",
        "--start",
        "START",
        "--end",
        "END",
        "--source",
        path_str(&source),
        "--payload",
        path_str(&payload),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("REPLACE FAILED"));
    assert!(stdout.contains("bracket not found: \"START\""));
    assert_eq!(std::fs::read_to_string(&source).expect("Read source"), "head\ntail\n");
}

#[test]
fn test_invalid_pattern_exit_code() {
    let output = omni_splice(&[
        "locate",
        "--pattern",
        "([unclosed",
        "--source",
        "/nonexistent/Reports.js",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_source_exit_code() {
    let output = omni_splice(&[
        "locate",
        "--anchor",
        "export default",
        "--source",
        "/nonexistent/Reports.js",
    ]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_locate_json() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = dir.path().join("Reports.js");
    std::fs::write(&source, "const f = (a) => {\n  return a;\n};\n").expect("Write source");

    let output = omni_splice(&[
        "locate",
        "--pattern",
        r"const f = \([^)]*\) => \{(?P<body>[\s\S]*?)^\};",
        "--group",
        "body",
        "--source",
        path_str(&source),
        "--json",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("JSON report");
    assert_eq!(report["info"]["kind"], "pattern");
    assert_eq!(report["info"]["line"], 1);
    assert_eq!(report["info"]["payload"]["text"], "\n  return a;\n");
}
