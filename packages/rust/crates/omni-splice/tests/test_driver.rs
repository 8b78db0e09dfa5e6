//! Tests for driver module - file I/O around the engine.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use omni_splice::{
    FallbackProbe, LocateRequest, LocateStrategy, MatchPolicy, Operation, SpliceConfig,
    SpliceError, SpliceRequest, run_locate, run_splice,
};

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .expect("Create file")
        .write_all(content.as_bytes())
        .expect("Write content");
    path
}

fn request(source: PathBuf, payload: PathBuf, strategy: LocateStrategy) -> SpliceRequest {
    SpliceRequest {
        operation: Operation::Replace,
        source,
        payload,
        destination: None,
        strategy,
        fallback: None,
        with_diff: false,
    }
}

#[test]
fn test_insert_persists_and_reports() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = write_file(dir.path(), "Reports.js", "alpha\nexport default X;\n");
    let payload = write_file(dir.path(), "new_code.txt", "const y = 1;\n");

    let mut req = request(source.clone(), payload, LocateStrategy::anchor("export default X;"));
    req.operation = Operation::Insert;
    req.with_diff = true;

    let report = run_splice(&req, &SpliceConfig::default()).expect("Should insert");

    let written = std::fs::read_to_string(&source).expect("Read source");
    assert_eq!(written, "alpha\nconst y = 1;\nexport default X;\n");
    assert_eq!(report.splice.chars_inserted(), 13);
    assert_eq!(report.lines_inserted, 1);
    assert_eq!(report.lines_removed, 0);
    assert_eq!(report.chars_after - report.chars_before, 13);
    assert!(report.diff.as_deref().is_some_and(|d| d.contains("+const y = 1;")));

    let text = report.to_string();
    assert!(text.contains("// INSERT:"));
    assert!(text.contains("Inserted: 13 chars (1 lines)"));
}

#[test]
fn test_replace_bracket_interior() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = write_file(dir.path(), "ReportDisplay.js", "head\nSTART\nold body\nEND\ntail");
    let payload = write_file(dir.path(), "update.txt", "new body");

    run_splice(
        &request(source.clone(), payload, LocateStrategy::bracket("START", "END")),
        &SpliceConfig::default(),
    )
    .expect("Should replace");

    assert_eq!(
        std::fs::read_to_string(&source).expect("Read source"),
        "head\nSTART\nnew body\nEND\ntail"
    );
}

#[test]
fn test_destination_leaves_source_untouched() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = write_file(dir.path(), "in.js", "alpha\nexport default X;\n");
    let payload = write_file(dir.path(), "p.txt", "// patched\n");
    let dest = dir.path().join("out.js");

    let mut req = request(source.clone(), payload, LocateStrategy::anchor("export default X;"));
    req.destination = Some(dest.clone());
    let report = run_splice(&req, &SpliceConfig::default()).expect("Should insert");

    assert_eq!(report.destination, dest.display().to_string());
    assert_eq!(
        std::fs::read_to_string(&source).expect("Read source"),
        "alpha\nexport default X;\n"
    );
    assert_eq!(
        std::fs::read_to_string(&dest).expect("Read dest"),
        "alpha\n// patched\nexport default X;\n"
    );
}

#[test]
fn test_not_found_leaves_file_byte_identical() {
    let dir = TempDir::new().expect("Create temp dir");
    let original = "line one\r\nline two ✅\n";
    let source = write_file(dir.path(), "Reports.js", original);
    let payload = write_file(dir.path(), "p.txt", "payload");
    let before = std::fs::read(&source).expect("Read bytes");

    let failure = run_splice(
        &request(source.clone(), payload, LocateStrategy::anchor("export default Reports;")),
        &SpliceConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(failure.error, SpliceError::RegionNotFound { .. }));
    assert_eq!(failure.exit_code, 1);
    assert_eq!(std::fs::read(&source).expect("Read bytes"), before);

    let ctx = failure.context.expect("context");
    assert_eq!(ctx.head, original);
    assert_eq!(ctx.needle, "export default Reports;");
}

#[test]
fn test_fallback_probe_reported() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = write_file(
        dir.path(),
        "Reports.js",
        "const parseWeaknessesFromUnified = (weaknessesText) => {\n  return [];\n};\n",
    );
    let payload = write_file(dir.path(), "fix_parser.txt", "const parseWeaknessesFromUnified = () => [];\n");

    let mut req = request(
        source,
        payload,
        LocateStrategy::pattern(r"const parseWeaknessesFromUnified = \(weaknessesText\) => \{[\s\S]*?return weaknesses;\s*\n\};"),
    );
    req.fallback = Some(LocateStrategy::pattern("const parseWeaknessesFromUnified"));

    let failure = run_splice(&req, &SpliceConfig::default()).unwrap_err();
    let ctx = failure.context.as_ref().expect("context");
    assert_eq!(
        ctx.fallback,
        Some(FallbackProbe::Found {
            pattern: "const parseWeaknessesFromUnified".to_string(),
            line: 1,
        })
    );
    assert!(failure.to_string().contains("declaration exists"));
}

#[test]
fn test_invalid_strategy_skips_io() {
    let failure = run_splice(
        &request(
            PathBuf::from("/nonexistent/source.js"),
            PathBuf::from("/nonexistent/payload.txt"),
            LocateStrategy::anchor(""),
        ),
        &SpliceConfig::default(),
    )
    .unwrap_err();

    // The missing files were never opened.
    assert!(matches!(failure.error, SpliceError::InvalidStrategy(_)));
    assert_eq!(failure.exit_code, 2);
}

#[test]
fn test_missing_payload_is_io_failure() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = write_file(dir.path(), "Reports.js", "export default X;\n");
    let payload = dir.path().join("missing.txt");

    let failure = run_splice(
        &request(source, payload.clone(), LocateStrategy::anchor("export default X;")),
        &SpliceConfig::default(),
    )
    .unwrap_err();

    assert_eq!(failure.exit_code, 3);
    assert!(failure.message.contains(&payload.display().to_string()));
}

#[test]
fn test_oversized_source_rejected() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = write_file(dir.path(), "big.js", "0123456789abcdef");
    let payload = write_file(dir.path(), "p.txt", "x");

    let config = SpliceConfig {
        max_file_size: 8,
        ..SpliceConfig::default()
    };
    let failure = run_splice(
        &request(source, payload, LocateStrategy::anchor("abc")),
        &config,
    )
    .unwrap_err();
    assert!(matches!(failure.error, SpliceError::Io(_)));
}

#[test]
fn test_ambiguous_anchor_lists_candidates() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = write_file(dir.path(), "a.js", "x;\ny;\nx;\n");
    let payload = write_file(dir.path(), "p.txt", "z;\n");

    let failure = run_splice(
        &request(source.clone(), payload.clone(), LocateStrategy::anchor("x;")),
        &SpliceConfig::default(),
    )
    .unwrap_err();
    assert_eq!(failure.context.as_ref().expect("context").occurrence_lines, vec![1, 3]);

    let config = SpliceConfig {
        policy: MatchPolicy::FirstMatch,
        ..SpliceConfig::default()
    };
    run_splice(&request(source.clone(), payload, LocateStrategy::anchor("x;")), &config)
        .expect("leftmost");
    assert_eq!(
        std::fs::read_to_string(&source).expect("Read source"),
        "z;\nx;\ny;\nx;\n"
    );
}

#[test]
fn test_locate_excerpt() {
    let dir = TempDir::new().expect("Create temp dir");
    let body: String = (0..50).map(|i| format!("  step{i}();\n")).collect();
    let source = write_file(
        dir.path(),
        "Reports.js",
        &format!("const parseUnifiedGeminiResponse = (analysisText) => {{\n{body}}};\n"),
    );
    let before = std::fs::read(&source).expect("Read bytes");

    let report = run_locate(
        &LocateRequest {
            source: source.clone(),
            strategy: LocateStrategy::pattern(r"const parseUnifiedGeminiResponse = \([^)]*\) => \{[\s\S]*?^\};"),
            head: 40,
            tail: 20,
        },
        &SpliceConfig::default(),
    )
    .expect("Should locate");

    assert!(report.info.text.ends_with("  step49();\n};"));
    assert!(report.excerpt.head.starts_with("const parseUnifiedGeminiResponse"));
    assert!(report.excerpt.tail.as_deref().is_some_and(|t| t.ends_with("};")));
    assert!(report.to_string().contains("=== REGION START ==="));
    assert_eq!(std::fs::read(&source).expect("Read bytes"), before);
}

#[test]
fn test_locate_missing_end_marker_context() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = write_file(
        dir.path(),
        "ReportDisplay.js",
        "<div className=\"dashboard-panel\">\n  <h3>Start Your Training</h3>\n</div>\n",
    );

    let failure = run_locate(
        &LocateRequest {
            source,
            strategy: LocateStrategy::bracket("<h3>Start Your Training</h3>", "{/* Back to Reports Button */}"),
            head: 10,
            tail: 10,
        },
        &SpliceConfig::default(),
    )
    .unwrap_err();

    let ctx = failure.context.as_ref().expect("context");
    assert_eq!(ctx.marker_context.as_ref().map(|m| m.line), Some(2));
    assert!(failure.to_string().contains("end marker missing"));
}
