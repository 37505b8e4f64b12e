//! Tests for the JSON and SARIF report formats.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sloppy::report::{build_json_report, build_sarif_report, JsonReport, SarifReport};
use sloppy::score;
use sloppy::{Catalog, Resolver, ScanOutcome, Scanner, SourceFile};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn load(rel: &str, lang: &str) -> SourceFile {
    let text = std::fs::read_to_string(testdata_path().join(rel)).expect("should read fixture");
    SourceFile::new(rel, lang, text)
}

fn run(files: &[SourceFile]) -> (Catalog, ScanOutcome) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let outcome = Scanner::new(Resolver::unfiltered(&catalog)).scan(files);
    (catalog, outcome)
}

fn json_report(outcome: &ScanOutcome) -> JsonReport {
    let s = score::calculate(outcome);
    build_json_report("testdata", outcome, &s)
}

#[test]
fn test_json_report_fields() {
    let (_, outcome) = run(&[load("go/sloppy.go", "go"), SourceFile::untagged("LICENSE", "MIT\n")]);
    let report = json_report(&outcome);

    assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(report.path, "testdata");
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.findings.len(), outcome.findings.len());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].file, "LICENSE");

    let first = &report.findings[0];
    assert_eq!(first.rule, "go_commented_code");
    assert_eq!(first.severity, "medium");
    assert_eq!(first.axis, "noise");
    assert_eq!(first.file, "go/sloppy.go");
    assert_eq!(first.line, 18);
    assert!(first.column >= 1);
}

#[test]
fn test_json_summary_counts_match_findings() {
    let (_, outcome) = run(&[load("python/sloppy.py", "python"), load("js/sloppy.js", "javascript")]);
    let report = json_report(&outcome);

    let axis_total: usize = report.summary.by_axis.iter().map(|c| c.count).sum();
    let severity_total: usize = report.summary.by_severity.iter().map(|c| c.count).sum();
    assert_eq!(axis_total, report.findings.len());
    assert_eq!(severity_total, report.findings.len());

    let names: Vec<&str> = report.summary.by_severity.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["high", "medium", "low"]);
}

#[test]
fn test_json_round_trips_through_serde() {
    let (_, outcome) = run(&[load("ts/sloppy.ts", "typescript")]);
    let report = json_report(&outcome);

    let text = serde_json::to_string_pretty(&report).expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["findings"].as_array().map(|a| a.len()), Some(3));
    assert_eq!(value["findings"][0]["rule"], "js_hedging_comment");
    // Empty side lists are omitted.
    assert!(value.get("errors").is_none());
    assert!(value.get("suppressed").is_none());

    let parsed: JsonReport = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(parsed.findings.len(), 3);
}

#[test]
fn test_suppressed_findings_reported_separately() {
    let text = "console.log(\"debug\", x); // sloppy:ignore js_debug_console - needed for the demo\nconsole.log(\"debug\", y);\n";
    let (_, outcome) = run(&[SourceFile::new("app.js", "javascript", text)]);
    let report = json_report(&outcome);

    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].line, 2);
    assert_eq!(report.suppressed_count, 1);
    assert_eq!(report.suppressed[0].finding.line, 1);
    assert_eq!(report.suppressed[0].target, "js_debug_console");
    assert_eq!(report.suppressed[0].reason, "needed for the demo");
    assert_eq!(report.suppressed[0].suppression_type, "line");
}

#[test]
fn test_sarif_structure() {
    let (catalog, outcome) = run(&[load("go/sloppy.go", "go"), load("js/sloppy.js", "javascript")]);
    let report = build_sarif_report(Path::new(""), &outcome, &catalog);

    assert_eq!(report.version, "2.1.0");
    assert_eq!(report.runs.len(), 1);
    let run = &report.runs[0];
    assert_eq!(run.tool.driver.name, "sloppy");
    assert_eq!(run.results.len(), outcome.findings.len());

    // One rule entry per distinct rule that fired.
    let ids: Vec<&str> = run.tool.driver.rules.iter().map(|r| r.id.as_str()).collect();
    let distinct: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), distinct.len());
    let fired: HashSet<&str> = outcome.findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert_eq!(distinct, fired);

    let merge = run
        .tool
        .driver
        .rules
        .iter()
        .find(|r| r.id == "merge_conflict_marker")
        .expect("merge marker rule");
    assert_eq!(merge.properties.languages, "all");
    assert_eq!(merge.default_config.level, "error");
}

#[test]
fn test_sarif_levels_and_locations() {
    let (catalog, outcome) = run(&[load("js/sloppy.js", "javascript")]);
    let report = build_sarif_report(Path::new(""), &outcome, &catalog);

    for result in &report.runs[0].results {
        let expected = match result.rule_id.as_str() {
            "js_magic_css_value" | "js_todo_comment" => "note",
            "js_hedging_comment" => "error",
            _ => continue,
        };
        assert_eq!(result.level, expected, "{}", result.rule_id);
    }

    let var = report.runs[0]
        .results
        .iter()
        .find(|r| r.rule_id == "js_var_keyword")
        .expect("var finding");
    let loc = &var.locations[0].physical_location;
    assert_eq!(loc.artifact_location.uri, "js/sloppy.js");
    assert_eq!(loc.region.start_line, 2);
    assert_eq!(loc.region.start_column, 1);
}

#[test]
fn test_sarif_serializes_schema_key() {
    let (catalog, outcome) = run(&[load("ts/sloppy.ts", "typescript")]);
    let report = build_sarif_report(Path::new(""), &outcome, &catalog);

    let value = serde_json::to_value(&report).expect("serialize");
    assert!(value["$schema"].as_str().is_some_and(|s| s.contains("sarif-schema-2.1.0")));
    assert_eq!(value["runs"][0]["results"][0]["ruleId"], "js_hedging_comment");
    assert_eq!(
        value["runs"][0]["results"][0]["locations"][0]["physicalLocation"]["region"]["startLine"],
        3
    );

    let parsed: SarifReport = serde_json::from_value(value).expect("deserialize");
    assert_eq!(parsed.runs[0].results.len(), 3);
}

#[test]
fn test_json_summary_counts_per_rule() {
    let (_, outcome) = run(&[load("python/sloppy.py", "python")]);
    let report = json_report(&outcome);

    let by_rule: Vec<(&str, usize)> = report
        .summary
        .by_rule
        .iter()
        .map(|c| (c.name.as_str(), c.count))
        .collect();
    assert!(by_rule.contains(&("commented_code", 3)));
    assert!(by_rule.contains(&("leaked_js_idiom", 2)));
    assert_eq!(by_rule.iter().map(|(_, n)| n).sum::<usize>(), report.findings.len());

    // Rule names come out sorted.
    let names: Vec<&str> = by_rule.iter().map(|(name, _)| *name).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}
