//! Output formatting for sloppy results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output grouped by file
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::rules::{Axis, Catalog, Severity};
use crate::scan::{Finding, ScanError, ScanOutcome, SuppressedFinding, SuppressionType};
use crate::score::SlopScore;

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub score: u32,
    pub grade: String,
    pub findings: Vec<JsonFinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<JsonSuppressedFinding>,
    pub suppressed_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    pub summary: JsonSummary,
}

/// A finding in JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFinding {
    pub rule: String,
    pub severity: String,
    pub axis: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub excerpt: String,
    pub message: String,
}

/// A suppressed finding with the directive that silenced it.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSuppressedFinding {
    pub finding: JsonFinding,
    pub target: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(rename = "type")]
    pub suppression_type: String,
}

/// A file that was skipped.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub file: String,
    pub message: String,
}

/// Finding counts per axis and severity.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    pub by_axis: Vec<JsonCount>,
    pub by_severity: Vec<JsonCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_rule: Vec<JsonCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonCount {
    pub name: String,
    pub count: usize,
}

/// Build the JSON report for a scan.
pub fn build_json_report(path: &str, outcome: &ScanOutcome, score: &SlopScore) -> JsonReport {
    let suppressed = outcome
        .suppressed
        .iter()
        .map(|sf| JsonSuppressedFinding {
            finding: finding_to_json(&sf.finding),
            target: sf.suppression.target.clone(),
            reason: sf.suppression.reason.clone(),
            suppression_type: format!("{:?}", sf.suppression.suppression_type).to_lowercase(),
        })
        .collect();

    let errors = outcome
        .errors
        .iter()
        .map(|e| JsonError {
            file: e.file().to_string(),
            message: e.to_string(),
        })
        .collect();

    let by_axis = Axis::ALL
        .iter()
        .map(|axis| JsonCount {
            name: axis.to_string(),
            count: score.axis_count(*axis),
        })
        .collect();

    let by_severity = [Severity::High, Severity::Medium, Severity::Low]
        .iter()
        .map(|sev| JsonCount {
            name: sev.to_string(),
            count: score.severity_count(*sev),
        })
        .collect();

    let by_rule = score
        .by_rule
        .iter()
        .map(|(rule, count)| JsonCount {
            name: rule.clone(),
            count: *count,
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: outcome.scanned,
        score: score.score,
        grade: score.grade.clone(),
        findings: outcome.findings.iter().map(finding_to_json).collect(),
        suppressed,
        suppressed_count: outcome.suppressed.len(),
        errors,
        summary: JsonSummary {
            by_axis,
            by_severity,
            by_rule,
        },
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, outcome: &ScanOutcome, score: &SlopScore) -> anyhow::Result<()> {
    let report = build_json_report(path, outcome, score);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

fn finding_to_json(f: &Finding) -> JsonFinding {
    JsonFinding {
        rule: f.rule_id.clone(),
        severity: f.severity.to_string(),
        axis: f.axis.to_string(),
        file: f.file.clone(),
        line: f.location.line,
        column: f.location.column,
        excerpt: f.excerpt.clone(),
        message: f.message.clone(),
    }
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "sloppy";
const INFO_URI: &str = "https://github.com/zen-systems/sloppy";

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    #[serde(rename = "informationUri")]
    pub information_uri: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    pub default_config: SarifRuleConfig,
    pub properties: SarifRuleProperties,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRuleConfig {
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRuleProperties {
    pub axis: String,
    pub languages: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub region: SarifRegion,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifArtifact {
    pub uri: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: usize,
    #[serde(rename = "startColumn")]
    pub start_column: usize,
}

/// SARIF level for a severity.
pub fn severity_to_level(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

fn make_relative_path(file_path: &str, base_path: &Path) -> String {
    if base_path.as_os_str().is_empty() {
        return file_path.to_string();
    }

    let file = Path::new(file_path);

    // Single file scan: report just the file name
    if file == base_path {
        return file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());
    }

    file.strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}

/// Build the SARIF report for a scan.
pub fn build_sarif_report(base_path: &Path, outcome: &ScanOutcome, catalog: &Catalog) -> SarifReport {
    let rule_ids: BTreeSet<&str> = outcome.findings.iter().map(|f| f.rule_id.as_str()).collect();

    let rules = rule_ids
        .into_iter()
        .filter_map(|id| catalog.get(id))
        .map(|rule| SarifRule {
            id: rule.id().to_string(),
            short_description: SarifMessage {
                text: rule.message().to_string(),
            },
            default_config: SarifRuleConfig {
                level: severity_to_level(rule.severity()).to_string(),
            },
            properties: SarifRuleProperties {
                axis: rule.axis().to_string(),
                languages: rule.applicability().to_string(),
            },
        })
        .collect();

    let results = outcome
        .findings
        .iter()
        .map(|f| SarifResult {
            rule_id: f.rule_id.clone(),
            level: severity_to_level(f.severity).to_string(),
            message: SarifMessage {
                text: f.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact {
                        uri: make_relative_path(&f.file, base_path),
                    },
                    region: SarifRegion {
                        start_line: f.location.line.max(1),
                        start_column: f.location.column.max(1),
                    },
                },
            }],
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: INFO_URI.to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(base_path: &Path, outcome: &ScanOutcome, catalog: &Catalog) -> anyhow::Result<()> {
    let report = build_sarif_report(base_path, outcome, catalog);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, outcome: &ScanOutcome, score: &SlopScore, show_suppressed: bool) {
    println!();
    print!("  ");
    print!("{}", "sloppy".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Files:    ".dimmed());
    println!("{}", outcome.scanned);
    println!();

    if !outcome.findings.is_empty() {
        write_findings(&outcome.findings);
        println!();
    }

    if !outcome.errors.is_empty() {
        write_errors(&outcome.errors);
        println!();
    }

    if !outcome.suppressed.is_empty() {
        write_suppressed_summary(&outcome.suppressed, show_suppressed);
        println!();
    }

    if score.total_findings() > 0 {
        write_breakdown(score);
        println!();
    }

    write_final_status(score);
    println!();
}

fn write_findings(findings: &[Finding]) {
    println!("  {} ({}):", "Findings".bold(), findings.len());

    let mut current_file: Option<&str> = None;
    for f in findings {
        if current_file != Some(f.file.as_str()) {
            println!();
            println!("  {}", f.file.blue().bold());
            current_file = Some(f.file.as_str());
        }

        write_severity_tag(f.severity);
        print!("{}", format!("{:>5}:{:<4}", f.location.line, f.location.column).dimmed());
        print!(" {:<28}", f.rule_id.dimmed());
        println!("{}", f.message);
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::High => print!("    {} ", "HIGH".red()),
        Severity::Medium => print!("    {} ", "MED ".yellow()),
        Severity::Low => print!("    {} ", "LOW ".blue()),
    }
}

fn write_errors(errors: &[ScanError]) {
    println!("  {} ({}):", "Skipped".yellow(), errors.len());
    for e in errors {
        println!("    {}", e);
    }
}

fn write_breakdown(score: &SlopScore) {
    println!("  {}", "By axis:".bold());
    for axis in Axis::ALL {
        let count = score.axis_count(axis);
        if count == 0 {
            continue;
        }
        let plural = if count != 1 { "s" } else { "" };
        println!("    {:<16} {} finding{}", axis.as_str(), count, plural);
    }
}

fn write_colored_score(s: u32) {
    match s {
        s if s <= 10 => print!("{}", s.to_string().green().bold()),
        s if s <= 25 => print!("{}", s.to_string().green()),
        s if s <= 50 => print!("{}", s.to_string().yellow()),
        s if s <= 75 => print!("{}", s.to_string().yellow().bold()),
        _ => print!("{}", s.to_string().red()),
    }
}

fn write_colored_grade(grade: &str) {
    match grade {
        "A" => print!("{}", grade.green().bold()),
        "B" => print!("{}", grade.green()),
        "C" => print!("{}", grade.yellow()),
        "D" => print!("{}", grade.yellow().bold()),
        _ => print!("{}", grade.red()),
    }
}

fn write_final_status(score: &SlopScore) {
    print!("  Slop score: ");
    write_colored_score(score.score);
    print!("  Grade: ");
    write_colored_grade(&score.grade);
    print!(
        "  {}",
        format!(
            "({} high, {} medium, {} low)",
            score.severity_count(Severity::High),
            score.severity_count(Severity::Medium),
            score.severity_count(Severity::Low)
        )
        .dimmed()
    );
    println!();
}

fn write_suppressed_summary(suppressed: &[SuppressedFinding], show_details: bool) {
    println!("  {} ({}):", "Suppressed".dimmed(), suppressed.len());

    if !show_details {
        println!("    {}", "(use --show-suppressed to see details)".dimmed());
        return;
    }

    println!();
    for sf in suppressed {
        let f = &sf.finding;
        let s = &sf.suppression;

        print!("    {:<28}", f.rule_id.dimmed());
        print!("{}", f.file.blue());
        if s.suppression_type == SuppressionType::File {
            print!("{}", ":* (file)".dimmed());
        } else {
            print!("{}", format!(":{}", f.location.line).dimmed());
        }
        println!();

        if !s.reason.is_empty() {
            println!("            {}", format!("reason: {:?}", s.reason).dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_relative_path() {
        let base = Path::new("/repo");
        assert_eq!(make_relative_path("/repo/src/a.py", base), "src/a.py");
        assert_eq!(make_relative_path("/elsewhere/b.go", base), "/elsewhere/b.go");
        assert_eq!(make_relative_path("/repo/a.js", Path::new("/repo/a.js")), "a.js");
        assert_eq!(make_relative_path("x.ts", Path::new("")), "x.ts");
    }

    #[test]
    fn test_severity_to_level() {
        assert_eq!(severity_to_level(Severity::High), "error");
        assert_eq!(severity_to_level(Severity::Medium), "warning");
        assert_eq!(severity_to_level(Severity::Low), "note");
    }
}
