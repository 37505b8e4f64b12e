//! Runs one rule against one file's text.

use crate::rules::Rule;

/// Longest excerpt kept for a hit, in characters.
const MAX_EXCERPT_CHARS: usize = 120;

/// A single regex match before it is turned into a finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHit {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// The matched text, truncated to a sane length.
    pub excerpt: String,
}

/// Apply `rule` to `text` line by line.
///
/// Each line is matched on its own, so `^` and `$` anchor to line
/// boundaries and a pathological file cannot turn into one huge match.
/// Hits come back in ascending line order, then ascending column.
pub fn apply(rule: &Rule, text: &str) -> Vec<RawHit> {
    let regex = rule.regex();
    let mut hits = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        for mat in regex.find_iter(line) {
            if mat.as_str().is_empty() {
                continue;
            }
            hits.push(RawHit {
                line: line_num + 1,
                column: line[..mat.start()].chars().count() + 1,
                excerpt: truncate(mat.as_str()),
            });
        }
    }

    hits
}

fn truncate(s: &str) -> String {
    match s.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;
    use crate::rules::{Axis, RuleDef, Scope, Severity};

    fn rule(pattern: &'static str, case_insensitive: bool) -> Rule {
        Rule::compile(&RuleDef {
            id: "test_rule",
            severity: Severity::Medium,
            axis: Axis::Style,
            message: "test",
            scope: Scope::Only(&[Language::Go]),
            pattern,
            case_insensitive,
        })
        .unwrap()
    }

    #[test]
    fn test_reports_line_and_column() {
        let r = rule(r"//\s*(obviously|clearly)\b", true);
        let text = "package main\n\nx := 1 // Obviously fine\n";
        let hits = apply(&r, text);
        assert_eq!(
            hits,
            vec![RawHit {
                line: 3,
                column: 8,
                excerpt: "// Obviously".to_string(),
            }]
        );
    }

    #[test]
    fn test_case_sensitive_rule() {
        let r = rule(r"\bvar\s+\w+\s*=", false);
        assert_eq!(apply(&r, "var x = 5").len(), 1);
        assert!(apply(&r, "VAR x = 5").is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let r = rule(r"marker", false);
        assert!(apply(&r, "").is_empty());
        assert!(apply(&r, "nothing to see\nhere").is_empty());
    }

    #[test]
    fn test_anchors_are_per_line() {
        let r = rule(r"//\s*set\s+\w+\s*$", true);
        let text = "a = 1 // set a\r\nb = 2 // set b to the default\n// set c";
        let lines: Vec<usize> = apply(&r, text).iter().map(|h| h.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_multiple_hits_on_one_line() {
        let r = rule(r"\d{3}px", false);
        let hits = apply(&r, "width: 100px; height: 200px;");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].column, 8);
        assert_eq!(hits[1].column, 23);
    }

    #[test]
    fn test_column_counts_characters() {
        let r = rule(r"marker", false);
        let hits = apply(&r, "é marker");
        assert_eq!(hits[0].column, 3);
    }

    #[test]
    fn test_long_excerpt_is_truncated() {
        let r = rule(r"x+", false);
        let text = "x".repeat(500);
        let hits = apply(&r, &text);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].excerpt.chars().count(), MAX_EXCERPT_CHARS + 3);
    }
}
