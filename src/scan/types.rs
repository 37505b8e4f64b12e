//! Core types for scan input and results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::matcher::RawHit;
use super::SuppressedFinding;
use crate::rules::{Axis, Rule, Severity};

/// One file handed to the scanner: an opaque identity, its language tag and
/// its full text. The scanner never touches the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub id: String,
    pub language: Option<String>,
    pub text: String,
}

impl SourceFile {
    pub fn new(id: impl Into<String>, language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: Some(language.into()),
            text: text.into(),
        }
    }

    /// A file whose language could not be determined.
    pub fn untagged(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: None,
            text: text.into(),
        }
    }
}

/// Position of a finding: 1-based line, 1-based column (in characters) of
/// the first match on that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// A single reported occurrence of a rule in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub axis: Axis,
    pub file: String,
    pub location: Location,
    pub excerpt: String,
    pub message: String,
}

impl Finding {
    pub(crate) fn from_hit(rule: &Rule, file: &str, hit: RawHit) -> Self {
        Self {
            rule_id: rule.id().to_string(),
            severity: rule.severity(),
            axis: rule.axis(),
            file: file.to_string(),
            location: Location {
                line: hit.line,
                column: hit.column,
            },
            excerpt: hit.excerpt,
            message: rule.message().to_string(),
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    /// Identity of the physical occurrence this finding reports.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.rule_id, self.file, self.location.line)
    }
}

/// A file that could not be scanned. Recorded on the side; never aborts the
/// rest of the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("{file}: missing language tag")]
    MissingLanguage { file: String },
    #[error("{file}: unsupported language {tag:?}")]
    UnknownLanguage { file: String, tag: String },
    #[error("{file}: {reason}")]
    Unreadable { file: String, reason: String },
}

impl ScanError {
    /// The file this error refers to.
    pub fn file(&self) -> &str {
        match self {
            ScanError::MissingLanguage { file }
            | ScanError::UnknownLanguage { file, .. }
            | ScanError::Unreadable { file, .. } => file,
        }
    }
}

/// Result of scanning a single file.
#[derive(Debug, Clone, Default)]
pub struct FileScan {
    pub findings: Vec<Finding>,
    pub suppressed: Vec<SuppressedFinding>,
}

/// Results of a whole scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Findings in input file order, then rule order, then line.
    pub findings: Vec<Finding>,
    /// Findings silenced by inline suppression comments.
    pub suppressed: Vec<SuppressedFinding>,
    /// Files that were skipped.
    pub errors: Vec<ScanError>,
    /// Number of files scanned successfully.
    pub scanned: usize,
}

impl ScanOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's result into the outcome.
    pub fn record(&mut self, file: Result<FileScan, ScanError>) {
        match file {
            Ok(scan) => {
                self.findings.extend(scan.findings);
                self.suppressed.extend(scan.suppressed);
                self.scanned += 1;
            }
            Err(e) => self.errors.push(e),
        }
    }

    /// Whether any active finding is at least as severe as `threshold`.
    pub fn has_at_least(&self, threshold: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= threshold)
    }

    /// Findings reported for one file.
    pub fn findings_for<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.file == file)
    }
}
