//! Scoring and grouping of scan results.
//!
//! Calculates a slop score (0-100) from finding severities and counts
//! findings per axis and per severity for the reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rules::{Axis, Severity};
use crate::scan::ScanOutcome;

/// Point weights per finding severity.
pub mod points {
    pub const LOW: u32 = 1;
    pub const MEDIUM: u32 = 3;
    pub const HIGH: u32 = 5;
}

/// Grade thresholds.
pub mod grades {
    pub const A_MAX: u32 = 10;
    pub const B_MAX: u32 = 25;
    pub const C_MAX: u32 = 50;
    pub const D_MAX: u32 = 75;
}

/// Score cap.
pub const MAX_SCORE: u32 = 100;

/// The calculated slop score with per-group breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlopScore {
    /// Score from 0-100, higher = sloppier
    pub score: u32,
    /// Letter grade: "A" (0-10), "B" (11-25), "C" (26-50), "D" (51-75), "F" (76-100)
    pub grade: String,
    /// Finding count per axis
    pub by_axis: BTreeMap<Axis, usize>,
    /// Finding count per severity
    pub by_severity: BTreeMap<Severity, usize>,
    /// Finding count per rule
    pub by_rule: BTreeMap<String, usize>,
}

impl SlopScore {
    pub fn total_findings(&self) -> usize {
        self.by_severity.values().sum()
    }

    pub fn axis_count(&self, axis: Axis) -> usize {
        self.by_axis.get(&axis).copied().unwrap_or(0)
    }

    pub fn severity_count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}

fn severity_points(severity: Severity) -> u32 {
    match severity {
        Severity::Low => points::LOW,
        Severity::Medium => points::MEDIUM,
        Severity::High => points::HIGH,
    }
}

/// Determine the letter grade from a score.
fn calculate_grade(score: u32) -> String {
    match score {
        s if s <= grades::A_MAX => "A".to_string(),
        s if s <= grades::B_MAX => "B".to_string(),
        s if s <= grades::C_MAX => "C".to_string(),
        s if s <= grades::D_MAX => "D".to_string(),
        _ => "F".to_string(),
    }
}

/// Calculate the slop score of a scan. Suppressed findings do not count.
pub fn calculate(outcome: &ScanOutcome) -> SlopScore {
    let mut by_axis = BTreeMap::new();
    let mut by_severity = BTreeMap::new();
    let mut by_rule = BTreeMap::new();
    let mut total: u32 = 0;

    for f in &outcome.findings {
        *by_axis.entry(f.axis).or_insert(0) += 1;
        *by_severity.entry(f.severity).or_insert(0) += 1;
        *by_rule.entry(f.rule_id.clone()).or_insert(0) += 1;
        total = total.saturating_add(severity_points(f.severity));
    }

    let score = total.min(MAX_SCORE);

    SlopScore {
        score,
        grade: calculate_grade(score),
        by_axis,
        by_severity,
        by_rule,
    }
}
