//! Matching and dispatch: resolves rules per file, runs them, and merges
//! the findings into an ordered report.

mod engine;
pub mod matcher;
mod resolve;
mod suppress;
mod types;

pub use engine::Scanner;
pub use matcher::RawHit;
pub use resolve::{Resolver, RuleFilter};
pub use suppress::{
    filter_suppressed, matches_suppression, parse_suppressions, SuppressedFinding, Suppression,
    SuppressionType,
};
pub use types::{FileScan, Finding, Location, ScanError, ScanOutcome, SourceFile};
