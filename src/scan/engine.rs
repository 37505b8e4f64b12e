//! Scan engine that drives rules over a batch of files.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::matcher;
use super::suppress::{filter_suppressed, parse_suppressions};
use super::{FileScan, Finding, Resolver, ScanError, ScanOutcome, SourceFile};

/// Executes the resolved rules against a set of in-memory files.
pub struct Scanner {
    resolver: Resolver,
    jobs: Option<usize>,
}

impl Scanner {
    /// Create a scanner using the global rayon pool.
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            jobs: None,
        }
    }

    /// Limit the number of worker threads. `1` scans on the calling thread.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|n| *n > 0);
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Scan every file and merge the results in input order.
    ///
    /// Files are independent: one file's failure is recorded in
    /// [`ScanOutcome::errors`] and the rest of the batch is still scanned.
    pub fn scan(&self, files: &[SourceFile]) -> ScanOutcome {
        let results: Vec<Result<FileScan, ScanError>> = match self.jobs {
            Some(1) => files.iter().map(|f| self.scan_file(f)).collect(),
            Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(|f| self.scan_file(f)).collect()),
                Err(e) => {
                    warn!(error = %e, "could not build worker pool, scanning sequentially");
                    files.iter().map(|f| self.scan_file(f)).collect()
                }
            },
            None => files.par_iter().map(|f| self.scan_file(f)).collect(),
        };

        let mut outcome = ScanOutcome::new();
        for result in results {
            if let Err(e) = &result {
                warn!(file = e.file(), "skipping file: {}", e);
            }
            outcome.record(result);
        }

        debug!(
            scanned = outcome.scanned,
            findings = outcome.findings.len(),
            skipped = outcome.errors.len(),
            "scan finished"
        );

        outcome
    }

    /// Scan a single file.
    ///
    /// Findings come out in rule order, then ascending line, with at most one
    /// finding per rule per line.
    pub fn scan_file(&self, file: &SourceFile) -> Result<FileScan, ScanError> {
        let (language, rules) = self.resolver.resolve(&file.id, file.language.as_deref())?;

        let mut seen: HashSet<(&str, usize)> = HashSet::new();
        let mut findings = Vec::new();

        for rule in rules {
            for hit in matcher::apply(rule, &file.text) {
                if seen.insert((rule.id(), hit.line)) {
                    findings.push(Finding::from_hit(rule, &file.id, hit));
                }
            }
        }

        let suppressions = parse_suppressions(&file.id, language, &file.text);
        let (findings, suppressed) = filter_suppressed(findings, &suppressions);

        debug!(
            file = %file.id,
            %language,
            rules = rules.len(),
            findings = findings.len(),
            suppressed = suppressed.len(),
            "scanned file"
        );

        Ok(FileScan {
            findings,
            suppressed,
        })
    }
}
