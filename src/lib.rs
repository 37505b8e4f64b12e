//! Sloppy - multi-language scanner for sloppy code.
//!
//! Sloppy flags textual smells typical of low-quality or AI-generated code:
//! hedging and overconfident comments, stray debug output, TODO markers,
//! suspicious structure, and idioms leaked in from another language. It
//! works on raw text, one line at a time, with no parsing.
//!
//! # Architecture
//!
//! - `rules`: rule definitions per language and the immutable `Catalog`
//! - `scan`: language resolution, the line matcher and the `Scanner`
//! - `config`: YAML config file schema
//! - `report`: output formatting (pretty, JSON, SARIF)
//! - `score`: slop score and per-axis counts
//! - `cli`: command-line glue and file collection
//!
//! # Example
//!
//! ```
//! use sloppy::{Catalog, Resolver, Scanner, SourceFile};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let scanner = Scanner::new(Resolver::unfiltered(&catalog));
//! let outcome = scanner.scan(&[SourceFile::new("main.go", "go", "// obviously fine\n")]);
//! assert_eq!(outcome.findings[0].rule_id, "go_overconfident_comment");
//! ```

pub mod cli;
pub mod config;
pub mod lang;
pub mod report;
pub mod rules;
pub mod scan;
pub mod score;

pub use config::Config;
pub use lang::Language;
pub use rules::{Axis, Catalog, CatalogError, Rule, RuleDef, Scope, Severity};
pub use scan::{Finding, Location, Resolver, RuleFilter, ScanError, ScanOutcome, Scanner, SourceFile};
pub use score::SlopScore;
