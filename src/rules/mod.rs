//! Detection rules and the rule catalog.
//!
//! Every rule is a plain record: an identifier, a severity, an axis, a
//! message, an explicit applicability scope and a regular expression. The
//! shipped rules live in one module per language (plus `universal`) as
//! static [`RuleDef`] tables; [`Catalog::build`] compiles them once at
//! startup.
//!
//! # Adding a Rule
//!
//! Append a [`RuleDef`] to the table of the language it targets. The scan
//! engine picks it up without any other change.

mod catalog;
mod go;
mod javascript;
mod python;
mod universal;

pub use catalog::{Catalog, CatalogError};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::lang::Language;

/// Severity levels for rules and findings, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Classification of what a rule looks for. Used for grouping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Low information content: debug output, TODO markers, dead code.
    Noise,
    /// Tone and idiom: hedging or overconfident comments, outdated keywords.
    Style,
    /// Suspicious code shape.
    Structure,
    /// Idioms from another language that do not exist in this one.
    Hallucination,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Noise, Axis::Style, Axis::Structure, Axis::Hallucination];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Noise => "noise",
            Axis::Style => "style",
            Axis::Structure => "structure",
            Axis::Hallucination => "hallucination",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noise" => Ok(Axis::Noise),
            "style" => Ok(Axis::Style),
            "structure" => Ok(Axis::Structure),
            "hallucination" => Ok(Axis::Hallucination),
            _ => Err(format!("unknown axis: {}", s)),
        }
    }
}

/// Where a rule definition may be applied.
#[derive(Debug, Clone, Copy)]
pub enum Scope {
    /// Applies to files of every language.
    Universal,
    /// Applies only to files of the listed languages.
    Only(&'static [Language]),
}

/// Static description of a rule, compiled into a [`Rule`] by the catalog.
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    pub id: &'static str,
    pub severity: Severity,
    pub axis: Axis,
    pub message: &'static str,
    pub scope: Scope,
    pub pattern: &'static str,
    pub case_insensitive: bool,
}

/// Compiled applicability of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    Universal,
    Languages(BTreeSet<Language>),
}

impl Applicability {
    /// Whether a file tagged `lang` may be checked by this rule.
    pub fn contains(&self, lang: Language) -> bool {
        match self {
            Applicability::Universal => true,
            Applicability::Languages(set) => set.contains(&lang),
        }
    }

    pub fn is_universal(&self) -> bool {
        matches!(self, Applicability::Universal)
    }
}

impl std::fmt::Display for Applicability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Applicability::Universal => f.write_str("all"),
            Applicability::Languages(set) => {
                let names: Vec<&str> = set.iter().map(|l| l.as_str()).collect();
                f.write_str(&names.join(","))
            }
        }
    }
}

/// A compiled detection rule.
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    severity: Severity,
    axis: Axis,
    message: String,
    applicability: Applicability,
    regex: Regex,
    case_insensitive: bool,
}

impl Rule {
    /// Compile a rule definition.
    pub fn compile(def: &RuleDef) -> Result<Self, CatalogError> {
        let applicability = match def.scope {
            Scope::Universal => Applicability::Universal,
            Scope::Only([]) => return Err(CatalogError::EmptyApplicability(def.id.to_string())),
            Scope::Only(langs) => Applicability::Languages(langs.iter().copied().collect()),
        };

        let regex = RegexBuilder::new(def.pattern)
            .case_insensitive(def.case_insensitive)
            .build()
            .map_err(|source| CatalogError::InvalidPattern {
                id: def.id.to_string(),
                source,
            })?;

        Ok(Self {
            id: def.id.to_string(),
            severity: def.severity,
            axis: def.axis,
            message: def.message.to_string(),
            applicability,
            regex,
            case_insensitive: def.case_insensitive,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Whether this rule may run on a file tagged `lang`.
    pub fn applies_to(&self, lang: Language) -> bool {
        self.applicability.contains(lang)
    }
}

/// Every rule definition shipped with sloppy.
pub fn builtin_defs() -> impl Iterator<Item = &'static RuleDef> {
    python::RULES
        .iter()
        .chain(go::RULES.iter())
        .chain(javascript::RULES.iter())
        .chain(universal::RULES.iter())
}
