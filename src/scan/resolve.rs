//! Language resolution: which rules run on a file with a given tag.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::lang::Language;
use crate::rules::{Axis, Catalog, Rule, Severity};

use super::ScanError;

/// Narrows the catalog per user configuration. A filter only ever removes
/// rules; it cannot make a rule apply to a language it was not written for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    /// Rule identifiers to skip.
    pub disabled: BTreeSet<String>,
    /// Rules below this severity are skipped.
    pub min_severity: Option<Severity>,
    /// Axes to skip entirely.
    pub excluded_axes: BTreeSet<Axis>,
}

impl RuleFilter {
    pub fn allows(&self, rule: &Rule) -> bool {
        if self.disabled.contains(rule.id()) {
            return false;
        }
        if let Some(min) = self.min_severity {
            if rule.severity() < min {
                return false;
            }
        }
        !self.excluded_axes.contains(&rule.axis())
    }
}

/// Precomputed per-language rule lists, each sorted by identifier.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: HashMap<Language, Vec<Arc<Rule>>>,
}

impl Resolver {
    pub fn new(catalog: &Catalog, filter: &RuleFilter) -> Self {
        let table = Language::ALL
            .iter()
            .map(|lang| {
                let rules: Vec<Arc<Rule>> = catalog
                    .by_language(*lang)
                    .iter()
                    .filter(|r| r.applies_to(*lang) && filter.allows(r))
                    .cloned()
                    .collect();
                (*lang, rules)
            })
            .collect();

        Self { table }
    }

    /// Resolver over the whole catalog with no filtering.
    pub fn unfiltered(catalog: &Catalog) -> Self {
        Self::new(catalog, &RuleFilter::default())
    }

    /// Rules to run for files tagged `lang`, in stable identifier order.
    pub fn rules_for(&self, lang: Language) -> &[Arc<Rule>] {
        self.table.get(&lang).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Parse a file's language tag and return its rules.
    pub fn resolve(&self, file: &str, tag: Option<&str>) -> Result<(Language, &[Arc<Rule>]), ScanError> {
        let tag = match tag.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => {
                return Err(ScanError::MissingLanguage {
                    file: file.to_string(),
                })
            }
        };

        let lang: Language = tag.parse().map_err(|_| ScanError::UnknownLanguage {
            file: file.to_string(),
            tag: tag.to_string(),
        })?;

        Ok((lang, self.rules_for(lang)))
    }

    /// Total number of distinct rules that can run on some language.
    pub fn active_rule_count(&self) -> usize {
        self.table
            .values()
            .flatten()
            .map(|r| r.id())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleDef, Scope};

    fn def(id: &'static str, scope: Scope, severity: Severity, axis: Axis) -> RuleDef {
        RuleDef {
            id,
            severity,
            axis,
            message: "test",
            scope,
            pattern: "x",
            case_insensitive: false,
        }
    }

    fn catalog() -> Catalog {
        let defs = [
            def("go_b", Scope::Only(&[Language::Go]), Severity::High, Axis::Style),
            def("go_a", Scope::Only(&[Language::Go]), Severity::Low, Axis::Noise),
            def("py", Scope::Only(&[Language::Python]), Severity::Medium, Axis::Style),
            def("any", Scope::Universal, Severity::High, Axis::Structure),
        ];
        Catalog::build(&defs).unwrap()
    }

    fn ids(rules: &[Arc<Rule>]) -> Vec<&str> {
        rules.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_rules_sorted_and_scoped() {
        let resolver = Resolver::unfiltered(&catalog());
        assert_eq!(ids(resolver.rules_for(Language::Go)), vec!["any", "go_a", "go_b"]);
        assert_eq!(ids(resolver.rules_for(Language::Python)), vec!["any", "py"]);
        assert_eq!(ids(resolver.rules_for(Language::JavaScript)), vec!["any"]);
        assert_eq!(resolver.active_rule_count(), 4);
    }

    #[test]
    fn test_filter_removes_rules() {
        let filter = RuleFilter {
            disabled: ["any".to_string()].into_iter().collect(),
            min_severity: Some(Severity::Medium),
            excluded_axes: BTreeSet::new(),
        };
        let resolver = Resolver::new(&catalog(), &filter);
        assert_eq!(ids(resolver.rules_for(Language::Go)), vec!["go_b"]);
        assert_eq!(ids(resolver.rules_for(Language::Python)), vec!["py"]);

        let filter = RuleFilter {
            excluded_axes: [Axis::Style].into_iter().collect(),
            ..Default::default()
        };
        let resolver = Resolver::new(&catalog(), &filter);
        assert_eq!(ids(resolver.rules_for(Language::Go)), vec!["any", "go_a"]);
    }

    #[test]
    fn test_resolve_tags() {
        let resolver = Resolver::unfiltered(&catalog());

        let (lang, rules) = resolver.resolve("main.go", Some("go")).unwrap();
        assert_eq!(lang, Language::Go);
        assert_eq!(rules.len(), 3);

        assert_eq!(
            resolver.resolve("a", None).unwrap_err(),
            ScanError::MissingLanguage {
                file: "a".to_string()
            }
        );
        assert_eq!(
            resolver.resolve("a", Some("  ")).unwrap_err(),
            ScanError::MissingLanguage {
                file: "a".to_string()
            }
        );
        assert_eq!(
            resolver.resolve("b.rb", Some("ruby")).unwrap_err(),
            ScanError::UnknownLanguage {
                file: "b.rb".to_string(),
                tag: "ruby".to_string()
            }
        );
    }
}
