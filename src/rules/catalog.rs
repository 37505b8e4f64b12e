//! The immutable rule catalog.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::{builtin_defs, Rule, RuleDef};
use crate::lang::Language;

/// Errors raised while assembling the catalog. All of them are rule
/// authoring defects and abort the run before any file is scanned.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("duplicate rule identifier {0:?}")]
    DuplicateRule(String),
    #[error("rule {id:?} has an invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },
    #[error("rule {0:?} declares an empty language set")]
    EmptyApplicability(String),
}

/// Every known rule, sorted by identifier and indexed by language.
///
/// Built once and read-only afterwards; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Catalog {
    rules: Vec<Arc<Rule>>,
    by_language: HashMap<Language, Vec<Arc<Rule>>>,
}

impl Catalog {
    /// Compile and index a set of rule definitions.
    pub fn build<'a, I>(defs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = &'a RuleDef>,
    {
        let mut sorted: BTreeMap<String, Arc<Rule>> = BTreeMap::new();

        for def in defs {
            if sorted.contains_key(def.id) {
                return Err(CatalogError::DuplicateRule(def.id.to_string()));
            }
            let rule = Rule::compile(def)?;
            sorted.insert(rule.id().to_string(), Arc::new(rule));
        }

        let rules: Vec<Arc<Rule>> = sorted.into_values().collect();

        let by_language = Language::ALL
            .iter()
            .map(|lang| {
                let subset = rules
                    .iter()
                    .filter(|r| r.applies_to(*lang))
                    .cloned()
                    .collect::<Vec<_>>();
                (*lang, subset)
            })
            .collect::<HashMap<_, _>>();

        debug!(rules = rules.len(), "rule catalog built");

        Ok(Self { rules, by_language })
    }

    /// Build the catalog of shipped rules.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::build(builtin_defs())
    }

    /// Every rule, sorted by identifier.
    pub fn all(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    /// Rules scoped to `lang` plus universal rules, sorted by identifier.
    pub fn by_language(&self, lang: Language) -> &[Arc<Rule>] {
        self.by_language
            .get(&lang)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a rule by identifier.
    pub fn get(&self, id: &str) -> Option<&Arc<Rule>> {
        self.rules
            .binary_search_by(|r| r.id().cmp(id))
            .ok()
            .map(|idx| &self.rules[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Axis, Scope, Severity};

    fn def(id: &'static str, scope: Scope) -> RuleDef {
        RuleDef {
            id,
            severity: Severity::Medium,
            axis: Axis::Noise,
            message: "test rule",
            scope,
            pattern: r"marker",
            case_insensitive: false,
        }
    }

    #[test]
    fn test_builtin_catalog_builds() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.contains("go_overconfident_comment"));
        assert!(catalog.contains("js_var_keyword"));
        assert!(catalog.contains("hedging_comment"));
    }

    #[test]
    fn test_duplicate_identifier_fails() {
        let defs = [
            def("dup", Scope::Only(&[Language::Go])),
            def("other", Scope::Universal),
            def("dup", Scope::Only(&[Language::Python])),
        ];
        let err = Catalog::build(&defs).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRule(id) if id == "dup"));
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let defs = [RuleDef {
            pattern: r"(",
            ..def("broken", Scope::Universal)
        }];
        assert!(matches!(
            Catalog::build(&defs),
            Err(CatalogError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_all_sorted_regardless_of_registration_order() {
        let defs = [
            def("zeta", Scope::Universal),
            def("alpha", Scope::Only(&[Language::Go])),
            def("mu", Scope::Only(&[Language::Python])),
        ];
        let catalog = Catalog::build(&defs).unwrap();
        let ids: Vec<&str> = catalog.all().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn test_by_language_excludes_foreign_rules() {
        let defs = [
            def("go_only", Scope::Only(&[Language::Go])),
            def("py_only", Scope::Only(&[Language::Python])),
            def("web", Scope::Only(&[Language::JavaScript, Language::TypeScript])),
            def("everywhere", Scope::Universal),
        ];
        let catalog = Catalog::build(&defs).unwrap();

        let go: Vec<&str> = catalog.by_language(Language::Go).iter().map(|r| r.id()).collect();
        assert_eq!(go, vec!["everywhere", "go_only"]);

        let ts: Vec<&str> = catalog
            .by_language(Language::TypeScript)
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(ts, vec!["everywhere", "web"]);

        let py: Vec<&str> = catalog
            .by_language(Language::Python)
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(py, vec!["everywhere", "py_only"]);
    }

    #[test]
    fn test_get() {
        let defs = [def("b", Scope::Universal), def("a", Scope::Universal)];
        let catalog = Catalog::build(&defs).unwrap();
        assert_eq!(catalog.get("b").map(|r| r.id()), Some("b"));
        assert!(catalog.get("c").is_none());
        assert_eq!(catalog.len(), 2);
    }
}
