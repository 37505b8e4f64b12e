//! Go rules.

use super::{Axis, RuleDef, Scope, Severity};
use crate::lang::Language;

const GO: Scope = Scope::Only(&[Language::Go]);

pub(super) static RULES: &[RuleDef] = &[
    // Noise
    RuleDef {
        id: "go_debug_print",
        severity: Severity::Medium,
        axis: Axis::Noise,
        message: "Debug print statement - remove before production",
        scope: GO,
        pattern: r#"\bfmt\.Print(ln|f)?\s*\(\s*"(debug|test|temp|here)\b"#,
        case_insensitive: true,
    },
    RuleDef {
        id: "go_todo_comment",
        severity: Severity::Low,
        axis: Axis::Noise,
        message: "TODO comment - track in issue tracker instead",
        scope: GO,
        pattern: r"//\s*(TODO|FIXME|XXX|HACK)\s*:",
        case_insensitive: true,
    },
    RuleDef {
        id: "go_commented_code",
        severity: Severity::Medium,
        axis: Axis::Noise,
        message: "Commented-out code - remove or use version control",
        scope: GO,
        pattern: r"^\s*//\s*(func\s+[\w(]|if\s+.*\{\s*$|for\s+.*\{\s*$|return\s+[\w&(\[]|fmt\.\w+\(|\w+\s*:=\s*\S)",
        case_insensitive: false,
    },
    // Style
    RuleDef {
        id: "go_overconfident_comment",
        severity: Severity::Medium,
        axis: Axis::Style,
        message: "Overconfident comment - code should speak for itself",
        scope: GO,
        pattern: r"//\s*(obviously|clearly|trivial|of course)\b",
        case_insensitive: true,
    },
    RuleDef {
        id: "go_hedging_comment",
        severity: Severity::High,
        axis: Axis::Style,
        message: "Hedging comment indicates AI uncertainty - verify implementation",
        scope: GO,
        pattern: r"//\s*(should work|hopefully|try this|i think)\b",
        case_insensitive: true,
    },
    // Structure
    RuleDef {
        id: "go_placeholder_panic",
        severity: Severity::High,
        axis: Axis::Structure,
        message: "Placeholder panic - implement the function",
        scope: GO,
        pattern: r#"\bpanic\(\s*"(not implemented|unimplemented|todo|implement me)"#,
        case_insensitive: true,
    },
    RuleDef {
        id: "go_discarded_error",
        severity: Severity::Medium,
        axis: Axis::Structure,
        message: "Error return discarded with blank identifier",
        scope: GO,
        pattern: r"\w\s*,\s*_\s*:?=\s*[\w.]+\(",
        case_insensitive: false,
    },
    // Hallucination
    RuleDef {
        id: "go_python_pattern",
        severity: Severity::High,
        axis: Axis::Hallucination,
        message: "Python pattern in Go code - use Go idioms",
        scope: GO,
        pattern: r"\.append\(|\belif\b|\bself\.\w+|\bis\s+(not\s+)?None\b",
        case_insensitive: false,
    },
];
