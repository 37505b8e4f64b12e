//! Python rules.
//!
//! Python was the first language sloppy supported, so its identifiers carry
//! no language prefix. Their scope is still explicit: none of them run on
//! any other language.

use super::{Axis, RuleDef, Scope, Severity};
use crate::lang::Language;

const PYTHON: Scope = Scope::Only(&[Language::Python]);

pub(super) static RULES: &[RuleDef] = &[
    // Noise
    RuleDef {
        id: "debug_print",
        severity: Severity::Medium,
        axis: Axis::Noise,
        message: "Debug print statement - remove before production",
        scope: PYTHON,
        pattern: r#"\bprint\s*\(\s*f?["'](debug|test|temp|here)\b"#,
        case_insensitive: true,
    },
    RuleDef {
        id: "debug_breakpoint",
        severity: Severity::High,
        axis: Axis::Noise,
        message: "Debugger breakpoint left in code",
        scope: PYTHON,
        pattern: r"^\s*(breakpoint\(\)|import\s+i?pdb\b|i?pdb\.set_trace\(\))",
        case_insensitive: false,
    },
    RuleDef {
        id: "todo_comment",
        severity: Severity::Low,
        axis: Axis::Noise,
        message: "TODO comment - track in issue tracker instead",
        scope: PYTHON,
        pattern: r"#\s*(TODO|FIXME|XXX|HACK)\s*:",
        case_insensitive: true,
    },
    RuleDef {
        id: "redundant_comment",
        severity: Severity::Medium,
        axis: Axis::Noise,
        message: "Redundant comment restating obvious code",
        scope: PYTHON,
        pattern: r"#\s*(increment|decrement|set|assign|return|get|initialize|init|create)\s+\w+\s*$",
        case_insensitive: true,
    },
    RuleDef {
        id: "commented_code",
        severity: Severity::Medium,
        axis: Axis::Noise,
        message: "Commented-out code - remove or use version control",
        scope: PYTHON,
        pattern: r"^\s*#\s*(def\s+\w+\s*\(|class\s+\w+\s*[(:]|import\s+\w+\s*$|from\s+[\w.]+\s+import\s|return\s+[\w(\[]|print\s*\()",
        case_insensitive: false,
    },
    // Style
    RuleDef {
        id: "overconfident_comment",
        severity: Severity::Medium,
        axis: Axis::Style,
        message: "Overconfident comment - verify claim before shipping",
        scope: PYTHON,
        pattern: r"#\s*(obviously|clearly|trivial|of course)\b",
        case_insensitive: true,
    },
    RuleDef {
        id: "hedging_comment",
        severity: Severity::High,
        axis: Axis::Style,
        message: "Hedging comment suggests uncertainty - verify code works",
        scope: PYTHON,
        pattern: r"#\s*(should work|hopefully|might work|try this|i think)\b",
        case_insensitive: true,
    },
    RuleDef {
        id: "apologetic_comment",
        severity: Severity::Medium,
        axis: Axis::Style,
        message: "Apologetic comment - fix the issue instead of apologizing",
        scope: PYTHON,
        pattern: r"#\s*(sorry|hacky|ugly|bad|terrible|awful|gross|yuck|forgive)\b",
        case_insensitive: true,
    },
    // Structure
    RuleDef {
        id: "bare_except",
        severity: Severity::Medium,
        axis: Axis::Structure,
        message: "Bare except swallows every error - catch a specific exception",
        scope: PYTHON,
        pattern: r"^\s*except\s*:",
        case_insensitive: false,
    },
    RuleDef {
        id: "placeholder_function",
        severity: Severity::Medium,
        axis: Axis::Structure,
        message: "Function body is only a placeholder",
        scope: PYTHON,
        pattern: r"^\s*def\s+\w+\s*\([^)]*\)\s*(->\s*[^:]+)?:\s*(pass|\.\.\.)\s*(#.*)?$",
        case_insensitive: false,
    },
    RuleDef {
        id: "mutable_default_arg",
        severity: Severity::Medium,
        axis: Axis::Structure,
        message: "Mutable default argument is shared between calls",
        scope: PYTHON,
        pattern: r"^\s*def\s+\w+\s*\([^)]*=\s*(\[\]|\{\}|set\(\)|dict\(\)|list\(\))",
        case_insensitive: false,
    },
    // Hallucination
    RuleDef {
        id: "leaked_js_idiom",
        severity: Severity::High,
        axis: Axis::Hallucination,
        message: "JavaScript idiom in Python code - use Python equivalents",
        scope: PYTHON,
        pattern: r"\.push\(|\.forEach\(|===|!==|\bthis\.\w+\s*=",
        case_insensitive: false,
    },
];
