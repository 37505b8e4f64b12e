//! JavaScript and TypeScript rules.
//!
//! The `js_` rules run on both languages; `ts_` rules only on TypeScript.

use super::{Axis, RuleDef, Scope, Severity};
use crate::lang::Language;

const WEB: Scope = Scope::Only(&[Language::JavaScript, Language::TypeScript]);
const TYPESCRIPT: Scope = Scope::Only(&[Language::TypeScript]);

pub(super) static RULES: &[RuleDef] = &[
    // Noise
    RuleDef {
        id: "js_debug_console",
        severity: Severity::Medium,
        axis: Axis::Noise,
        message: "Debug console statement - remove before production",
        scope: WEB,
        pattern: r#"\bconsole\.(log|debug|info|warn|error)\s*\([^)]*["']?(debug|DEBUG|test|TEST|temp|TEMP)\b"#,
        case_insensitive: false,
    },
    RuleDef {
        id: "js_todo_comment",
        severity: Severity::Low,
        axis: Axis::Noise,
        message: "TODO comment - track in issue tracker instead",
        scope: WEB,
        pattern: r"//\s*(TODO|FIXME|XXX|HACK)\s*:",
        case_insensitive: true,
    },
    RuleDef {
        id: "js_redundant_comment",
        severity: Severity::Medium,
        axis: Axis::Noise,
        message: "Redundant comment restating obvious code",
        scope: WEB,
        pattern: r"//\s*(increment|decrement|set|assign|return|get|initialize|init|create)\s+\w+\s*$",
        case_insensitive: true,
    },
    RuleDef {
        id: "js_commented_code",
        severity: Severity::Medium,
        axis: Axis::Noise,
        message: "Commented-out code - remove or use version control",
        scope: WEB,
        pattern: r"//\s*(const\s+\w|let\s+\w|var\s+\w|function\s*[\w(]|if\s*\(|for\s*\(|while\s*\(|return\s+[\w(\[{])",
        case_insensitive: false,
    },
    // Style
    RuleDef {
        id: "js_overconfident_comment",
        severity: Severity::Medium,
        axis: Axis::Style,
        message: "Overconfident comment - code should speak for itself",
        scope: WEB,
        pattern: r"//\s*(obviously|clearly|trivial|of course)\b",
        case_insensitive: true,
    },
    RuleDef {
        id: "js_hedging_comment",
        severity: Severity::High,
        axis: Axis::Style,
        message: "Hedging comment indicates AI uncertainty - verify implementation",
        scope: WEB,
        pattern: r"//\s*(should work|hopefully|try this|i think)\b",
        case_insensitive: true,
    },
    RuleDef {
        id: "js_var_keyword",
        severity: Severity::Medium,
        axis: Axis::Style,
        message: "Use 'const' or 'let' instead of 'var'",
        scope: WEB,
        pattern: r"\bvar\s+\w+\s*=",
        case_insensitive: false,
    },
    RuleDef {
        id: "js_unnecessary_iife",
        severity: Severity::Medium,
        axis: Axis::Style,
        message: "Unnecessary IIFE wrapper - AI over-engineering a simple async call",
        scope: WEB,
        pattern: r"const\s+\w+\s*=\s*\(\s*async\s*\(\)",
        case_insensitive: false,
    },
    RuleDef {
        id: "js_nested_ternary_abuse",
        severity: Severity::Medium,
        axis: Axis::Style,
        message: "Nested ternary hell - extract to switch statement or lookup object",
        scope: WEB,
        pattern: r"\?[^:?]+:[^:?]+\?[^:?]+:",
        case_insensitive: false,
    },
    RuleDef {
        id: "js_magic_css_value",
        severity: Severity::Low,
        axis: Axis::Style,
        message: "Magic CSS value - extract to design token or const",
        scope: WEB,
        pattern: r"\b(\d{3,4}px|#\w{6}|rgba?\([^)]+\)|hsl\(\d+)",
        case_insensitive: false,
    },
    // Structure
    RuleDef {
        id: "js_placeholder_throw",
        severity: Severity::High,
        axis: Axis::Structure,
        message: "Placeholder throw - implement the function",
        scope: WEB,
        pattern: r#"\bthrow\s+new\s+Error\(\s*["'`](not implemented|unimplemented|todo|implement me)"#,
        case_insensitive: true,
    },
    RuleDef {
        id: "js_empty_catch",
        severity: Severity::Medium,
        axis: Axis::Structure,
        message: "Empty catch block swallows the error",
        scope: WEB,
        pattern: r"\bcatch\s*(\(\s*\w*\s*\))?\s*\{\s*\}",
        case_insensitive: false,
    },
    // Hallucination
    RuleDef {
        id: "js_python_pattern",
        severity: Severity::High,
        axis: Axis::Hallucination,
        message: "Python pattern in JS/TS code - use JavaScript idioms",
        scope: WEB,
        pattern: r"^\s*(elif\b|def\s+\w+\s*\(.*\)\s*:|print\s*\()|[=!]==?\s*(None|True|False)\b|\bis\s+(not\s+)?None\b",
        case_insensitive: false,
    },
    RuleDef {
        id: "ts_any_type",
        severity: Severity::Medium,
        axis: Axis::Style,
        message: "Explicit 'any' type defeats type checking",
        scope: TYPESCRIPT,
        pattern: r":\s*any\b|\bas\s+any\b|<any>",
        case_insensitive: false,
    },
];
