//! Rules that hold for every language.

use super::{Axis, RuleDef, Scope, Severity};

pub(super) static RULES: &[RuleDef] = &[RuleDef {
    id: "merge_conflict_marker",
    severity: Severity::High,
    axis: Axis::Structure,
    message: "Unresolved merge conflict marker",
    scope: Scope::Universal,
    pattern: r"^(<{7}|>{7})( |$)",
    case_insensitive: false,
}];
