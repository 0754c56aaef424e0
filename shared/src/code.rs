//! Permission code convention
//!
//! A permission code is dotted: `module.resource.action`. The first segment
//! names the module used for grouping, the last segment names the action used
//! for per-action bulk toggles. The set of modules and actions is open-ended,
//! so both are derived from the code string instead of an enum.
//!
//! ```
//! use shared::{action_of, module_of};
//!
//! assert_eq!(module_of("billing.items.add"), "billing");
//! assert_eq!(action_of("billing.items.add"), "add");
//!
//! // Undotted codes land in the fallback module and are their own action.
//! assert_eq!(module_of("settings"), "general");
//! assert_eq!(action_of("settings"), "settings");
//! ```

/// Module assigned to codes without a leading segment
pub const FALLBACK_MODULE: &str = "general";

/// Module of a permission code (first dot-delimited segment)
pub fn module_of(code: &str) -> &str {
    match code.split_once('.') {
        Some((module, _)) if !module.is_empty() => module,
        _ => FALLBACK_MODULE,
    }
}

/// Action of a permission code (last dot-delimited segment)
///
/// An undotted code yields the whole code, so it can coincide with an action
/// name such as `view`. Callers treat that as a heuristic match, not an error.
pub fn action_of(code: &str) -> &str {
    match code.rsplit_once('.') {
        Some((_, action)) => action,
        None => code,
    }
}
