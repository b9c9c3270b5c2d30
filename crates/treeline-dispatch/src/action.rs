//! Action resolution.
//!
//! After routing, every argument is either part of the action name (the
//! router consumed it as a literal menu item) or a variable handed to the
//! action. [`actionify`] splits them apart.

use serde::Serialize;

/// The action used when no argument was routed as one.
pub const DEFAULT_ACTION: &str = "menu";

/// The result of [`actionify`]: which action to call, and with what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionCall {
    pub action: String,
    pub variables: Vec<String>,
}

/// Splits `args` into an action name and its variables.
///
/// `flags[i]` marks whether `args[i]` was routed as a menu item. Unflagged
/// args become the variables, in order. The action is the last flagged arg,
/// normalized, or `"menu"` when nothing was flagged. Missing flags count as
/// unflagged.
///
/// ```rust
/// use treeline_dispatch::actionify;
///
/// let args = vec!["Add Item".to_string(), "milk".to_string()];
/// let call = actionify(&args, &[true, false]);
/// assert_eq!(call.action, "add_item");
/// assert_eq!(call.variables, vec!["milk"]);
///
/// assert_eq!(actionify(&[], &[]).action, "menu");
/// ```
pub fn actionify(args: &[String], flags: &[bool]) -> ActionCall {
    let mut action = None;
    let mut variables = Vec::new();

    for (i, arg) in args.iter().enumerate() {
        if flags.get(i).copied().unwrap_or(false) {
            action = Some(arg);
        } else {
            variables.push(arg.clone());
        }
    }

    let action = match action {
        Some(name) => normalize_action(name),
        None => DEFAULT_ACTION.to_string(),
    };

    ActionCall { action, variables }
}

/// Normalizes a menu item into an action identifier.
///
/// Spaces and hyphens become underscores, anything other than ASCII word
/// characters and `.` is dropped, and the result is lower-cased.
pub fn normalize_action(name: &str) -> String {
    name.chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_is_menu() {
        let call = actionify(&[], &[]);
        assert_eq!(call.action, "menu");
        assert!(call.variables.is_empty());
    }

    #[test]
    fn test_nothing_flagged_keeps_all_variables() {
        let call = actionify(&strings(&["a", "b"]), &[false, false]);
        assert_eq!(call.action, "menu");
        assert_eq!(call.variables, strings(&["a", "b"]));
    }

    #[test]
    fn test_last_flagged_wins() {
        let call = actionify(&strings(&["first", "x", "Second One"]), &[true, false, true]);
        assert_eq!(call.action, "second_one");
        assert_eq!(call.variables, strings(&["x"]));
    }

    #[test]
    fn test_short_flags_mean_unflagged() {
        let call = actionify(&strings(&["go", "far"]), &[true]);
        assert_eq!(call.action, "go");
        assert_eq!(call.variables, strings(&["far"]));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_action("Add-Item"), "add_item");
        assert_eq!(normalize_action(".Run Now!"), ".run_now");
        assert_eq!(normalize_action("a/b?"), "ab");
        assert_eq!(normalize_action("already_ok"), "already_ok");
        assert_eq!(normalize_action("café"), "caf");
    }
}
