//! Property tests for action resolution and text tidying.

use proptest::prelude::*;
use treeline_dispatch::{actionify, normalize_action, unindent};

// =============================================================================
// actionify
// =============================================================================

fn args_and_flags() -> impl Strategy<Value = (Vec<String>, Vec<bool>)> {
    prop::collection::vec(("[ -~]{0,12}", any::<bool>()), 0..8)
        .prop_map(|pairs| pairs.into_iter().unzip())
}

proptest! {
    #[test]
    fn unflagged_args_become_variables_in_order((args, flags) in args_and_flags()) {
        let call = actionify(&args, &flags);
        let expected: Vec<String> = args
            .iter()
            .zip(&flags)
            .filter(|(_, f)| !**f)
            .map(|(a, _)| a.clone())
            .collect();
        prop_assert_eq!(call.variables, expected);
    }

    #[test]
    fn action_is_last_flagged_or_menu((args, flags) in args_and_flags()) {
        let call = actionify(&args, &flags);
        let last = args.iter().zip(&flags).filter(|(_, f)| **f).map(|(a, _)| a).last();
        match last {
            Some(a) => prop_assert_eq!(call.action, normalize_action(a)),
            None => prop_assert_eq!(call.action, "menu"),
        }
    }

    #[test]
    fn normalize_is_idempotent(name in "\\PC{0,20}") {
        let once = normalize_action(&name);
        prop_assert_eq!(normalize_action(&once), once.clone());
    }

    #[test]
    fn normalized_action_round_trips_through_actionify(name in "[a-z_.][a-z0-9_.]{0,10}") {
        let call = actionify(&[name.clone()], &[true]);
        prop_assert_eq!(call.action, name);
        prop_assert!(call.variables.is_empty());
    }

    #[test]
    fn normalized_chars_are_word_or_dot(name in "\\PC{0,20}") {
        let out = normalize_action(&name);
        prop_assert!(out
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.'));
    }
}

// =============================================================================
// unindent
// =============================================================================

proptest! {
    #[test]
    fn unindent_removes_uniform_indent(
        lines in prop::collection::vec("[a-z]{1,8}", 1..6),
        indent in 1usize..8,
    ) {
        let pad = " ".repeat(indent);
        let indented: String = lines.iter().map(|l| format!("{pad}{l}\n")).collect();
        let flush: String = lines.iter().map(|l| format!("{l}\n")).collect();
        prop_assert_eq!(unindent(&indented), flush);
    }

    #[test]
    fn unindent_keeps_words(text in "[ a-z\\n]{0,40}") {
        let out = unindent(&text);
        prop_assert!(out.len() <= text.len());
        prop_assert_eq!(
            out.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }
}
