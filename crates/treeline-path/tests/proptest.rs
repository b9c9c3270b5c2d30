//! Property-based tests for address parsing.

use proptest::prelude::*;
use treeline_path::{parse, Request};

// ============================================================================
// Strategies
// ============================================================================

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn name_with_items() -> impl Strategy<Value = (String, Vec<String>)> {
    (segment(), prop::collection::vec(segment(), 1..5))
}

fn dir_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|segs| format!("/{}/", segs.join("/")))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Parsing is total: any input yields some driving field.
    #[test]
    fn parse_never_panics_and_always_classifies(input in ".{0,40}") {
        let req = parse(input.as_str());
        prop_assert!(
            req.name.is_some()
                || req.path.is_some()
                || req.file_path.is_some()
                || req.menufied.is_some()
        );
    }

    /// Name + items reconstructs the path for slash-terminated addresses.
    #[test]
    fn name_and_items_round_trip((name, items) in name_with_items()) {
        let address = format!("{}/{}/", name, items.join("/"));
        let req = parse(address.as_str());
        prop_assert_eq!(req.name.as_deref(), Some(name.as_str()));
        prop_assert_eq!(&req.items, &items);
        let rebuilt = format!(
            "{}/{}/",
            req.name.clone().unwrap_or_default(),
            req.items.join("/")
        );
        prop_assert_eq!(req.path.as_deref(), Some(rebuilt.as_str()));
    }

    /// A file-path request carries no other driving keys.
    #[test]
    fn file_path_requests_are_exclusive(input in ".{0,40}") {
        let req = parse(input.as_str());
        if req.file_path.is_some() {
            prop_assert!(req.name.is_none());
            prop_assert!(req.items.is_empty());
            prop_assert!(req.menufied.is_none());
            prop_assert!(req.path.is_none());
        }
    }

    /// Plain directory paths are always file paths, verbatim.
    #[test]
    fn dir_paths_are_file_paths(path in dir_path()) {
        prop_assert_eq!(
            parse(path.as_str()),
            Request { file_path: Some(path.clone()), ..Default::default() }
        );
    }

    /// Doubling the trailing slash of a directory menufies it.
    #[test]
    fn doubled_slash_menufies(path in dir_path()) {
        let menufied = format!("{}/", path);
        let req = parse(menufied.as_str());
        prop_assert_eq!(req.menufied.as_deref(), Some(path.trim_end_matches('/')));
        prop_assert!(req.items.is_empty());
    }

    /// Quoted items are kept whole whatever they contain.
    #[test]
    fn quoted_items_stay_whole(name in segment(), body in "[a-z/@ ]{0,20}") {
        let address = format!("{}/| {}", name, body);
        let req = parse(address.as_str());
        prop_assert_eq!(req.items, vec![format!("| {}", body)]);
    }
}
