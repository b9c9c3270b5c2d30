//! Address classification.
//!
//! An address is free-form text that may be any of:
//!
//! | Shape | Example | Result |
//! |-------|---------|--------|
//! | File path | `/tmp/a/b/`, `~/notes.txt`, `$d/x` | `{file_path}` |
//! | Menufied directory | `/tmp/a//`, `/tmp/a//b/`, `//` | `{menufied, items}` |
//! | Name with items | `a/b/c/`, `a/\| foo/yau` | `{name, items, path}` |
//! | Ancestors in path | `x/y/@a/b/` | `{name, items, ancestors, path}` |
//! | Pattern | `select * from users`, `/user@site.com/a/` | `{path}` |
//!
//! No delimiter identifies a shape on its own, so classification runs in a
//! fixed order and the first match wins. Parsing never fails: anything
//! unrecognized degrades to a pattern.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::request::Request;

/// Prefix marking a quoted item. Quoted items are never split on `/` or `@`.
pub const QUOTE_PREFIX: &str = "| ";

/// Separator between an ancestor and the address nested under it.
const ANCESTOR_MARKER: &str = "/@";

/// Addresses that look like they point into the filesystem.
static PATH_SHAPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:/|~(?:/|$)|\.\.?(?:/|$)|\$[\w-]+(?:/|$))").expect("valid path regex")
});

/// A menu name: the first segment of a name-with-items address.
static MENU_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("valid name regex"));

/// The first argument of [`parse_with_items`].
///
/// A textual name also becomes the request's `path`; a symbolic one does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameArg {
    /// A name typed as text.
    Text(String),
    /// A name given as an identifier rather than as text.
    Symbol(String),
}

impl NameArg {
    fn as_str(&self) -> &str {
        match self {
            NameArg::Text(s) | NameArg::Symbol(s) => s,
        }
    }
}

impl From<&str> for NameArg {
    fn from(s: &str) -> Self {
        NameArg::Text(s.to_string())
    }
}

impl From<String> for NameArg {
    fn from(s: String) -> Self {
        NameArg::Text(s)
    }
}

/// Everything [`parse`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseInput {
    /// A single address.
    Address(String),
    /// A name plus a pre-split items list.
    WithItems(NameArg, Vec<String>),
    /// Nested contexts, outermost first; the last entry is the active address.
    Nested(Vec<String>),
    /// An already-structured request. Passes through unchanged.
    Structured(Request),
}

impl From<&str> for ParseInput {
    fn from(s: &str) -> Self {
        ParseInput::Address(s.to_string())
    }
}

impl From<String> for ParseInput {
    fn from(s: String) -> Self {
        ParseInput::Address(s)
    }
}

impl From<&String> for ParseInput {
    fn from(s: &String) -> Self {
        ParseInput::Address(s.clone())
    }
}

impl From<Vec<String>> for ParseInput {
    fn from(v: Vec<String>) -> Self {
        ParseInput::Nested(v)
    }
}

impl From<Vec<&str>> for ParseInput {
    fn from(v: Vec<&str>) -> Self {
        ParseInput::Nested(v.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParseInput {
    fn from(v: [&str; N]) -> Self {
        ParseInput::Nested(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Request> for ParseInput {
    fn from(r: Request) -> Self {
        ParseInput::Structured(r)
    }
}

/// Parses an address, address list, or structured request into a [`Request`].
///
/// ```rust
/// use treeline_path::{parse, Request};
///
/// assert_eq!(
///     parse("/tmp/a//"),
///     Request { menufied: Some("/tmp/a".into()), ..Default::default() }
/// );
///
/// let nested = parse(["x/y/", "m/n/", "a/b/"]);
/// assert_eq!(nested.ancestors, vec!["x/y/", "m/n/"]);
/// assert_eq!(nested.name.as_deref(), Some("a"));
/// ```
pub fn parse(input: impl Into<ParseInput>) -> Request {
    match input.into() {
        ParseInput::Address(address) => parse_address(&address, Request::new()),
        ParseInput::WithItems(name, items) => parse_with_items(name, items),
        ParseInput::Nested(list) => parse_nested(&list),
        ParseInput::Structured(request) => request,
    }
}

/// Builds a request from a name and an explicit items list.
///
/// The items are used verbatim. `path` is set only for a textual name.
pub fn parse_with_items<I, S>(name: impl Into<NameArg>, items: I) -> Request
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let name = name.into();
    Request {
        name: Some(name.as_str().to_string()),
        path: match &name {
            NameArg::Text(s) => Some(s.clone()),
            NameArg::Symbol(_) => None,
        },
        items: items.into_iter().map(Into::into).collect(),
        ..Default::default()
    }
}

/// Parses a list of nested contexts.
///
/// Every entry but the last becomes an ancestor verbatim; the last is parsed
/// as an address. A one-entry list yields no ancestors, and an empty list
/// yields an empty request.
pub fn parse_nested<S: AsRef<str>>(list: &[S]) -> Request {
    match list.split_last() {
        None => Request::new(),
        Some((last, outer)) => {
            let request = Request {
                ancestors: outer.iter().map(|s| s.as_ref().to_string()).collect(),
                ..Default::default()
            };
            parse_address(last.as_ref(), request)
        }
    }
}

/// Moves a leading `outer/@` marker from `path` into `acc.ancestors`.
///
/// Returns true if an ancestor was extracted. A marker inside a quoted item
/// is ignored, and both arguments are left untouched when there is none.
///
/// ```rust
/// use treeline_path::{extract_ancestors, Request};
///
/// let mut path = String::from("a/@b/");
/// let mut acc = Request::default();
/// assert!(extract_ancestors(&mut path, &mut acc));
/// assert_eq!(path, "b/");
/// assert_eq!(acc.ancestors, vec!["a/"]);
/// ```
pub fn extract_ancestors(path: &mut String, acc: &mut Request) -> bool {
    let searchable = unquoted(path);
    let Some(idx) = searchable.find(ANCESTOR_MARKER) else {
        return false;
    };
    let remainder_start = idx + ANCESTOR_MARKER.len();
    if idx == 0 || remainder_start >= path.len() {
        return false;
    }

    let remainder = path[remainder_start..].to_string();
    path.truncate(idx + 1);
    tracing::trace!(ancestor = %path, remainder = %remainder, "extracted ancestor");
    acc.ancestors.push(std::mem::replace(path, remainder));
    true
}

fn parse_address(address: &str, mut request: Request) -> Request {
    let mut path = address.to_string();
    while extract_ancestors(&mut path, &mut request) {}
    classify(path, request)
}

fn classify(path: String, mut request: Request) -> Request {
    if let Some((dir, rest)) = split_menufied(&path) {
        request.menufied = Some(dir);
        request.items = split_items(rest);
        return request;
    }

    if is_path_like(&path) {
        request.file_path = Some(path);
        return request;
    }

    if let Some((name, rest)) = split_name(&path) {
        request.name = Some(name.to_string());
        request.items = split_items(rest);
        request.path = Some(path);
        return request;
    }

    request.path = Some(path);
    request
}

/// The part of an address before its first quoted item.
fn unquoted(address: &str) -> &str {
    if address.starts_with(QUOTE_PREFIX) {
        return "";
    }
    match address.find("/| ") {
        Some(idx) => &address[..idx],
        None => address,
    }
}

/// True if the address reads as a filesystem path rather than a pattern.
fn is_path_like(address: &str) -> bool {
    if !PATH_SHAPED.is_match(address) {
        return false;
    }
    let head = unquoted(address);
    !head.contains('@') && !head.contains(' ')
}

/// Splits `dir//rest` into the menufied directory and the item text after it.
fn split_menufied(address: &str) -> Option<(String, &str)> {
    if !is_path_like(address) {
        return None;
    }
    let idx = unquoted(address).find("//")?;
    let dir = if idx == 0 { "/" } else { &address[..idx] };
    Some((dir.to_string(), &address[idx + 2..]))
}

/// Splits `name/rest` when the first segment is a valid menu name.
fn split_name(address: &str) -> Option<(&str, &str)> {
    let (name, rest) = match address.find('/') {
        Some(idx) => (&address[..idx], &address[idx + 1..]),
        None => (address, ""),
    };
    MENU_NAME.is_match(name).then_some((name, rest))
}

/// Splits item text on `/`, keeping a quoted item whole.
///
/// A single trailing slash closes the last item and does not start a new one.
fn split_items(rest: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut remaining = rest;
    while !remaining.is_empty() {
        if remaining.starts_with(QUOTE_PREFIX) {
            items.push(remaining.to_string());
            break;
        }
        match remaining.find('/') {
            Some(idx) => {
                items.push(remaining[..idx].to_string());
                remaining = &remaining[idx + 1..];
            }
            None => {
                items.push(remaining.to_string());
                break;
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted_stops_at_quote() {
        assert_eq!(unquoted("a/| b/@c"), "a");
        assert_eq!(unquoted("| hi"), "");
        assert_eq!(unquoted("a/b/"), "a/b/");
    }

    #[test]
    fn test_path_like_shapes() {
        assert!(is_path_like("/tmp"));
        assert!(is_path_like("~"));
        assert!(is_path_like("~/a"));
        assert!(is_path_like("./a"));
        assert!(is_path_like(".."));
        assert!(is_path_like("$d/a"));
        assert!(!is_path_like("~foo"));
        assert!(!is_path_like(".hidden"));
        assert!(!is_path_like("/user@site.com/a/"));
        assert!(!is_path_like("/tmp/my dir/"));
        assert!(is_path_like("/tmp/a.txt/| some quoted @ text"));
    }

    #[test]
    fn test_split_items() {
        assert_eq!(split_items("b/c/"), vec!["b", "c"]);
        assert_eq!(split_items("b"), vec!["b"]);
        assert!(split_items("").is_empty());
        assert_eq!(
            split_items("http://x.com/"),
            vec!["http:", "", "x.com"]
        );
        assert_eq!(split_items("b/| c/d"), vec!["b", "| c/d"]);
    }

    #[test]
    fn test_split_name_rejects_non_names() {
        assert_eq!(split_name("a/b"), Some(("a", "b")));
        assert_eq!(split_name("foo.bar"), Some(("foo.bar", "")));
        assert_eq!(split_name("select * from users"), None);
        assert_eq!(split_name("/abs"), None);
        assert_eq!(split_name("| quoted"), None);
    }

    #[test]
    fn test_extract_ancestors_requires_leading_segment() {
        let mut path = String::from("/@a/");
        let mut acc = Request::new();
        assert!(!extract_ancestors(&mut path, &mut acc));
        assert_eq!(path, "/@a/");

        let mut path = String::from("a/@");
        assert!(!extract_ancestors(&mut path, &mut acc));
        assert!(acc.ancestors.is_empty());
    }

    #[test]
    fn test_extract_ancestors_accumulates() {
        let mut path = String::from("a/@b/@c/");
        let mut acc = Request::new();
        assert!(extract_ancestors(&mut path, &mut acc));
        assert!(extract_ancestors(&mut path, &mut acc));
        assert!(!extract_ancestors(&mut path, &mut acc));
        assert_eq!(path, "c/");
        assert_eq!(acc.ancestors, vec!["a/", "b/"]);
    }

    #[test]
    fn test_menufied_with_home_and_bookmark() {
        assert_eq!(parse("~//").menufied.as_deref(), Some("~"));
        assert_eq!(parse("$d//x/").menufied.as_deref(), Some("$d"));
        assert_eq!(parse("$d//x/").items, vec!["x"]);
    }
}
