//! The structured form of an address.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed address.
///
/// Produced fresh by every call to [`parse`](crate::parse). Absent fields are
/// skipped when serialized, so the serialized key set is exactly what the
/// parser recognized:
///
/// ```rust
/// use treeline_path::parse;
///
/// let req = parse("a/b/c/");
/// assert_eq!(req.name.as_deref(), Some("a"));
/// assert_eq!(req.items, vec!["b", "c"]);
/// assert_eq!(req.path.as_deref(), Some("a/b/c/"));
/// assert!(req.file_path.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Leaf identifier when the address names a menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Canonical reconstruction of the input, without extracted ancestors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Segments under `name` (or under a menufied directory).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,

    /// Outer navigational contexts, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<String>,

    /// Set when the address is a plain filesystem path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Set when a directory should be browsed as a virtual menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menufied: Option<String>,
}

/// Which field drives downstream behavior for a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind<'a> {
    /// A filesystem path.
    FilePath(&'a str),
    /// A directory browsed as a menu.
    Menufied(&'a str),
    /// A named menu.
    Name(&'a str),
    /// Nothing more specific matched; only the raw text is known.
    Pattern(&'a str),
    /// An empty request (e.g. parsed from an empty list).
    Empty,
}

impl Request {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the address is a plain filesystem path.
    pub fn is_file_path(&self) -> bool {
        self.file_path.is_some()
    }

    /// Returns true if the address asks for a directory to be menufied.
    pub fn is_menufied(&self) -> bool {
        self.menufied.is_some()
    }

    /// Returns true if the address names a menu.
    pub fn is_name(&self) -> bool {
        self.name.is_some()
    }

    /// Returns the single field that drives downstream behavior.
    ///
    /// Precedence is `file_path`, then `menufied`, then `name`, then `path`.
    pub fn kind(&self) -> RequestKind<'_> {
        if let Some(f) = &self.file_path {
            RequestKind::FilePath(f)
        } else if let Some(m) = &self.menufied {
            RequestKind::Menufied(m)
        } else if let Some(n) = &self.name {
            RequestKind::Name(n)
        } else if let Some(p) = &self.path {
            RequestKind::Pattern(p)
        } else {
            RequestKind::Empty
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        if let Some(v) = &self.name {
            lines.push(format!("name: {v:?}"));
        }
        if let Some(v) = &self.path {
            lines.push(format!("path: {v:?}"));
        }
        if !self.items.is_empty() {
            lines.push(format!("items: {:?}", self.items));
        }
        if !self.ancestors.is_empty() {
            lines.push(format!("ancestors: {:?}", self.ancestors));
        }
        if let Some(v) = &self.file_path {
            lines.push(format!("file_path: {v:?}"));
        }
        if let Some(v) = &self.menufied {
            lines.push(format!("menufied: {v:?}"));
        }
        write!(f, "{}", lines.join("\n"))
    }
}
