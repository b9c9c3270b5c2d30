//! Bookmark lookup.
//!
//! A bookmark maps a short name to an absolute path or path prefix, written
//! `$name` at the start of an address. Storage is up to the caller;
//! [`BookmarkMap`] is the in-memory implementation, loadable from a YAML
//! mapping:
//!
//! ```yaml
//! d: /tmp/dir/
//! notes: ~/notes/
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::BookmarkError;

/// A bookmark registry.
pub trait Bookmarks: Send + Sync {
    /// Resolves a bookmark name (without the leading `$`) to its path.
    fn lookup(&self, name: &str) -> Result<String, BookmarkError>;
}

/// Bookmarks held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct BookmarkMap {
    entries: BTreeMap<String, String>,
}

impl BookmarkMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bookmark, builder style. A leading `$` on the name is ignored.
    pub fn with(mut self, name: &str, path: impl Into<String>) -> Self {
        self.insert(name, path);
        self
    }

    /// Adds or replaces a bookmark, returning the previous path.
    pub fn insert(&mut self, name: &str, path: impl Into<String>) -> Option<String> {
        self.entries.insert(bare(name).to_string(), path.into())
    }

    /// Number of bookmarks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no bookmarks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses bookmarks from a YAML mapping.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, BookmarkError> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads bookmarks from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BookmarkError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BookmarkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}

impl From<BTreeMap<String, String>> for BookmarkMap {
    fn from(raw: BTreeMap<String, String>) -> Self {
        raw.into_iter()
            .fold(Self::new(), |map, (name, path)| map.with(&name, path))
    }
}

impl From<BookmarkMap> for BTreeMap<String, String> {
    fn from(map: BookmarkMap) -> Self {
        map.entries
    }
}

impl Bookmarks for BookmarkMap {
    fn lookup(&self, name: &str) -> Result<String, BookmarkError> {
        let name = bare(name);
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| BookmarkError::NotFound {
                name: name.to_string(),
            })
    }
}

fn bare(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}
