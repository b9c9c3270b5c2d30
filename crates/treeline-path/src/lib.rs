//! Address parsing for outline menus.
//!
//! `treeline-path` turns a free-form textual address into a structured
//! [`Request`]. An address may be a filesystem path, a bookmark reference, a
//! menu path with trailing items, a path nested under outer contexts, or a
//! raw pattern; nothing in the text marks which, so the parser classifies it.
//!
//! # Parsing
//!
//! ```rust
//! use treeline_path::parse;
//!
//! let req = parse("x/y/@a/b/");
//! assert_eq!(req.name.as_deref(), Some("a"));
//! assert_eq!(req.items, vec!["b"]);
//! assert_eq!(req.ancestors, vec!["x/y/"]);
//! assert_eq!(req.path.as_deref(), Some("a/b/"));
//!
//! assert_eq!(parse("/tmp/a/b/").file_path.as_deref(), Some("/tmp/a/b/"));
//! assert_eq!(parse("select * from users").path.as_deref(), Some("select * from users"));
//! ```
//!
//! # Expansion
//!
//! Filesystem-shaped addresses can then be expanded with
//! [`expand_file_path`], which resolves a leading `~`, `.`, `..` or
//! `$bookmark` through the [`PathEnv`] and [`Bookmarks`] collaborators.

mod bookmarks;
mod env;
mod error;
mod expand;
mod parse;
mod request;

pub use bookmarks::{BookmarkMap, Bookmarks};
pub use env::{MockPathEnv, PathEnv, RealPathEnv};
pub use error::{BookmarkError, ExpandError};
pub use expand::expand_file_path;
pub use parse::{
    extract_ancestors, parse, parse_nested, parse_with_items, NameArg, ParseInput, QUOTE_PREFIX,
};
pub use request::{Request, RequestKind};
