//! File path expansion.
//!
//! Expands the leading token of a filesystem-shaped address:
//!
//! - `~` → the home directory
//! - `.` / `..` → the working directory / its parent
//! - `$name` → a bookmark
//!
//! Only the leading token is replaced. The rest of the address is appended
//! unmodified, so doubled slashes (which mark a menufied directory) survive.

use std::path::Path;

use crate::bookmarks::Bookmarks;
use crate::env::PathEnv;
use crate::error::ExpandError;

/// Expands the leading `~`, `.`, `..` or `$bookmark` token of `path`.
///
/// Addresses without one of those tokens are returned unchanged. A failed
/// bookmark lookup is returned as the bookmark error, unmodified.
///
/// ```rust
/// use treeline_path::{expand_file_path, BookmarkMap, MockPathEnv};
///
/// let env = MockPathEnv::new("/home/me", "/work");
/// let marks = BookmarkMap::new().with("d", "/tmp/dir/");
///
/// assert_eq!(expand_file_path("$d/a//b", &env, &marks)?, "/tmp/dir/a//b");
/// assert_eq!(expand_file_path("~/a", &env, &marks)?, "/home/me/a");
/// assert_eq!(expand_file_path("/abs", &env, &marks)?, "/abs");
/// # Ok::<(), treeline_path::ExpandError>(())
/// ```
pub fn expand_file_path(
    path: &str,
    env: &dyn PathEnv,
    bookmarks: &dyn Bookmarks,
) -> Result<String, ExpandError> {
    if let Some(rest) = strip_token(path, "~") {
        let home = env.home_dir().ok_or(ExpandError::NoHomeDir)?;
        return Ok(join_prefix(&display(&home), rest));
    }

    if let Some(rest) = strip_token(path, "..") {
        let cwd = env.current_dir()?;
        let parent = cwd.parent().unwrap_or(cwd.as_path());
        return Ok(join_prefix(&display(parent), rest));
    }

    if let Some(rest) = strip_token(path, ".") {
        let cwd = env.current_dir()?;
        return Ok(join_prefix(&display(&cwd), rest));
    }

    if let Some((name, rest)) = split_bookmark(path) {
        let target = bookmarks.lookup(name)?;
        tracing::debug!(bookmark = name, target = %target, "expanded bookmark");
        return Ok(join_prefix(&target, rest));
    }

    Ok(path.to_string())
}

/// Returns the text after `token` if the path is exactly the token or the
/// token followed by `/`. The returned remainder keeps its leading slash.
fn strip_token<'a>(path: &'a str, token: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(token)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

/// Splits `$name/rest` into the bookmark name and `/rest`.
fn split_bookmark(path: &str) -> Option<(&str, &str)> {
    let body = path.strip_prefix('$')?;
    let end = body
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(body.len());
    if end == 0 {
        return None;
    }
    let (name, rest) = body.split_at(end);
    (rest.is_empty() || rest.starts_with('/')).then_some((name, rest))
}

/// Joins an expanded prefix with the untouched remainder.
///
/// The prefix loses its trailing slashes so the remainder's own leading
/// slash (or doubled slash) is what separates them.
fn join_prefix(prefix: &str, rest: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if rest.is_empty() && trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("{trimmed}{rest}")
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BookmarkError, BookmarkMap, MockPathEnv};

    fn env() -> MockPathEnv {
        MockPathEnv::new("/home/me", "/work/project")
    }

    fn marks() -> BookmarkMap {
        BookmarkMap::new()
            .with("d", "/tmp/dir/")
            .with("f", "/tmp/file.txt")
            .with("root", "/")
    }

    #[test]
    fn test_strip_token() {
        assert_eq!(strip_token("~", "~"), Some(""));
        assert_eq!(strip_token("~/a", "~"), Some("/a"));
        assert_eq!(strip_token("~a", "~"), None);
        assert_eq!(strip_token("./a", "."), Some("/a"));
        assert_eq!(strip_token("../a", "."), None);
    }

    #[test]
    fn test_split_bookmark() {
        assert_eq!(split_bookmark("$d/a"), Some(("d", "/a")));
        assert_eq!(split_bookmark("$d"), Some(("d", "")));
        assert_eq!(split_bookmark("$my-dir//"), Some(("my-dir", "//")));
        assert_eq!(split_bookmark("$/a"), None);
        assert_eq!(split_bookmark("$d.txt"), None);
        assert_eq!(split_bookmark("d/a"), None);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_file_path("~", &env(), &marks()).unwrap(), "/home/me");
        assert_eq!(
            expand_file_path("~/a//b", &env(), &marks()).unwrap(),
            "/home/me/a//b"
        );
    }

    #[test]
    fn test_expand_home_missing() {
        let err = expand_file_path("~/a", &MockPathEnv::empty(), &marks()).unwrap_err();
        assert!(matches!(err, ExpandError::NoHomeDir));
    }

    #[test]
    fn test_expand_dots() {
        assert_eq!(
            expand_file_path("./a//b", &env(), &marks()).unwrap(),
            "/work/project/a//b"
        );
        assert_eq!(
            expand_file_path("../a", &env(), &marks()).unwrap(),
            "/work/a"
        );
        assert_eq!(expand_file_path(".", &env(), &marks()).unwrap(), "/work/project");
    }

    #[test]
    fn test_expand_parent_of_root() {
        let env = MockPathEnv::new("/home/me", "/");
        assert_eq!(expand_file_path("../a", &env, &marks()).unwrap(), "/a");
        assert_eq!(expand_file_path("..", &env, &marks()).unwrap(), "/");
    }

    #[test]
    fn test_expand_bookmarks() {
        assert_eq!(
            expand_file_path("$d/a//b", &env(), &marks()).unwrap(),
            "/tmp/dir/a//b"
        );
        assert_eq!(expand_file_path("$d", &env(), &marks()).unwrap(), "/tmp/dir");
        assert_eq!(expand_file_path("$d/", &env(), &marks()).unwrap(), "/tmp/dir/");
        assert_eq!(
            expand_file_path("$f//", &env(), &marks()).unwrap(),
            "/tmp/file.txt//"
        );
        assert_eq!(expand_file_path("$root/a", &env(), &marks()).unwrap(), "/a");
        assert_eq!(expand_file_path("$root", &env(), &marks()).unwrap(), "/");
    }

    #[test]
    fn test_unknown_bookmark_propagates() {
        let err = expand_file_path("$nope/a", &env(), &marks()).unwrap_err();
        match err {
            ExpandError::Bookmark(BookmarkError::NotFound { name }) => assert_eq!(name, "nope"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_plain_paths_untouched() {
        assert_eq!(
            expand_file_path("/tmp//a", &env(), &marks()).unwrap(),
            "/tmp//a"
        );
        assert_eq!(expand_file_path("a/b", &env(), &marks()).unwrap(), "a/b");
    }
}
