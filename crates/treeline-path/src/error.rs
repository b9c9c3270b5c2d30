//! Error types for the path crate.
//!
//! Parsing itself never fails; only expansion reaches out to collaborators
//! (bookmark storage, the process environment) that can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`Bookmarks`](crate::Bookmarks) collaborator.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// No bookmark is registered under this name.
    #[error("no bookmark named '${name}'")]
    NotFound { name: String },

    /// A bookmark file could not be read.
    #[error("failed to read bookmarks from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bookmark file is not a valid YAML mapping.
    #[error("invalid bookmark file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Errors that can occur while expanding a file path.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The bookmark lookup failed. The collaborator's error is passed through as-is.
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),

    /// `~` was used but the environment has no home directory.
    #[error("cannot expand '~': home directory is unknown")]
    NoHomeDir,

    /// `.` or `..` was used but the working directory could not be determined.
    #[error("cannot expand relative path: {0}")]
    CurrentDir(#[from] std::io::Error),
}
