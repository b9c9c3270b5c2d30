//! Environment abstractions for testability.
//!
//! File expansion needs the invoking user's home directory and the current
//! working directory. Both come through [`PathEnv`] so tests can pin them.

use std::io;
use std::path::PathBuf;

/// Abstraction over the process environment used during expansion.
pub trait PathEnv: Send + Sync {
    /// The invoking user's home directory, if known.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The directory relative paths resolve against.
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// Reads the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealPathEnv;

impl PathEnv for RealPathEnv {
    fn home_dir(&self) -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// Fixed environment for tests.
#[derive(Debug, Clone)]
pub struct MockPathEnv {
    home: Option<PathBuf>,
    cwd: Option<PathBuf>,
}

impl MockPathEnv {
    /// Creates a mock with the given home and working directories.
    pub fn new(home: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
            cwd: Some(cwd.into()),
        }
    }

    /// Creates a mock with neither directory available.
    pub fn empty() -> Self {
        Self {
            home: None,
            cwd: None,
        }
    }
}

impl PathEnv for MockPathEnv {
    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        self.cwd
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no working directory"))
    }
}
