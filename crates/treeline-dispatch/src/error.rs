//! Fatal dispatch errors.
//!
//! Errors raised by hooks and actions never show up here: they are rendered
//! into an exception report and returned as text. A [`DispatchError`] means
//! there was nothing sensible to render at all.

use std::path::PathBuf;
use thiserror::Error;

/// An error that aborts an invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The evaluator had no handler by this name.
    #[error("no menu handler named '{handler}'")]
    HandlerNotFound { handler: String },

    /// The evaluator failed while (re)loading the handler.
    #[error("failed to load menu handler '{handler}'")]
    Load {
        handler: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The sibling menu file exists but could not be read.
    #[error("failed to read menu file {}", path.display())]
    MenuFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No menu source handled the path and no action method matched.
    #[error("no menu or action '{action}' found on '{handler}'")]
    NoAction { handler: String, action: String },
}

impl DispatchError {
    pub(crate) fn load(handler: impl Into<String>, source: anyhow::Error) -> Self {
        DispatchError::Load {
            handler: handler.into(),
            source: source.into(),
        }
    }
}
