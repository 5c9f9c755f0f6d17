//! Error types for tree rendering

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole rendering run.
///
/// Per-directory problems (unreadable subdirectories, symlink cycles) are
/// not errors at this level: the walker renders them inline and carries on.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The root path does not exist, is not a directory, or cannot be listed.
    #[error("invalid directory path '{}': {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// Writing rendered output failed.
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

impl TreeError {
    pub(crate) fn invalid_root(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InvalidRoot {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
