//! Common error types used throughout tonarchiv.

use std::path::PathBuf;

/// Common error type for tonarchiv.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file lies outside the root it should be relative to.
    #[error("{} is not below {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new OutsideRoot error.
    pub fn outside_root(path: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self::OutsideRoot {
            path: path.into(),
            root: root.into(),
        }
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
