//! Per-file errors raised while building metadata records.

use std::path::PathBuf;

/// Result type alias using [`RecordError`].
pub type Result<T> = std::result::Result<T, RecordError>;

/// Reasons a file gets no metadata record.
///
/// Both are per-file errors: the rest of the batch is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Neither layout marker appears among the file's ancestor folders.
    #[error("no media layout recognized for {}", path.display())]
    UnrecognizedLayout { path: PathBuf },

    /// The file was not part of the batch the track numbers were computed for.
    #[error("no track number assigned to {}", path.display())]
    MissingTrackNumber { path: PathBuf },
}

impl RecordError {
    /// The file the error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            RecordError::UnrecognizedLayout { path } | RecordError::MissingTrackNumber { path } => {
                path
            }
        }
    }
}
