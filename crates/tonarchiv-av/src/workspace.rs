//! Staged output files.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Staging area for one output file.
///
/// The file is written inside a hidden temporary directory created next to
/// its destination, so the final move is a rename within one filesystem.
/// Dropping the workspace without finalizing discards the staged file.
///
/// # Example
///
/// ```no_run
/// use tonarchiv_av::Workspace;
///
/// let workspace = Workspace::new("/music/out/Bach-BWV1-01-Sinfonia.flac")?;
/// // Write to workspace.output(), then move it into place
/// workspace.finalize()?;
/// # Ok::<(), tonarchiv_av::Error>(())
/// ```
pub struct Workspace {
    temp_dir: TempDir,
    destination: PathBuf,
    output_path: PathBuf,
}

impl Workspace {
    /// Create a workspace for a file that will end up at `destination`.
    ///
    /// Missing parent directories of the destination are created.
    pub fn new<P: AsRef<Path>>(destination: P) -> Result<Self> {
        let destination = destination.as_ref();

        let file_name = destination
            .file_name()
            .ok_or_else(|| Error::InvalidInput("Invalid destination file path".to_string()))?;
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        std::fs::create_dir_all(parent).map_err(|e| {
            Error::Workspace(format!(
                "Failed to create output directory {}: {}",
                parent.display(),
                e
            ))
        })?;

        let temp_dir = tempfile::Builder::new()
            .prefix(".tonarchiv-")
            .tempdir_in(parent)
            .map_err(|e| Error::Workspace(e.to_string()))?;
        let output_path = temp_dir.path().join(file_name);

        Ok(Self {
            temp_dir,
            destination: destination.to_path_buf(),
            output_path,
        })
    }

    /// Get the final destination path.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Get the staged output file path.
    pub fn output(&self) -> &Path {
        &self.output_path
    }

    /// Get the temp directory path.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Move the staged output to its destination, replacing any existing file.
    pub fn finalize(self) -> Result<PathBuf> {
        if !self.output_path.exists() {
            return Err(Error::Workspace(format!(
                "Output file does not exist: {}",
                self.output_path.display()
            )));
        }

        std::fs::rename(&self.output_path, &self.destination).map_err(|e| {
            Error::Workspace(format!("Failed to move output to destination: {}", e))
        })?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Finalized {}", self.destination.display());

        Ok(self.destination)
    }

    /// Clean up without finalizing (discard output).
    pub fn cleanup(self) {
        drop(self.temp_dir);
    }
}
