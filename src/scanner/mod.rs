//! Input discovery.
//!
//! Walks an input root and collects the WAV files to convert.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tonarchiv_common::paths::is_wav_file;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Recursively find all `.wav` files below `root`, sorted by path.
///
/// Unreadable entries are logged and skipped.
pub fn find_wavs(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Input directory does not exist: {:?}", root);
    }

    info!("Scanning directory: {:?}", root);
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_wav_file(entry.path()) {
            continue;
        }

        debug!("Found {:?}", entry.path());
        files.push(entry.into_path());
    }

    files.sort();
    info!("Found {} WAV files", files.len());
    Ok(files)
}
