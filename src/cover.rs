//! Cover image lookup.
//!
//! Covers live in a `booklet` folder at the album level: next to the work
//! folders of a single disc, or in the box folder of a box set.

use std::path::{Path, PathBuf};
use tonarchiv_common::paths::is_image_file;
use tonarchiv_parser::{cover_container, PathClassification};
use tracing::debug;

/// First existing cover candidate for `file`.
///
/// `candidates` are relative to the cover folder and tried in order.
pub fn find_cover(
    file: &Path,
    classification: PathClassification,
    candidates: &[PathBuf],
) -> Option<PathBuf> {
    let container = cover_container(file, classification)?;

    let found = candidates
        .iter()
        .map(|candidate| container.join(candidate))
        .find(|path| path.is_file() && is_image_file(path));

    if found.is_none() {
        debug!("No cover image in {:?}", container);
    }
    found
}
