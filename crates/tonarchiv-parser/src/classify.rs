//! Layout classification of audio file paths.
//!
//! The library is split into two top-level trees: single discs live below a
//! folder named `EinzelCDs`, box sets below a folder named `Boxen`. The
//! classification decides which decomposition pipeline a file goes through.

use std::fmt;
use std::path::Path;

/// Default name of the folder holding box sets.
pub const BOX_MARKER: &str = "Boxen";

/// Default name of the folder holding single discs.
pub const SINGLE_MARKER: &str = "EinzelCDs";

/// Hierarchy shape a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PathClassification {
    /// `EinzelCDs / <media> / <work> / file.wav`
    Single,
    /// `Boxen / <box> / <disc> / <work> / file.wav`
    Box,
    /// Neither marker found in the ancestor chain.
    Unknown,
}

impl PathClassification {
    /// Whether the path can be decomposed into metadata.
    pub fn is_known(&self) -> bool {
        !matches!(self, PathClassification::Unknown)
    }
}

impl fmt::Display for PathClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathClassification::Single => "single",
            PathClassification::Box => "box",
            PathClassification::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Folder names that mark the two hierarchy shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutMarkers {
    pub box_marker: String,
    pub single_marker: String,
}

impl Default for LayoutMarkers {
    fn default() -> Self {
        Self {
            box_marker: BOX_MARKER.to_string(),
            single_marker: SINGLE_MARKER.to_string(),
        }
    }
}

/// Classify a path using the default markers.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tonarchiv_parser::classify::{classify, PathClassification};
///
/// let path = Path::new("/music/Boxen/Verdi - Operas/Verdi - Operas_CD1/Verdi - Aida/a.wav");
/// assert_eq!(classify(path), PathClassification::Box);
/// ```
pub fn classify(path: &Path) -> PathClassification {
    classify_with(path, &LayoutMarkers::default())
}

/// Classify a path by scanning the names of all its ancestor folders.
///
/// The box marker is checked before the single marker, so a path containing
/// both is always a box path.
pub fn classify_with(path: &Path, markers: &LayoutMarkers) -> PathClassification {
    let has_ancestor = |marker: &str| {
        path.ancestors()
            .skip(1)
            .filter_map(Path::file_name)
            .any(|name| name == marker)
    };

    if has_ancestor(markers.box_marker.as_str()) {
        PathClassification::Box
    } else if has_ancestor(markers.single_marker.as_str()) {
        PathClassification::Single
    } else {
        PathClassification::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_single() {
        let path = Path::new("/lib/EinzelCDs/Bach - Cantatas/Bach - BWV 1/Bach-BWV1-01-Sinfonia.wav");
        assert_eq!(classify(path), PathClassification::Single);
    }

    #[test]
    fn test_classify_box() {
        let path = Path::new("Boxen/Verdi - Operas/Verdi - Operas_CD2/Verdi - Aida/Verdi-Aida-01-Ouverture.wav");
        assert_eq!(classify(path), PathClassification::Box);
    }

    #[test]
    fn test_box_takes_precedence() {
        let path = Path::new("/EinzelCDs/Boxen/x/y/z.wav");
        assert_eq!(classify(path), PathClassification::Box);

        let path = Path::new("/Boxen/EinzelCDs/x/y/z.wav");
        assert_eq!(classify(path), PathClassification::Box);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(Path::new("/music/other/a.wav")), PathClassification::Unknown);
        assert_eq!(classify(Path::new("a.wav")), PathClassification::Unknown);
        assert_eq!(classify(Path::new("")), PathClassification::Unknown);
    }

    #[test]
    fn test_file_name_is_not_an_ancestor() {
        assert_eq!(classify(Path::new("/music/Boxen")), PathClassification::Unknown);
        assert_eq!(classify(Path::new("/music/EinzelCDs")), PathClassification::Unknown);
    }

    #[test]
    fn test_marker_must_match_whole_name() {
        let path = Path::new("/music/Boxen-Archiv/a/b/c.wav");
        assert_eq!(classify(path), PathClassification::Unknown);

        let path = Path::new("/music/boxen/a/b/c.wav");
        assert_eq!(classify(path), PathClassification::Unknown);
    }

    #[test]
    fn test_custom_markers() {
        let markers = LayoutMarkers {
            box_marker: "Boxes".to_string(),
            single_marker: "Singles".to_string(),
        };
        let path = Path::new("/music/Singles/a/b/c.wav");
        assert_eq!(classify_with(path, &markers), PathClassification::Single);
        let path = Path::new("/music/Boxen/a/b/c.wav");
        assert_eq!(classify_with(path, &markers), PathClassification::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(PathClassification::Single.to_string(), "single");
        assert_eq!(PathClassification::Box.to_string(), "box");
        assert_eq!(PathClassification::Unknown.to_string(), "unknown");
        assert!(!PathClassification::Unknown.is_known());
    }
}
