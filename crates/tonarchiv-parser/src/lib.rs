//! # tonarchiv-parser
//!
//! Infers classical music metadata from a controlled folder and filename
//! convention.
//!
//! The library is organised in two layouts:
//!
//! ```text
//! EinzelCDs/<composer> - <album>/<composer> - <work>/<composer>-<work>-<nr>-<title>.wav
//! Boxen/<composer> - <box>/<composer> - <disc>_CD<n>/<composer> - <work>/<composer>-<work>-<nr>-<title>.wav
//! ```
//!
//! Every file is classified by layout, its path decomposed into composer,
//! album, work, title, movement and disc fields, and finally numbered within
//! its disc folder. Numbering needs the whole batch, so it is computed once
//! into a [`TrackMap`] and looked up per file.
//!
//! ## Quick Start
//!
//! ```
//! use std::path::{Path, PathBuf};
//! use tonarchiv_parser::Parser;
//!
//! let files = vec![
//!     PathBuf::from("EinzelCDs/Bach, Johann - Cantatas/Bach, Johann - BWV 1/Bach-BWV1-01-Sinfonia.wav"),
//!     PathBuf::from("EinzelCDs/Bach, Johann - Cantatas/Bach, Johann - BWV 1/Bach-BWV1-02-Recitativo.wav"),
//! ];
//!
//! let parser = Parser::default();
//! let tracks = parser.track_numbers(&files);
//! let record = parser.record(&files[1], &tracks)?;
//!
//! assert_eq!(record.composer, "Bach, Johann");
//! assert_eq!(record.album, "Cantatas");
//! assert_eq!(record.movement_number, Some(2));
//! assert_eq!(record.track_number, 2);
//! # Ok::<(), tonarchiv_parser::RecordError>(())
//! ```

pub mod classify;
pub mod config;
pub mod decompose;
mod error;
pub mod normalize;
pub mod record;
pub mod tracks;

pub use classify::{LayoutMarkers, PathClassification};
pub use config::ParserConfig;
pub use decompose::{Decomposition, Fallback, FilenamePattern, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
pub use error::{RecordError, Result};
pub use record::{build_record, MetadataRecord, TAG_FIELDS};
pub use tracks::{cover_container, TrackMap};

use std::path::Path;

/// Decompose a single path using default settings.
///
/// ```
/// use std::path::Path;
/// use tonarchiv_parser::parse;
///
/// let d = parse(Path::new("Boxen/Verdi - Operas/Verdi - Operas_CD2/Verdi - Aida/Verdi-Aida-01-Preludio.wav"))?;
/// assert_eq!(d.album, "Operas");
/// assert_eq!(d.disc_number, Some(2));
/// assert_eq!(d.box_set, None);
/// # Ok::<(), tonarchiv_parser::RecordError>(())
/// ```
pub fn parse(path: &Path) -> Result<Decomposition> {
    Parser::default().decompose(path)
}

/// A configurable path parser.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Classify a path by its layout markers.
    pub fn classify(&self, path: &Path) -> PathClassification {
        classify::classify_with(path, &self.config.markers)
    }

    /// Classify and decompose a path.
    pub fn decompose(&self, path: &Path) -> Result<Decomposition> {
        decompose::decompose(path, self.classify(path), &self.config)
    }

    /// Assign track numbers to every file with a recognized layout.
    pub fn track_numbers<P: AsRef<Path>>(&self, files: &[P]) -> TrackMap {
        let known: Vec<&Path> = files
            .iter()
            .map(AsRef::as_ref)
            .filter(|path| self.classify(path).is_known())
            .collect();
        tracks::assign_track_numbers(&known)
    }

    /// Build the full record for one file of the batch `tracks` was computed for.
    pub fn record(&self, path: &Path, tracks: &TrackMap) -> Result<MetadataRecord> {
        build_record(path, self.decompose(path)?, tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_box_differing_titles() {
        let d = parse(Path::new(
            "Boxen/Verdi - Great Operas/Verdi - Aida/Verdi - Aida/Verdi-Aida-01-Preludio.wav",
        ))
        .unwrap();
        assert_eq!(d.album, "Aida");
        assert_eq!(d.box_set.as_deref(), Some("Great Operas"));
    }

    #[test]
    fn test_unknown_files_get_no_track_number() {
        let files = vec![
            PathBuf::from("/lib/EinzelCDs/A - B/A - W/A-W-01-x.wav"),
            PathBuf::from("/lib/misc/A - B/A - W/A-W-02-y.wav"),
        ];
        let parser = Parser::default();
        let tracks = parser.track_numbers(&files);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks.get(&files[1]), None);

        let err = parser.record(&files[1], &tracks).unwrap_err();
        assert!(matches!(err, RecordError::UnrecognizedLayout { .. }));
    }

    #[test]
    fn test_record_requires_same_batch() {
        let parser = Parser::default();
        let numbered = vec![PathBuf::from("/lib/EinzelCDs/A - B/A - W/A-W-01-x.wav")];
        let tracks = parser.track_numbers(&numbered);

        let other = Path::new("/lib/EinzelCDs/A - B/A - W/A-W-02-y.wav");
        let err = parser.record(other, &tracks).unwrap_err();
        assert!(matches!(err, RecordError::MissingTrackNumber { .. }));
    }

    #[test]
    fn test_custom_markers_flow_through() {
        let parser = Parser::new(ParserConfig::builder().single_marker("Singles").build());
        let path = Path::new("/lib/Singles/A - B/A - W/A-W-01-x.wav");
        assert_eq!(parser.classify(path), PathClassification::Single);
        assert_eq!(parser.decompose(path).unwrap().album, "B");
    }
}
