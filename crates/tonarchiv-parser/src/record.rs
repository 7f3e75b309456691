//! The per-file metadata record.

use crate::classify::PathClassification;
use crate::decompose::{Decomposition, FilenamePattern};
use crate::error::{RecordError, Result};
use crate::tracks::TrackMap;
use std::path::Path;

/// Vorbis comment field names, in the order they are written.
pub const TAG_FIELDS: [&str; 11] = [
    "ARTIST",
    "ALBUMARTIST",
    "COMPOSER",
    "ALBUM",
    "TITLE",
    "TRACKNUMBER",
    "DISCNUMBER",
    "WORK",
    "MOVEMENT",
    "MOVEMENTNUMBER",
    "BOXSET",
];

/// Complete metadata for one audio file.
///
/// Performer data is not part of the naming convention, so the composer also
/// serves as artist and album artist, and the track title doubles as the
/// movement name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataRecord {
    pub classification: PathClassification,
    pub composer: String,
    pub album: String,
    pub work: Option<String>,
    pub title: String,
    pub movement_number: Option<u16>,
    pub disc_number: Option<u8>,
    pub box_set: Option<String>,
    pub track_number: u32,
    pub filename_pattern: FilenamePattern,
}

impl MetadataRecord {
    /// Combine a decomposition with its batch-assigned track number.
    pub fn new(decomposition: Decomposition, track_number: u32) -> Self {
        Self {
            classification: decomposition.classification,
            composer: decomposition.composer,
            album: decomposition.album,
            work: decomposition.work,
            title: decomposition.title,
            movement_number: decomposition.movement_number,
            disc_number: decomposition.disc_number,
            box_set: decomposition.box_set,
            track_number,
            filename_pattern: decomposition.filename_pattern,
        }
    }

    pub fn artist(&self) -> &str {
        &self.composer
    }

    pub fn album_artist(&self) -> &str {
        &self.composer
    }

    pub fn movement(&self) -> &str {
        &self.title
    }

    /// Tag values keyed by Vorbis field name.
    ///
    /// Absent values are empty strings; writers skip them.
    pub fn tags(&self) -> Vec<(&'static str, String)> {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();
        let number = |value: Option<String>| value.unwrap_or_default();

        let values = [
            self.artist().to_string(),
            self.album_artist().to_string(),
            self.composer.clone(),
            self.album.clone(),
            self.title.clone(),
            self.track_number.to_string(),
            number(self.disc_number.map(|n| n.to_string())),
            optional(&self.work),
            self.movement().to_string(),
            number(self.movement_number.map(|n| n.to_string())),
            optional(&self.box_set),
        ];

        TAG_FIELDS.into_iter().zip(values).collect()
    }

    /// Tags with empty values removed.
    pub fn present_tags(&self) -> Vec<(&'static str, String)> {
        self.tags()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }
}

/// Build the record for `path` from its decomposition and the batch track map.
///
/// Fails when the decomposition belongs to an unknown layout or the track map
/// has no number for the file.
pub fn build_record(
    path: &Path,
    decomposition: Decomposition,
    tracks: &TrackMap,
) -> Result<MetadataRecord> {
    if !decomposition.classification.is_known() {
        return Err(RecordError::UnrecognizedLayout {
            path: path.to_path_buf(),
        });
    }

    let track_number = tracks
        .get(path)
        .ok_or_else(|| RecordError::MissingTrackNumber {
            path: path.to_path_buf(),
        })?;

    Ok(MetadataRecord::new(decomposition, track_number))
}
