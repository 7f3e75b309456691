//! Batch conversion of an input tree.
//!
//! A run discovers every WAV file below the input root, numbers the tracks
//! of the whole batch, then converts files in parallel. Transcoding and tag
//! writing sit behind the [`Transcoder`] and [`TagWriter`] traits.

pub mod executor;
pub mod report;

pub use executor::{inspect, FileOutcome, FileStatus, Pipeline, RunOptions};
pub use report::{InspectEntry, RunReport, MAX_LISTED_ERRORS};

use anyhow::Result;
use std::path::Path;
use tonarchiv_av::FlacTranscoder;
use tonarchiv_parser::MetadataRecord;

/// Converts one audio file into a FLAC file.
pub trait Transcoder: Send + Sync {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Writes metadata (and optionally a cover picture) into a FLAC file.
pub trait TagWriter: Send + Sync {
    fn write_tags(&self, path: &Path, record: &MetadataRecord, cover: Option<&Path>) -> Result<()>;
}

impl<W: TagWriter + ?Sized> TagWriter for &W {
    fn write_tags(&self, path: &Path, record: &MetadataRecord, cover: Option<&Path>) -> Result<()> {
        (**self).write_tags(path, record, cover)
    }
}

impl Transcoder for FlacTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        FlacTranscoder::transcode(self, input, output)?;
        Ok(())
    }
}
