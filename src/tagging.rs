//! Vorbis comment writing for FLAC files.

use crate::pipeline::TagWriter;
use anyhow::{Context, Result};
use lofty::config::WriteOptions;
use lofty::ogg::{OggPictureStorage, VorbisComments};
use lofty::picture::{MimeType, Picture, PictureInformation, PictureType};
use lofty::prelude::*;
use std::path::Path;
use tonarchiv_common::paths::image_mime_type;
use tonarchiv_parser::MetadataRecord;

/// Description stored with embedded cover pictures.
pub const COVER_DESCRIPTION: &str = "Cover";

/// Writes records as Vorbis comments with lofty.
///
/// Existing comments are replaced; only fields with a value are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagWriter;

impl LoftyTagWriter {
    pub fn new() -> Self {
        Self
    }

    /// Build the tag for `record`, with `cover` as front cover picture.
    pub fn vorbis_comments(record: &MetadataRecord, cover: Option<&Path>) -> Result<VorbisComments> {
        let mut tag = VorbisComments::default();
        for (key, value) in record.present_tags() {
            tag.insert(key.to_string(), value);
        }

        if let Some(path) = cover {
            let picture = cover_picture(path)?;
            let info = PictureInformation::from_picture(&picture).unwrap_or_default();
            tag.insert_picture(picture, Some(info))
                .with_context(|| format!("Failed to embed cover {:?}", path))?;
        }

        Ok(tag)
    }
}

impl TagWriter for LoftyTagWriter {
    fn write_tags(&self, path: &Path, record: &MetadataRecord, cover: Option<&Path>) -> Result<()> {
        let tag = Self::vorbis_comments(record, cover)?;
        tag.save_to_path(path, WriteOptions::default())
            .with_context(|| format!("Failed to write tags to {:?}", path))?;
        Ok(())
    }
}

fn cover_picture(path: &Path) -> Result<Picture> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read cover {:?}", path))?;
    let mime = match image_mime_type(path) {
        Some("image/png") => MimeType::Png,
        _ => MimeType::Jpeg,
    };

    Ok(Picture::unchecked(data)
        .pic_type(PictureType::CoverFront)
        .mime_type(mime)
        .description(COVER_DESCRIPTION.to_string())
        .build())
}
