//! Folder and filename decomposition.
//!
//! Each hierarchy level carries part of the metadata:
//!
//! ```text
//! EinzelCDs/<composer> - <album>/<composer> - <work>/<file>.wav
//! Boxen/<composer> - <box>/<composer> - <disc>[_CD<n>]/<composer> - <work>/<file>.wav
//! ```
//!
//! Folder names are split at the first `" - "`; filenames are matched
//! against an ordered list of [`FilenamePattern`]s. Every name that does not
//! fit is replaced by a fallback value and recorded as a [`Fallback`], so a
//! single odd name never stops a batch.

use crate::classify::PathClassification;
use crate::config::ParserConfig;
use crate::error::{RecordError, Result};
use crate::normalize::{nfc, normalize_display_name, normalize_name, normalize_text};
use regex::{Captures, Regex};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Album title used when a media, disc or box folder does not split.
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Composer used when the work folder does not split.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

static FOLDER_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<comp>[^-]+?)\s*-\s*(?P<rest>.+)$").expect("valid folder regex")
});

static DISC_FOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<comp>[^-]+?)\s*-\s*(?P<title>.+?)(?:[._ ]CD(?P<disc>\d{1,2}))?$")
        .expect("valid disc regex")
});

static FILE_NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<comp>[^-]+?)-(?P<work>.+?)-(?P<num>\d{1,3})-(?P<title>.+?)\.wav$")
        .expect("valid numbered filename regex")
});

static FILE_COMPOSER_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<comp>[^-]+?)-(?P<title>.+?)\.wav$")
        .expect("valid composer-title filename regex")
});

static FILE_COMPOSER_WORK_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<comp>[^-]+?)-(?P<work>.+?)-(?P<title>.+?)\.wav$")
        .expect("valid composer-work-title filename regex")
});

/// Filename shapes, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FilenamePattern {
    /// `<composer>-<work>-<movement>-<title>.wav`
    Numbered,
    /// `<composer>-<title>.wav` (single discs)
    ComposerTitle,
    /// `<composer>-<work>-<title>.wav` (box sets)
    ComposerWorkTitle,
    /// Nothing matched; the file stem is the title.
    Stem,
}

impl FilenamePattern {
    /// Patterns tried for single-disc files.
    pub const SINGLE: &'static [FilenamePattern] =
        &[FilenamePattern::Numbered, FilenamePattern::ComposerTitle];

    /// Patterns tried for box-set files.
    pub const BOX: &'static [FilenamePattern] =
        &[FilenamePattern::Numbered, FilenamePattern::ComposerWorkTitle];

    fn regex(&self) -> Option<&'static Regex> {
        match self {
            FilenamePattern::Numbered => Some(&*FILE_NUMBERED),
            FilenamePattern::ComposerTitle => Some(&*FILE_COMPOSER_TITLE),
            FilenamePattern::ComposerWorkTitle => Some(&*FILE_COMPOSER_WORK_TITLE),
            FilenamePattern::Stem => None,
        }
    }
}

impl fmt::Display for FilenamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilenamePattern::Numbered => "composer-work-number-title",
            FilenamePattern::ComposerTitle => "composer-title",
            FilenamePattern::ComposerWorkTitle => "composer-work-title",
            FilenamePattern::Stem => "stem",
        };
        f.write_str(name)
    }
}

/// A name that did not fit its expected shape, and what was used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Fallback {
    /// Work folder has no `<composer> - <work>` split.
    WorkFolder { folder: String },
    /// Media folder (single) has no `<composer> - <album>` split.
    MediaFolder { folder: String },
    /// Disc folder (box) has no `<composer> - <title>` split.
    DiscFolder { folder: String },
    /// Box folder has no `<composer> - <title>` split.
    BoxFolder { folder: String },
    /// No filename pattern matched.
    Filename { file: String },
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::WorkFolder { folder } => write!(f, "unrecognized work folder: {folder:?}"),
            Fallback::MediaFolder { folder } => write!(f, "unrecognized media folder: {folder:?}"),
            Fallback::DiscFolder { folder } => write!(f, "unrecognized disc folder: {folder:?}"),
            Fallback::BoxFolder { folder } => write!(f, "unrecognized box folder: {folder:?}"),
            Fallback::Filename { file } => write!(f, "unrecognized filename pattern: {file:?}"),
        }
    }
}

/// Fields extracted from one file's path, before track numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decomposition {
    pub classification: PathClassification,
    pub composer: String,
    pub album: String,
    pub work: Option<String>,
    pub title: String,
    pub movement_number: Option<u16>,
    pub disc_number: Option<u8>,
    pub box_set: Option<String>,
    /// Which filename pattern produced `title` and `movement_number`.
    pub filename_pattern: FilenamePattern,
    pub fallbacks: Vec<Fallback>,
}

/// Title and movement number taken from a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameMatch {
    pub pattern: FilenamePattern,
    pub title: String,
    pub movement_number: Option<u16>,
}

/// Decompose a path that has already been classified.
///
/// Returns [`RecordError::UnrecognizedLayout`] for unknown paths; every
/// other irregularity is recovered and listed in
/// [`Decomposition::fallbacks`].
pub fn decompose(
    path: &Path,
    classification: PathClassification,
    config: &ParserConfig,
) -> Result<Decomposition> {
    let decomposition = match classification {
        PathClassification::Single => decompose_single(path, config),
        PathClassification::Box => decompose_box(path, config),
        PathClassification::Unknown => {
            return Err(RecordError::UnrecognizedLayout {
                path: path.to_path_buf(),
            })
        }
    };

    for fallback in &decomposition.fallbacks {
        tracing::warn!(file = %path.display(), "{}", fallback);
    }

    Ok(decomposition)
}

fn decompose_single(path: &Path, config: &ParserConfig) -> Decomposition {
    let mut fallbacks = Vec::new();

    let work_dir = path.parent();
    let media_dir = work_dir.and_then(Path::parent);

    let media_name = folder_name(media_dir);
    let album = match FOLDER_SPLIT.captures(&media_name) {
        Some(caps) => normalize_text(&caps["rest"]),
        None => {
            fallbacks.push(Fallback::MediaFolder { folder: media_name.clone() });
            UNKNOWN_ALBUM.to_string()
        }
    };

    let (composer, work) = split_work_folder(work_dir, config, &mut fallbacks);
    let file = match_filename(path, FilenamePattern::SINGLE, &mut fallbacks);

    Decomposition {
        classification: PathClassification::Single,
        composer,
        album,
        work,
        title: file.title,
        movement_number: file.movement_number,
        disc_number: None,
        box_set: None,
        filename_pattern: file.pattern,
        fallbacks,
    }
}

fn decompose_box(path: &Path, config: &ParserConfig) -> Decomposition {
    let mut fallbacks = Vec::new();

    let work_dir = path.parent();
    let disc_dir = work_dir.and_then(Path::parent);
    let box_dir = disc_dir.and_then(Path::parent);

    let box_name = folder_name(box_dir);
    let box_title = match FOLDER_SPLIT.captures(&box_name) {
        Some(caps) => normalize_text(&caps["rest"]),
        None => {
            fallbacks.push(Fallback::BoxFolder { folder: box_name.clone() });
            UNKNOWN_ALBUM.to_string()
        }
    };

    let disc_name = folder_name(disc_dir);
    let (disc_title, disc_number) = match DISC_FOLDER.captures(&disc_name) {
        Some(caps) => (
            normalize_text(&caps["title"]),
            caps.name("disc").and_then(|m| m.as_str().parse::<u8>().ok()),
        ),
        None => {
            fallbacks.push(Fallback::DiscFolder { folder: disc_name.clone() });
            (UNKNOWN_ALBUM.to_string(), None)
        }
    };

    let (composer, work) = split_work_folder(work_dir, config, &mut fallbacks);
    let file = match_filename(path, FilenamePattern::BOX, &mut fallbacks);

    // A disc named like its box only carries a CD number; otherwise the disc
    // has its own title and the box becomes the box-set tag.
    let (album, box_set) = if disc_title == box_title {
        (box_title, None)
    } else {
        (disc_title, Some(box_title))
    };

    Decomposition {
        classification: PathClassification::Box,
        composer,
        album,
        work,
        title: file.title,
        movement_number: file.movement_number,
        disc_number,
        box_set,
        filename_pattern: file.pattern,
        fallbacks,
    }
}

/// Composer and work title from the work folder.
fn split_work_folder(
    work_dir: Option<&Path>,
    config: &ParserConfig,
    fallbacks: &mut Vec<Fallback>,
) -> (String, Option<String>) {
    let work_name = folder_name(work_dir);
    match FOLDER_SPLIT.captures(&work_name) {
        Some(caps) => {
            let composer = if config.titlecase_upper_names {
                normalize_display_name(&caps["comp"])
            } else {
                normalize_name(&caps["comp"])
            };
            let work = normalize_text(&caps["rest"]);
            (composer, Some(work).filter(|w| !w.is_empty()))
        }
        None => {
            fallbacks.push(Fallback::WorkFolder { folder: work_name.clone() });
            (UNKNOWN_ARTIST.to_string(), None)
        }
    }
}

/// Match a filename against `patterns` in order, falling back to the stem.
pub fn match_filename(
    path: &Path,
    patterns: &[FilenamePattern],
    fallbacks: &mut Vec<Fallback>,
) -> FilenameMatch {
    let file_name = path
        .file_name()
        .map(|n| nfc(&n.to_string_lossy()))
        .unwrap_or_default();

    let matched = patterns.iter().find_map(|pattern| {
        pattern
            .regex()
            .and_then(|re| re.captures(&file_name))
            .map(|caps| (*pattern, caps))
    });

    match matched {
        Some((pattern, caps)) => FilenameMatch {
            pattern,
            title: normalize_text(&caps["title"]),
            movement_number: movement_number(&caps),
        },
        None => {
            let stem = path
                .file_stem()
                .map(|s| nfc(&s.to_string_lossy()))
                .unwrap_or_default();
            fallbacks.push(Fallback::Filename { file: file_name.clone() });
            FilenameMatch {
                pattern: FilenamePattern::Stem,
                title: normalize_text(&stem),
                movement_number: None,
            }
        }
    }
}

/// Movement number without leading zeros; all-zero numbers count as absent.
fn movement_number(caps: &Captures<'_>) -> Option<u16> {
    caps.name("num")
        .map(|m| m.as_str().trim_start_matches('0'))
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse().ok())
}

fn folder_name(dir: Option<&Path>) -> String {
    dir.and_then(Path::file_name)
        .map(|name| nfc(&name.to_string_lossy()))
        .unwrap_or_default()
}
