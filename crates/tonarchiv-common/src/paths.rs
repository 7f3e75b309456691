//! Path utilities for audio files and output trees.
//!
//! Input files are recognised by extension; their output location mirrors
//! their position below the input root, optionally inside a run folder
//! named after the start time of the run.

use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

/// Extension of the source audio files.
const WAV_EXTENSION: &str = "wav";

/// Extension of transcoded output files.
pub const FLAC_EXTENSION: &str = "flac";

/// List of supported image file extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Format of run folder names below the output root.
pub const RUN_FOLDER_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Check if a path has a `.wav` extension (case-insensitive).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tonarchiv_common::paths::is_wav_file;
///
/// assert!(is_wav_file(Path::new("track.wav")));
/// assert!(is_wav_file(Path::new("/path/to/TRACK.WAV")));
/// assert!(!is_wav_file(Path::new("track.flac")));
/// ```
pub fn is_wav_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(WAV_EXTENSION))
        .unwrap_or(false)
}

/// Check if a path has an image file extension.
///
/// ```
/// use std::path::Path;
/// use tonarchiv_common::paths::is_image_file;
///
/// assert!(is_image_file(Path::new("booklet/booklet-b.jpg")));
/// assert!(!is_image_file(Path::new("track.wav")));
/// ```
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// MIME type for an image path, by extension.
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// Map an input file to its `.flac` counterpart below `output_root`.
///
/// The path of `input` relative to `input_root` is kept; only the extension
/// changes.
pub fn mirror_output_path(input: &Path, input_root: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative = input
        .strip_prefix(input_root)
        .map_err(|_| Error::outside_root(input, input_root))?;

    if relative.file_name().is_none() {
        return Err(Error::invalid_input(format!(
            "{} has no file name",
            input.display()
        )));
    }

    Ok(output_root.join(relative).with_extension(FLAC_EXTENSION))
}

/// Name of the run folder for a run started at `started`.
///
/// ```
/// use chrono::{Local, TimeZone};
/// use tonarchiv_common::paths::run_folder_name;
///
/// let started = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
/// assert_eq!(run_folder_name(&started), "2024-03-09_07-05");
/// ```
pub fn run_folder_name<Tz>(started: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    started.format(RUN_FOLDER_FORMAT).to_string()
}

/// Output directory of a run: the output root, or a run folder inside it.
pub fn run_output_root<Tz>(output_root: &Path, started: &DateTime<Tz>, timestamped: bool) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if timestamped {
        output_root.join(run_folder_name(started))
    } else {
        output_root.to_path_buf()
    }
}
