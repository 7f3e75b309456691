//! WAV to FLAC transcoding with the ffmpeg CLI.

use crate::tools::{get_tool_path, FFMPEG};
use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Compression level used when none is configured.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 5;

/// Highest compression level the ffmpeg FLAC encoder accepts.
pub const MAX_COMPRESSION_LEVEL: u8 = 12;

/// Transcodes audio files to FLAC.
///
/// Source metadata is dropped (`-map_metadata -1`); tags are written
/// separately once the file exists.
#[derive(Debug, Clone)]
pub struct FlacTranscoder {
    ffmpeg: PathBuf,
    compression_level: u8,
}

impl FlacTranscoder {
    /// Create a transcoder that runs the given ffmpeg executable.
    pub fn new(ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Create a transcoder, resolving ffmpeg from a configured path or PATH.
    pub fn from_path(config_path: Option<&Path>) -> Result<Self> {
        Ok(Self::new(get_tool_path(FFMPEG, config_path)?))
    }

    /// Set the FLAC compression level (0 to 12).
    pub fn with_compression_level(mut self, level: u8) -> Result<Self> {
        if level > MAX_COMPRESSION_LEVEL {
            return Err(Error::InvalidInput(format!(
                "compression level {} is above {}",
                level, MAX_COMPRESSION_LEVEL
            )));
        }
        self.compression_level = level;
        Ok(self)
    }

    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    pub fn compression_level(&self) -> u8 {
        self.compression_level
    }

    /// Arguments passed to ffmpeg for one file.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            input.into(),
            "-map_metadata".into(),
            "-1".into(),
            "-compression_level".into(),
            self.compression_level.to_string().into(),
            output.into(),
        ]
    }

    /// Transcode `input` into a FLAC file at `output`.
    ///
    /// Missing parent directories of `output` are created. A failing ffmpeg
    /// run is reported with the last line it wrote to stderr.
    pub fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        if !input.exists() {
            return Err(Error::file_not_found(input));
        }
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Transcoding {} -> {}", input.display(), output.display());

        let result = Command::new(&self.ffmpeg)
            .args(self.args(input, output))
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(self.ffmpeg.to_string_lossy())
                } else {
                    Error::Io(e)
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let message = last_line(&stderr)
                .map(str::to_string)
                .unwrap_or_else(|| format!("exited with {}", result.status));
            return Err(Error::tool_failed(FFMPEG, message));
        }

        Ok(())
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rfind(|line| !line.is_empty())
}
