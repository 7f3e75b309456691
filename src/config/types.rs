use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tonarchiv_parser::classify::{BOX_MARKER, SINGLE_MARKER};
use tonarchiv_parser::ParserConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub cover: CoverConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversionConfig {
    /// Parallel conversions (0 = number of CPUs, default: 4)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// FLAC compression level passed to ffmpeg, 0 to 12 (default: 5)
    #[serde(default = "default_compression_level")]
    pub compression_level: u8,

    /// Compute and log everything without writing files
    #[serde(default)]
    pub dry_run: bool,

    /// Leave files alone whose FLAC output already exists
    #[serde(default)]
    pub skip_existing: bool,

    /// Write into a `YYYY-MM-DD_HH-MM` folder below the output root (default: true)
    #[serde(default = "default_true")]
    pub timestamped_output: bool,
}

fn default_workers() -> usize {
    4
}

fn default_compression_level() -> u8 {
    tonarchiv_av::DEFAULT_COMPRESSION_LEVEL
}

fn default_true() -> bool {
    true
}

impl ConversionConfig {
    /// Worker count with 0 resolved to the number of CPUs.
    pub fn effective_workers(&self) -> usize {
        match self.workers {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            compression_level: default_compression_level(),
            dry_run: false,
            skip_existing: false,
            timestamped_output: default_true(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Folder name marking box sets (default: "Boxen")
    #[serde(default = "default_box_marker")]
    pub box_marker: String,

    /// Folder name marking single discs (default: "EinzelCDs")
    #[serde(default = "default_single_marker")]
    pub single_marker: String,

    /// Title-case composer names written entirely in upper case
    #[serde(default)]
    pub titlecase_upper_names: bool,
}

fn default_box_marker() -> String {
    BOX_MARKER.to_string()
}

fn default_single_marker() -> String {
    SINGLE_MARKER.to_string()
}

impl LayoutConfig {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::builder()
            .box_marker(self.box_marker.as_str())
            .single_marker(self.single_marker.as_str())
            .titlecase_upper_names(self.titlecase_upper_names)
            .build()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_marker: default_box_marker(),
            single_marker: default_single_marker(),
            titlecase_upper_names: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoverConfig {
    /// Embed a cover image when one is found (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Image paths tried in order, relative to the cover folder
    #[serde(default = "default_cover_candidates")]
    pub candidates: Vec<PathBuf>,
}

fn default_cover_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("booklet/booklet-b.jpg"),
        PathBuf::from("booklet/booklet-b.jpeg"),
    ]
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            candidates: default_cover_candidates(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}
