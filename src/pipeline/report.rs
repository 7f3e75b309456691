use super::executor::{FileOutcome, FileStatus};
use serde::Serialize;
use std::path::PathBuf;
use tonarchiv_parser::{Fallback, MetadataRecord};

/// Errors listed in a summary before the rest is only counted.
pub const MAX_LISTED_ERRORS: usize = 20;

/// Totals of a conversion run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub output_root: PathBuf,
    pub dry_run: bool,
    pub found: usize,
    pub converted: usize,
    pub planned: usize,
    pub skipped: usize,
    pub errors: Vec<(PathBuf, String)>,
}

impl RunReport {
    pub fn new(output_root: PathBuf, dry_run: bool) -> Self {
        Self {
            output_root,
            dry_run,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.found += 1;
        match outcome.status {
            FileStatus::Converted => self.converted += 1,
            FileStatus::Planned => self.planned += 1,
            FileStatus::Skipped => self.skipped += 1,
            FileStatus::Failed(message) => self.errors.push((outcome.input, message)),
        }
    }

    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    pub fn is_success(&self) -> bool {
        self.found > 0 && self.errors.is_empty()
    }

    /// Process exit status: 1 without input files, 2 with per-file errors.
    pub fn exit_code(&self) -> u8 {
        if self.found == 0 {
            1
        } else if !self.errors.is_empty() {
            2
        } else {
            0
        }
    }

    /// Human-readable summary, one line per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        if self.found == 0 {
            return vec!["No WAV files found.".to_string()];
        }

        let mut lines = vec![format!("Found {} WAV files", self.found)];
        if self.dry_run {
            lines.push(format!(
                "[DRY RUN] Would convert: {}, skipped: {}, failed: {}",
                self.planned,
                self.skipped,
                self.failed()
            ));
        } else {
            lines.push(format!(
                "Converted: {}, skipped: {}, failed: {}",
                self.converted,
                self.skipped,
                self.failed()
            ));
        }
        lines.push(format!("Output: {}", self.output_root.display()));

        if !self.errors.is_empty() {
            lines.push(String::new());
            lines.push("Errors:".to_string());
            for (path, message) in self.errors.iter().take(MAX_LISTED_ERRORS) {
                lines.push(format!("  {}: {}", path.display(), message));
            }
            if self.errors.len() > MAX_LISTED_ERRORS {
                lines.push(format!("  … and {} more", self.errors.len() - MAX_LISTED_ERRORS));
            }
        }

        lines
    }
}

/// Result of inspecting one file.
#[derive(Debug, Clone, Serialize)]
pub struct InspectEntry {
    /// Path relative to the input root.
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<MetadataRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InspectEntry {
    pub fn ok(path: PathBuf, record: MetadataRecord, fallbacks: Vec<Fallback>) -> Self {
        Self {
            path,
            record: Some(record),
            fallbacks,
            error: None,
        }
    }

    pub fn failed(path: PathBuf, error: String) -> Self {
        Self {
            path,
            record: None,
            fallbacks: Vec::new(),
            error: Some(error),
        }
    }

    /// One-line description for terminal output.
    pub fn describe(&self) -> String {
        let Some(ref record) = self.record else {
            return format!(
                "{}\n    error: {}",
                self.path.display(),
                self.error.as_deref().unwrap_or("unknown error")
            );
        };

        let mut line = format!(
            "{}\n    #{} {} | {} | {} | {}",
            self.path.display(),
            record.track_number,
            record.composer,
            record.album,
            record.work.as_deref().unwrap_or("-"),
            record.title
        );
        if let Some(n) = record.movement_number {
            line.push_str(&format!(" (movement {})", n));
        }
        if let Some(n) = record.disc_number {
            line.push_str(&format!(" [CD {}]", n));
        }
        if let Some(ref box_set) = record.box_set {
            line.push_str(&format!(" [box: {}]", box_set));
        }
        for fallback in &self.fallbacks {
            line.push_str(&format!("\n    warning: {}", fallback));
        }
        line
    }
}
