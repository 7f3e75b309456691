use super::report::{InspectEntry, RunReport};
use super::{TagWriter, Transcoder};
use crate::config::Config;
use crate::cover::find_cover;
use crate::scanner;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tonarchiv_av::Workspace;
use tonarchiv_common::paths::{mirror_output_path, run_output_root};
use tonarchiv_parser::{build_record, Parser, TrackMap};
use tracing::{debug, info, warn};

/// Settings of one conversion run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Worker threads, already resolved (never 0).
    pub workers: usize,
    pub dry_run: bool,
    pub skip_existing: bool,
    pub timestamped_output: bool,
    pub embed_cover: bool,
    pub cover_candidates: Vec<PathBuf>,
}

impl RunOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            workers: config.conversion.effective_workers(),
            dry_run: config.conversion.dry_run,
            skip_existing: config.conversion.skip_existing,
            timestamped_output: config.conversion.timestamped_output,
            embed_cover: config.cover.enabled,
            cover_candidates: config.cover.candidates.clone(),
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Converted,
    /// Dry run: would have been converted.
    Planned,
    /// Output already existed.
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub status: FileStatus,
}

/// Converts an input tree with a transcoder and a tag writer.
pub struct Pipeline<T, W> {
    parser: Parser,
    transcoder: T,
    tagger: W,
    options: RunOptions,
}

impl<T: Transcoder, W: TagWriter> Pipeline<T, W> {
    pub fn new(parser: Parser, transcoder: T, tagger: W, options: RunOptions) -> Self {
        Self {
            parser,
            transcoder,
            tagger,
            options,
        }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Convert every WAV file below `input_root` into `output_root`.
    ///
    /// Per-file failures are collected in the report; only problems with the
    /// run as a whole (unreadable input root, worker pool setup) are errors.
    pub fn run(&self, input_root: &Path, output_root: &Path) -> Result<RunReport> {
        let started = chrono::Local::now();
        let files = scanner::find_wavs(input_root)?;
        let output_root = run_output_root(output_root, &started, self.options.timestamped_output);

        let mut report = RunReport::new(output_root.clone(), self.options.dry_run);
        if files.is_empty() {
            return Ok(report);
        }

        // Numbering needs the complete batch before any file is converted.
        let tracks = self.parser.track_numbers(&files);
        info!(
            "Converting {} files into {:?} with {} workers",
            files.len(),
            output_root,
            self.options.workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers)
            .build()
            .context("Failed to build worker pool")?;

        let outcomes: Vec<FileOutcome> = pool.install(|| {
            files
                .par_iter()
                .map(|file| self.process(file, input_root, &output_root, &tracks))
                .collect()
        });

        for outcome in outcomes {
            report.record(outcome);
        }
        Ok(report)
    }

    fn process(
        &self,
        file: &Path,
        input_root: &Path,
        output_root: &Path,
        tracks: &TrackMap,
    ) -> FileOutcome {
        let output = mirror_output_path(file, input_root, output_root).ok();

        let status = match output.as_deref() {
            Some(output) => match self.convert(file, output, tracks) {
                Ok(status) => status,
                Err(e) => {
                    warn!(file = %file.display(), "{:#}", e);
                    FileStatus::Failed(format!("{:#}", e))
                }
            },
            None => FileStatus::Failed(format!("{:?} is outside the input directory", file)),
        };

        FileOutcome {
            input: file.to_path_buf(),
            output,
            status,
        }
    }

    fn convert(&self, file: &Path, output: &Path, tracks: &TrackMap) -> Result<FileStatus> {
        let record = self.parser.record(file, tracks)?;

        if self.options.skip_existing && output.exists() {
            debug!("Skipping existing {:?}", output);
            return Ok(FileStatus::Skipped);
        }

        let cover = if self.options.embed_cover {
            find_cover(file, record.classification, &self.options.cover_candidates)
        } else {
            None
        };

        if self.options.dry_run {
            info!("[DRY RUN] Would convert {:?} -> {:?}", file, output);
            debug!("[DRY RUN] Tags: {:?}, cover: {:?}", record.present_tags(), cover);
            return Ok(FileStatus::Planned);
        }

        let workspace = Workspace::new(output)?;
        self.transcoder
            .transcode(file, workspace.output())
            .context("Transcoding failed")?;
        self.tagger
            .write_tags(workspace.output(), &record, cover.as_deref())
            .context("Writing tags failed")?;
        workspace.finalize()?;

        debug!("Converted {:?}", output);
        Ok(FileStatus::Converted)
    }
}

/// Decompose every WAV file below `input_root` without converting anything.
pub fn inspect(parser: &Parser, input_root: &Path) -> Result<Vec<InspectEntry>> {
    let files = scanner::find_wavs(input_root)?;
    let tracks = parser.track_numbers(&files);

    let entries = files
        .iter()
        .map(|file| {
            let path = file.strip_prefix(input_root).unwrap_or(file).to_path_buf();
            match parser.decompose(file) {
                Ok(decomposition) => {
                    let fallbacks = decomposition.fallbacks.clone();
                    match build_record(file, decomposition, &tracks) {
                        Ok(record) => InspectEntry::ok(path, record, fallbacks),
                        Err(e) => InspectEntry::failed(path, e.to_string()),
                    }
                }
                Err(e) => InspectEntry::failed(path, e.to_string()),
            }
        })
        .collect();

    Ok(entries)
}
