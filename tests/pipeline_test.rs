//! Pipeline integration tests
//!
//! Runs whole conversions with a stand-in transcoder and tag writer, so no
//! ffmpeg is needed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::{tempdir, TempDir};
use tonarchiv::pipeline::{Pipeline, RunOptions, TagWriter, Transcoder};
use tonarchiv_parser::{MetadataRecord, Parser};

/// Writes the input file name into the output.
struct CopyTranscoder;

impl Transcoder for CopyTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> anyhow::Result<()> {
        let name = input.file_name().unwrap().to_string_lossy();
        fs::write(output, name.as_bytes())?;
        Ok(())
    }
}

/// Fails for every input whose name contains `broken`.
struct FlakyTranscoder;

impl Transcoder for FlakyTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> anyhow::Result<()> {
        if input.to_string_lossy().contains("broken") {
            anyhow::bail!("ffmpeg failed: invalid data");
        }
        fs::write(output, b"flac")?;
        Ok(())
    }
}

/// Remembers every record it was asked to write.
#[derive(Default)]
struct RecordingTagWriter {
    calls: Mutex<Vec<(PathBuf, MetadataRecord, Option<PathBuf>)>>,
}

impl RecordingTagWriter {
    /// Calls sorted by title.
    fn calls(&self) -> Vec<(PathBuf, MetadataRecord, Option<PathBuf>)> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort_by(|a, b| a.1.title.cmp(&b.1.title));
        calls
    }
}

impl TagWriter for RecordingTagWriter {
    fn write_tags(
        &self,
        path: &Path,
        record: &MetadataRecord,
        cover: Option<&Path>,
    ) -> anyhow::Result<()> {
        assert!(path.exists(), "tags written before transcoding");
        self.calls.lock().unwrap().push((
            path.to_path_buf(),
            record.clone(),
            cover.map(Path::to_path_buf),
        ));
        Ok(())
    }
}

fn library(files: &[&str]) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");
    fs::create_dir_all(&input).unwrap();
    for file in files {
        let path = input.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"RIFF").unwrap();
    }
    (dir, input, output)
}

fn options() -> RunOptions {
    RunOptions {
        workers: 2,
        timestamped_output: false,
        ..RunOptions::default()
    }
}

const BOX_TRACK: &str =
    "Boxen/Verdi - Operas/Verdi - Operas_CD1/Verdi - Aida/Verdi-Aida-01-Preludio.wav";

#[test]
fn test_outputs_mirror_input_tree() {
    let files = [
        "EinzelCDs/Satie - Piano/Satie - Gymnopedies/Satie-Gymnopedies-10-Late.wav",
        "EinzelCDs/Satie - Piano/Satie - Gymnopedies/Satie-Gymnopedies-2-Second.wav",
        "EinzelCDs/Satie - Piano/Satie - Gymnopedies/Satie-Gymnopedies-1-First.wav",
    ];
    let (_dir, input, output) = library(&files);
    let tagger = RecordingTagWriter::default();
    let pipeline = Pipeline::new(Parser::default(), CopyTranscoder, tagger, options());

    let report = pipeline.run(&input, &output).unwrap();
    assert_eq!(report.found, 3);
    assert_eq!(report.converted, 3);
    assert_eq!(report.exit_code(), 0);

    for (file, expected) in files.iter().zip(["Late", "Second", "First"]) {
        let flac = output.join(file).with_extension("flac");
        assert!(flac.exists(), "{:?} missing", flac);
        let written = fs::read_to_string(&flac).unwrap();
        assert!(written.contains(expected));
    }
}

#[test]
fn test_track_numbers_follow_natural_order() {
    let files = [
        "EinzelCDs/Satie - Piano/Satie - Gymnopedies/Satie-Gymnopedies-10-Late.wav",
        "EinzelCDs/Satie - Piano/Satie - Gymnopedies/Satie-Gymnopedies-2-Second.wav",
        "EinzelCDs/Satie - Piano/Satie - Gymnopedies/Satie-Gymnopedies-1-First.wav",
    ];
    let (_dir, input, output) = library(&files);
    let tagger = RecordingTagWriter::default();
    let pipeline = Pipeline::new(Parser::default(), CopyTranscoder, &tagger, options());

    pipeline.run(&input, &output).unwrap();

    let calls = tagger.calls();
    let numbers: Vec<(&str, u32)> = calls
        .iter()
        .map(|(_, record, _)| (record.title.as_str(), record.track_number))
        .collect();
    assert_eq!(numbers, vec![("First", 1), ("Late", 3), ("Second", 2)]);

    // Tags go into the staged file, never the final destination.
    let work = output.join("EinzelCDs/Satie - Piano/Satie - Gymnopedies");
    for (path, _, _) in &calls {
        assert_ne!(path.parent(), Some(work.as_path()));
        assert!(path.starts_with(&work));
    }
    assert!(calls.iter().all(|(_, record, _)| record.composer == "Satie"));
}

#[test]
fn test_unknown_layout_is_a_file_error() {
    let (_dir, input, output) = library(&[
        "EinzelCDs/Bach - Cantatas/Bach - BWV 1/Bach-BWV1-01-Sinfonia.wav",
        "Archiv/Bach - Cantatas/Bach - BWV 1/Bach-BWV1-01-Sinfonia.wav",
    ]);
    let pipeline = Pipeline::new(
        Parser::default(),
        CopyTranscoder,
        RecordingTagWriter::default(),
        options(),
    );

    let report = pipeline.run(&input, &output).unwrap();
    assert_eq!(report.found, 2);
    assert_eq!(report.converted, 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.exit_code(), 2);
    assert!(report.errors[0].0.starts_with(input.join("Archiv")));
    assert!(report.errors[0].1.contains("no media layout recognized"));
    assert!(!output.join("Archiv").exists());
}

#[test]
fn test_failed_transcode_leaves_no_output() {
    let (_dir, input, output) = library(&[
        "EinzelCDs/A - B/A - W/A-W-01-fine.wav",
        "EinzelCDs/A - B/A - W/A-W-02-broken.wav",
    ]);
    let pipeline = Pipeline::new(
        Parser::default(),
        FlakyTranscoder,
        RecordingTagWriter::default(),
        options(),
    );

    let report = pipeline.run(&input, &output).unwrap();
    assert_eq!(report.converted, 1);
    assert_eq!(report.failed(), 1);
    assert!(report.errors[0].1.contains("invalid data"));

    let work = output.join("EinzelCDs/A - B/A - W");
    assert!(work.join("A-W-01-fine.flac").exists());
    assert!(!work.join("A-W-02-broken.flac").exists());
    // No staging directories left behind.
    let leftovers: Vec<_> = fs::read_dir(&work).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_dry_run_writes_nothing() {
    let (_dir, input, output) = library(&["EinzelCDs/A - B/A - W/A-W-01-x.wav"]);
    let tagger = RecordingTagWriter::default();
    let pipeline = Pipeline::new(
        Parser::default(),
        CopyTranscoder,
        &tagger,
        RunOptions {
            dry_run: true,
            ..options()
        },
    );

    let report = pipeline.run(&input, &output).unwrap();
    assert_eq!(report.planned, 1);
    assert_eq!(report.converted, 0);
    assert!(report.is_success());
    assert!(!output.exists());
    assert!(tagger.calls().is_empty());
}

#[test]
fn test_skip_existing() {
    let (_dir, input, output) = library(&[
        "EinzelCDs/A - B/A - W/A-W-01-x.wav",
        "EinzelCDs/A - B/A - W/A-W-02-y.wav",
    ]);
    let existing = output.join("EinzelCDs/A - B/A - W/A-W-01-x.flac");
    fs::create_dir_all(existing.parent().unwrap()).unwrap();
    fs::write(&existing, b"old").unwrap();

    let pipeline = Pipeline::new(
        Parser::default(),
        CopyTranscoder,
        RecordingTagWriter::default(),
        RunOptions {
            skip_existing: true,
            ..options()
        },
    );

    let report = pipeline.run(&input, &output).unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.converted, 1);
    assert_eq!(fs::read(&existing).unwrap(), b"old");
}

#[test]
fn test_existing_output_replaced_without_skip() {
    let (_dir, input, output) = library(&["EinzelCDs/A - B/A - W/A-W-01-x.wav"]);
    let existing = output.join("EinzelCDs/A - B/A - W/A-W-01-x.flac");
    fs::create_dir_all(existing.parent().unwrap()).unwrap();
    fs::write(&existing, b"old").unwrap();

    let pipeline = Pipeline::new(
        Parser::default(),
        CopyTranscoder,
        RecordingTagWriter::default(),
        options(),
    );

    let report = pipeline.run(&input, &output).unwrap();
    assert_eq!(report.converted, 1);
    assert_eq!(fs::read_to_string(&existing).unwrap(), "A-W-01-x.wav");
}

#[test]
fn test_timestamped_output_folder() {
    let (_dir, input, output) = library(&["EinzelCDs/A - B/A - W/A-W-01-x.wav"]);
    let pipeline = Pipeline::new(
        Parser::default(),
        CopyTranscoder,
        RecordingTagWriter::default(),
        RunOptions {
            timestamped_output: true,
            ..options()
        },
    );

    let report = pipeline.run(&input, &output).unwrap();
    assert_eq!(report.output_root.parent(), Some(output.as_path()));

    // YYYY-MM-DD_HH-MM
    let name = report.output_root.file_name().unwrap().to_string_lossy();
    assert_eq!(name.len(), 16);
    assert_eq!(&name[4..5], "-");
    assert_eq!(&name[10..11], "_");
    assert!(report
        .output_root
        .join("EinzelCDs/A - B/A - W/A-W-01-x.flac")
        .exists());
}

#[test]
fn test_box_cover_passed_to_tag_writer() {
    let (_dir, input, output) = library(&[
        BOX_TRACK,
        "EinzelCDs/A - B/A - W/A-W-01-x.wav",
    ]);
    let cover = input.join("Boxen/Verdi - Operas/booklet/booklet-b.jpg");
    fs::create_dir_all(cover.parent().unwrap()).unwrap();
    fs::write(&cover, b"\xff\xd8\xff").unwrap();

    let tagger = RecordingTagWriter::default();
    let pipeline = Pipeline::new(Parser::default(), CopyTranscoder, &tagger, options());
    pipeline.run(&input, &output).unwrap();

    let calls = tagger.calls();
    assert_eq!(calls.len(), 2);

    let (_, aida, aida_cover) = &calls[0];
    assert_eq!(aida.title, "Preludio");
    assert_eq!(aida.disc_number, Some(1));
    assert_eq!(aida.album, "Operas");
    assert_eq!(aida_cover.as_deref(), Some(cover.as_path()));

    let (_, single, single_cover) = &calls[1];
    assert_eq!(single.title, "x");
    assert_eq!(*single_cover, None);
}

#[test]
fn test_cover_embedding_disabled() {
    let (_dir, input, output) = library(&["EinzelCDs/A - B/A - W/A-W-01-x.wav"]);
    let cover = input.join("EinzelCDs/A - B/booklet/booklet-b.jpg");
    fs::create_dir_all(cover.parent().unwrap()).unwrap();
    fs::write(&cover, b"\xff\xd8\xff").unwrap();

    let tagger = RecordingTagWriter::default();
    let pipeline = Pipeline::new(
        Parser::default(),
        CopyTranscoder,
        &tagger,
        RunOptions {
            embed_cover: false,
            ..options()
        },
    );
    pipeline.run(&input, &output).unwrap();

    let calls = tagger.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].2, None);
}

#[test]
fn test_empty_input() {
    let (_dir, input, output) = library(&[]);
    let pipeline = Pipeline::new(
        Parser::default(),
        CopyTranscoder,
        RecordingTagWriter::default(),
        options(),
    );

    let report = pipeline.run(&input, &output).unwrap();
    assert_eq!(report.found, 0);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.summary_lines(), vec!["No WAV files found."]);
}
