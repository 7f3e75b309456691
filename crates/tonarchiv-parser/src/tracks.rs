//! Track numbering over a whole batch of files.
//!
//! Track numbers are sequential per *container*, the folder one level above
//! the work folder (the media folder of a single disc, the disc folder of a
//! box). They can only be computed once every file below an input root is
//! known, so numbering is a separate pass producing a [`TrackMap`].

use crate::classify::PathClassification;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Track numbers keyed by file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMap {
    numbers: HashMap<PathBuf, u32>,
}

impl TrackMap {
    /// Track number assigned to `path`, if any.
    pub fn get(&self, path: &Path) -> Option<u32> {
        self.numbers.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Assign track numbers to a batch of files.
///
/// Files without a `.wav` extension are ignored. Within each container the
/// files are ordered by work folder name (case-insensitive) and then by the
/// natural order of their file names. Names that are naturally equal
/// (`track02`, `track2`) fall back to plain string order.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use tonarchiv_parser::tracks::assign_track_numbers;
///
/// let files = vec![
///     PathBuf::from("disc/work/track10.wav"),
///     PathBuf::from("disc/work/track2.wav"),
/// ];
/// let map = assign_track_numbers(&files);
/// assert_eq!(map.get(Path::new("disc/work/track2.wav")), Some(1));
/// assert_eq!(map.get(Path::new("disc/work/track10.wav")), Some(2));
/// ```
pub fn assign_track_numbers<P: AsRef<Path>>(files: &[P]) -> TrackMap {
    let mut buckets: BTreeMap<&Path, Vec<&Path>> = BTreeMap::new();

    for file in files {
        let file = file.as_ref();
        if !is_wav(file) {
            continue;
        }
        buckets.entry(track_container(file)).or_default().push(file);
    }

    let mut numbers = HashMap::new();
    for mut bucket in buckets.into_values() {
        bucket.sort_by_cached_key(|file| {
            let name = file_name(file);
            (work_folder_key(file), natural_key(&name), name)
        });
        for (index, file) in bucket.into_iter().enumerate() {
            numbers.insert(file.to_path_buf(), index as u32 + 1);
        }
    }

    TrackMap { numbers }
}

/// Folder over which track numbers are sequential.
///
/// This is the grandparent of the file; when the path is too shallow to have
/// one, the immediate parent is used instead.
pub fn track_container(file: &Path) -> &Path {
    let parent = file.parent().unwrap_or(Path::new(""));
    match parent.parent() {
        Some(grandparent) if !grandparent.as_os_str().is_empty() => grandparent,
        _ => parent,
    }
}

/// Folder that holds the `booklet` folder with the cover image.
///
/// Single discs keep it next to the work folders (the media folder), box sets
/// at the box level, one folder further up.
pub fn cover_container(file: &Path, classification: PathClassification) -> Option<&Path> {
    let levels = match classification {
        PathClassification::Single => 2,
        PathClassification::Box => 3,
        PathClassification::Unknown => return None,
    };
    file.ancestors()
        .nth(levels)
        .filter(|dir| !dir.as_os_str().is_empty())
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

fn work_folder_key(file: &Path) -> String {
    file.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn file_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Sort key comparing embedded digit runs by value: `track2` < `track10`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Chunk>);

/// Text runs are compared lower-cased, digit runs numerically.
///
/// A key always starts with a text chunk (possibly empty) and alternates,
/// so text is never compared against a number at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    Text(String),
    Number(Digits),
}

/// A digit run compared by numeric value, of any length.
#[derive(Debug, Clone)]
struct Digits(String);

impl Digits {
    fn significant(&self) -> &str {
        self.0.trim_start_matches('0')
    }
}

impl PartialEq for Digits {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Digits {}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

/// Split a string into alternating text and digit runs.
pub fn natural_key(s: &str) -> NaturalKey {
    let mut chunks = Vec::new();
    let mut text = String::new();
    let mut digits = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            if !digits.is_empty() {
                chunks.push(Chunk::Text(std::mem::take(&mut text).to_lowercase()));
                chunks.push(Chunk::Number(Digits(std::mem::take(&mut digits))));
            }
            text.push(c);
        }
    }

    chunks.push(Chunk::Text(text.to_lowercase()));
    if !digits.is_empty() {
        chunks.push(Chunk::Number(Digits(digits)));
    }

    NaturalKey(chunks)
}
