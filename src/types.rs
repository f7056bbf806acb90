use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

/// What kind of filesystem object an entry is.
///
/// Computed once by the classifier; a record's kind never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    Symlink,
    /// A symlink to a directory on platforms that expose junctions.
    Junction,
    RegularFile,
}

impl EntryKind {
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// How a file's content type was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detection {
    /// Zero-length file.
    Empty,
    /// Leading bytes matched exactly one known signature.
    Sniffed,
    /// Looked up by file extension.
    Extension,
    /// Nothing matched.
    Unknown,
}

/// Content type of a regular file.
///
/// `label` is a MIME string when sniffed (`image/png`), a category when found
/// by extension (`plaintext`), or one of `empty` / `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    pub label: String,
    pub detected_by: Detection,
}

impl ContentType {
    pub const EMPTY: &'static str = "empty";
    pub const UNKNOWN: &'static str = "unknown";

    pub(crate) fn new(label: impl Into<String>, detected_by: Detection) -> Self {
        Self {
            label: label.into(),
            detected_by,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Self::EMPTY, Detection::Empty)
    }

    pub(crate) fn unknown() -> Self {
        Self::new(Self::UNKNOWN, Detection::Unknown)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Result of classifying a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: EntryKind,
    /// Only present for [`EntryKind::RegularFile`].
    pub content_type: Option<ContentType>,
}

/// A single directory entry with its display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Raw file name.
    pub name: String,
    /// The full path to the entry.
    pub full_path: PathBuf,
    pub kind: EntryKind,
    /// Set only when `kind` is [`EntryKind::RegularFile`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// Size as reported by the filesystem for the entry itself.
    ///
    /// For directories this is the directory inode size, not the size of
    /// everything below it.
    pub size_bytes: u64,
    pub modified_at: SystemTime,
    /// Some platforms and mount options do not track access times.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessed_at: Option<SystemTime>,
    /// `modified_at` rendered in the scan's time format.
    pub modified: String,
    /// `accessed_at` rendered in the scan's time format, `-` when absent.
    pub accessed: String,
    pub owner: String,
    pub group: String,
    /// `ls -l` style mode string, e.g. `drwxr-xr-x`.
    pub permissions: String,
    pub is_hidden: bool,
    /// A directory with no visible children.
    #[serde(default)]
    pub empty_dir: bool,
}

impl EntryRecord {
    /// Lowercased extension including the dot, or an empty string.
    pub fn extension(&self) -> String {
        crate::classify::extension_of(&self.name)
    }

    /// Human-readable type used by the table's "Type" column.
    pub fn type_description(&self) -> String {
        match self.kind {
            EntryKind::Directory if self.empty_dir => "Empty Directory".to_string(),
            EntryKind::Directory if cfg!(windows) => "Folder".to_string(),
            EntryKind::Directory => "Directory".to_string(),
            EntryKind::Symlink => "Symbolic Link".to_string(),
            EntryKind::Junction => "Junction".to_string(),
            EntryKind::RegularFile => match &self.content_type {
                Some(ct) if ct.detected_by == Detection::Empty => "Empty File".to_string(),
                Some(ct) if ct.detected_by == Detection::Unknown => "Unknown File".to_string(),
                Some(ct) => ct.label.clone(),
                None => "File".to_string(),
            },
        }
    }
}

/// Four mutually exclusive flags describing a record's kind. Exactly one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindFlags {
    pub is_file: bool,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub is_junction: bool,
}

/// Splits a record's kind into [`KindFlags`] for callers keeping their own tallies.
pub fn classify_counts(record: &EntryRecord) -> KindFlags {
    KindFlags {
        is_file: record.kind == EntryKind::RegularFile,
        is_dir: record.kind == EntryKind::Directory,
        is_symlink: record.kind == EntryKind::Symlink,
        is_junction: record.kind == EntryKind::Junction,
    }
}

/// Aggregate counts over the records a caller consumed.
///
/// The scanner never keeps one of these itself: a table accumulates one
/// directory, a tree accumulates its whole walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub directories: u64,
    pub files: u64,
    pub symlinks: u64,
    pub junctions: u64,
}

impl ScanSummary {
    pub fn tally(&mut self, record: &EntryRecord) {
        let flags = classify_counts(record);
        self.files += u64::from(flags.is_file);
        self.directories += u64::from(flags.is_dir);
        self.symlinks += u64::from(flags.is_symlink);
        self.junctions += u64::from(flags.is_junction);
    }

    pub fn merge(&mut self, other: ScanSummary) {
        self.directories += other.directories;
        self.files += other.files;
        self.symlinks += other.symlinks;
        self.junctions += other.junctions;
    }

    pub fn total(&self) -> u64 {
        self.directories + self.files + self.symlinks + self.junctions
    }
}

impl<'a> FromIterator<&'a EntryRecord> for ScanSummary {
    fn from_iter<I: IntoIterator<Item = &'a EntryRecord>>(iter: I) -> Self {
        let mut summary = ScanSummary::default();
        for record in iter {
            summary.tally(record);
        }
        summary
    }
}

fn plural(count: u64, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(4);
        if self.directories > 0 {
            parts.push(plural(self.directories, "directory", "directories"));
        }
        if self.files > 0 {
            parts.push(plural(self.files, "file", "files"));
        }
        if self.symlinks > 0 {
            parts.push(plural(self.symlinks, "symlink", "symlinks"));
        }
        if self.junctions > 0 {
            parts.push(plural(self.junctions, "junction", "junctions"));
        }
        match parts.split_last() {
            None => f.write_str("no entries"),
            Some((only, [])) => f.write_str(only),
            Some((last, rest)) => write!(f, "{}, and {}", rest.join(", "), last),
        }
    }
}
