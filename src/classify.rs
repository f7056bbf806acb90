//! Kind and content-type classification for single paths.
//!
//! The order of checks is fixed: directory, then symlink (or junction), then
//! regular file. Regular files are typed by size, then by signature sniffing
//! and extension lookup in the configured order, then fall back to `unknown`.

use crate::error::CanopyError;
use crate::options::DetectionOrder;
use crate::types::{Classification, ContentType, Detection, EntryKind};
use std::fs::{self, File, Metadata};
use std::io::Read;
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;

/// Bytes read from the head of a file for signature matching.
const SNIFF_LEN: u64 = 8192;

/// Extension to category table, searched top to bottom.
static EXTENSION_CATEGORIES: &[(&str, &[&str])] = &[
    ("plaintext", &[".txt", ".rst", ".rtf"]),
    (
        "config",
        &[".xml", ".ini", ".cfg", ".toml", ".iml", ".yml", ".yaml"],
    ),
    ("log", &[".log"]),
    (
        "database",
        &[
            ".plist", ".db", ".db3", ".sqlite", ".sqlite3", ".sql", ".mdb", ".accdb", ".parquet",
            ".avro", ".orc", ".hdf5", ".h5", ".msgpack", ".tsv",
        ],
    ),
    ("json", &[".json", ".jsonl", ".ndjson"]),
    ("markdown", &[".md"]),
    ("ssh", &[".pub", ".pem", ".key"]),
    ("record", &[".csv"]),
    ("document", &[".docx", ".doc", ".odt", ".pdf", ".tex"]),
    ("spreadsheet", &[".xlsx", ".xls"]),
    ("presentation", &[".pptx", ".ppt"]),
    ("ebook", &[".epub"]),
    (
        "image",
        &[
            ".jpg", ".ico", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".tiff", ".webp", ".heic",
            ".psd", ".xcf", ".cr2", ".nef", ".arw", ".orf", ".rw2",
        ],
    ),
    (
        "video",
        &[
            ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".webm", ".flv", ".mpeg", ".mpg", ".3gp",
        ],
    ),
    (
        "audio",
        &[
            ".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a", ".wma", ".alac", ".aiff", ".opus",
            ".pcm", ".dsd", ".mid", ".midi", ".aifc", ".caf",
        ],
    ),
    (
        "archive",
        &[
            ".zip", ".tar", ".gz", ".rar", ".7z", ".bz2", ".xz", ".tgz", ".tbz2", ".txz", ".zst",
            ".lzma", ".cab", ".arj", ".lzh", ".z", ".jar", ".cpio",
        ],
    ),
    // no `.bin`: unrecognised blobs stay `unknown`
    ("binary", &[".so", ".dylib", ".out"]),
    ("executable", &[".exe", ".bat", ".cmd", ".dll"]),
    ("diskimage", &[".iso", ".dmg"]),
    ("package", &[".ipa", ".app", ".pkg", ".apk", ".xapk"]),
    ("checksum", &[".md5", ".sha1", ".sha256", ".sha512", ".sfv"]),
    ("signature", &[".sig", ".asc", ".gpg", ".pgp"]),
    ("header", &[".h", ".hh", ".hpp", ".hxx"]),
    (
        "code",
        &[
            ".py", ".pyi", ".pyc", ".ps1", ".js", ".mjs", ".cjs", ".ts", ".tsx", ".jsx", ".java",
            ".c", ".cc", ".cpp", ".cs", ".go", ".php", ".rb", ".rs", ".kt", ".swift", ".pl", ".sh",
            ".zsh", ".html", ".css", ".scss",
        ],
    ),
    ("socket", &[".sock"]),
    ("desktop", &[".desktop"]),
    ("lockfile", &[".lock"]),
];

/// Lowercased extension of a file name including the leading dot.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Category for a file name by its extension, matched case-insensitively.
pub fn extension_category(name: &str) -> Option<&'static str> {
    let ext = extension_of(name);
    if ext.is_empty() {
        return None;
    }
    EXTENSION_CATEGORIES
        .iter()
        .find(|(_, extensions)| extensions.contains(&ext.as_str()))
        .map(|(category, _)| *category)
}

/// Signature match over the leading bytes of a file.
///
/// Candidates come from `infer`'s matcher table and from byte-order marks.
/// Exactly one candidate is a match; none or several are left to the
/// extension lookup.
pub fn sniff_bytes(head: &[u8]) -> Option<ContentType> {
    let mut candidates: Vec<&'static str> = Vec::with_capacity(2);
    if let Some(kind) = infer::get(head) {
        candidates.push(kind.mime_type());
    }
    if let Some(mime) = bom_signature(head) {
        candidates.push(mime);
    }
    match candidates.as_slice() {
        [only] => Some(ContentType::new(*only, Detection::Sniffed)),
        _ => None,
    }
}

fn bom_signature(head: &[u8]) -> Option<&'static str> {
    use content_inspector::ContentType as Inspected;
    match content_inspector::inspect(head) {
        Inspected::UTF_8_BOM => Some("text/plain; charset=utf-8"),
        Inspected::UTF_16LE => Some("text/plain; charset=utf-16le"),
        Inspected::UTF_16BE => Some("text/plain; charset=utf-16be"),
        Inspected::UTF_32LE => Some("text/plain; charset=utf-32le"),
        Inspected::UTF_32BE => Some("text/plain; charset=utf-32be"),
        Inspected::UTF_8 | Inspected::BINARY => None,
    }
}

fn sniff_file(path: &Path) -> Option<ContentType> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    let read = File::open(path).and_then(|file| file.take(SNIFF_LEN).read_to_end(&mut head));
    if let Err(_e) = read {
        #[cfg(feature = "logging")]
        tracing::debug!("cannot read {} for sniffing: {}", path.display(), _e);
        return None;
    }
    sniff_bytes(&head)
}

/// What the host filesystem can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    junctions: bool,
}

impl Platform {
    /// Capabilities of the platform this binary was built for.
    pub fn current() -> Self {
        Self {
            junctions: cfg!(windows),
        }
    }

    /// A platform with junction support switched on or off.
    pub fn with_junctions(junctions: bool) -> Self {
        Self { junctions }
    }

    pub fn supports_junctions(&self) -> bool {
        self.junctions
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Maps a path to its [`EntryKind`] and, for regular files, its [`ContentType`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryClassifier {
    platform: Platform,
    order: DetectionOrder,
}

impl EntryClassifier {
    pub fn new(platform: Platform, order: DetectionOrder) -> Self {
        Self { platform, order }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Classifies an existing path without following a final symlink.
    ///
    /// # Errors
    ///
    /// [`CanopyError::NotFound`] if nothing exists at `path`,
    /// [`CanopyError::MetadataUnavailable`] if it cannot be stat'ed.
    pub fn classify(&self, path: &Path) -> Result<Classification, CanopyError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| CanopyError::metadata(path, e))?;
        Ok(self.classify_with(path, &metadata))
    }

    pub(crate) fn classify_with(&self, path: &Path, metadata: &Metadata) -> Classification {
        let kind = self.kind_of(path, metadata);
        let content_type = match kind {
            EntryKind::RegularFile => Some(self.content_type(path, metadata)),
            _ => None,
        };
        Classification { kind, content_type }
    }

    /// Kind of an entry given its `lstat` metadata.
    pub(crate) fn kind_of(&self, path: &Path, metadata: &Metadata) -> EntryKind {
        let file_type = metadata.file_type();
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_symlink() {
            if self.platform.junctions && links_to_directory(path, metadata) {
                EntryKind::Junction
            } else {
                EntryKind::Symlink
            }
        } else {
            EntryKind::RegularFile
        }
    }

    /// Content type of a regular file given its `lstat` metadata.
    pub(crate) fn content_type(&self, path: &Path, metadata: &Metadata) -> ContentType {
        if metadata.len() == 0 {
            return ContentType::empty();
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // FIFOs and devices would block or misbehave when opened.
        let sniffed = || {
            if metadata.is_file() {
                sniff_file(path)
            } else {
                None
            }
        };
        let by_extension =
            || extension_category(&name).map(|c| ContentType::new(c, Detection::Extension));
        let found = match self.order {
            DetectionOrder::SniffFirst => sniffed().or_else(by_extension),
            DetectionOrder::ExtensionFirst => by_extension().or_else(sniffed),
        };
        found.unwrap_or_else(ContentType::unknown)
    }
}

fn links_to_directory(path: &Path, metadata: &Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::FileTypeExt;
        if metadata.file_type().is_symlink_dir() {
            return true;
        }
    }
    #[cfg(not(windows))]
    let _ = metadata;
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("photo.JPG"), ".jpg");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("Makefile"), "");
    }

    #[test]
    fn test_extension_category_first_match_wins() {
        assert_eq!(extension_category("notes.TXT"), Some("plaintext"));
        assert_eq!(extension_category("id_rsa.pub"), Some("ssh"));
        assert_eq!(extension_category("main.rs"), Some("code"));
        assert_eq!(extension_category("blob.bin"), None);
    }

    #[test]
    fn test_sniff_png_signature() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let sniffed = sniff_bytes(&png).unwrap();
        assert_eq!(sniffed.label, "image/png");
        assert_eq!(sniffed.detected_by, Detection::Sniffed);
    }

    #[test]
    fn test_sniff_byte_order_mark() {
        let text = [0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(
            sniff_bytes(&text).unwrap().label,
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_sniff_plain_text_has_no_signature() {
        assert!(sniff_bytes(b"just some words").is_none());
        assert!(sniff_bytes(&[0x13, 0x37, 0x00, 0x42]).is_none());
    }
}
