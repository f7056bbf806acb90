//! Static name styling table.
//!
//! Lookup goes by exact kind first, then by extension through an ordered list
//! of groups (first group containing the extension wins), then falls back to
//! the generic file style. The table is immutable and shared process-wide.

use crate::types::EntryKind;
use colored::{Color, ColoredString, Colorize};

/// Color and icon for one class of entries.
///
/// `style` uses a small space-separated vocabulary: `bold`, `dim`, `italic`,
/// `underline`, a named color (`blue`, `dim white`) or a `#rrggbb` hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStyle {
    pub style: &'static str,
    pub icon: char,
}

struct StyleGroup {
    extensions: &'static [&'static str],
    style: EntryStyle,
}

const fn entry(style: &'static str, icon: char) -> EntryStyle {
    EntryStyle { style, icon }
}

pub const DIRECTORY: EntryStyle = entry("bold blue", '\u{f07b}');
pub const SYMLINK: EntryStyle = entry("blue underline", '\u{f481}');
pub const JUNCTION: EntryStyle = entry("", '\u{f482}');
pub const FILE: EntryStyle = entry("dim white", '\u{f15b}');

static GROUPS: &[StyleGroup] = &[
    StyleGroup {
        extensions: &[".txt", ".rst", ".rtf", ".xml", ".ini", ".cfg", ".log", ".pub"],
        style: entry("#7193FF", '\u{f15c}'),
    },
    StyleGroup {
        extensions: &[
            ".plist", ".db", ".db3", ".sqlite", ".sqlite3", ".sql", ".mdb", ".accdb", ".parquet",
            ".avro", ".orc", ".hdf5", ".h5", ".msgpack", ".tsv",
        ],
        style: entry("#7193FF", '\u{f1c0}'),
    },
    StyleGroup {
        extensions: &[".odt", ".epub"],
        style: entry("yellow", '\u{f1c2}'),
    },
    StyleGroup {
        extensions: &[
            ".jpg", ".ico", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".tiff", ".webp", ".heic",
            ".psd", ".xcf", ".cr2", ".nef", ".arw", ".orf", ".rw2",
        ],
        style: entry("magenta", '\u{f1c5}'),
    },
    StyleGroup {
        extensions: &[
            ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".webm", ".flv", ".mpeg", ".mpg", ".3gp",
        ],
        style: entry("red", '\u{f1c8}'),
    },
    StyleGroup {
        extensions: &[
            ".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a", ".wma", ".alac", ".aiff", ".opus",
            ".pcm", ".dsd", ".mid", ".midi", ".aifc", ".caf",
        ],
        style: entry("green", '\u{f1c7}'),
    },
    StyleGroup {
        extensions: &[
            ".zip", ".tar", ".gz", ".rar", ".7z", ".bz2", ".xz", ".tgz", ".tbz2", ".txz", ".zst",
            ".lzma", ".cab", ".arj", ".lzh", ".z", ".jar", ".cpio",
        ],
        style: entry("yellow", '\u{f410}'),
    },
    StyleGroup {
        extensions: &[
            ".md5", ".sha1", ".sha256", ".sha512", ".sfv", ".sig", ".asc", ".gpg", ".pgp",
        ],
        style: entry("#6e6e6e", '\u{f4df}'),
    },
    StyleGroup {
        extensions: &[".py", ".pyi", ".pyc"],
        style: entry("#3572A5", '\u{e606}'),
    },
    StyleGroup {
        extensions: &[".json", ".jsonl", ".ndjson"],
        style: entry("purple", '\u{eb0f}'),
    },
    StyleGroup {
        extensions: &[".docx", ".doc"],
        style: entry("", '\u{f022c}'),
    },
    StyleGroup {
        extensions: &[".iso", ".dmg"],
        style: entry("", '\u{f05ee}'),
    },
    StyleGroup {
        extensions: &[".ipa", ".app", ".pkg"],
        style: entry("", '\u{e711}'),
    },
    StyleGroup {
        extensions: &[".apk", ".xapk"],
        style: entry("green", '\u{e70e}'),
    },
    StyleGroup {
        extensions: &[".xlsx", ".xls"],
        style: entry("", '\u{f021b}'),
    },
    StyleGroup {
        extensions: &[".pptx", ".ppt"],
        style: entry("", '\u{f0227}'),
    },
    StyleGroup {
        extensions: &[".ps1"],
        style: entry("green", '\u{f0a0a}'),
    },
    StyleGroup {
        extensions: &[".tex"],
        style: entry("", '\u{e69b}'),
    },
    StyleGroup {
        extensions: &[".csv"],
        style: entry("", '\u{eefc}'),
    },
    StyleGroup {
        extensions: &[".pdf"],
        style: entry("", '\u{f1c1}'),
    },
    StyleGroup {
        extensions: &[".sock"],
        style: entry("cyan", '\u{f0427}'),
    },
    StyleGroup {
        extensions: &[".md"],
        style: entry("white", '\u{f0354}'),
    },
    StyleGroup {
        extensions: &[".js", ".mjs", ".cjs"],
        style: entry("#f1e05a", '\u{e74e}'),
    },
    StyleGroup {
        extensions: &[".ts"],
        style: entry("#3178c6", '\u{e628}'),
    },
    StyleGroup {
        extensions: &[".tsx"],
        style: entry("#3178c6", '\u{e7ba}'),
    },
    StyleGroup {
        extensions: &[".jsx"],
        style: entry("#61dafb", '\u{e7ba}'),
    },
    StyleGroup {
        extensions: &[".java"],
        style: entry("#b07219", '\u{e738}'),
    },
    StyleGroup {
        extensions: &[".c"],
        style: entry("#555555", '\u{e61e}'),
    },
    StyleGroup {
        extensions: &[".cpp"],
        style: entry("#f34b7d", '\u{e61d}'),
    },
    StyleGroup {
        extensions: &[".cs"],
        style: entry("#178600", '\u{f81a}'),
    },
    StyleGroup {
        extensions: &[".go"],
        style: entry("#00ADD8", '\u{e627}'),
    },
    StyleGroup {
        extensions: &[".php"],
        style: entry("#4F5D95", '\u{e608}'),
    },
    StyleGroup {
        extensions: &[".rb"],
        style: entry("#701516", '\u{e791}'),
    },
    StyleGroup {
        extensions: &[".rs"],
        style: entry("#dea584", '\u{e7a8}'),
    },
    StyleGroup {
        extensions: &[".kt"],
        style: entry("#A97BFF", '\u{e634}'),
    },
    StyleGroup {
        extensions: &[".swift"],
        style: entry("#ffac45", '\u{e755}'),
    },
    StyleGroup {
        extensions: &[".pl"],
        style: entry("#0298c3", '\u{e769}'),
    },
    StyleGroup {
        extensions: &[".sh", ".zsh"],
        style: entry("#89e051", '\u{e795}'),
    },
    StyleGroup {
        extensions: &[".html"],
        style: entry("#e34c26", '\u{e736}'),
    },
    StyleGroup {
        extensions: &[".lock"],
        style: entry("", '\u{f033e}'),
    },
    StyleGroup {
        extensions: &[".desktop"],
        style: entry("", '\u{f0614}'),
    },
    StyleGroup {
        extensions: &[".css"],
        style: entry("#563d7c", '\u{e749}'),
    },
    StyleGroup {
        extensions: &[".scss"],
        style: entry("#c6538c", '\u{e603}'),
    },
    StyleGroup {
        extensions: &[".toml", ".iml", ".yml", ".yaml"],
        style: entry("dim white", '\u{e615}'),
    },
];

/// Style for an entry of `kind` whose lowercased extension is `extension`.
pub fn lookup(kind: EntryKind, extension: &str) -> EntryStyle {
    match kind {
        EntryKind::Directory => DIRECTORY,
        EntryKind::Symlink => SYMLINK,
        EntryKind::Junction => JUNCTION,
        EntryKind::RegularFile => GROUPS
            .iter()
            .find(|group| group.extensions.contains(&extension))
            .map(|group| group.style)
            .unwrap_or(FILE),
    }
}

/// Visible text for a name: the icon and a space in front unless icons are off.
pub fn label(name: &str, style: EntryStyle, icons: bool) -> String {
    if icons {
        format!("{} {}", style.icon, name)
    } else {
        name.to_string()
    }
}

/// Applies `style` to `text`.
pub fn paint(text: &str, style: EntryStyle) -> ColoredString {
    let mut painted = ColoredString::from(text);
    for token in style.style.split_whitespace() {
        painted = match token {
            "bold" => painted.bold(),
            "dim" => painted.dimmed(),
            "italic" => painted.italic(),
            "underline" => painted.underline(),
            hex if hex.starts_with('#') => match parse_hex(hex) {
                Some((r, g, b)) => painted.truecolor(r, g, b),
                None => painted,
            },
            name => match name.parse::<Color>() {
                Ok(color) => painted.color(color),
                Err(_) => painted,
            },
        };
    }
    painted
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_match_precedes_extension() {
        assert_eq!(lookup(EntryKind::Directory, ".png"), DIRECTORY);
        assert_eq!(lookup(EntryKind::Symlink, ".rs"), SYMLINK);
    }

    #[test]
    fn test_first_group_wins() {
        // `.ini` appears only in the first text group.
        assert_eq!(lookup(EntryKind::RegularFile, ".ini").style, "#7193FF");
        assert_eq!(lookup(EntryKind::RegularFile, ".rs").icon, '\u{e7a8}');
        assert_eq!(lookup(EntryKind::RegularFile, ".nope"), FILE);
    }

    #[test]
    fn test_label_icons() {
        assert_eq!(label("a.rs", FILE, false), "a.rs");
        assert_eq!(label("a.rs", FILE, true), "\u{f15b} a.rs");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#7193FF"), Some((0x71, 0x93, 0xFF)));
        assert_eq!(parse_hex("#zz0000"), None);
        assert_eq!(parse_hex("#123"), None);
    }
}
