//! Display helpers for entry metadata: ownership, mode strings, timestamps
//! and sizes.

use crate::options::TimeFormat;
use chrono::{DateTime, Local};
use std::fs::Metadata;
use std::time::{Duration, SystemTime};

/// Name of the user owning `uid`, or the decimal id when it has no name.
///
/// Unknown ids are common in containers and on shared volumes; this never fails.
#[cfg(unix)]
pub fn resolve_owner(uid: u32) -> String {
    users::get_user_by_uid(uid)
        .map(|user| user.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| uid.to_string())
}

#[cfg(not(unix))]
pub fn resolve_owner(uid: u32) -> String {
    uid.to_string()
}

/// Name of the group `gid`, or the decimal id when it has no name.
#[cfg(unix)]
pub fn resolve_group(gid: u32) -> String {
    users::get_group_by_gid(gid)
        .map(|group| group.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| gid.to_string())
}

#[cfg(not(unix))]
pub fn resolve_group(gid: u32) -> String {
    gid.to_string()
}

/// Numeric owner and group ids of an entry. Zero where the platform has none.
pub(crate) fn ownership(metadata: &Metadata) -> (u32, u32) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        (metadata.uid(), metadata.gid())
    }
    #[cfg(not(unix))]
    {
        let _ = metadata;
        (0, 0)
    }
}

/// Renders a raw `st_mode` the way `ls -l` does, e.g. `drwxr-xr-x`.
pub fn filemode(mode: u32) -> String {
    let file_type = match mode & 0o170000 {
        0o040000 => 'd',
        0o120000 => 'l',
        0o010000 => 'p',
        0o140000 => 's',
        0o060000 => 'b',
        0o020000 => 'c',
        _ => '-',
    };
    let mut out = String::with_capacity(10);
    out.push(file_type);
    // (read bit, write bit, exec bit, special bit, special char)
    let triads = [
        (0o400, 0o200, 0o100, 0o4000, 's'),
        (0o040, 0o020, 0o010, 0o2000, 's'),
        (0o004, 0o002, 0o001, 0o1000, 't'),
    ];
    for (read, write, exec, special, special_char) in triads {
        out.push(if mode & read != 0 { 'r' } else { '-' });
        out.push(if mode & write != 0 { 'w' } else { '-' });
        out.push(match (mode & exec != 0, mode & special != 0) {
            (true, true) => special_char,
            (false, true) => special_char.to_ascii_uppercase(),
            (true, false) => 'x',
            (false, false) => '-',
        });
    }
    out
}

/// Mode string for an entry's `lstat` metadata.
pub(crate) fn permission_string(metadata: &Metadata) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        filemode(metadata.permissions().mode())
    }
    #[cfg(not(unix))]
    {
        let file_type = metadata.file_type();
        let type_bits = if file_type.is_dir() {
            0o040000
        } else if file_type.is_symlink() {
            0o120000
        } else {
            0o100000
        };
        let access = if metadata.permissions().readonly() {
            0o444
        } else {
            0o666
        };
        filemode(type_bits | access)
    }
}

/// Approximate human-readable offset between `then` and `now`.
pub fn relative_time(then: SystemTime, now: SystemTime) -> String {
    match now.duration_since(then) {
        Ok(elapsed) => {
            let phrase = humanize_delta(elapsed);
            if phrase == "now" {
                phrase
            } else {
                format!("{phrase} ago")
            }
        }
        Err(ahead) => {
            let phrase = humanize_delta(ahead.duration());
            if phrase == "now" {
                phrase
            } else {
                format!("{phrase} from now")
            }
        }
    }
}

fn humanize_delta(delta: Duration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let secs = delta.as_secs();
    match secs {
        0 => "now".to_string(),
        1 => "a second".to_string(),
        s if s < MINUTE => format!("{s} seconds"),
        s if s < 2 * MINUTE => "a minute".to_string(),
        s if s < HOUR => format!("{} minutes", s / MINUTE),
        s if s < 2 * HOUR => "an hour".to_string(),
        s if s < DAY => format!("{} hours", s / HOUR),
        s if s < 2 * DAY => "a day".to_string(),
        s if s < MONTH => format!("{} days", s / DAY),
        s if s < 2 * MONTH => "a month".to_string(),
        s if s < YEAR => format!("{} months", s / MONTH),
        s if s < 2 * YEAR => "a year".to_string(),
        s => format!("{} years", s / YEAR),
    }
}

/// Timestamp in the locale's date and time representation.
pub fn absolute_time(at: SystemTime) -> String {
    let local: DateTime<Local> = at.into();
    local.format("%c").to_string()
}

pub fn render_time(at: SystemTime, now: SystemTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::Relative => relative_time(at, now),
        TimeFormat::Absolute => absolute_time(at),
    }
}

/// Binary-prefixed size, e.g. `1.50 KiB`.
pub fn human_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filemode() {
        assert_eq!(filemode(0o040755), "drwxr-xr-x");
        assert_eq!(filemode(0o100644), "-rw-r--r--");
        assert_eq!(filemode(0o120777), "lrwxrwxrwx");
        assert_eq!(filemode(0o104755), "-rwsr-xr-x");
        assert_eq!(filemode(0o041777), "drwxrwxrwt");
        assert_eq!(filemode(0o102644), "-rw-r-Sr--");
    }

    #[test]
    fn test_relative_time() {
        let now = SystemTime::now();
        assert_eq!(relative_time(now, now), "now");
        assert_eq!(relative_time(now - Duration::from_secs(30), now), "30 seconds ago");
        assert_eq!(relative_time(now - Duration::from_secs(90), now), "a minute ago");
        assert_eq!(relative_time(now - Duration::from_secs(7200), now), "2 hours ago");
        assert_eq!(relative_time(now - Duration::from_secs(172800), now), "2 days ago");
        assert_eq!(relative_time(now + Duration::from_secs(3600), now), "an hour from now");
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert!(human_size(1536).ends_with("KiB"));
    }

    #[test]
    fn test_unresolvable_ids_fall_back_to_decimal() {
        assert_eq!(resolve_owner(3_999_999_999), "3999999999");
        assert_eq!(resolve_group(3_999_999_999), "3999999999");
    }
}
