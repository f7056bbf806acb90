use crate::classify::{EntryClassifier, Platform};
use crate::error::CanopyError;
use crate::metadata::{ownership, permission_string, render_time, resolve_group, resolve_owner};
use crate::options::ScanFilter;
use crate::types::{EntryKind, EntryRecord};
use ignore::WalkBuilder;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
#[cfg(feature = "logging")]
use tracing;
struct Walker {
    inner: ignore::Walk,
    root: PathBuf,
}
impl Walker {
    fn new(dir: &Path, filter: &ScanFilter) -> Result<Self, CanopyError> {
        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(false)
            .git_ignore(filter.respect_gitignore)
            .git_exclude(filter.respect_gitignore)
            .git_global(filter.respect_gitignore)
            .parents(filter.respect_gitignore)
            .require_git(false)
            .hidden(false)
            .max_depth(Some(1))
            .follow_links(false);
        if !filter.ignore_patterns.is_empty() {
            let mut glob_builder = globset::GlobSetBuilder::new();
            for pattern in &filter.ignore_patterns {
                let glob = globset::Glob::new(pattern).map_err(|e| CanopyError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                glob_builder.add(glob);
            }
            let matcher = glob_builder
                .build()
                .map_err(|e| CanopyError::Walk(format!("Failed to build glob set: {}", e)))?;
            // Patterns see paths relative to the listed directory, never its ancestors.
            let base = dir.to_path_buf();
            builder.filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let relative = entry.path().strip_prefix(&base).unwrap_or(entry.path());
                !(matcher.is_match(relative) || matcher.is_match(entry.file_name()))
            });
        }
        Ok(Self {
            inner: builder.build(),
            root: dir.to_path_buf(),
        })
    }
    /// Immediate children of the root, unsorted.
    fn collect_children(self) -> Result<Vec<Candidate>, CanopyError> {
        let Walker { inner, root } = self;
        let mut children = Vec::new();
        for result in inner {
            match result {
                Ok(entry) if entry.depth() == 0 => {}
                Ok(entry) => children.push(Candidate {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: entry.into_path(),
                }),
                Err(e) if e.depth().unwrap_or(0) == 0 => return Err(root_error(&root, e)),
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("skipping unreadable entry in {}: {}", root.display(), _e);
                }
            }
        }
        Ok(children)
    }
}
fn root_error(root: &Path, err: ignore::Error) -> CanopyError {
    let path = root.to_path_buf();
    match err.io_error().map(|io| io.kind()) {
        Some(ErrorKind::NotFound) => CanopyError::DirectoryNotFound { path },
        Some(ErrorKind::PermissionDenied) => CanopyError::PermissionDenied { path },
        _ => CanopyError::Walk(err.to_string()),
    }
}
/// A listed child that has not been filtered or classified yet.
#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    path: PathBuf,
}
/// Produces filtered, sorted and classified listings of single directories.
///
/// The reference time for relative timestamps is captured once, when the
/// scanner is created, so every record of a recursive walk shares it.
#[derive(Debug, Clone)]
pub struct EntryScanner {
    filter: ScanFilter,
    classifier: EntryClassifier,
    now: SystemTime,
}
impl EntryScanner {
    pub fn new(filter: ScanFilter) -> Self {
        Self::with_platform(filter, Platform::current())
    }
    /// A scanner whose junction handling follows `platform` instead of the host.
    pub fn with_platform(filter: ScanFilter, platform: Platform) -> Self {
        let classifier = EntryClassifier::new(platform, filter.detection_order);
        Self {
            filter,
            classifier,
            now: SystemTime::now(),
        }
    }
    /// Replaces the captured reference time.
    pub fn reference_time(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }
    pub fn now(&self) -> SystemTime {
        self.now
    }
    pub fn filter(&self) -> &ScanFilter {
        &self.filter
    }
    pub fn classifier(&self) -> &EntryClassifier {
        &self.classifier
    }
    /// Lists the immediate children of `dir`.
    ///
    /// Children are enumerated and sorted up front; filtering, classification
    /// and metadata reads happen as the returned iterator is advanced.
    ///
    /// # Errors
    ///
    /// [`CanopyError::DirectoryNotFound`], [`CanopyError::PermissionDenied`]
    /// or [`CanopyError::NotADirectory`] when `dir` itself cannot be listed.
    pub fn scan(&self, dir: impl AsRef<Path>) -> Result<Scan<'_>, CanopyError> {
        let dir = dir.as_ref();
        #[cfg(feature = "logging")]
        tracing::debug!("scanning {}", dir.display());
        let candidates = self.enumerate(dir)?;
        Ok(Scan {
            scanner: self,
            directory: dir.to_path_buf(),
            pending: candidates.into_iter(),
            skipped: 0,
        })
    }
    /// Like [`scan`](Self::scan) but materializes the whole level.
    ///
    /// With the `parallel` feature the per-entry work runs on the rayon pool;
    /// the output order is the same either way.
    pub fn scan_collect(&self, dir: impl AsRef<Path>) -> Result<Vec<EntryRecord>, CanopyError> {
        #[cfg(not(feature = "parallel"))]
        let records = self.scan(dir)?.collect();
        #[cfg(feature = "parallel")]
        let records = self.scan_parallel(dir.as_ref())?;
        Ok(records)
    }
    #[cfg(feature = "parallel")]
    fn scan_parallel(&self, dir: &Path) -> Result<Vec<EntryRecord>, CanopyError> {
        let candidates = self.enumerate(dir)?;
        let visited: Vec<_> = candidates
            .into_par_iter()
            .map(|candidate| self.visit(candidate))
            .collect();
        Ok(visited
            .into_iter()
            .filter_map(|result| match result {
                Ok(record) => record,
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("skipping entry: {}", _e);
                    None
                }
            })
            .collect())
    }
    fn enumerate(&self, dir: &Path) -> Result<Vec<Candidate>, CanopyError> {
        let metadata = fs::metadata(dir).map_err(|e| CanopyError::io(dir, e))?;
        if !metadata.is_dir() {
            return Err(CanopyError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        fs::read_dir(dir).map_err(|e| CanopyError::io(dir, e))?;
        let mut candidates = Walker::new(dir, &self.filter)?.collect_children()?;
        candidates.sort_by_cached_key(|c| (c.name.to_lowercase(), c.name.clone()));
        if self.filter.reverse_sort {
            candidates.reverse();
        }
        Ok(candidates)
    }
    /// Whether listing `dir` with this scanner's filter would show anything.
    fn has_visible_children(&self, dir: &Path) -> bool {
        Walker::new(dir, &self.filter)
            .and_then(Walker::collect_children)
            .map(|children| {
                children
                    .iter()
                    .any(|child| self.filter.show_hidden || !child.name.starts_with('.'))
            })
            .unwrap_or(false)
    }
    /// Filters one candidate and builds its record if it survives.
    fn visit(&self, candidate: Candidate) -> Result<Option<EntryRecord>, CanopyError> {
        let is_hidden = candidate.name.starts_with('.');
        if is_hidden && !self.filter.show_hidden {
            return Ok(None);
        }
        let metadata = fs::symlink_metadata(&candidate.path).map_err(|source| {
            CanopyError::MetadataUnavailable {
                path: candidate.path.clone(),
                source,
            }
        })?;
        let kind = self.classifier.kind_of(&candidate.path, &metadata);
        if self.filter.only_kind.is_some_and(|only| only != kind) {
            return Ok(None);
        }
        self.enrich(candidate, kind, &metadata, is_hidden).map(Some)
    }
    fn enrich(
        &self,
        candidate: Candidate,
        kind: EntryKind,
        metadata: &Metadata,
        is_hidden: bool,
    ) -> Result<EntryRecord, CanopyError> {
        let Candidate { name, path } = candidate;
        let modified_at = metadata
            .modified()
            .map_err(|source| CanopyError::MetadataUnavailable {
                path: path.clone(),
                source,
            })?;
        let accessed_at = metadata.accessed().ok();
        let content_type = match kind {
            EntryKind::RegularFile => Some(self.classifier.content_type(&path, metadata)),
            _ => None,
        };
        let empty_dir = kind.is_dir() && !self.has_visible_children(&path);
        let (uid, gid) = ownership(metadata);
        let format = self.filter.time_format;
        Ok(EntryRecord {
            modified: render_time(modified_at, self.now, format),
            accessed: accessed_at
                .map(|at| render_time(at, self.now, format))
                .unwrap_or_else(|| "-".to_string()),
            name,
            full_path: path,
            kind,
            content_type,
            size_bytes: metadata.len(),
            modified_at,
            accessed_at,
            owner: resolve_owner(uid),
            group: resolve_group(gid),
            permissions: permission_string(metadata),
            is_hidden,
            empty_dir,
        })
    }
}
/// Lazy listing of one directory, in sorted order.
///
/// Entries whose metadata cannot be read are skipped with a warning; the
/// number skipped is available from [`Scan::skipped`].
pub struct Scan<'a> {
    scanner: &'a EntryScanner,
    directory: PathBuf,
    pending: std::vec::IntoIter<Candidate>,
    skipped: usize,
}
impl Scan<'_> {
    pub fn directory(&self) -> &Path {
        &self.directory
    }
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
impl Iterator for Scan<'_> {
    type Item = EntryRecord;
    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.pending.by_ref() {
            match self.scanner.visit(candidate) {
                Ok(Some(record)) => return Some(record),
                Ok(None) => {}
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("skipping entry: {}", _e);
                    self.skipped += 1;
                }
            }
        }
        None
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ScanFilterBuilder;

    #[test]
    fn test_vanished_entry_is_metadata_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = EntryScanner::new(ScanFilterBuilder::new().build());
        let candidate = Candidate {
            name: "gone".to_string(),
            path: dir.path().join("gone"),
        };
        let err = scanner.visit(candidate).unwrap_err();
        assert!(matches!(err, CanopyError::MetadataUnavailable { .. }));
    }

    #[test]
    fn test_patterns_ignore_ancestor_names() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("build-area");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("keep.txt"), "k").unwrap();
        let filter = ScanFilterBuilder::new()
            .ignore_patterns(vec!["*build*".to_string()])
            .build();
        let children = Walker::new(&root, &filter)
            .and_then(Walker::collect_children)
            .unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "keep.txt");
    }
}
