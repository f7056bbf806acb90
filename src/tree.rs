//! Recursive directory tree built from per-directory scans.

use crate::engine::EntryScanner;
use crate::error::CanopyError;
use crate::types::{EntryRecord, ScanSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

/// One entry of the tree together with its listed children.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub record: EntryRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    /// The directory could not be listed; `children` is empty.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub inaccessible: bool,
}

/// A full depth-first walk below `root`.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryTree {
    pub root: PathBuf,
    pub nodes: Vec<TreeNode>,
    /// Counts over every node in the tree.
    pub summary: ScanSummary,
}

/// Walks `root` depth first, listing each directory with `scanner`.
///
/// Only real directories are descended into; symlinks and junctions are
/// leaves. A subdirectory that cannot be listed becomes an inaccessible node
/// and its siblings are still walked.
///
/// # Errors
///
/// Fails only when `root` itself cannot be listed.
pub fn build_tree(scanner: &EntryScanner, root: impl AsRef<Path>) -> Result<DirectoryTree, CanopyError> {
    let root = root.as_ref();
    let (nodes, summary) = build_level(scanner, root)?;
    Ok(DirectoryTree {
        root: root.to_path_buf(),
        nodes,
        summary,
    })
}

fn build_level(
    scanner: &EntryScanner,
    dir: &Path,
) -> Result<(Vec<TreeNode>, ScanSummary), CanopyError> {
    let records = scanner.scan_collect(dir)?;
    let mut summary = ScanSummary::default();
    let mut nodes = Vec::with_capacity(records.len());
    for record in records {
        summary.tally(&record);
        let mut node = TreeNode {
            record,
            children: Vec::new(),
            inaccessible: false,
        };
        if node.record.kind.is_dir() {
            match build_level(scanner, &node.record.full_path) {
                Ok((children, below)) => {
                    node.children = children;
                    summary.merge(below);
                }
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("{}", _e);
                    node.inaccessible = true;
                }
            }
        }
        nodes.push(node);
    }
    Ok((nodes, summary))
}

impl DirectoryTree {
    /// Every record in pre-order.
    pub fn records(&self) -> Vec<&EntryRecord> {
        fn walk<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a EntryRecord>) {
            for node in nodes {
                out.push(&node.record);
                walk(&node.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }
}
