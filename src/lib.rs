//! # Canopy
//!
//! `canopy` lists directories for humans. It enumerates the immediate children of a
//! directory, filters and sorts them, classifies each one (directory, symlink, junction
//! or regular file with a sniffed or extension-derived content type) and collects the
//! metadata a listing shows: size, timestamps, owner, group and permissions.
//!
//! The scanner never recurses on its own. Tree views call [`EntryScanner::scan`] again
//! for every subdirectory, which [`build_tree`] does depth first.
//!
//! # Features
//!
//! - `logging` (default): Warnings for skipped entries and debug output via the `tracing` crate.
//! - `parallel`: Classifies the entries of one directory on the Rayon pool in
//!   [`EntryScanner::scan_collect`]. Output order is unchanged.
//!
//! # Example
//!
//! ```no_run
//! use canopy::{EntryScanner, ScanFilterBuilder, ScanSummary, TimeFormat};
//!
//! let filter = ScanFilterBuilder::new()
//!     .show_hidden(false)
//!     .time_format(TimeFormat::Relative)
//!     .build();
//! let scanner = EntryScanner::new(filter);
//!
//! let mut summary = ScanSummary::default();
//! for record in scanner.scan(".").expect("Failed to scan directory") {
//!     summary.tally(&record);
//!     println!("{} ({})", record.name, record.type_description());
//! }
//! println!("{summary}");
//! ```

mod classify;
mod engine;
mod error;
pub mod metadata;
mod options;
pub mod output;
pub mod style;
mod tree;
mod types;

pub use classify::{EntryClassifier, Platform, extension_category, extension_of, sniff_bytes};
pub use engine::{EntryScanner, Scan};
pub use error::CanopyError;
pub use options::{DetectionOrder, ScanFilter, ScanFilterBuilder, TimeFormat};
pub use tree::{DirectoryTree, TreeNode, build_tree};
pub use types::{
    Classification, ContentType, Detection, EntryKind, EntryRecord, KindFlags, ScanSummary,
    classify_counts,
};
