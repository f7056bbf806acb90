use crate::types::EntryKind;
use serde::{Deserialize, Serialize};
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// The locale's date-time representation.
    Absolute,
    /// Offset from the scan's reference time, e.g. `3 hours ago`.
    #[default]
    Relative,
}
/// Which detector runs first for non-empty regular files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionOrder {
    #[default]
    SniffFirst,
    ExtensionFirst,
}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFilter {
    pub show_hidden: bool,
    pub only_kind: Option<EntryKind>,
    pub reverse_sort: bool,
    pub time_format: TimeFormat,
    pub detection_order: DetectionOrder,
    pub respect_gitignore: bool,
    pub ignore_patterns: Vec<String>,
}
#[derive(Debug, Default)]
pub struct ScanFilterBuilder {
    filter: ScanFilter,
}
impl ScanFilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn show_hidden(mut self, yes: bool) -> Self {
        self.filter.show_hidden = yes;
        self
    }
    pub fn only_kind(mut self, kind: Option<EntryKind>) -> Self {
        self.filter.only_kind = kind;
        self
    }
    pub fn reverse_sort(mut self, yes: bool) -> Self {
        self.filter.reverse_sort = yes;
        self
    }
    pub fn time_format(mut self, format: TimeFormat) -> Self {
        self.filter.time_format = format;
        self
    }
    pub fn detection_order(mut self, order: DetectionOrder) -> Self {
        self.filter.detection_order = order;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.filter.respect_gitignore = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.filter.ignore_patterns = patterns;
        self
    }
    pub fn build(self) -> ScanFilter {
        self.filter
    }
}
