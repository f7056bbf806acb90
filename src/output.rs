//! Output formatting for scan results.
//!
//! Renders a flat listing as a bordered table, a [`DirectoryTree`] with guide
//! lines, or either one as JSON. Names are styled through [`crate::style`].

use crate::metadata::human_size;
use crate::style;
use crate::tree::{DirectoryTree, TreeNode};
use crate::types::{EntryKind, EntryRecord, ScanSummary};
use crate::CanopyError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::style::HorizontalLine;
use tabled::settings::{Alignment, Style};

/// Table border styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderStyle {
    Ascii,
    #[default]
    Rounded,
    Square,
    Heavy,
    Double,
    Simple,
    Minimal,
}

/// Presentation switches shared by table and tree output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub border: BorderStyle,
    pub icons: bool,
    pub color: bool,
    /// Adds owner, group and permission columns to tables.
    pub stats: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            border: BorderStyle::Rounded,
            icons: true,
            color: true,
            stats: false,
        }
    }
}

/// Flat listing of one directory, as emitted in JSON.
#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    pub directory: &'a Path,
    pub entries: &'a [EntryRecord],
    pub summary: ScanSummary,
}

/// Serializes any result to JSON.
pub fn format_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CanopyError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    Ok(json?)
}

// ----------------------- Names -----------------------

fn styled_name(record: &EntryRecord, options: &RenderOptions) -> String {
    let entry_style = style::lookup(record.kind, &record.extension());
    let text = style::label(&record.name, entry_style, options.icons);
    if options.color {
        style::paint(&text, entry_style).to_string()
    } else {
        text
    }
}

fn root_name(root: &Path, options: &RenderOptions) -> String {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let entry_style = style::lookup(EntryKind::Directory, "");
    let text = style::label(&name, entry_style, options.icons);
    if options.color {
        style::paint(&text, entry_style).to_string()
    } else {
        text
    }
}

// ----------------------- Tree -----------------------

/// Renders a tree with `├──` / `└──` guides, one entry per line.
pub fn render_tree(tree: &DirectoryTree, options: &RenderOptions) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&root_name(&tree.root, options));
    out.push('\n');
    render_nodes(&tree.nodes, "", options, &mut out);
    out
}

fn render_nodes(nodes: &[TreeNode], prefix: &str, options: &RenderOptions, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&styled_name(&node.record, options));
        if node.inaccessible {
            out.push_str(" [inaccessible]");
        }
        out.push('\n');
        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_nodes(&node.children, &child_prefix, options, out);
    }
}

// ----------------------- Table -----------------------

/// Right-aligned columns: Size, Accessed and Modified.
const RIGHT_ALIGNED: [usize; 3] = [1, 3, 4];

/// Renders `records` as a table with Path, Size, Type, Accessed and Modified
/// columns, plus Owner, Group and Permissions when `stats` is on.
pub fn render_table(records: &[EntryRecord], options: &RenderOptions) -> String {
    let mut builder = Builder::default();
    let mut header = vec!["Path", "Size", "Type", "Accessed", "Modified"];
    if options.stats {
        header.extend(["Owner", "Group", "Permissions"]);
    }
    builder.push_record(header);
    for record in records {
        let mut cells = vec![
            styled_name(record, options),
            human_size(record.size_bytes),
            record.type_description(),
            record.accessed.clone(),
            record.modified.clone(),
        ];
        if options.stats {
            cells.push(record.owner.clone());
            cells.push(record.group.clone());
            cells.push(record.permissions.clone());
        }
        builder.push_record(cells);
    }

    let mut table = builder.build();
    match options.border {
        BorderStyle::Ascii => table.with(Style::ascii()),
        BorderStyle::Rounded => table.with(Style::rounded()),
        BorderStyle::Square => table.with(Style::sharp()),
        BorderStyle::Heavy => table.with(
            Style::sharp()
                .top('━')
                .bottom('━')
                .left('┃')
                .right('┃')
                .vertical('┃')
                .intersection_top('┳')
                .intersection_bottom('┻')
                .corner_top_left('┏')
                .corner_top_right('┓')
                .corner_bottom_left('┗')
                .corner_bottom_right('┛')
                .horizontals([(1, HorizontalLine::full('━', '╋', '┣', '┫'))]),
        ),
        BorderStyle::Double => table.with(Style::extended()),
        BorderStyle::Simple => table.with(Style::blank()),
        BorderStyle::Minimal => table.with(Style::psql()),
    };
    for column in RIGHT_ALIGNED {
        table.modify(Columns::single(column), Alignment::right());
    }
    let mut out = table.to_string();
    out.push('\n');
    out
}
