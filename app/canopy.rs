//! Command-line interface for canopy.
//!
//! Lists a directory as a table, or walks it as a tree, with styled names,
//! sizes, timestamps and optional ownership columns.

use canopy::output::{self, BorderStyle, Listing, RenderOptions};
use canopy::{
    CanopyError, DetectionOrder, EntryKind, EntryScanner, ScanFilter, ScanFilterBuilder,
    ScanSummary, TimeFormat, build_tree,
};
use clap::{ArgGroup, Parser, ValueEnum};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::SystemTime;

/// canopy: a humane directory listing
#[derive(Parser)]
#[command(name = "canopy", version, about, long_about = None)]
#[command(group(ArgGroup::new("only").args(["files", "directories", "symlinks", "junctions"])))]
struct Cli {
    /// Directory to list (default current dir)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show the hierarchy as a tree
    #[arg(short, long)]
    tree: bool,

    /// Show hidden entries
    #[arg(short, long)]
    all: bool,

    /// Show files only
    #[arg(short, long)]
    files: bool,

    /// Show directories only
    #[arg(short, long)]
    directories: bool,

    /// Show symlinks only
    #[arg(short, long)]
    symlinks: bool,

    /// Show junctions only (Windows)
    #[arg(short, long)]
    junctions: bool,

    /// Reverse the sort order
    #[arg(short, long)]
    reverse: bool,

    /// Add owner, group and permission columns
    #[arg(short = 'S', long)]
    stats: bool,

    /// Print a summary and progress information
    #[arg(short, long)]
    verbose: bool,

    /// Disable icons in output
    #[arg(short = 'N', long)]
    no_icons: bool,

    /// Timestamp format
    #[arg(short = 'D', long, value_enum, default_value_t = DtFormat::Relative)]
    dt_format: DtFormat,

    /// Table border style
    #[arg(short = 'T', long, value_enum, default_value_t = TableStyle::Rounded)]
    table_style: TableStyle,

    /// Skip entries ignored by .gitignore files
    #[arg(short, long)]
    gitignore: bool,

    /// Glob patterns to exclude (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Prefer extension lookup over content sniffing
    #[arg(long)]
    extension_first: bool,

    /// Emit JSON instead of a table or tree
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DtFormat {
    Relative,
    Locale,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableStyle {
    Ascii,
    Rounded,
    Square,
    Heavy,
    Double,
    Simple,
    Minimal,
}

impl From<TableStyle> for BorderStyle {
    fn from(style: TableStyle) -> Self {
        match style {
            TableStyle::Ascii => BorderStyle::Ascii,
            TableStyle::Rounded => BorderStyle::Rounded,
            TableStyle::Square => BorderStyle::Square,
            TableStyle::Heavy => BorderStyle::Heavy,
            TableStyle::Double => BorderStyle::Double,
            TableStyle::Simple => BorderStyle::Simple,
            TableStyle::Minimal => BorderStyle::Minimal,
        }
    }
}

impl Cli {
    fn only_kind(&self) -> Option<EntryKind> {
        if self.files {
            Some(EntryKind::RegularFile)
        } else if self.directories {
            Some(EntryKind::Directory)
        } else if self.symlinks {
            Some(EntryKind::Symlink)
        } else if self.junctions {
            Some(EntryKind::Junction)
        } else {
            None
        }
    }

    fn filter(&self) -> ScanFilter {
        ScanFilterBuilder::new()
            .show_hidden(self.all)
            .only_kind(self.only_kind())
            .reverse_sort(self.reverse)
            .time_format(match self.dt_format {
                DtFormat::Relative => TimeFormat::Relative,
                DtFormat::Locale => TimeFormat::Absolute,
            })
            .detection_order(if self.extension_first {
                DetectionOrder::ExtensionFirst
            } else {
                DetectionOrder::SniffFirst
            })
            .respect_gitignore(self.gitignore)
            .ignore_patterns(self.ignore_patterns.clone())
            .build()
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            border: self.table_style.into(),
            icons: !self.no_icons,
            color: !self.json && std::io::stdout().is_terminal(),
            stats: self.stats,
        }
    }
}

#[cfg(feature = "logging")]
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

fn report_summary(summary: &ScanSummary, started: SystemTime) {
    let elapsed = started.elapsed().unwrap_or_default();
    let message = format!("scanned {} (in {:.2?})", summary, elapsed);
    #[cfg(feature = "logging")]
    tracing::info!("{}", message);
    #[cfg(not(feature = "logging"))]
    eprintln!("canopy: {}", message);
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

fn main() {
    let cli = Cli::parse();
    #[cfg(feature = "logging")]
    init_logging(cli.verbose);

    if is_empty_dir(&cli.path) {
        #[cfg(feature = "logging")]
        tracing::warn!("directory is empty: {}", cli.path.display());
        #[cfg(not(feature = "logging"))]
        eprintln!("canopy: directory is empty: {}", cli.path.display());
        return;
    }

    let scanner = EntryScanner::new(cli.filter());
    let options = cli.render_options();
    let result = if cli.tree {
        run_tree(&scanner, &cli, &options)
    } else {
        run_table(&scanner, &cli, &options)
    };
    if let Err(e) = result {
        eprintln!("canopy: {}", e);
        exit(e.exit_code());
    }
}

fn run_tree(scanner: &EntryScanner, cli: &Cli, options: &RenderOptions) -> Result<(), CanopyError> {
    let tree = build_tree(scanner, &cli.path)?;
    if cli.json {
        println!("{}", output::format_json(&tree, true)?);
    } else {
        print!("{}", output::render_tree(&tree, options));
    }
    if cli.verbose {
        report_summary(&tree.summary, scanner.now());
    }
    Ok(())
}

fn run_table(scanner: &EntryScanner, cli: &Cli, options: &RenderOptions) -> Result<(), CanopyError> {
    let records = scanner.scan_collect(&cli.path)?;
    let summary: ScanSummary = records.iter().collect();
    if cli.json {
        let listing = Listing {
            directory: &cli.path,
            entries: &records,
            summary,
        };
        println!("{}", output::format_json(&listing, true)?);
    } else {
        print!("{}", output::render_table(&records, options));
    }
    if cli.verbose {
        report_summary(&summary, scanner.now());
    }
    Ok(())
}
