use clap::Parser;
use std::path::PathBuf;

use crate::pattern::PatternSpec;
use crate::tree::TreeOptions;

#[derive(Parser, Debug, Clone)]
#[command(name = "dirtree", version, about = "Directory tree generator")]
pub struct Args {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Write the tree to a file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Regex every entry name must match (repeatable)
    #[arg(long = "include", action = clap::ArgAction::Append)]
    pub include: Vec<String>,

    /// Regex file names must match; overrides --include for files (repeatable)
    #[arg(long = "include-files", action = clap::ArgAction::Append)]
    pub include_files: Vec<String>,

    /// Regex folder names must match; overrides --include for folders (repeatable)
    #[arg(long = "include-folders", action = clap::ArgAction::Append)]
    pub include_folders: Vec<String>,

    /// Regex for entry names to exclude; wins over includes (repeatable)
    #[arg(short = 'I', long = "exclude", action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Regex for file names to exclude; overrides --exclude for files (repeatable)
    #[arg(long = "exclude-files", action = clap::ArgAction::Append)]
    pub exclude_files: Vec<String>,

    /// Regex for folder names to exclude; overrides --exclude for folders (repeatable)
    #[arg(long = "exclude-folders", action = clap::ArgAction::Append)]
    pub exclude_folders: Vec<String>,

    /// Hide sizes (shown by default)
    #[arg(long = "no-sizes")]
    pub no_sizes: bool,

    /// Show modification dates
    #[arg(short = 'd', long = "dates")]
    pub dates: bool,

    /// Hide per-folder immediate file counts
    #[arg(long = "no-file-count")]
    pub no_file_count: bool,

    /// Hide per-folder immediate subfolder counts
    #[arg(long = "no-subfolder-count")]
    pub no_subfolder_count: bool,

    /// Show per-folder recursive file counts
    #[arg(long = "total-file-count")]
    pub total_file_count: bool,

    /// Do not traverse into symlinked directories
    #[arg(short = 'P', long = "no-follow")]
    pub no_follow: bool,

    /// Omit all symbolic links from the tree
    #[arg(long = "hide-symlinks")]
    pub hide_symlinks: bool,

    /// Omit circular-reference targets instead of marking them [CIRCULAR]
    #[arg(long = "hide-circular")]
    pub hide_circular: bool,

    /// Do not annotate symlinks with their target
    #[arg(long = "no-mark-symlinks")]
    pub no_mark_symlinks: bool,

    /// Do not annotate circular references
    #[arg(long = "no-mark-circular")]
    pub no_mark_circular: bool,

    /// Do not annotate access errors
    #[arg(long = "no-mark-errors")]
    pub no_mark_errors: bool,

    /// Use ASCII tree-drawing characters instead of Unicode
    #[arg(long = "ascii")]
    pub ascii: bool,

    /// Verbose diagnostics on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Map CLI flags onto library options.
    pub fn to_options(&self) -> TreeOptions {
        TreeOptions {
            include: patterns_arg(&self.include),
            include_files: patterns_arg(&self.include_files),
            include_folders: patterns_arg(&self.include_folders),
            exclude: patterns_arg(&self.exclude),
            exclude_files: patterns_arg(&self.exclude_files),
            exclude_folders: patterns_arg(&self.exclude_folders),
            show_sizes: !self.no_sizes,
            show_dates: self.dates,
            show_folder_file_count: !self.no_file_count,
            show_folder_subfolder_count: !self.no_subfolder_count,
            show_folder_total_file_count: self.total_file_count,
            follow_symlinks: !self.no_follow,
            hide_symlinks: self.hide_symlinks,
            hide_circular_refs: self.hide_circular,
            mark_symlinks: !self.no_mark_symlinks,
            mark_circular: !self.no_mark_circular,
            mark_errors: !self.no_mark_errors,
            use_ascii: self.ascii,
            ..TreeOptions::default()
        }
    }
}

fn patterns_arg(patterns: &[String]) -> Option<PatternSpec> {
    if patterns.is_empty() {
        None
    } else {
        Some(PatternSpec::Any(patterns.to_vec()))
    }
}
