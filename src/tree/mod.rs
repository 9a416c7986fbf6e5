//! Tree generation: configuration, glyph styles, and the public façade.

mod filter;
mod inspect;
mod label;
mod walk;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::pattern::{self, InvalidPattern, NameMatcher, PatternSpec};

pub use inspect::{inspect_path, FileIdentity, PathDescriptor};
pub use walk::SubtreeStats;

/// Tree-drawing prefix strings for one rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeGlyphs {
    /// Connector for non-last items at the current level.
    pub middle: &'static str,
    /// Connector for the last item at the current level.
    pub last: &'static str,
    /// Continuation column when the parent was not last.
    pub parent_middle: &'static str,
    /// Continuation column when the parent was last.
    pub parent_last: &'static str,
}

/// Connector character style: Unicode box drawing or ASCII-safe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    #[default]
    Utf8,
    Ascii,
}

const UTF8_GLYPHS: TreeGlyphs = TreeGlyphs {
    middle: "\u{251c}\u{2500}\u{2500} ",      // "├── "
    last: "\u{2514}\u{2500}\u{2500} ",        // "└── "
    parent_middle: "\u{2502}   ",             // "│   "
    parent_last: "    ",
};

const ASCII_GLYPHS: TreeGlyphs = TreeGlyphs {
    middle: "+-- ",
    last: "`-- ",
    parent_middle: "|   ",
    parent_last: "    ",
};

impl TreeStyle {
    pub fn glyphs(self) -> &'static TreeGlyphs {
        match self {
            TreeStyle::Utf8 => &UTF8_GLYPHS,
            TreeStyle::Ascii => &ASCII_GLYPHS,
        }
    }
}

/// User-facing options for one tree generation call.
///
/// Pattern fields left as `None` fall back to their defaults: the general
/// include matches everything, the general exclude matches nothing, and the
/// file/folder-specific patterns defer to the corresponding general one.
/// The `show_file_*` and `show_folder_total_size` overrides likewise defer
/// to `show_sizes`/`show_dates` when unset.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub include: Option<PatternSpec>,
    pub include_files: Option<PatternSpec>,
    pub include_folders: Option<PatternSpec>,
    pub exclude: Option<PatternSpec>,
    pub exclude_files: Option<PatternSpec>,
    pub exclude_folders: Option<PatternSpec>,
    pub show_sizes: bool,
    pub show_dates: bool,
    pub show_file_sizes: Option<bool>,
    pub show_file_dates: Option<bool>,
    pub show_folder_total_size: Option<bool>,
    pub show_folder_file_count: bool,
    pub show_folder_total_file_count: bool,
    pub show_folder_subfolder_count: bool,
    pub follow_symlinks: bool,
    pub mark_symlinks: bool,
    pub mark_circular: bool,
    pub mark_errors: bool,
    pub hide_symlinks: bool,
    pub hide_circular_refs: bool,
    pub use_ascii: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            include: None,
            include_files: None,
            include_folders: None,
            exclude: None,
            exclude_files: None,
            exclude_folders: None,
            show_sizes: true,
            show_dates: false,
            show_file_sizes: None,
            show_file_dates: None,
            show_folder_total_size: None,
            show_folder_file_count: true,
            show_folder_total_file_count: false,
            show_folder_subfolder_count: true,
            follow_symlinks: true,
            mark_symlinks: true,
            mark_circular: true,
            mark_errors: true,
            hide_symlinks: false,
            hide_circular_refs: false,
            use_ascii: false,
        }
    }
}

/// Resolved configuration, read-only for the whole traversal.
///
/// The specific matchers are `None` when no override was supplied, in
/// which case the evaluator falls back to the general matcher.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub include_all: NameMatcher,
    pub exclude_all: NameMatcher,
    pub include_files: Option<NameMatcher>,
    pub exclude_files: Option<NameMatcher>,
    pub include_folders: Option<NameMatcher>,
    pub exclude_folders: Option<NameMatcher>,
    pub show_file_sizes: bool,
    pub show_file_dates: bool,
    pub show_folder_sizes: bool,
    pub show_folder_dates: bool,
    pub show_folder_file_count: bool,
    pub show_folder_total_file_count: bool,
    pub show_folder_subfolder_count: bool,
    pub follow_symlinks: bool,
    pub mark_symlinks: bool,
    pub mark_circular: bool,
    pub mark_errors: bool,
    pub hide_symlinks: bool,
    pub hide_circular_refs: bool,
    pub glyphs: &'static TreeGlyphs,
}

impl TreeConfig {
    /// Resolve user options into a traversal configuration, compiling all
    /// six matchers. Fails only on invalid pattern syntax.
    pub fn from_options(opts: &TreeOptions) -> Result<Self, InvalidPattern> {
        let include_all = match &opts.include {
            Some(spec) => pattern::compile(Some(spec))?,
            None => NameMatcher::match_everything(),
        };
        let exclude_all = pattern::compile(opts.exclude.as_ref())?;

        let style = if opts.use_ascii {
            TreeStyle::Ascii
        } else {
            TreeStyle::Utf8
        };

        Ok(TreeConfig {
            include_all,
            exclude_all,
            include_files: compile_override(opts.include_files.as_ref())?,
            exclude_files: compile_override(opts.exclude_files.as_ref())?,
            include_folders: compile_override(opts.include_folders.as_ref())?,
            exclude_folders: compile_override(opts.exclude_folders.as_ref())?,
            show_file_sizes: opts.show_file_sizes.unwrap_or(opts.show_sizes),
            show_file_dates: opts.show_file_dates.unwrap_or(opts.show_dates),
            show_folder_sizes: opts.show_folder_total_size.unwrap_or(opts.show_sizes),
            // Folder dates have no per-kind override.
            show_folder_dates: opts.show_dates,
            show_folder_file_count: opts.show_folder_file_count,
            show_folder_total_file_count: opts.show_folder_total_file_count,
            show_folder_subfolder_count: opts.show_folder_subfolder_count,
            follow_symlinks: opts.follow_symlinks,
            mark_symlinks: opts.mark_symlinks,
            mark_circular: opts.mark_circular,
            mark_errors: opts.mark_errors,
            hide_symlinks: opts.hide_symlinks,
            hide_circular_refs: opts.hide_circular_refs,
            glyphs: style.glyphs(),
        })
    }
}

fn compile_override(spec: Option<&PatternSpec>) -> Result<Option<NameMatcher>, InvalidPattern> {
    spec.map(|s| pattern::compile(Some(s))).transpose()
}

/// Generate the tree for `root` as a list of output lines.
///
/// Only invalid pattern syntax is a hard failure. An unresolvable root and
/// a filtered-out root each degrade to a single descriptive line, so the
/// caller can always print whatever comes back.
pub fn generate_tree(
    root: impl AsRef<Path>,
    options: &TreeOptions,
) -> Result<Vec<String>, InvalidPattern> {
    let config = TreeConfig::from_options(options)?;
    let root = root.as_ref();

    let resolved = match root.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(root = %root.display(), error = %e, "root resolution failed");
            return Ok(vec![format!(
                "Error resolving root directory '{}': {}",
                root.display(),
                e
            )]);
        }
    };

    let root_details = inspect_path(&resolved, &config);

    if filter::is_filtered_out(&root_details, &config) {
        let mut name = root_details.name.clone();
        if resolved.is_dir() && !name.ends_with('/') {
            name.push('/');
        }
        return Ok(vec![format!("{name} [FILTERED]")]);
    }

    let (lines, _stats) = walk::generate_recursive(&root_details, "", &config, HashSet::new());
    Ok(lines)
}

/// Generate the tree for `root` and write it to `outfile`, newline-joined
/// with one trailing newline, creating parent directories as needed.
///
/// Write failures are reported on stderr rather than returned; only
/// pattern compilation can fail.
pub fn write_tree(
    outfile: impl AsRef<Path>,
    root: impl AsRef<Path>,
    options: &TreeOptions,
) -> Result<(), InvalidPattern> {
    let lines = generate_tree(root, options)?;
    let outfile = outfile.as_ref();
    if let Err(e) = persist_lines(outfile, &lines) {
        eprintln!("dirtree: could not write {}: {}", outfile.display(), e);
    }
    Ok(())
}

fn persist_lines(outfile: &Path, lines: &[String]) -> io::Result<()> {
    if let Some(parent) = outfile.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(outfile, lines.join("\n") + "\n")
}
