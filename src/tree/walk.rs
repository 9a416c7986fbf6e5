//! The recursive traversal engine.
//!
//! Walks one directory level at a time, sorting children directories-first
//! then case-insensitively, filtering after sorting, and aggregating
//! subtree statistics bottom-up. Circular references are detected through
//! a per-branch set of (device, inode) pairs: each recursive descent gets
//! its own copy, so unrelated branches that reach the same physical
//! directory through independent symlinks are not flagged — only a true
//! ancestor cycle is.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use super::filter::is_filtered_out;
use super::inspect::{inspect_path, FileIdentity, PathDescriptor};
use super::label::build_labels;
use super::{TreeConfig, TreeGlyphs};

/// Aggregate counters for one subtree, folded into the parent's aggregate
/// after the frame that produced them returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubtreeStats {
    /// Total size of all filtered-in files in this subtree.
    pub recursive_size_bytes: u64,
    /// Total number of filtered-in files in this subtree.
    pub recursive_files_count: u64,
    /// Files directly inside this directory.
    pub immediate_files_count: u64,
    /// Subfolders directly inside this directory.
    pub immediate_folders_count: u64,
}

/// Produce the output lines and aggregate statistics for `details` and
/// everything beneath it. The entry's own line always precedes its
/// children's lines.
///
/// `ancestors` holds the identities of every directory on the path from
/// the root to (and including, once inserted) this frame; it is received
/// by value and cloned per child so sibling subtrees cannot see each
/// other's ancestry.
pub(super) fn generate_recursive(
    details: &PathDescriptor,
    current_prefix: &str,
    config: &TreeConfig,
    mut ancestors: HashSet<FileIdentity>,
) -> (Vec<String>, SubtreeStats) {
    let mut recursive_size: u64 = 0;
    let mut recursive_files: u64 = 0;

    // A symlink to a file counts toward stats when it is not dangling and
    // either symlinks are followed or the link itself had a statable size.
    let file_like_for_stats = details.is_file
        || (details.is_symlink
            && !details.is_dir
            && !details.is_dangling_symlink
            && (config.follow_symlinks || details.size_bytes.is_some()));

    if file_like_for_stats {
        if let Some(size) = details.size_bytes {
            recursive_size = size;
            recursive_files = 1;
        }
    }

    let mut immediate_files: u64 = 0;
    let mut immediate_folders: u64 = 0;
    let mut is_circular_target = false;

    let mut entry_line = format!("{}{}", current_prefix, details.name);
    let mut children_lines: Vec<String> = Vec::new();

    if details.is_dir {
        entry_line.push('/');

        match details.identity {
            Some(id) if ancestors.contains(&id) => {
                is_circular_target = true;
                if config.hide_circular_refs {
                    return (Vec::new(), SubtreeStats::default());
                }
            }
            Some(id) => {
                ancestors.insert(id);
            }
            None => {}
        }

        let (child_paths, listing_error) = list_children(details);

        if let Some(err) = listing_error.filter(|_| config.mark_errors) {
            // Synthetic child line for the unreadable listing, indented as
            // the sole child of the current entry.
            let parent_segment = strip_connector(current_prefix, config.glyphs);
            children_lines.push(format!(
                "{}{}{}[ERROR listing contents: {}]",
                parent_segment, config.glyphs.parent_last, config.glyphs.last, err
            ));
        } else {
            let mut child_details: Vec<PathDescriptor> = child_paths
                .iter()
                .map(|p| inspect_path(p, config))
                .collect();
            // Directories first, then case-insensitive name order.
            child_details.sort_by(|a, b| {
                b.is_dir
                    .cmp(&a.is_dir)
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            });
            let survivors: Vec<PathDescriptor> = child_details
                .into_iter()
                .filter(|d| !is_filtered_out(d, config))
                .collect();

            let child_count = survivors.len();
            for (i, child) in survivors.iter().enumerate() {
                let is_last_child = i == child_count - 1;

                let parent_segment = strip_connector(current_prefix, config.glyphs);
                let indent = if is_last_child {
                    config.glyphs.parent_last
                } else {
                    config.glyphs.parent_middle
                };
                let connector = if is_last_child {
                    config.glyphs.last
                } else {
                    config.glyphs.middle
                };
                let child_prefix = format!("{parent_segment}{indent}{connector}");

                if child.is_dir {
                    immediate_folders += 1;
                } else if child.is_file
                    || (child.is_symlink && !child.is_dangling_symlink && !child.is_dir)
                {
                    immediate_files += 1;
                }

                // A circular target still lists children for the immediate
                // counts above but never descends into them.
                if !is_circular_target {
                    let (sub_lines, sub_stats) =
                        generate_recursive(child, &child_prefix, config, ancestors.clone());
                    children_lines.extend(sub_lines);
                    recursive_size += sub_stats.recursive_size_bytes;
                    recursive_files += sub_stats.recursive_files_count;
                }
            }
        }
    }

    let stats = SubtreeStats {
        recursive_size_bytes: recursive_size,
        recursive_files_count: recursive_files,
        immediate_files_count: immediate_files,
        immediate_folders_count: immediate_folders,
    };

    let labels = build_labels(details, &stats, config, is_circular_target);

    let mut lines = Vec::with_capacity(1 + children_lines.len());
    lines.push(entry_line + &labels);
    lines.extend(children_lines);
    (lines, stats)
}

/// List the immediate children of a directory. Any failure, at open time
/// or mid-iteration, discards the partial listing and is reported as a
/// single error string.
fn list_children(details: &PathDescriptor) -> (Vec<PathBuf>, Option<String>) {
    let mut child_paths = Vec::new();
    match fs::read_dir(&details.path) {
        Ok(read_dir) => {
            for entry in read_dir {
                match entry {
                    Ok(entry) => child_paths.push(entry.path()),
                    Err(e) => {
                        tracing::debug!(dir = %details.path.display(), error = %e, "listing failed");
                        child_paths.clear();
                        return (child_paths, Some(e.to_string()));
                    }
                }
            }
            (child_paths, None)
        }
        Err(e) => {
            tracing::debug!(dir = %details.path.display(), error = %e, "listing failed");
            (child_paths, Some(e.to_string()))
        }
    }
}

/// Strip the trailing connector from a prefix, leaving the continuation
/// columns contributed by the entry's ancestors.
fn strip_connector<'a>(prefix: &'a str, glyphs: &TreeGlyphs) -> &'a str {
    if let Some(stripped) = prefix.strip_suffix(glyphs.middle) {
        stripped
    } else if let Some(stripped) = prefix.strip_suffix(glyphs.last) {
        stripped
    } else {
        prefix
    }
}
