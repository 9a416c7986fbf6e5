//! Bracketed label suffixes: symlink targets, circular/error markers,
//! sizes, dates, and folder counts.

use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};

use super::walk::SubtreeStats;
use super::{PathDescriptor, TreeConfig};

/// Build the bracketed suffix for one entry, or an empty string when no
/// labels apply.
///
/// Composition order: symlink target (with `[DANGLING]` when the target is
/// gone), then `[CIRCULAR]` or, failing that, an access-error marker
/// (circular wins when both apply), then size/date for file-like entries,
/// or aggregate size, date, and counts for directories.
pub(super) fn build_labels(
    details: &PathDescriptor,
    stats: &SubtreeStats,
    config: &TreeConfig,
    is_circular_ref: bool,
) -> String {
    let mut labels: Vec<String> = Vec::new();

    if config.mark_symlinks && details.is_symlink && !config.hide_symlinks {
        let target = details.symlink_target.as_deref().unwrap_or("unknown");
        let mut link_label = format!("-> {target}");
        if details.is_dangling_symlink {
            link_label.push_str(" [DANGLING]");
        }
        labels.push(link_label);
    }

    if config.mark_circular && is_circular_ref {
        labels.push("[CIRCULAR]".to_string());
    } else if config.mark_errors {
        if let Some(err) = &details.access_error {
            labels.push(format!("[ERROR: {err}]"));
        }
    }

    let file_like =
        details.is_file || (details.is_symlink && !details.is_dir && !details.is_dangling_symlink);

    if file_like {
        if config.show_file_sizes {
            if let Some(size) = details.size_bytes {
                labels.push(format_size(size as i64));
            }
        }
        if config.show_file_dates {
            if let Some(modified) = details.modified {
                labels.push(format_date(modified));
            }
        }
    } else if details.is_dir {
        // The stat gate mirrors the size gate for files: a folder whose
        // own stat failed gets no size label even though the aggregate is
        // still computed.
        if config.show_folder_sizes && details.size_bytes.is_some() {
            labels.push(format_size(stats.recursive_size_bytes as i64));
        }
        if config.show_folder_dates {
            if let Some(modified) = details.modified {
                labels.push(format_date(modified));
            }
        }
        if config.show_folder_file_count {
            labels.push(format!("{} files", stats.immediate_files_count));
        }
        if config.show_folder_subfolder_count {
            labels.push(format!("{} dirs", stats.immediate_folders_count));
        }
        if config.show_folder_total_file_count {
            labels.push(format!("{} total files", stats.recursive_files_count));
        }
    }

    if labels.is_empty() {
        String::new()
    } else {
        format!(" [{}]", labels.join(", "))
    }
}

/// Human-readable size with binary (1024) unit steps. Whole bytes are
/// printed without a decimal; negative sizes render as "N/A".
pub(super) fn format_size(size_bytes: i64) -> String {
    if size_bytes < 0 {
        return "N/A".to_string();
    }
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = size_bytes as f64;
    let mut unit = UNITS[0];
    for u in UNITS {
        unit = u;
        if size.abs() < 1024.0 || u == "PB" {
            break;
        }
        size /= 1024.0;
    }
    if unit == "B" {
        format!("{size_bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}

/// Local-time `YYYY-MM-DD HH:MM:SS`. Timestamps chrono cannot represent
/// render as a fixed placeholder instead of failing.
pub(super) fn format_date(modified: SystemTime) -> String {
    let secs = match modified.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    };
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "[Invalid Date]".to_string(),
    }
}
