//! Filesystem entry inspection.
//!
//! `inspect_path` turns one path into an immutable `PathDescriptor`,
//! capturing every OS error into the descriptor instead of returning it,
//! so traversal can continue past unreadable entries.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::TreeConfig;

/// Platform identity of a filesystem object: (device, inode).
pub type FileIdentity = (u64, u64);

/// Snapshot of one filesystem entry at inspection time.
///
/// When `is_symlink` is false, `symlink_target` is `None` and
/// `is_dangling_symlink` is false. `size_bytes`, `modified`, and
/// `identity` are absent when the stat call failed.
#[derive(Debug, Clone)]
pub struct PathDescriptor {
    pub path: PathBuf,
    /// Base name, or the full path when there is no name component
    /// (e.g. the filesystem root).
    pub name: String,
    /// Whether traversal should treat this entry as a directory. Symlinks
    /// to directories report true only when following symlinks.
    pub is_dir: bool,
    pub is_file: bool,
    pub is_symlink: bool,
    pub size_bytes: Option<u64>,
    pub modified: Option<SystemTime>,
    /// Raw link target text, present only for symlinks.
    pub symlink_target: Option<String>,
    pub is_dangling_symlink: bool,
    /// Human-readable description of a stat failure, if any.
    pub access_error: Option<String>,
    pub identity: Option<FileIdentity>,
}

/// Inspect `path` under the active configuration. Never fails: OS errors
/// are recorded in `access_error` and the remaining fields are filled on a
/// best-effort basis.
pub fn inspect_path(path: &Path, config: &TreeConfig) -> PathDescriptor {
    let name = match path.file_name() {
        Some(n) => n.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    };

    let link_meta = fs::symlink_metadata(path);
    let is_symlink = link_meta
        .as_ref()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);

    let mut symlink_target = None;
    let mut is_dangling = false;
    if is_symlink {
        symlink_target = fs::read_link(path)
            .ok()
            .map(|t| t.to_string_lossy().into_owned());
        // Path::exists resolves symlinks, so a false here means the
        // target chain ends nowhere.
        is_dangling = !path.exists();
    }

    // Stat the link itself when not following symlinks; stat through
    // otherwise. Statting through a dangling link fails and the error is
    // captured below.
    let stat_result = if is_symlink && !config.follow_symlinks {
        link_meta
    } else {
        fs::metadata(path)
    };

    let mut size_bytes = None;
    let mut modified = None;
    let mut identity = None;
    let mut access_error = None;

    match &stat_result {
        Ok(meta) => {
            size_bytes = Some(meta.len());
            modified = meta.modified().ok();
            identity = identity_of(meta);
        }
        Err(e) => {
            access_error = Some(e.to_string());
        }
    }

    let (is_dir, is_file) = classify(path, config, is_symlink, is_dangling, stat_result.ok());

    PathDescriptor {
        path: path.to_path_buf(),
        name,
        is_dir,
        is_file,
        is_symlink,
        size_bytes,
        modified,
        symlink_target,
        is_dangling_symlink: is_dangling,
        access_error,
        identity,
    }
}

/// Decide the reported type flags.
///
/// Non-symlinks use the stat result directly (or a best-effort path check
/// when stat failed). A followed symlink takes its target's type unless
/// dangling. An unfollowed symlink is never a directory, so traversal
/// cannot enter it, but still reports file-ness when its target is a file.
fn classify(
    path: &Path,
    config: &TreeConfig,
    is_symlink: bool,
    is_dangling: bool,
    meta: Option<Metadata>,
) -> (bool, bool) {
    if is_symlink {
        if config.follow_symlinks {
            if is_dangling {
                (false, false)
            } else {
                (path.is_dir(), path.is_file())
            }
        } else {
            (false, !is_dangling && path.is_file())
        }
    } else {
        match meta {
            Some(meta) => (meta.is_dir(), meta.is_file()),
            // Stat failed; Path::is_dir/is_file swallow errors and may
            // still classify (they re-stat internally).
            None => (path.is_dir(), path.is_file()),
        }
    }
}

#[cfg(unix)]
fn identity_of(meta: &Metadata) -> Option<FileIdentity> {
    use std::os::unix::fs::MetadataExt;
    Some((meta.dev(), meta.ino()))
}

// Without device+inode identity, circular references go undetected; the
// per-branch ancestry set is simply never populated.
#[cfg(not(unix))]
fn identity_of(_meta: &Metadata) -> Option<FileIdentity> {
    None
}
