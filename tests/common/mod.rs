#![allow(dead_code)]

use dirtree::tree::TreeOptions;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Create a directory structure from (relative path, content) pairs, so
/// tests can pin exact size labels.
pub fn create_fixture_with_content(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (p, content) in files {
        write_file(tmp.path(), p, content);
    }
    tmp
}

/// Write one file (or create one directory for paths ending with '/')
/// under `base`.
pub fn write_file(base: &Path, rel: &str, content: &str) {
    let full = base.join(rel);
    if rel.ends_with('/') {
        fs::create_dir_all(&full).unwrap();
    } else {
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
    }
}

/// Default options with every label toggle off, so tests can pin the bare
/// tree shape without size/count suffixes.
pub fn bare_options() -> TreeOptions {
    TreeOptions {
        show_sizes: false,
        show_folder_file_count: false,
        show_folder_subfolder_count: false,
        ..TreeOptions::default()
    }
}
