#![forbid(unsafe_code)]
//! dirtree — a directory tree generator with regex filtering, size/date
//! labels, and cycle-safe symlink traversal.

pub mod cli;
pub mod pattern;
pub mod tree;
