//! Documents built from filesystem observations.
//!
//! Builders leave `id` empty: identity is assigned afterwards with the
//! platform rules of the reconciliation pass.

use bridge_traits::FileStat;
use std::cmp;

use crate::document::{FileAttrs, Metadata, RemoteLink};

/// File document from a stat snapshot and its content checksum
pub fn build_file(
    path: impl Into<String>,
    stat: &FileStat,
    checksum: impl Into<String>,
    remote: Option<RemoteLink>,
) -> Metadata {
    let attrs = FileAttrs {
        checksum: Some(checksum.into()),
        size: Some(stat.size),
        executable: stat.is_executable(),
    };

    let mut doc = Metadata::file(path, stat.mtime, attrs);
    doc.ino = stat.ino;
    doc.remote = remote;
    doc
}

/// Folder document from a stat snapshot.
///
/// Directories report either timestamp unreliably, so the later one is kept.
pub fn build_dir(path: impl Into<String>, stat: &FileStat, remote: Option<RemoteLink>) -> Metadata {
    let mut doc = Metadata::folder(path, cmp::max(stat.mtime, stat.ctime));
    doc.ino = stat.ino;
    doc.remote = remote;
    doc
}
