//! Relative path validation.
//!
//! Paths are resolved lexically: `.` segments are dropped and every `..`
//! cancels the segment before it. Both `/` and `\` separate segments, so a
//! path valid on one replica cannot climb out of the sync root on the other.

use crate::document::Metadata;

const SEPARATORS: &[char] = &['/', '\\'];

/// Lexically normalized, `/`-joined form of `path`.
///
/// `None` when nothing is left (`""`, `"."`, `"/"`, `"foo/.."`) or when a
/// `..` has no segment to cancel.
pub fn normalize(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(SEPARATORS) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name),
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Whether `doc.path` cannot designate an entry inside the sync root
pub fn invalid_path(doc: &Metadata) -> bool {
    normalize(&doc.path).is_none()
}
