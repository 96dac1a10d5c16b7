//! # Platform Incompatibility Detection
//!
//! Flags entries that could not be created on a target platform, so they can
//! be reported before a sync action is attempted.
//!
//! ## Overview
//!
//! The document path is split with the *target platform's* separators, then
//! walked from the leaf (the entry itself) up to the top-level ancestor. Each
//! segment is checked against the platform rules and every violation becomes
//! one [`Incompatibility`] record. Records come out leaf-first, nearer
//! ancestors before farther ones; a too-long path is reported once, before
//! any segment record.
//!
//! Platforms without naming restrictions (Linux) never yield records.
//!
//! ## Usage
//!
//! ```
//! use bridge_traits::Platform;
//! use chrono::Utc;
//! use core_sync::document::Metadata;
//! use core_sync::incompatibilities::{detect_platform_incompatibilities, IncompatibilityKind};
//!
//! let doc = Metadata::folder("notes/what?", Utc::now());
//! let found = detect_platform_incompatibilities(&doc, Platform::Windows, '/');
//!
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].kind, IncompatibilityKind::ReservedChars);
//! assert_eq!(found[0].name, "what?");
//! ```

use bridge_traits::Platform;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::trace;

use crate::document::{DocType, Metadata};

/// Kind of naming rule an entry breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IncompatibilityKind {
    /// Segment contains characters the platform reserves
    ReservedChars,
    /// Segment is a device name (`CON`, `LPT1`...)
    ReservedName,
    /// Segment ends with a character the platform strips or refuses
    ForbiddenLastChar,
    /// Segment is longer than the platform's name limit
    NameMaxBytes,
    /// Whole path is longer than the platform's path limit
    PathMaxBytes,
}

/// One broken rule on one path segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Incompatibility {
    #[serde(rename = "type")]
    pub kind: IncompatibilityKind,

    /// Offending segment
    pub name: String,

    /// Path from the root through the offending segment
    pub path: String,

    /// Type of the entry the segment names
    pub doc_type: DocType,

    /// Reserved characters found in `name` (`ReservedChars` only)
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub reserved_chars: BTreeSet<char>,

    /// Offending trailing character (`ForbiddenLastChar` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbidden_last_char: Option<char>,

    /// Limit that was exceeded (`NameMaxBytes`/`PathMaxBytes` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<usize>,

    pub platform: Platform,
}

impl Incompatibility {
    fn new(
        kind: IncompatibilityKind,
        name: &str,
        path: String,
        doc_type: DocType,
        platform: Platform,
    ) -> Self {
        Self {
            kind,
            name: name.to_string(),
            path,
            doc_type,
            reserved_chars: BTreeSet::new(),
            forbidden_last_char: None,
            max_bytes: None,
            platform,
        }
    }
}

/// Every reason `doc` could not be synced to `platform`.
///
/// `sync_path_separator` is the separator of the sync root the document comes
/// from. It is only reported on the unrestricted branch and never takes part
/// in splitting or scanning, which always use the platform's own separators.
pub fn detect_platform_incompatibilities(
    doc: &Metadata,
    platform: Platform,
    sync_path_separator: char,
) -> Vec<Incompatibility> {
    if !platform.has_path_restrictions() {
        trace!(
            %platform,
            sync_path_separator = %sync_path_separator,
            "No path restrictions on target platform"
        );
        return Vec::new();
    }

    let segments: Vec<&str> = doc
        .path
        .split(platform.separators())
        .filter(|segment| !segment.is_empty())
        .collect();

    let Some(leaf) = segments.last() else {
        return Vec::new();
    };

    let separator = platform.separator().to_string();
    let mut incompatibilities = Vec::new();

    if let Some(max_bytes) = platform.path_max_bytes() {
        let full_path = segments.join(&separator);
        if full_path.len() > max_bytes {
            let mut record = Incompatibility::new(
                IncompatibilityKind::PathMaxBytes,
                leaf,
                full_path,
                doc.doc_type(),
                platform,
            );
            record.max_bytes = Some(max_bytes);
            incompatibilities.push(record);
        }
    }

    for depth in (0..segments.len()).rev() {
        let name = segments[depth];
        let path = segments[..=depth].join(&separator);
        let doc_type = if depth + 1 == segments.len() {
            doc.doc_type()
        } else {
            DocType::Folder
        };

        incompatibilities.extend(detect_segment(name, &path, doc_type, platform));
    }

    incompatibilities
}

fn detect_segment(
    name: &str,
    path: &str,
    doc_type: DocType,
    platform: Platform,
) -> Vec<Incompatibility> {
    let mut found = Vec::new();

    let reserved: BTreeSet<char> = name
        .chars()
        .filter(|c| platform.reserved_chars().contains(c))
        .collect();
    if !reserved.is_empty() {
        let mut record = Incompatibility::new(
            IncompatibilityKind::ReservedChars,
            name,
            path.to_string(),
            doc_type,
            platform,
        );
        record.reserved_chars = reserved;
        found.push(record);
    }

    if is_reserved_name(name, platform) {
        found.push(Incompatibility::new(
            IncompatibilityKind::ReservedName,
            name,
            path.to_string(),
            doc_type,
            platform,
        ));
    }

    if let Some(last) = name.chars().last() {
        if platform.forbidden_last_chars().contains(&last) {
            let mut record = Incompatibility::new(
                IncompatibilityKind::ForbiddenLastChar,
                name,
                path.to_string(),
                doc_type,
                platform,
            );
            record.forbidden_last_char = Some(last);
            found.push(record);
        }
    }

    if let Some(max_bytes) = platform.name_max_bytes() {
        if name.len() > max_bytes {
            let mut record = Incompatibility::new(
                IncompatibilityKind::NameMaxBytes,
                name,
                path.to_string(),
                doc_type,
                platform,
            );
            record.max_bytes = Some(max_bytes);
            found.push(record);
        }
    }

    found
}

// Device names are reserved with any extension: "con.txt" is as bad as "CON"
fn is_reserved_name(name: &str, platform: Platform) -> bool {
    let stem = name.split('.').next().unwrap_or(name).to_uppercase();
    platform.reserved_names().contains(&stem.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FileAttrs;
    use chrono::Utc;

    fn file(path: &str) -> Metadata {
        Metadata::file(path, Utc::now(), FileAttrs::default())
    }

    fn chars(list: &str) -> BTreeSet<char> {
        list.chars().collect()
    }

    #[test]
    fn test_linux_never_reports() {
        let doc = file("a:b/c?d/CON/e.");
        assert!(detect_platform_incompatibilities(&doc, Platform::Linux, '/').is_empty());
        assert!(detect_platform_incompatibilities(&doc, Platform::Linux, '\\').is_empty());
    }

    #[test]
    fn test_macos_reserves_colon_only() {
        let doc = file("a:b/c?d");
        let found = detect_platform_incompatibilities(&doc, Platform::MacOs, '/');
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "a:b");
        assert_eq!(found[0].path, "a:b");
        assert_eq!(found[0].doc_type, DocType::Folder);
        assert_eq!(found[0].reserved_chars, chars(":"));
        assert_eq!(found[0].platform, Platform::MacOs);
    }

    #[test]
    fn test_windows_nested_leaf_first() {
        let doc = file("f:o:o\\b<a>r\\baz\\q\"ux|?.txt");
        let found = detect_platform_incompatibilities(&doc, Platform::Windows, '\\');

        let summary: Vec<_> = found
            .iter()
            .map(|i| (i.kind, i.name.as_str(), i.path.as_str(), i.doc_type))
            .collect();
        assert_eq!(
            summary,
            vec![
                (
                    IncompatibilityKind::ReservedChars,
                    "q\"ux|?.txt",
                    "f:o:o\\b<a>r\\baz\\q\"ux|?.txt",
                    DocType::File
                ),
                (
                    IncompatibilityKind::ReservedChars,
                    "b<a>r",
                    "f:o:o\\b<a>r",
                    DocType::Folder
                ),
                (
                    IncompatibilityKind::ReservedChars,
                    "f:o:o",
                    "f:o:o",
                    DocType::Folder
                ),
            ]
        );
        assert_eq!(found[0].reserved_chars, chars("\"|?"));
        assert_eq!(found[1].reserved_chars, chars("<>"));
        assert_eq!(found[2].reserved_chars, chars(":"));
    }

    #[test]
    fn test_windows_splits_on_forward_slash_too() {
        let doc = file("ok/na*me");
        let found = detect_platform_incompatibilities(&doc, Platform::Windows, '/');
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "ok\\na*me");
        assert_eq!(found[0].reserved_chars, chars("*"));
    }

    #[test]
    fn test_folder_leaf_keeps_folder_type() {
        let doc = Metadata::folder("x/y:z", Utc::now());
        let found = detect_platform_incompatibilities(&doc, Platform::MacOs, '/');
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].doc_type, DocType::Folder);
    }

    #[test]
    fn test_windows_reserved_names() {
        let doc = file("lpt1/con.txt");
        let found = detect_platform_incompatibilities(&doc, Platform::Windows, '/');
        let kinds: Vec<_> = found.iter().map(|i| (i.kind, i.name.as_str())).collect();
        assert_eq!(
            kinds,
            vec![
                (IncompatibilityKind::ReservedName, "con.txt"),
                (IncompatibilityKind::ReservedName, "lpt1"),
            ]
        );
        // Not a device name, only starts like one
        assert!(detect_platform_incompatibilities(&file("console"), Platform::Windows, '/')
            .is_empty());
    }

    #[test]
    fn test_segment_breaking_several_rules() {
        let found = detect_platform_incompatibilities(&file("con.t?t."), Platform::Windows, '/');
        let kinds: Vec<_> = found.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IncompatibilityKind::ReservedChars,
                IncompatibilityKind::ReservedName,
                IncompatibilityKind::ForbiddenLastChar,
            ]
        );
        assert!(found.iter().all(|i| i.name == "con.t?t."));
        assert_eq!(found[0].reserved_chars, chars("?"));
        assert_eq!(found[2].forbidden_last_char, Some('.'));
    }

    #[test]
    fn test_windows_forbidden_last_char() {
        let found = detect_platform_incompatibilities(&file("trail /end."), Platform::Windows, '/');
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].forbidden_last_char, Some('.'));
        assert_eq!(found[0].name, "end.");
        assert_eq!(found[1].forbidden_last_char, Some(' '));
        assert_eq!(found[1].name, "trail ");
    }

    #[test]
    fn test_name_and_path_length_limits() {
        let long_name = "a".repeat(256);
        let found = detect_platform_incompatibilities(&file(&long_name), Platform::MacOs, '/');
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, IncompatibilityKind::NameMaxBytes);
        assert_eq!(found[0].max_bytes, Some(255));

        let deep = vec!["abcdefghij"; 30].join("/");
        let found = detect_platform_incompatibilities(&file(&deep), Platform::Windows, '/');
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, IncompatibilityKind::PathMaxBytes);
        assert_eq!(found[0].max_bytes, Some(259));
        assert_eq!(found[0].name, "abcdefghij");
    }

    #[test]
    fn test_clean_path_yields_nothing() {
        let doc = file("Documents/report 2024.pdf");
        for platform in [Platform::Linux, Platform::MacOs, Platform::Windows] {
            assert!(detect_platform_incompatibilities(&doc, platform, '/').is_empty());
        }
    }
}
