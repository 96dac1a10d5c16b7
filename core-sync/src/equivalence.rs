//! Snapshot equivalence.
//!
//! Two snapshots that compare equal here need no sync action. All predicates
//! are pure and symmetric.

use crate::document::{DocKind, Metadata};

/// Both are files with the same content checksum; nothing else is compared
pub fn same_binary(one: &Metadata, two: &Metadata) -> bool {
    match (&one.kind, &two.kind) {
        (DocKind::File(a), DocKind::File(b)) => a.checksum == b.checksum,
        _ => false,
    }
}

/// Same document type, plus equal id, timestamp, tags, remote link and inode
pub fn same_folder(one: &Metadata, two: &Metadata) -> bool {
    one.doc_type() == two.doc_type()
        && one.id == two.id
        && one.updated_at == two.updated_at
        && one.tags == two.tags
        && one.remote == two.remote
        && one.ino == two.ino
}

/// [`same_folder`] plus checksum, size and executable bit.
///
/// A missing executable flag equals `false`. Non-files are never the same file.
pub fn same_file(one: &Metadata, two: &Metadata) -> bool {
    let (DocKind::File(a), DocKind::File(b)) = (&one.kind, &two.kind) else {
        return false;
    };

    same_folder(one, two)
        && a.checksum == b.checksum
        && a.size == b.size
        && a.executable.unwrap_or(false) == b.executable.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{FileAttrs, RemoteLink};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn folder(path: &str) -> Metadata {
        let mut doc = Metadata::folder(path, at(1_449_000_000))
            .with_tags(["courge", "quux"])
            .with_remote(RemoteLink::new("123", "4-567"))
            .with_ino(234);
        doc.id = path.to_uppercase();
        doc
    }

    fn file(path: &str) -> Metadata {
        let attrs = FileAttrs {
            checksum: Some("9440ca447681546bd781d6a5166d18737223b3f6".to_string()),
            size: Some(78),
            executable: None,
        };
        let mut doc = Metadata::file(path, at(1_449_000_000), attrs)
            .with_tags(["courge"])
            .with_remote(RemoteLink::new("123", "4-567"))
            .with_ino(456);
        doc.id = path.to_uppercase();
        doc
    }

    fn attrs_mut(doc: &mut Metadata) -> &mut FileAttrs {
        match &mut doc.kind {
            DocKind::File(attrs) => attrs,
            DocKind::Folder => unreachable!("test fixture is a file"),
        }
    }

    #[test]
    fn test_same_folder_ignores_path_case() {
        let a = folder("foo/bar");
        let b = folder("FOO/BAR");
        assert!(same_folder(&a, &b));
        assert!(same_folder(&b, &a));
    }

    #[test]
    fn test_same_folder_tags_are_unordered() {
        let a = folder("foo").with_tags(["b", "a"]);
        let b = folder("foo").with_tags(["a", "b"]);
        assert!(same_folder(&a, &b));
    }

    #[test]
    fn test_same_folder_differences() {
        let a = folder("foo");

        let mut b = a.clone();
        b.updated_at = at(1_449_000_001);
        assert!(!same_folder(&a, &b));

        let b = a.clone().with_ino(235);
        assert!(!same_folder(&a, &b));

        let mut b = a.clone();
        b.ino = None;
        assert!(!same_folder(&a, &b));
        assert!(!same_folder(&b, &a));

        let b = a.clone().with_tags(["courge", "baz"]);
        assert!(!same_folder(&a, &b));

        let b = a.clone().with_remote(RemoteLink::new("123", "5-567"));
        assert!(!same_folder(&a, &b));

        let b = a.clone().with_remote(RemoteLink::new("124", "4-567"));
        assert!(!same_folder(&a, &b));
    }

    #[test]
    fn test_same_folder_requires_same_type() {
        let dir = folder("foo");
        let mut entry = Metadata::file("foo", dir.updated_at, FileAttrs::default())
            .with_tags(["courge", "quux"])
            .with_remote(RemoteLink::new("123", "4-567"))
            .with_ino(234);
        entry.id = dir.id.clone();

        assert!(!same_folder(&dir, &entry));
        assert!(!same_folder(&entry, &dir));
    }

    #[test]
    fn test_same_file_follows_folder_rules() {
        let a = file("foo/bar.txt");
        let b = file("FOO/BAR.TXT");
        assert!(same_file(&a, &b));

        let c = a.clone().with_ino(457);
        assert!(!same_file(&a, &c));
    }

    #[test]
    fn test_same_file_content_fields() {
        let a = file("foo");

        let mut b = a.clone();
        attrs_mut(&mut b).checksum = Some("other".to_string());
        assert!(!same_file(&a, &b));

        let mut b = a.clone();
        attrs_mut(&mut b).size = Some(79);
        assert!(!same_file(&a, &b));

        let mut b = a.clone();
        attrs_mut(&mut b).size = None;
        assert!(!same_file(&a, &b));
    }

    #[test]
    fn test_same_file_executable() {
        let absent = file("foo");

        let mut unset = absent.clone();
        attrs_mut(&mut unset).executable = Some(false);
        assert!(same_file(&absent, &unset));
        assert!(same_file(&unset, &absent));

        let mut exec = absent.clone();
        attrs_mut(&mut exec).executable = Some(true);
        assert!(!same_file(&absent, &exec));
        assert!(!same_file(&unset, &exec));
    }

    #[test]
    fn test_same_file_requires_files() {
        let a = folder("foo");
        assert!(!same_file(&a, &a.clone()));
        assert!(!same_file(&a, &file("foo")));
    }

    #[test]
    fn test_same_binary_only_checks_content() {
        let a = file("foo");
        let mut b = file("bar").with_ino(1).with_tags(["x"]);
        b.updated_at = at(0);
        assert!(same_binary(&a, &b));

        attrs_mut(&mut b).checksum = Some("other".to_string());
        assert!(!same_binary(&a, &b));

        assert!(!same_binary(&a, &folder("foo")));
    }
}
