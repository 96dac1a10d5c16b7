//! # Metadata Documents
//!
//! The single entity the reconciliation core works on: one document per
//! synced filesystem entry.
//!
//! ## Shape
//!
//! A [`Metadata`] document carries the fields shared by files and folders and
//! a [`DocKind`] discriminant holding the file-only attributes. The serialized
//! form is the one the persistence collaborator stores:
//!
//! ```json
//! {
//!   "_id": "PHOTOS/BEACH.JPG",
//!   "_rev": "3-a1b2c3",
//!   "path": "Photos/beach.jpg",
//!   "docType": "file",
//!   "md5sum": "1B2M2Y8AsgTpgAmY7PhCfg==",
//!   "size": 0,
//!   "updated_at": "2024-05-01T10:00:00Z",
//!   "ino": 1234,
//!   "tags": ["holiday"],
//!   "remote": { "_id": "abc", "_rev": "2-def" },
//!   "sides": { "local": 3, "remote": 2 }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::revision::extract_rev_number;

// ============================================================================
// Discriminant
// ============================================================================

/// Kind of filesystem entry, without its attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    File,
    Folder,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::File => "file",
            DocType::Folder => "folder",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes only files carry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileAttrs {
    /// Canonical content digest (base64 of 16 bytes)
    #[serde(rename = "md5sum", default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Absent and `false` mean the same thing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<bool>,
}

impl FileAttrs {
    pub fn new(checksum: impl Into<String>) -> Self {
        Self {
            checksum: Some(checksum.into()),
            size: None,
            executable: None,
        }
    }
}

/// Tagged variant over files and folders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "docType", rename_all = "lowercase")]
pub enum DocKind {
    File(FileAttrs),
    Folder,
}

// ============================================================================
// Replica links
// ============================================================================

/// Link to the remote replica's copy of an entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteLink {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

impl RemoteLink {
    pub fn new(id: impl Into<String>, rev: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rev: Some(rev.into()),
        }
    }

    /// Link whose revision is not known yet
    pub fn without_rev(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rev: None,
        }
    }

    pub fn has_rev(&self) -> bool {
        self.rev.as_deref().is_some_and(|rev| !rev.is_empty())
    }
}

/// One of the two replicas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Local,
    Remote,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Local => "local",
            Side::Remote => "remote",
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Local => Side::Remote,
            Side::Remote => Side::Local,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-replica write-generation counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<u64>,
}

impl Sides {
    pub fn get(&self, side: Side) -> Option<u64> {
        match side {
            Side::Local => self.local,
            Side::Remote => self.remote,
        }
    }

    pub fn set(&mut self, side: Side, value: u64) {
        match side {
            Side::Local => self.local = Some(value),
            Side::Remote => self.remote = Some(value),
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// Metadata document for one synced entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Canonical identifier, derived from `path`
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Replica-local revision token
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    /// Original-case relative path
    pub path: String,

    #[serde(flatten)]
    pub kind: DocKind,

    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ino: Option<u64>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sides: Option<Sides>,
}

impl Metadata {
    fn new(path: impl Into<String>, kind: DocKind, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            rev: None,
            path: path.into(),
            kind,
            updated_at,
            ino: None,
            tags: BTreeSet::new(),
            remote: None,
            sides: None,
        }
    }

    /// New file document; `id` stays empty until identity is assigned
    pub fn file(path: impl Into<String>, updated_at: DateTime<Utc>, attrs: FileAttrs) -> Self {
        Self::new(path, DocKind::File(attrs), updated_at)
    }

    /// New folder document; `id` stays empty until identity is assigned
    pub fn folder(path: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self::new(path, DocKind::Folder, updated_at)
    }

    pub fn with_rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = Some(rev.into());
        self
    }

    pub fn with_ino(mut self, ino: u64) -> Self {
        self.ino = Some(ino);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_remote(mut self, remote: RemoteLink) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = Some(sides);
        self
    }

    pub fn doc_type(&self) -> DocType {
        match self.kind {
            DocKind::File(_) => DocType::File,
            DocKind::Folder => DocType::Folder,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, DocKind::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, DocKind::Folder)
    }

    pub fn file_attrs(&self) -> Option<&FileAttrs> {
        match &self.kind {
            DocKind::File(attrs) => Some(attrs),
            DocKind::Folder => None,
        }
    }

    pub fn checksum(&self) -> Option<&str> {
        self.file_attrs().and_then(|attrs| attrs.checksum.as_deref())
    }

    /// Generation of this document's own revision token
    pub fn rev_number(&self) -> u64 {
        extract_rev_number(self.rev.as_deref())
    }
}
