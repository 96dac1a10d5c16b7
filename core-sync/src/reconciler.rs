//! # Reconciler
//!
//! Runs the metadata pipeline with the platform rules of one configuration.
//!
//! ## Overview
//!
//! ```text
//! stat ──► builders ──► prepare (identity, timestamp) ──► has_changed
//!                                                            │
//!                     finalize (invariants) ◄── mark_side ◄──┘ (scheduler acts)
//! ```
//!
//! The reconciler holds no state besides its configuration. Callers must
//! serialize passes per document id: reading the previous snapshot, comparing
//! and writing the new one is not atomic here.
//!
//! ## Usage
//!
//! ```
//! use bridge_traits::{FileStat, Platform};
//! use chrono::Utc;
//! use core_runtime::ReconcilerConfig;
//! use core_sync::{builders::build_file, Reconciler, Side};
//!
//! let config = ReconcilerConfig::builder()
//!     .platform(Platform::MacOs)
//!     .build()?;
//! let reconciler = Reconciler::new(config);
//!
//! let stat = FileStat::new(Utc::now(), Utc::now()).with_ino(12).with_size(0);
//! let doc = build_file("Notes/Todo.md", &stat, "1B2M2Y8AsgTpgAmY7PhCfg==", None);
//!
//! let observation = reconciler.observe(doc, None);
//! assert!(observation.changed);
//! assert_eq!(observation.doc.id, "NOTES/TODO.MD");
//!
//! reconciler.validate(&observation.doc)?;
//! let doc = reconciler.mark_side(Side::Local, observation.doc, None);
//! let doc = reconciler.finalize(doc)?;
//! assert_eq!(doc.sides.and_then(|s| s.local), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use core_runtime::logging::strip_path;
use core_runtime::ReconcilerConfig;
use tracing::{debug, error, instrument, warn};

use crate::checksum::invalid_checksum;
use crate::document::{DocKind, Metadata, Side};
use crate::equivalence::{same_file, same_folder};
use crate::error::{MetadataError, Result};
use crate::identity::assign_id;
use crate::incompatibilities::{detect_platform_incompatibilities, Incompatibility};
use crate::invariants::invariants;
use crate::path::invalid_path;
use crate::sides::mark_side;
use crate::timestamp::assign_max_date;

/// Outcome of observing one filesystem entry
#[derive(Debug, Clone)]
pub struct Observation {
    /// Document with identity and timestamp repaired
    pub doc: Metadata,
    /// Whether it differs from the previous snapshot
    pub changed: bool,
    /// Reasons it cannot be synced to the target platform
    pub incompatibilities: Vec<Incompatibility>,
}

/// Metadata pipeline bound to one configuration
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: ReconcilerConfig,
}

impl Reconciler {
    pub fn new(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Assign identity, then repair the timestamp against `previous`
    pub fn prepare(&self, doc: Metadata, previous: Option<&Metadata>) -> Metadata {
        let doc = assign_id(doc, self.config.platform);
        assign_max_date(doc, previous)
    }

    /// Whether `doc` differs from `previous` in a way that needs syncing
    pub fn has_changed(&self, doc: &Metadata, previous: Option<&Metadata>) -> bool {
        let Some(previous) = previous else {
            return true;
        };

        match (&doc.kind, &previous.kind) {
            (DocKind::File(_), DocKind::File(_)) => !same_file(doc, previous),
            (DocKind::Folder, DocKind::Folder) => !same_folder(doc, previous),
            _ => true,
        }
    }

    /// Reject documents the validators flag
    pub fn validate(&self, doc: &Metadata) -> Result<()> {
        if invalid_path(doc) {
            warn!(path = %doc.path, "Invalid path");
            return Err(MetadataError::InvalidPath {
                path: doc.path.clone(),
            });
        }

        if invalid_checksum(doc) {
            warn!(
                path = %strip_path(&doc.path),
                checksum = ?doc.checksum(),
                "Invalid checksum"
            );
            return Err(MetadataError::InvalidChecksum {
                path: doc.path.clone(),
                checksum: doc.checksum().map(str::to_string),
            });
        }

        Ok(())
    }

    /// Platform incompatibilities of `doc` on the configured target platform
    pub fn incompatibilities(&self, doc: &Metadata) -> Vec<Incompatibility> {
        if !self.config.detect_incompatibilities {
            return Vec::new();
        }

        let found = detect_platform_incompatibilities(
            doc,
            self.config.target_platform,
            self.config.sync_path_separator,
        );

        for incompatibility in &found {
            warn!(
                kind = ?incompatibility.kind,
                name = %incompatibility.name,
                platform = %incompatibility.platform,
                "Platform incompatibility"
            );
        }

        found
    }

    /// Prepare `doc`, compare it with `previous` and look for incompatibilities
    #[instrument(skip_all, fields(path = %strip_path(&doc.path)))]
    pub fn observe(&self, doc: Metadata, previous: Option<&Metadata>) -> Observation {
        let doc = self.prepare(doc, previous);
        let changed = self.has_changed(&doc, previous);
        let incompatibilities = self.incompatibilities(&doc);

        debug!(
            id = %doc.id,
            changed,
            incompatibilities = incompatibilities.len(),
            "Observed entry"
        );

        Observation {
            doc,
            changed,
            incompatibilities,
        }
    }

    /// Record a write by `side`
    pub fn mark_side(&self, side: Side, doc: Metadata, previous: Option<&Metadata>) -> Metadata {
        let doc = mark_side(side, doc, previous);
        debug!(%side, sides = ?doc.sides, "Marked side");
        doc
    }

    /// Last check before handing `doc` to the persistence collaborator
    pub fn finalize(&self, doc: Metadata) -> Result<Metadata> {
        invariants(doc).map_err(|err| {
            error!(error = %err, "Refusing to persist document");
            err
        })
    }
}
