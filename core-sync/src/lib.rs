//! # Sync Metadata Core
//!
//! Decides what a synced entry *is* and whether it changed, for a
//! bidirectional sync between a local filesystem and a remote replica.
//!
//! ## Overview
//!
//! No clock, lock or transaction spans the two replicas. Every consistency
//! guarantee of the sync comes from the facts computed here:
//! - Canonical identity of an entry, under the case rules of its platform
//! - Whether two snapshots are indistinguishable for sync purposes
//! - Monotonic timestamps and per-replica write counters
//! - Whether a document is fit to be persisted
//!
//! This crate performs no I/O and never decides which action to take.
//!
//! ## Components
//!
//! - **Documents** (`document`): The metadata document, tagged file/folder
//! - **Path Validator** (`path`): Rejects paths escaping the sync root
//! - **Checksum Validator** (`checksum`): Canonical base64 digest format
//! - **Incompatibility Detector** (`incompatibilities`): Names a target platform refuses
//! - **Revision Tracker** (`revision`): Generation numbers of revision tokens
//! - **Identity Assigner** (`identity`): Platform-aware canonical ids
//! - **Timestamp Reconciler** (`timestamp`): Keeps `updated_at` monotonic
//! - **Equivalence Comparator** (`equivalence`): `same_file`, `same_folder`, `same_binary`
//! - **Document Builders** (`builders`): Documents from stat snapshots
//! - **Side Marking** (`sides`): Per-replica write counters
//! - **Invariant Enforcer** (`invariants`): Last gate before persistence
//! - **Reconciler** (`reconciler`): The pipeline bound to a configuration

pub mod builders;
pub mod checksum;
pub mod document;
pub mod equivalence;
pub mod error;
pub mod identity;
pub mod incompatibilities;
pub mod invariants;
pub mod path;
pub mod reconciler;
pub mod revision;
pub mod sides;
pub mod timestamp;

pub use error::{MetadataError, Result};
pub use document::{DocKind, DocType, FileAttrs, Metadata, RemoteLink, Side, Sides};
pub use builders::{build_dir, build_file};
pub use checksum::invalid_checksum;
pub use equivalence::{same_binary, same_file, same_folder};
pub use identity::assign_id;
pub use incompatibilities::{
    detect_platform_incompatibilities, Incompatibility, IncompatibilityKind,
};
pub use invariants::invariants;
pub use path::invalid_path;
pub use reconciler::{Observation, Reconciler};
pub use revision::{extract_rev_number, Revision};
pub use sides::mark_side;
pub use timestamp::assign_max_date;
