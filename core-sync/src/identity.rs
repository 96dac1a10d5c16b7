//! Canonical document identity.
//!
//! The id is the primary key in the persistence collaborator. On
//! case-insensitive filesystems two paths differing only by case name the same
//! entry, so their ids must collide too.

use bridge_traits::Platform;

use crate::document::Metadata;

/// Id a document at `path` gets on `platform`
pub fn id_for(path: &str, platform: Platform) -> String {
    if platform.is_case_sensitive() {
        path.to_string()
    } else {
        path.to_uppercase()
    }
}

/// Derive `doc.id` from `doc.path`. Idempotent.
pub fn assign_id(mut doc: Metadata, platform: Platform) -> Metadata {
    doc.id = id_for(&doc.path, platform);
    doc
}
