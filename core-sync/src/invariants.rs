//! Last check before a document is handed to the persistence collaborator.
//!
//! Path and checksum problems are caught earlier by the validators. Reaching
//! an error here means a pipeline stage was skipped.

use crate::document::Metadata;
use crate::error::{MetadataError, Result};

/// Return `doc` unchanged, or the field path that makes it unstorable
pub fn invariants(doc: Metadata) -> Result<Metadata> {
    if doc.sides.is_none() {
        return Err(violation("sides", &doc));
    }

    if doc.remote.as_ref().is_some_and(|remote| !remote.has_rev()) {
        return Err(violation("sides.remote", &doc));
    }

    Ok(doc)
}

fn violation(field: &str, doc: &Metadata) -> MetadataError {
    MetadataError::InvariantViolation {
        field: field.to_string(),
        path: doc.path.clone(),
    }
}
