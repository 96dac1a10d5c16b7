//! Timestamp repair.
//!
//! Local clocks and filesystems can report an older `updated_at` for a newer
//! observation of the same entry. The remote replica orders versions by this
//! field, so it must never go backwards.

use tracing::debug;

use crate::document::Metadata;

/// Keep `doc.updated_at` at least as late as `previous.updated_at`.
///
/// `previous` is only read.
pub fn assign_max_date(mut doc: Metadata, previous: Option<&Metadata>) -> Metadata {
    let Some(previous) = previous else {
        return doc;
    };

    if previous.updated_at > doc.updated_at {
        debug!(
            current = %doc.updated_at,
            previous = %previous.updated_at,
            "Timestamp went backwards, keeping previous one"
        );
        doc.updated_at = previous.updated_at;
    }

    doc
}
