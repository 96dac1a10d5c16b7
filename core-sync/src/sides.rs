//! Per-replica write counters.
//!
//! `sides.local` and `sides.remote` record up to which revision each replica
//! has written or observed a document. The side with the highest counter holds
//! the latest version; the other one is behind and needs to catch up.

use crate::document::{Metadata, Side, Sides};
use crate::revision::extract_rev_number;

/// Record a write by `side`.
///
/// The counter becomes the previous document's revision generation plus one,
/// so it reflects the revision history even when calls arrive out of order.
/// The counter saturates at `u64::MAX`. The other side's counter is left
/// untouched.
pub fn mark_side(side: Side, mut doc: Metadata, previous: Option<&Metadata>) -> Metadata {
    let generation = extract_rev_number(previous.and_then(|prev| prev.rev.as_deref()));
    doc.sides
        .get_or_insert_with(Sides::default)
        .set(side, generation.saturating_add(1));
    doc
}

/// Highest side counter, 0 when none is set
pub fn target(doc: &Metadata) -> u64 {
    doc.sides
        .map(|sides| sides.local.unwrap_or(0).max(sides.remote.unwrap_or(0)))
        .unwrap_or(0)
}

fn side_value(side: Side, doc: &Metadata) -> u64 {
    doc.sides.and_then(|sides| sides.get(side)).unwrap_or(0)
}

/// `side` holds exactly the latest version
pub fn is_up_to_date(side: Side, doc: &Metadata) -> bool {
    side_value(side, doc) == target(doc)
}

/// `side` holds the latest version or something newer
pub fn is_at_least_up_to_date(side: Side, doc: &Metadata) -> bool {
    side_value(side, doc) >= target(doc)
}

/// The replica lagging behind, if the two disagree
pub fn outdated_side(doc: &Metadata) -> Option<Side> {
    let local = side_value(Side::Local, doc);
    let remote = side_value(Side::Remote, doc);

    match local.cmp(&remote) {
        std::cmp::Ordering::Less => Some(Side::Local),
        std::cmp::Ordering::Greater => Some(Side::Remote),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc() -> Metadata {
        Metadata::folder("foo", Utc::now())
    }

    fn with_sides(local: Option<u64>, remote: Option<u64>) -> Metadata {
        doc().with_sides(Sides { local, remote })
    }

    #[test]
    fn test_mark_side_without_previous() {
        let marked = mark_side(Side::Local, doc(), None);
        assert_eq!(
            marked.sides,
            Some(Sides {
                local: Some(1),
                remote: None
            })
        );
    }

    #[test]
    fn test_mark_side_follows_previous_revision() {
        let previous = doc().with_rev("5-0123");
        let marked = mark_side(Side::Local, with_sides(Some(3), Some(5)), Some(&previous));
        let sides = marked.sides.unwrap();
        assert_eq!(sides.local, Some(6));
        assert_eq!(sides.remote, Some(5));
    }

    #[test]
    fn test_mark_side_with_malformed_previous_revision() {
        let previous = doc().with_rev("garbage");
        let marked = mark_side(Side::Remote, doc(), Some(&previous));
        assert_eq!(marked.sides.unwrap().remote, Some(1));
    }

    #[test]
    fn test_mark_side_saturates_at_largest_generation() {
        let previous = doc().with_rev("18446744073709551615-abc");
        let marked = mark_side(Side::Local, with_sides(None, Some(7)), Some(&previous));
        let sides = marked.sides.unwrap();
        assert_eq!(sides.local, Some(u64::MAX));
        assert_eq!(sides.remote, Some(7));
        assert_eq!(outdated_side(&marked), Some(Side::Remote));
    }

    #[test]
    fn test_target() {
        assert_eq!(target(&doc()), 0);
        assert_eq!(target(&with_sides(Some(3), None)), 3);
        assert_eq!(target(&with_sides(Some(3), Some(5))), 5);
    }

    #[test]
    fn test_up_to_date() {
        let doc = with_sides(Some(2), Some(3));
        assert!(!is_up_to_date(Side::Local, &doc));
        assert!(is_up_to_date(Side::Remote, &doc));
        assert!(!is_at_least_up_to_date(Side::Local, &doc));
        assert!(is_at_least_up_to_date(Side::Remote, &doc));
    }

    #[test]
    fn test_outdated_side() {
        assert_eq!(outdated_side(&with_sides(Some(2), Some(3))), Some(Side::Local));
        assert_eq!(outdated_side(&with_sides(Some(4), None)), Some(Side::Remote));
        assert_eq!(outdated_side(&with_sides(Some(4), Some(4))), None);
        assert_eq!(outdated_side(&doc()), None);
    }
}
