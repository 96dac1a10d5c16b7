//! Canonical content digests.
//!
//! Checksums are compared as strings, so only one encoding is accepted:
//! standard base64 of a 16-byte digest, padded (`==`). Hex digests, longer
//! digests and unpadded base64 are rejected rather than converted.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::document::{DocKind, Metadata};

/// Raw digest length in bytes
pub const DIGEST_LEN: usize = 16;

/// Whether `checksum` is in canonical form
pub fn is_canonical(checksum: &str) -> bool {
    if checksum.is_empty() {
        return false;
    }

    match STANDARD.decode(checksum) {
        // Re-encoding guards against non-canonical trailing bits
        Ok(bytes) => bytes.len() == DIGEST_LEN && STANDARD.encode(&bytes) == checksum,
        Err(_) => false,
    }
}

/// Whether a file document lacks a canonical checksum. Folders are always valid.
pub fn invalid_checksum(doc: &Metadata) -> bool {
    match &doc.kind {
        DocKind::Folder => false,
        DocKind::File(attrs) => !attrs.checksum.as_deref().is_some_and(is_canonical),
    }
}
