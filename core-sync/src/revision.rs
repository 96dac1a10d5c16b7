//! Revision tokens.
//!
//! A replica tags every stored version of a document with an opaque token of
//! the form `"<generation>-<opaque>"`. Only the generation is meaningful to the
//! core; malformed tokens are tolerated and read as generation 0.

use std::fmt;

/// Parsed revision token
///
/// Displays as the token it was parsed from, so malformed tokens survive a
/// parse unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Revision {
    pub generation: u64,
    /// Everything after the first `-`, or the whole token when there is none
    pub opaque: String,
    token: String,
}

impl Revision {
    /// Parse a token. Never fails: a missing or unreadable generation is 0.
    pub fn parse(token: &str) -> Self {
        let (head, opaque) = match token.split_once('-') {
            Some((head, tail)) => (head, tail),
            None => (token, token),
        };

        Self {
            generation: leading_integer(head).unwrap_or(0),
            opaque: opaque.to_string(),
            token: token.to_string(),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// Generation number of a revision token, 0 when absent or malformed
pub fn extract_rev_number(token: Option<&str>) -> u64 {
    token.map_or(0, |token| Revision::parse(token).generation)
}

fn leading_integer(text: &str) -> Option<u64> {
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(idx, _)| idx);

    text[..end].parse().ok()
}
