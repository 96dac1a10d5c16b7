//! Target platform filesystem rules.
//!
//! The two replicas of a synced tree may live on hosts with different
//! filesystem semantics. Every platform-dependent decision in the core goes
//! through a [`Platform`] value so that, for instance, Windows naming rules
//! can be checked from a Linux test run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

const WINDOWS_RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];
const MACOS_RESERVED_CHARS: &[char] = &[':'];

const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

const WINDOWS_FORBIDDEN_LAST_CHARS: &[char] = &['.', ' '];

/// Filesystem flavour of a replica's host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Case-sensitive, no reserved characters
    Linux,
    /// Case-insensitive, `:` reserved
    #[serde(rename = "macos")]
    MacOs,
    /// Case-insensitive, device names and several punctuation marks reserved
    Windows,
}

impl Platform {
    /// Rules of the host this binary was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Preferred path separator
    pub fn separator(&self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Linux | Self::MacOs => '/',
        }
    }

    /// Every character the platform accepts as a path separator
    pub fn separators(&self) -> &'static [char] {
        match self {
            Self::Windows => &['\\', '/'],
            Self::Linux | Self::MacOs => &['/'],
        }
    }

    /// Whether two paths differing only by case name distinct entries
    pub fn is_case_sensitive(&self) -> bool {
        matches!(self, Self::Linux)
    }

    /// Characters forbidden inside a single path segment.
    ///
    /// Separators are never listed: they split segments instead.
    pub fn reserved_chars(&self) -> &'static [char] {
        match self {
            Self::Windows => WINDOWS_RESERVED_CHARS,
            Self::MacOs => MACOS_RESERVED_CHARS,
            Self::Linux => &[],
        }
    }

    /// Segment names (compared case-insensitively, extension ignored) the
    /// platform refuses to create
    pub fn reserved_names(&self) -> &'static [&'static str] {
        match self {
            Self::Windows => WINDOWS_RESERVED_NAMES,
            Self::Linux | Self::MacOs => &[],
        }
    }

    /// Characters a segment may not end with
    pub fn forbidden_last_chars(&self) -> &'static [char] {
        match self {
            Self::Windows => WINDOWS_FORBIDDEN_LAST_CHARS,
            Self::Linux | Self::MacOs => &[],
        }
    }

    /// Longest segment, in bytes, the platform accepts
    pub fn name_max_bytes(&self) -> Option<usize> {
        match self {
            Self::Windows | Self::MacOs => Some(255),
            Self::Linux => None,
        }
    }

    /// Longest relative path, in bytes, the platform accepts
    pub fn path_max_bytes(&self) -> Option<usize> {
        match self {
            Self::Windows => Some(259),
            Self::MacOs => Some(1023),
            Self::Linux => None,
        }
    }

    /// Whether the platform imposes any naming restriction at all
    pub fn has_path_restrictions(&self) -> bool {
        !matches!(self, Self::Linux)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::MacOs),
            "windows" | "win32" => Ok(Self::Windows),
            other => Err(BridgeError::UnknownPlatform(other.to_string())),
        }
    }
}
