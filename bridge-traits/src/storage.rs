//! Filesystem Observation Contract
//!
//! The filesystem watcher hands the core one [`FileStat`] per observed entry.
//! The core only reads it; how it was obtained is up to the host adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Any of the owner/group/other execute bits
pub const EXECUTE_BITS: u32 = 0o111;

/// Stat snapshot of a single filesystem entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// Last content modification
    pub mtime: DateTime<Utc>,
    /// Last inode/metadata change
    pub ctime: DateTime<Utc>,
    /// Local filesystem identifier
    pub ino: Option<u64>,
    /// Size in bytes (meaningless for directories)
    pub size: u64,
    /// Unix permission bits; `None` on platforms without them
    pub mode: Option<u32>,
}

impl FileStat {
    pub fn new(mtime: DateTime<Utc>, ctime: DateTime<Utc>) -> Self {
        Self {
            mtime,
            ctime,
            ino: None,
            size: 0,
            mode: None,
        }
    }

    pub fn with_ino(mut self, ino: u64) -> Self {
        self.ino = Some(ino);
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// `Some(true)` when any execute bit is set, `None` without permission bits
    pub fn is_executable(&self) -> Option<bool> {
        self.mode.map(|mode| mode & EXECUTE_BITS != 0)
    }
}
