//! Inode tracking for hardlink deduplication.

use std::collections::HashSet;

/// Identity of a file on disk: (inode, device).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InodeKey {
    /// Inode number.
    pub inode: u64,
    /// Device ID.
    pub device: u64,
}

impl InodeKey {
    /// Create a new inode key.
    pub fn new(inode: u64, device: u64) -> Self {
        Self { inode, device }
    }

    /// Read the key from file metadata (Unix only).
    #[cfg(unix)]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self::new(metadata.ino(), metadata.dev()))
    }

    #[cfg(not(unix))]
    pub fn from_metadata(_metadata: &std::fs::Metadata) -> Option<Self> {
        None
    }
}

/// Tracks seen inodes so a hard-linked file is only counted once.
#[derive(Debug, Default)]
pub struct InodeTracker {
    seen: HashSet<InodeKey>,
}

impl InodeTracker {
    /// Create a new inode tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an inode. Returns `true` if this is the first time seeing it.
    pub fn track(&mut self, key: InodeKey) -> bool {
        self.seen.insert(key)
    }

    /// Get the number of unique inodes tracked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if no inodes have been tracked.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
