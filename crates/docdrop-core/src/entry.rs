//! Tracked file and directory entries.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Type of a tracked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file (or a symlink resolving to one).
    File,
    /// Directory; its size is the recursive sum of the files inside it.
    Directory,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }
}

/// Result of a filesystem stat: what a path is and how large it is.
///
/// For directories `size` is the size reported by the stat call itself,
/// not the recursive total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStat {
    pub kind: EntryKind,
    pub size: u64,
}

impl PathStat {
    /// Stat result for a regular file.
    pub fn file(size: u64) -> Self {
        Self {
            kind: EntryKind::File,
            size,
        }
    }

    /// Stat result for a directory.
    pub fn directory() -> Self {
        Self {
            kind: EntryKind::Directory,
            size: 0,
        }
    }
}

/// One tracked file or directory.
///
/// Entries are immutable once created. The path is the identity key within a
/// collection; everything else is derived from it when the entry is measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path of the entry.
    pub path: PathBuf,

    /// Basename shown to the user.
    pub display_name: CompactString,

    /// File or directory.
    pub kind: EntryKind,

    /// Size in bytes (recursive total for directories).
    pub size_bytes: u64,
}

impl FileEntry {
    /// Create an entry for a regular file.
    pub fn new_file(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self::new(path, EntryKind::File, size_bytes)
    }

    /// Create an entry for a directory with an already computed total size.
    pub fn new_directory(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self::new(path, EntryKind::Directory, size_bytes)
    }

    /// Create an entry, deriving the display name from the path.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, size_bytes: u64) -> Self {
        let path = path.into();
        let display_name = display_name(&path);
        Self {
            path,
            display_name,
            kind,
            size_bytes,
        }
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this entry is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Label for this entry, elided to fit `width` display columns.
    pub fn label(&self, width: usize) -> String {
        crate::label::truncate_label(&self.display_name, width)
    }
}

/// Basename of a path with trailing separators ignored.
///
/// Paths without a final component (`/`, `C:\`) display as themselves.
pub fn display_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => CompactString::new(path.to_string_lossy()),
    }
}

/// Make `path` absolute against the current directory.
///
/// Symlinks are not resolved, so the identity of an entry is the path the
/// user supplied. Falls back to the input if the current directory is gone.
pub fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
