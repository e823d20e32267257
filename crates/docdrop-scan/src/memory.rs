//! In-memory filesystem for tests and previews.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use docdrop_core::{CollectionError, PathStat};

use crate::filesystem::Filesystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    File(u64),
    Directory,
    Unreadable,
}

/// A fixed tree of files and directories held in memory.
///
/// Directories are implied by the files below them, so only files (and any
/// empty directories) need to be declared.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    nodes: BTreeMap<PathBuf, Node>,
    stat_calls: AtomicUsize,
}

impl MemoryFilesystem {
    /// Create an empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file of `size` bytes, creating its parent directories.
    pub fn with_file(mut self, path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.nodes.insert(path, Node::File(size));
        self
    }

    /// Add an empty directory.
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.nodes.insert(path, Node::Directory);
        self
    }

    /// Add a path that exists but cannot be read.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.nodes.insert(path, Node::Unreadable);
        self
    }

    /// Number of `stat` calls served so far.
    pub fn stat_calls(&self) -> usize {
        self.stat_calls.load(Ordering::Relaxed)
    }

    fn add_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Directory);
        }
    }

    fn lookup(&self, path: &Path) -> Result<Node, CollectionError> {
        match self.nodes.get(path) {
            Some(Node::Unreadable) => Err(CollectionError::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            )),
            Some(node) => Ok(*node),
            None => Err(CollectionError::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            )),
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn stat(&self, path: &Path) -> Result<PathStat, CollectionError> {
        self.stat_calls.fetch_add(1, Ordering::Relaxed);
        match self.lookup(path)? {
            Node::File(size) => Ok(PathStat::file(size)),
            _ => Ok(PathStat::directory()),
        }
    }

    fn dir_size(&self, path: &Path) -> Result<u64, CollectionError> {
        self.lookup(path)?;
        let total = self
            .nodes
            .iter()
            .filter(|(p, _)| p.as_path() != path && p.starts_with(path))
            .map(|(_, node)| match node {
                Node::File(size) => *size,
                _ => 0,
            })
            .sum();
        Ok(total)
    }
}
