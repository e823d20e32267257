//! Ordered, deduplicated set of tracked documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::broadcast;
use tracing::debug;

use docdrop_core::{
    ChangeEvent, ChangeKind, CollectionConfig, CollectionError, EntryKind, FileEntry,
    absolute_path,
};
use docdrop_scan::{Filesystem, LocalFilesystem};

/// Default number of buffered change notifications per subscriber.
pub const EVENT_CHANNEL_SIZE: usize = 100;

/// Result of an `add` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The path was new and has been inserted.
    Added(FileEntry),
    /// The path was already tracked; nothing changed.
    Duplicate,
}

impl AddOutcome {
    /// Check if a new entry was inserted.
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

/// Result of a `remove` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entry was tracked and has been removed.
    Removed(FileEntry),
    /// The path was not tracked.
    Absent,
}

/// Measure a path through the filesystem collaborator.
///
/// Files take their size from `stat`; directories are walked with `dir_size`.
pub fn measure<F: Filesystem + ?Sized>(fs: &F, path: &Path) -> Result<FileEntry, CollectionError> {
    let stat = fs.stat(path)?;
    let size = match stat.kind {
        EntryKind::File => stat.size,
        EntryKind::Directory => fs.dir_size(path)?,
    };
    Ok(FileEntry::new(path, stat.kind, size))
}

/// The set of documents the user has picked, keyed by absolute path.
///
/// Every mutating call publishes a [`ChangeEvent`] to subscribers, except a
/// duplicate `add` and a failed `add`, which leave the collection untouched.
pub struct FileCollection<F = LocalFilesystem> {
    fs: Arc<F>,
    entries: IndexMap<PathBuf, FileEntry>,
    revision: u64,
    events: broadcast::Sender<ChangeEvent>,
}

impl FileCollection<LocalFilesystem> {
    /// Create an empty collection over the local filesystem.
    pub fn new() -> Self {
        Self::with_filesystem(LocalFilesystem::new())
    }

    /// Create an empty collection over the local filesystem with a custom config.
    pub fn with_config(config: CollectionConfig) -> Self {
        let capacity = config.event_capacity;
        Self::from_parts(LocalFilesystem::with_config(config), capacity)
    }
}

impl Default for FileCollection<LocalFilesystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filesystem> FileCollection<F> {
    /// Create an empty collection over an injected filesystem.
    pub fn with_filesystem(fs: F) -> Self {
        Self::from_parts(fs, EVENT_CHANNEL_SIZE)
    }

    /// Create an empty collection with an explicit notification buffer size.
    pub fn from_parts(fs: F, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            fs: Arc::new(fs),
            entries: IndexMap::new(),
            revision: 0,
            events,
        }
    }

    /// The filesystem collaborator.
    pub fn filesystem(&self) -> &Arc<F> {
        &self.fs
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<ChangeEvent> {
        self.events.clone()
    }

    /// Number of notifications published so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Track `path`, measuring it through the filesystem collaborator.
    ///
    /// Adding a path that is already tracked is a silent no-op. If the path
    /// cannot be read nothing is inserted and no notification is sent.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<AddOutcome, CollectionError> {
        let path = absolute_path(path.as_ref());
        if self.entries.contains_key(&path) {
            debug!(path = %path.display(), "already tracked");
            return Ok(AddOutcome::Duplicate);
        }

        let entry = measure(&*self.fs, &path)?;
        Ok(self.insert(entry))
    }

    /// Insert an already measured entry.
    pub fn insert(&mut self, entry: FileEntry) -> AddOutcome {
        if self.entries.contains_key(&entry.path) {
            return AddOutcome::Duplicate;
        }

        debug!(
            path = %entry.path.display(),
            kind = ?entry.kind,
            bytes = entry.size_bytes,
            "added entry"
        );
        self.entries.insert(entry.path.clone(), entry.clone());
        self.notify(ChangeKind::Added {
            path: entry.path.clone(),
        });
        AddOutcome::Added(entry)
    }

    /// Stop tracking `path`.
    ///
    /// A notification is sent even when the path was not tracked.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> RemoveOutcome {
        let path = absolute_path(path.as_ref());
        let outcome = match self.entries.shift_remove(&path) {
            Some(entry) => RemoveOutcome::Removed(entry),
            None => RemoveOutcome::Absent,
        };

        let paths = match &outcome {
            RemoveOutcome::Removed(entry) => vec![entry.path.clone()],
            RemoveOutcome::Absent => Vec::new(),
        };
        debug!(path = %path.display(), removed = paths.len(), "remove");
        self.notify(ChangeKind::Removed { paths });
        outcome
    }

    /// Remove several paths with a single notification at the end.
    ///
    /// Returns how many tracked entries were removed.
    pub fn remove_all<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut removed = Vec::new();
        for path in paths {
            let path = absolute_path(path.as_ref());
            if let Some(entry) = self.entries.shift_remove(&path) {
                removed.push(entry.path);
            }
        }

        let count = removed.len();
        debug!(removed = count, "bulk remove");
        self.notify(ChangeKind::Removed { paths: removed });
        count
    }

    /// Entries in display order: by display name, byte-wise ascending.
    pub fn list(&self) -> Vec<FileEntry> {
        let mut entries: Vec<FileEntry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| {
            a.display_name
                .as_bytes()
                .cmp(b.display_name.as_bytes())
                .then_with(|| a.path.cmp(&b.path))
        });
        entries
    }

    /// Paths in display order; the hand-off to the conversion step.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.list().into_iter().map(|entry| entry.path).collect()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values()
    }

    /// Look up an entry by path.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&FileEntry> {
        self.entries.get(&absolute_path(path.as_ref()))
    }

    /// Check if a path is tracked.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(&absolute_path(path.as_ref()))
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combined size of all entries.
    pub fn total_size(&self) -> u64 {
        self.entries.values().map(|entry| entry.size_bytes).sum()
    }

    /// Publish the end of a drag-and-drop gesture.
    pub(crate) fn notify_dropped(&mut self, added: usize) {
        self.notify(ChangeKind::Dropped { added });
    }

    fn notify(&mut self, kind: ChangeKind) {
        self.revision += 1;
        // No subscribers is fine.
        let _ = self.events.send(ChangeEvent::new(self.revision, kind));
    }
}

impl<F> std::fmt::Debug for FileCollection<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCollection")
            .field("entries", &self.entries.len())
            .field("revision", &self.revision)
            .finish()
    }
}
