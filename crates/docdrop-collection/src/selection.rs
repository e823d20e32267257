//! Multi-selection over a collection's entries.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use docdrop_core::{ChangeEvent, absolute_path};
use docdrop_scan::Filesystem;

use crate::collection::FileCollection;

/// Tracks which entries are selected.
///
/// The selection only ever names paths the collection tracks: `select`
/// drops unknown paths, and [`SelectionController::apply`] prunes paths as the
/// collection reports them removed.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: BTreeSet<PathBuf>,
}

impl SelectionController {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with the tracked paths among `paths`.
    pub fn select<F, I, P>(&mut self, paths: I, collection: &FileCollection<F>)
    where
        F: Filesystem,
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.selected = paths
            .into_iter()
            .map(|p| absolute_path(p.as_ref()))
            .filter(|p| collection.contains(p))
            .collect();
    }

    /// Flip one path in or out of the selection. Returns whether it is now selected.
    pub fn toggle<F: Filesystem>(
        &mut self,
        path: impl AsRef<Path>,
        collection: &FileCollection<F>,
    ) -> bool {
        let path = absolute_path(path.as_ref());
        if self.selected.remove(&path) {
            return false;
        }
        if collection.contains(&path) {
            self.selected.insert(path);
            return true;
        }
        false
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Check if a path is selected.
    pub fn is_selected(&self, path: impl AsRef<Path>) -> bool {
        self.selected.contains(&absolute_path(path.as_ref()))
    }

    /// Selected paths in path order.
    pub fn selected(&self) -> impl Iterator<Item = &PathBuf> {
        self.selected.iter()
    }

    /// Number of selected paths.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Remove every selected entry from `collection`, then clear the selection.
    ///
    /// Does nothing (and sends no notification) when the selection is empty.
    pub fn delete_selected<F: Filesystem>(&mut self, collection: &mut FileCollection<F>) -> usize {
        if self.selected.is_empty() {
            return 0;
        }
        let paths = std::mem::take(&mut self.selected);
        let removed = collection.remove_all(&paths);
        debug!(selected = paths.len(), removed, "deleted selection");
        removed
    }

    /// Drop any paths a change event reports as removed.
    pub fn apply(&mut self, event: &ChangeEvent) {
        for path in event.removed_paths() {
            self.selected.remove(path);
        }
    }

    /// Drop any paths the collection no longer tracks.
    pub fn retain_existing<F: Filesystem>(&mut self, collection: &FileCollection<F>) {
        self.selected.retain(|p| collection.contains(p));
    }
}
