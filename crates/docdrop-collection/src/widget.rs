//! Headless documents widget.
//!
//! [`DocsWidget`] is what a GUI binds to: it owns the collection, the
//! selection and the drag session, keeps the selection consistent with the
//! collection, and exposes the rows and hints a renderer draws.

use std::path::{Path, PathBuf};

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

use docdrop_core::{
    ChangeEvent, CollectionConfig, CollectionError, EntryKind, FileEntry, available_width,
};
use docdrop_scan::{Filesystem, LocalFilesystem};

use crate::collection::{FileCollection, RemoveOutcome};
use crate::drag::{DragPayload, DragResponse, DragSession, DropOutcome};
use crate::selection::SelectionController;

/// Format size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// One rendered row of the document list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub path: PathBuf,
    /// Display name elided to the available width.
    pub label: String,
    /// Human-readable size.
    pub size: String,
    pub kind: EntryKind,
    pub selected: bool,
}

/// Document list with add/delete buttons and a drop target.
pub struct DocsWidget<F = LocalFilesystem> {
    collection: FileCollection<F>,
    selection: SelectionController,
    drag: DragSession,
    events: broadcast::Receiver<ChangeEvent>,
    label_reserve: usize,
}

impl DocsWidget<LocalFilesystem> {
    /// Create a widget over the local filesystem.
    pub fn new() -> Self {
        Self::with_config(CollectionConfig::default())
    }

    /// Create a widget over the local filesystem with a custom config.
    pub fn with_config(config: CollectionConfig) -> Self {
        let label_reserve = config.label_reserve;
        Self::from_collection(FileCollection::with_config(config), label_reserve)
    }
}

impl Default for DocsWidget<LocalFilesystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filesystem> DocsWidget<F> {
    /// Wrap an existing collection.
    ///
    /// `label_reserve` is the number of columns each row keeps for the size
    /// and delete button.
    pub fn from_collection(collection: FileCollection<F>, label_reserve: usize) -> Self {
        let events = collection.subscribe();
        Self {
            collection,
            selection: SelectionController::new(),
            drag: DragSession::new(),
            events,
            label_reserve,
        }
    }

    /// The underlying collection.
    pub fn collection(&self) -> &FileCollection<F> {
        &self.collection
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// The current drag session.
    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.collection.subscribe()
    }

    /// Add the files chosen in a file dialog.
    ///
    /// Unreadable paths are skipped and returned so the caller can alert the
    /// user. The selection is cleared afterwards.
    pub fn add_files<I, P>(&mut self, paths: I) -> Vec<CollectionError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut errors = Vec::new();
        for path in paths {
            if let Err(err) = self.collection.add(path) {
                warn!("not adding path: {err}");
                errors.push(err);
            }
        }
        self.selection.clear();
        self.sync_selection();
        errors
    }

    /// Delete button on a single row.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> RemoveOutcome {
        let outcome = self.collection.remove(path);
        self.sync_selection();
        outcome
    }

    /// Delete button for the selection.
    pub fn delete_selected(&mut self) -> usize {
        let removed = self.selection.delete_selected(&mut self.collection);
        self.sync_selection();
        removed
    }

    /// Replace the selection.
    pub fn select<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.selection.select(paths, &self.collection);
    }

    /// Flip one row's selection.
    pub fn toggle_selected(&mut self, path: impl AsRef<Path>) -> bool {
        self.selection.toggle(path, &self.collection)
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Forward a drag-enter event.
    pub fn drag_enter(&mut self, payload: &DragPayload) -> DragResponse {
        self.drag.on_drag_enter(payload)
    }

    /// Forward a drag-move event.
    pub fn drag_move(&self, payload: &DragPayload) -> DragResponse {
        self.drag.on_drag_move(payload)
    }

    /// Forward a drag-leave event.
    pub fn drag_leave(&mut self) {
        self.drag.on_drag_leave();
    }

    /// Forward a drop event.
    pub fn drop_payload(&mut self, payload: &DragPayload) -> DropOutcome {
        let outcome = self.drag.on_drop(payload, &mut self.collection);
        self.sync_selection();
        outcome
    }

    /// Rows in display order for a list `width` columns wide.
    pub fn rows(&self, width: usize) -> Vec<EntryRow> {
        let label_width = available_width(width, self.label_reserve);
        self.collection
            .list()
            .into_iter()
            .map(|entry| EntryRow {
                label: entry.label(label_width),
                size: format_size(entry.size_bytes),
                kind: entry.kind,
                selected: self.selection.is_selected(&entry.path),
                path: entry.path,
            })
            .collect()
    }

    /// Whether to show the "drop files here" hint.
    pub fn show_drop_hint(&self) -> bool {
        self.collection.is_empty() && !self.drag.is_active()
    }

    /// Counter shown while files hover over the list.
    pub fn drop_counter(&self) -> Option<String> {
        self.drag.counter_label()
    }

    /// Paths to hand to the conversion step, in display order.
    pub fn filenames(&self) -> Vec<PathBuf> {
        self.collection.paths()
    }

    /// Entries in display order whose paths are valid UTF-8, plus the paths
    /// of the entries that are not.
    ///
    /// Text formats such as JSON cannot carry the second group.
    pub fn utf8_entries(&self) -> (Vec<FileEntry>, Vec<PathBuf>) {
        let (entries, rest): (Vec<_>, Vec<_>) = self
            .collection
            .list()
            .into_iter()
            .partition(|entry| entry.path.to_str().is_some());
        (entries, rest.into_iter().map(|entry| entry.path).collect())
    }

    /// Apply pending change events to the selection.
    fn sync_selection(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.selection.apply(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "selection missed change events, resyncing");
                    self.selection.retain_existing(&self.collection);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdrop_scan::MemoryFilesystem;

    fn widget() -> DocsWidget<MemoryFilesystem> {
        let fs = MemoryFilesystem::new()
            .with_file("/in/a.pdf", 1024)
            .with_file("/in/b.docx", 2048)
            .with_file("/in/a-very-long-file-name-for-a-document.pdf", 1)
            .with_unreadable("/in/locked.pdf");
        DocsWidget::from_collection(FileCollection::with_filesystem(fs), 200)
    }

    #[test]
    fn test_drop_hint_follows_state() {
        let mut widget = widget();
        assert!(widget.show_drop_hint());

        widget.drag_enter(&DragPayload::files(["/in/a.pdf"]));
        assert!(!widget.show_drop_hint());
        assert_eq!(widget.drop_counter().as_deref(), Some("+1"));

        widget.drag_leave();
        assert!(widget.show_drop_hint());

        widget.add_files(["/in/a.pdf"]);
        assert!(!widget.show_drop_hint());
    }

    #[test]
    fn test_add_files_reports_unreadable() {
        let mut widget = widget();
        let errors = widget.add_files(["/in/a.pdf", "/in/locked.pdf", "/in/b.docx"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(widget.collection().len(), 2);
    }

    #[test]
    fn test_add_files_clears_selection() {
        let mut widget = widget();
        widget.add_files(["/in/a.pdf"]);
        widget.select(["/in/a.pdf"]);

        widget.add_files(["/in/b.docx"]);
        assert!(widget.selection().is_empty());
    }

    #[test]
    fn test_rows() {
        let mut widget = widget();
        widget.add_files([
            "/in/b.docx",
            "/in/a.pdf",
            "/in/a-very-long-file-name-for-a-document.pdf",
        ]);
        widget.select(["/in/b.docx"]);

        let rows = widget.rows(210);
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["a-very-lo…", "a.pdf", "b.docx"]);
        assert!(rows[1].size.ends_with("KiB"));
        assert!(rows[2].selected);
        assert!(!rows[1].selected);
    }

    #[test]
    fn test_row_delete_prunes_selection() {
        let mut widget = widget();
        widget.add_files(["/in/a.pdf", "/in/b.docx"]);
        widget.select(["/in/a.pdf", "/in/b.docx"]);

        widget.remove("/in/a.pdf");
        assert!(!widget.selection().is_selected("/in/a.pdf"));
        assert!(widget.selection().is_selected("/in/b.docx"));
    }

    #[cfg(unix)]
    #[test]
    fn test_utf8_entries_split_out_raw_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = PathBuf::from(OsStr::from_bytes(b"/in/r\xffport.pdf"));
        let fs = MemoryFilesystem::new()
            .with_file("/in/a.pdf", 10)
            .with_file(raw.clone(), 20);
        let mut widget = DocsWidget::from_collection(FileCollection::with_filesystem(fs), 0);
        assert!(widget.add_files([Path::new("/in/a.pdf"), raw.as_path()]).is_empty());

        assert!(serde_json::to_string(&widget.filenames()).is_err());

        let (entries, skipped) = widget.utf8_entries();
        assert_eq!(skipped, [raw]);
        assert_eq!(entries.len(), 1);
        let json = serde_json::to_string(&entries).unwrap();
        assert!(json.contains("/in/a.pdf"));
    }

    #[test]
    fn test_format_size() {
        assert!(format_size(0).ends_with(" B"));
        assert!(format_size(1024).starts_with('1'));
        assert!(format_size(1024).ends_with("KiB"));
    }
}
