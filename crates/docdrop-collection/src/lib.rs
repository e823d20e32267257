//! Document collection state machine for docdrop.
//!
//! This crate holds the logic behind a "documents to convert" widget:
//!
//! - **[`FileCollection`]** - deduplicated set of entries with change notifications
//! - **[`SelectionController`]** - multi-selection and delete-selected
//! - **[`DragSession`]** - drag-enter/move/leave/drop state
//! - **[`DocsWidget`]** - headless facade a GUI binds to
//! - **[`CollectionWorker`]** - owns a collection on a background task
//!
//! # Example
//!
//! ```rust,no_run
//! use docdrop_collection::{DocsWidget, DragPayload};
//!
//! let mut widget = DocsWidget::new();
//! let mut changes = widget.subscribe();
//!
//! widget.add_files(["/home/user/report.pdf"]);
//! widget.drag_enter(&DragPayload::files(["/home/user/scans"]));
//! widget.drop_payload(&DragPayload::files(["/home/user/scans"]));
//!
//! while let Ok(event) = changes.try_recv() {
//!     println!("revision {}: {:?}", event.revision, event.kind);
//! }
//! for row in widget.rows(480) {
//!     println!("{:<40} {:>10}", row.label, row.size);
//! }
//! ```

mod collection;
mod drag;
mod selection;
mod widget;
mod worker;

pub use collection::{AddOutcome, EVENT_CHANNEL_SIZE, FileCollection, RemoveOutcome, measure};
pub use drag::{DragPayload, DragResponse, DragSession, DragState, DropOutcome};
pub use selection::SelectionController;
pub use widget::{DocsWidget, EntryRow, format_size};
pub use worker::{CollectionHandle, CollectionWorker, WORKER_CHANNEL_SIZE};

// Re-export core types for convenience
pub use docdrop_core::{
    ChangeEvent, ChangeKind, CollectionConfig, CollectionError, EntryKind, FileEntry,
    SUPPORTED_EXTENSIONS, file_dialog_filter, is_supported_document,
};
pub use docdrop_scan::{Filesystem, LocalFilesystem, MemoryFilesystem};
