//! Core types for docdrop.
//!
//! This crate provides the data structures shared by the rest of the
//! docdrop workspace: tracked file entries, change events, configuration,
//! errors, the document types a file dialog offers, and label truncation
//! for narrow displays.

mod config;
mod document;
mod entry;
mod error;
mod event;
mod label;

pub use config::{CollectionConfig, CollectionConfigBuilder};
pub use document::{SUPPORTED_EXTENSIONS, file_dialog_filter, is_supported_document};
pub use entry::{EntryKind, FileEntry, PathStat, absolute_path, display_name};
pub use error::CollectionError;
pub use event::{ChangeEvent, ChangeKind};
pub use label::{ELLIPSIS, available_width, display_width, pad_label, truncate_label};
