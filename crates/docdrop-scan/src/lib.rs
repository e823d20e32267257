//! Filesystem access for docdrop.
//!
//! This crate provides the filesystem collaborator used by a document
//! collection: a [`Filesystem`] trait with a `stat` call and a recursive
//! directory size, a real implementation backed by jwalk, and an in-memory
//! implementation for tests and previews.
//!
//! # Example
//!
//! ```rust,no_run
//! use docdrop_scan::{Filesystem, LocalFilesystem};
//! use std::path::Path;
//!
//! let fs = LocalFilesystem::new();
//! let stat = fs.stat(Path::new("/path/to/documents")).unwrap();
//! if stat.kind.is_dir() {
//!     let total = fs.dir_size(Path::new("/path/to/documents")).unwrap();
//!     println!("Total size: {total} bytes");
//! }
//! ```

mod filesystem;
mod inode;
mod memory;
mod walk;

pub use filesystem::{Filesystem, LocalFilesystem};
pub use inode::{InodeKey, InodeTracker};
pub use memory::MemoryFilesystem;
pub use walk::{DirSummary, summarize_dir};

// Re-export core types for convenience
pub use docdrop_core::{CollectionConfig, CollectionError, EntryKind, PathStat};
