//! Change notifications emitted by a collection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What changed in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// A new entry was inserted.
    Added { path: PathBuf },
    /// A remove request completed. `paths` holds the entries that were
    /// actually removed and may be empty.
    Removed { paths: Vec<PathBuf> },
    /// A drag-and-drop gesture finished adding `added` new entries.
    Dropped { added: usize },
}

/// Immutable change notification.
///
/// Carries enough to let a renderer skip work, but a full re-read of the
/// collection is always a valid response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Collection revision after this change.
    pub revision: u64,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    /// Create a new change event.
    pub fn new(revision: u64, kind: ChangeKind) -> Self {
        Self { revision, kind }
    }

    /// Paths this event removed from the collection.
    pub fn removed_paths(&self) -> &[PathBuf] {
        match &self.kind {
            ChangeKind::Removed { paths } => paths,
            _ => &[],
        }
    }
}
