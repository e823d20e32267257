//! Error types for collection operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a document collection.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The filesystem could not stat or read the path.
    #[error("Cannot read {path}: {source}")]
    UnreadablePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The background collection worker has shut down.
    #[error("Collection worker stopped")]
    WorkerStopped,
}

impl CollectionError {
    /// Create an unreadable-path error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadablePath {
            path: path.into(),
            source,
        }
    }

    /// The path this error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::UnreadablePath { path, .. } => Some(path),
            _ => None,
        }
    }
}
