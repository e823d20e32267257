//! The filesystem collaborator trait and its local implementation.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use docdrop_core::{CollectionConfig, CollectionError, PathStat};

use crate::walk::summarize_dir;

/// Filesystem operations a collection needs to measure a path.
///
/// Both calls are synchronous and may block on I/O, so callers that must stay
/// responsive should run them on a blocking pool.
pub trait Filesystem: Send + Sync {
    /// Classify a path and report its direct size.
    ///
    /// A path that does not exist or cannot be accessed is an error.
    fn stat(&self, path: &Path) -> Result<PathStat, CollectionError>;

    /// Recursive sum of the regular files below a directory.
    fn dir_size(&self, path: &Path) -> Result<u64, CollectionError>;
}

impl<F: Filesystem + ?Sized> Filesystem for Arc<F> {
    fn stat(&self, path: &Path) -> Result<PathStat, CollectionError> {
        (**self).stat(path)
    }

    fn dir_size(&self, path: &Path) -> Result<u64, CollectionError> {
        (**self).dir_size(path)
    }
}

/// Filesystem backed by `std::fs` and jwalk.
#[derive(Debug, Clone, Default)]
pub struct LocalFilesystem {
    config: CollectionConfig,
}

impl LocalFilesystem {
    /// Create a local filesystem with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a local filesystem with a custom configuration.
    pub fn with_config(config: CollectionConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }
}

impl Filesystem for LocalFilesystem {
    fn stat(&self, path: &Path) -> Result<PathStat, CollectionError> {
        let metadata = fs::metadata(path).map_err(|e| CollectionError::io(path, e))?;

        if metadata.is_dir() {
            if self.config.require_readable {
                fs::read_dir(path).map_err(|e| CollectionError::io(path, e))?;
            }
            return Ok(PathStat::directory());
        }

        // Only regular files get the open check; opening a FIFO would block.
        if self.config.require_readable && metadata.is_file() {
            fs::File::open(path).map_err(|e| CollectionError::io(path, e))?;
        }
        Ok(PathStat::file(metadata.len()))
    }

    fn dir_size(&self, path: &Path) -> Result<u64, CollectionError> {
        summarize_dir(path, &self.config).map(|summary| summary.total_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdrop_core::EntryKind;
    use tempfile::TempDir;

    #[test]
    fn test_stat_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.pdf");
        fs::write(&path, vec![0u8; 5000]).unwrap();

        let stat = LocalFilesystem::new().stat(&path).unwrap();
        assert_eq!(stat.kind, EntryKind::File);
        assert_eq!(stat.size, 5000);
    }

    #[test]
    fn test_stat_directory() {
        let temp = TempDir::new().unwrap();
        let stat = LocalFilesystem::new().stat(temp.path()).unwrap();
        assert_eq!(stat.kind, EntryKind::Directory);
    }

    #[test]
    fn test_stat_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.docx");

        let err = LocalFilesystem::new().stat(&missing).unwrap_err();
        assert!(matches!(err, CollectionError::UnreadablePath { .. }));
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[test]
    fn test_arc_delegates() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("x.txt"), "hello").unwrap();

        let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        assert_eq!(fs.dir_size(temp.path()).unwrap(), 5);
    }
}
