//! Recursive directory sizing with jwalk.

use std::fs;
use std::path::Path;
use std::time::Duration;

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, warn};

use docdrop_core::{CollectionConfig, CollectionError};

use crate::inode::{InodeKey, InodeTracker};

/// Totals gathered from one directory walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirSummary {
    /// Sum of regular-file sizes in bytes.
    pub total_size: u64,
    /// Number of regular files counted.
    pub file_count: u64,
    /// Entries that could not be read and were counted as zero.
    pub skipped: u64,
}

/// Walk `root` depth-first and sum the sizes of the regular files below it.
///
/// Symlinks are not followed unless the config asks for it. Children that
/// cannot be read are logged and count as zero; only an unreadable `root`
/// fails the whole walk.
pub fn summarize_dir(root: &Path, config: &CollectionConfig) -> Result<DirSummary, CollectionError> {
    fs::read_dir(root).map_err(|e| CollectionError::io(root, e))?;

    let parallelism = match config.threads {
        0 => Parallelism::RayonDefaultPool {
            busy_timeout: Duration::from_millis(100),
        },
        1 => Parallelism::Serial,
        n => Parallelism::RayonNewPool(n),
    };

    let walker = WalkDir::new(root)
        .parallelism(parallelism)
        .skip_hidden(false)
        .follow_links(config.follow_symlinks)
        .min_depth(1);

    let mut inode_tracker = InodeTracker::new();
    let mut summary = DirSummary::default();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                warn!(path = ?err.path(), "skipping unreadable entry: {err}");
                summary.skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(err) => {
                warn!(path = %entry.path().display(), "skipping file without metadata: {err}");
                summary.skipped += 1;
                continue;
            }
        };

        // Only count size for first hardlink
        if config.dedupe_hardlinks && get_nlink(&metadata) > 1 {
            if let Some(key) = InodeKey::from_metadata(&metadata) {
                if !inode_tracker.track(key) {
                    continue;
                }
            }
        }

        summary.total_size += metadata.len();
        summary.file_count += 1;
    }

    debug!(
        root = %root.display(),
        bytes = summary.total_size,
        files = summary.file_count,
        skipped = summary.skipped,
        "measured directory"
    );

    Ok(summary)
}

/// Get the number of hard links from metadata.
#[cfg(unix)]
fn get_nlink(metadata: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.nlink()
}

#[cfg(not(unix))]
fn get_nlink(_metadata: &std::fs::Metadata) -> u64 {
    1 // Assume single link on Windows
}
