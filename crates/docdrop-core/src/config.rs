//! Collection configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::CollectionError;

/// Configuration for a document collection and its filesystem access.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CollectionConfig {
    /// Follow symbolic links while summing directory sizes.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Count a file with several hard links only once per directory walk.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub dedupe_hardlinks: bool,

    /// Reject files that cannot be opened and directories that cannot be listed.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub require_readable: bool,

    /// Columns kept free for the size column and delete button of each row.
    #[builder(default = "200")]
    #[serde(default = "default_label_reserve")]
    pub label_reserve: usize,

    /// Buffered change notifications per subscriber.
    #[builder(default = "100")]
    #[serde(default = "default_capacity")]
    pub event_capacity: usize,

    /// Queued commands for the background worker.
    #[builder(default = "100")]
    #[serde(default = "default_capacity")]
    pub worker_capacity: usize,

    /// Number of threads for directory walks (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_true() -> bool {
    true
}

fn default_label_reserve() -> usize {
    200
}

fn default_capacity() -> usize {
    100
}

impl CollectionConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.event_capacity == Some(0) {
            return Err("event_capacity must be at least 1".to_string());
        }
        if self.worker_capacity == Some(0) {
            return Err("worker_capacity must be at least 1".to_string());
        }
        Ok(())
    }
}

impl CollectionConfig {
    /// Create a new config builder.
    pub fn builder() -> CollectionConfigBuilder {
        CollectionConfigBuilder::default()
    }

    /// Check a config that did not come through the builder (e.g. deserialized).
    pub fn validate(&self) -> Result<(), CollectionError> {
        if self.event_capacity == 0 || self.worker_capacity == 0 {
            return Err(CollectionError::InvalidConfig {
                message: "channel capacities must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            dedupe_hardlinks: true,
            require_readable: true,
            label_reserve: 200,
            event_capacity: 100,
            worker_capacity: 100,
            threads: 0,
        }
    }
}
