//! Background owner for a collection.
//!
//! Measuring a large directory can take a while, so a GUI may prefer to hand
//! the collection to a worker task. The worker owns the collection outright
//! and handles one command at a time, which keeps writes from interleaving.
//! Directory walks run on the blocking pool while the worker awaits them.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error};

use docdrop_core::{ChangeEvent, CollectionConfig, CollectionError, FileEntry, absolute_path};
use docdrop_scan::Filesystem;

use crate::collection::{AddOutcome, FileCollection, RemoveOutcome, measure};

/// Default number of queued commands.
pub const WORKER_CHANNEL_SIZE: usize = 100;

enum Command {
    Add {
        path: PathBuf,
        reply: oneshot::Sender<Result<AddOutcome, CollectionError>>,
    },
    Remove {
        path: PathBuf,
        reply: oneshot::Sender<RemoveOutcome>,
    },
    RemoveAll {
        paths: Vec<PathBuf>,
        reply: oneshot::Sender<usize>,
    },
    List {
        reply: oneshot::Sender<Vec<FileEntry>>,
    },
    Len {
        reply: oneshot::Sender<usize>,
    },
}

/// Spawns the task that owns a collection.
pub struct CollectionWorker;

impl CollectionWorker {
    /// Move `collection` onto a new task and return a handle to it.
    ///
    /// Must be called from within a Tokio runtime. The task stops once every
    /// handle has been dropped.
    pub fn spawn<F>(collection: FileCollection<F>, capacity: usize) -> CollectionHandle
    where
        F: Filesystem + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let events = collection.event_sender();
        tokio::spawn(run(collection, rx));
        CollectionHandle { tx, events }
    }

    /// Spawn a worker over the local filesystem, sized from `config`.
    pub fn spawn_with_config(config: CollectionConfig) -> CollectionHandle {
        let capacity = config.worker_capacity;
        Self::spawn(FileCollection::with_config(config), capacity)
    }
}

/// Cloneable handle for sending commands to a [`CollectionWorker`].
#[derive(Clone)]
pub struct CollectionHandle {
    tx: mpsc::Sender<Command>,
    events: broadcast::Sender<ChangeEvent>,
}

impl CollectionHandle {
    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// Track a path; measurement happens off the worker task.
    pub async fn add(&self, path: impl Into<PathBuf>) -> Result<AddOutcome, CollectionError> {
        let path = path.into();
        self.request(|reply| Command::Add { path, reply }).await?
    }

    /// Stop tracking a path.
    pub async fn remove(&self, path: impl Into<PathBuf>) -> Result<RemoveOutcome, CollectionError> {
        let path = path.into();
        self.request(|reply| Command::Remove { path, reply }).await
    }

    /// Remove several paths with one notification.
    pub async fn remove_all<I, P>(&self, paths: I) -> Result<usize, CollectionError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths = paths.into_iter().map(Into::into).collect();
        self.request(|reply| Command::RemoveAll { paths, reply }).await
    }

    /// Entries in display order.
    pub async fn list(&self) -> Result<Vec<FileEntry>, CollectionError> {
        self.request(|reply| Command::List { reply }).await
    }

    /// Number of tracked entries.
    pub async fn len(&self) -> Result<usize, CollectionError> {
        self.request(|reply| Command::Len { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, CollectionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(command(reply))
            .await
            .map_err(|_| CollectionError::WorkerStopped)?;
        rx.await.map_err(|_| CollectionError::WorkerStopped)
    }
}

async fn run<F>(mut collection: FileCollection<F>, mut rx: mpsc::Receiver<Command>)
where
    F: Filesystem + 'static,
{
    while let Some(command) = rx.recv().await {
        match command {
            Command::Add { path, reply } => {
                let result = add_measured(&mut collection, path).await;
                let _ = reply.send(result);
            }
            Command::Remove { path, reply } => {
                let _ = reply.send(collection.remove(path));
            }
            Command::RemoveAll { paths, reply } => {
                let _ = reply.send(collection.remove_all(paths));
            }
            Command::List { reply } => {
                let _ = reply.send(collection.list());
            }
            Command::Len { reply } => {
                let _ = reply.send(collection.len());
            }
        }
    }
    debug!("collection worker stopped");
}

async fn add_measured<F>(
    collection: &mut FileCollection<F>,
    path: PathBuf,
) -> Result<AddOutcome, CollectionError>
where
    F: Filesystem + 'static,
{
    let path = absolute_path(&path);
    if collection.contains(&path) {
        return Ok(AddOutcome::Duplicate);
    }

    let fs = Arc::clone(collection.filesystem());
    let entry = tokio::task::spawn_blocking(move || measure(&*fs, &path))
        .await
        .map_err(|e| {
            error!("measurement task failed: {e}");
            CollectionError::WorkerStopped
        })??;

    Ok(collection.insert(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdrop_scan::MemoryFilesystem;

    fn fixture() -> FileCollection<MemoryFilesystem> {
        FileCollection::with_filesystem(
            MemoryFilesystem::new()
                .with_file("/docs/a.pdf", 5000)
                .with_file("/docs/b.pdf", 7000)
                .with_unreadable("/docs/locked.pdf"),
        )
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let handle = CollectionWorker::spawn(fixture(), WORKER_CHANNEL_SIZE);

        assert!(handle.add("/docs/b.pdf").await.unwrap().is_added());
        assert!(handle.add("/docs/a.pdf").await.unwrap().is_added());
        assert_eq!(
            handle.add("/docs/a.pdf").await.unwrap(),
            AddOutcome::Duplicate
        );

        let names: Vec<_> = handle
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.display_name.to_string())
            .collect();
        assert_eq!(names, ["a.pdf", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_unreadable_error_propagates() {
        let handle = CollectionWorker::spawn(fixture(), WORKER_CHANNEL_SIZE);

        let err = handle.add("/docs/locked.pdf").await.unwrap_err();
        assert!(matches!(err, CollectionError::UnreadablePath { .. }));
        assert_eq!(handle.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_events_reach_subscribers() {
        let handle = CollectionWorker::spawn(fixture(), WORKER_CHANNEL_SIZE);
        let mut rx = handle.subscribe();

        handle.add("/docs/a.pdf").await.unwrap();
        handle.remove_all(["/docs/a.pdf"]).await.unwrap();

        let added = rx.recv().await.unwrap();
        assert_eq!(added.revision, 1);
        let removed = rx.recv().await.unwrap();
        assert_eq!(removed.removed_paths(), [PathBuf::from("/docs/a.pdf")]);
    }

    #[tokio::test]
    async fn test_concurrent_adds_stay_unique() {
        let handle = CollectionWorker::spawn(fixture(), WORKER_CHANNEL_SIZE);

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move { handle.add("/docs/a.pdf").await }));
        }
        let mut added = 0;
        for task in tasks {
            if task.await.unwrap().unwrap().is_added() {
                added += 1;
            }
        }

        assert_eq!(added, 1);
        assert_eq!(handle.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_is_absent() {
        let handle = CollectionWorker::spawn(fixture(), WORKER_CHANNEL_SIZE);
        assert_eq!(
            handle.remove("/docs/a.pdf").await.unwrap(),
            RemoveOutcome::Absent
        );
    }
}
