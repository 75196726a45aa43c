//! Cursor Backup Task
//!
//! Background task that periodically writes the cursor index to the backup file.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::persistence::BackupFile;
use crate::sequence::SequenceStore;

/// Spawns a background task that checkpoints the cursor index every
/// `interval_secs` seconds (at least one).
///
/// Each tick snapshots the index under the store lock, releases it, and
/// writes on the blocking pool. A failed write is logged and retried on the
/// next tick; the task itself never stops on error.
///
/// When `shutdown` changes (or its sender is dropped) the task finishes any
/// write in progress, writes one final checkpoint and exits. Await the
/// returned handle to know the last write has landed.
pub fn spawn_backup_task(
    store: SequenceStore,
    backup: BackupFile,
    interval_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting backup task for {} with interval of {} seconds",
            backup.path().display(),
            interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    persist_now(&store, &backup).await;
                }
                _ = shutdown.changed() => {
                    if persist_now(&store, &backup).await {
                        info!("Final checkpoint written");
                    }
                    break;
                }
            }
        }

        info!("Backup task stopped");
    })
}

/// Writes the store's current index to `backup` once.
///
/// Returns whether the write succeeded. Errors are logged, never propagated.
pub async fn persist_now(store: &SequenceStore, backup: &BackupFile) -> bool {
    let index = store.index().await;
    let file = backup.clone();

    match tokio::task::spawn_blocking(move || file.persist(index)).await {
        Ok(Ok(())) => {
            debug!(index, "Cursor index persisted");
            true
        }
        Ok(Err(err)) => {
            warn!(index, error = %err, "Failed to persist cursor index");
            false
        }
        Err(err) => {
            warn!(index, error = %err, "Backup write did not complete");
            false
        }
    }
}
