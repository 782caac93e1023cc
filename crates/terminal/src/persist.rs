//! Ordering between background snapshot writes and whole-store replacement.
//!
//! Snapshots are written from spawned tasks, so one taken before a
//! `clear-data` or `import-data` could otherwise land after it and undo it.
//! Each snapshot carries the generation it was taken in; replacing the store
//! bumps the generation under the same lock, and stale snapshots are dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use proto::StorageError;
use store::PortfolioStore;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::session::SessionSnapshot;

#[derive(Clone)]
pub struct SnapshotWriter {
    store: PortfolioStore,
    generation: Arc<AtomicU64>,
    lock: Arc<Mutex<()>>,
}

impl SnapshotWriter {
    pub fn new(store: PortfolioStore) -> Self {
        Self {
            store,
            generation: Arc::new(AtomicU64::new(0)),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &PortfolioStore {
        &self.store
    }

    /// Generation to stamp on a snapshot taken now.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Writes `snapshot` unless the store was replaced since `generation`.
    /// Returns whether it was written.
    pub async fn write(
        &self,
        snapshot: &SessionSnapshot,
        generation: u64,
    ) -> Result<bool, StorageError> {
        let _guard = self.lock.lock().await;
        if generation != self.generation() {
            debug!(generation, "Dropping stale session snapshot");
            return Ok(false);
        }
        snapshot.persist(&self.store).await?;
        Ok(true)
    }

    /// Invalidates every snapshot taken so far and holds off new writes
    /// until the returned guard is dropped.
    pub async fn begin_replace(&self) -> OwnedMutexGuard<()> {
        let guard = Arc::clone(&self.lock).lock_owned().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        guard
    }
}
