//! Commands whose output arrives after the prompt has returned.

use proto::{CommandEntry, TabId};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

/// A spawned command that will append one entry to `tab_id` when done.
#[derive(Debug)]
pub struct PendingCommand {
    pub id: u64,
    pub tab_id: TabId,
    handle: JoinHandle<CommandEntry>,
}

/// The finished result of a [`PendingCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub id: u64,
    pub tab_id: TabId,
    pub entry: CommandEntry,
}

impl PendingCommand {
    pub fn new(id: u64, tab_id: TabId, handle: JoinHandle<CommandEntry>) -> Self {
        Self { id, tab_id, handle }
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    /// Waits for the task. Returns `None` when it was cancelled.
    pub async fn wait(self) -> Option<Completion> {
        match self.handle.await {
            Ok(entry) => Some(Completion {
                id: self.id,
                tab_id: self.tab_id,
                entry,
            }),
            Err(e) => {
                debug!(id = self.id, tab = %self.tab_id, "Pending command ended: {e}");
                None
            }
        }
    }
}
