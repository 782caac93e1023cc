//! Ordered set of terminal tabs with exactly one active.
//!
//! The tab list is shared as an `Arc` snapshot. Every mutation builds a new
//! list and bumps [`TabManager::revision`], so a caller holding an older
//! snapshot never sees it change underneath it.

use std::sync::Arc;

use proto::{CommandEntry, StoredTab, TabId, TabsRecord, now_millis};
use tracing::debug;

use crate::content::WELCOME_MESSAGE;

/// One terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub history: Vec<CommandEntry>,
    pub current_input: String,
}

impl Tab {
    /// Fresh tab showing the welcome banner.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TabId::new(),
            title: title.into(),
            history: vec![CommandEntry::output_only(WELCOME_MESSAGE.iter().copied())],
            current_input: String::new(),
        }
    }

    fn to_stored(&self, timestamp: i64) -> StoredTab {
        StoredTab {
            id: self.id.clone(),
            title: self.title.clone(),
            history: self.history.clone(),
            current_input: self.current_input.clone(),
            timestamp,
        }
    }
}

impl From<StoredTab> for Tab {
    fn from(stored: StoredTab) -> Self {
        Self {
            id: stored.id,
            title: stored.title,
            history: stored.history,
            current_input: stored.current_input,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabManager {
    tabs: Arc<Vec<Tab>>,
    active: TabId,
    revision: u64,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabManager {
    /// Starts with a single `Terminal 1` tab.
    pub fn new() -> Self {
        let first = Tab::new("Terminal 1");
        let active = first.id.clone();
        Self {
            tabs: Arc::new(vec![first]),
            active,
            revision: 0,
        }
    }

    /// Shared snapshot of the current tab list.
    pub fn snapshot(&self) -> Arc<Vec<Tab>> {
        Arc::clone(&self.tabs)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn active_id(&self) -> &TabId {
        &self.active
    }

    pub fn active_index(&self) -> usize {
        self.index_of(&self.active).unwrap_or(0)
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active_index()]
    }

    pub fn get(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| &tab.id == id)
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| &tab.id == id)
    }

    fn commit(&mut self, tabs: Vec<Tab>) {
        self.tabs = Arc::new(tabs);
        self.revision += 1;
    }

    fn activate(&mut self, id: TabId) {
        if self.active != id {
            self.active = id;
            self.revision += 1;
        }
    }

    /// Opens a new tab titled `Terminal N` and activates it.
    pub fn add(&mut self) -> TabId {
        let tab = Tab::new(format!("Terminal {}", self.tabs.len() + 1));
        let id = tab.id.clone();
        let mut tabs = self.tabs.as_ref().clone();
        tabs.push(tab);
        self.commit(tabs);
        self.activate(id.clone());
        debug!(tab = %id, count = self.tabs.len(), "Tab opened");
        id
    }

    /// Closes `id`. Refuses to close the last tab or an unknown id.
    ///
    /// When the active tab closes, the tab that slides into its position
    /// becomes active, or the previous one if it was the last.
    pub fn close(&mut self, id: &TabId) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };

        let mut tabs = self.tabs.as_ref().clone();
        tabs.remove(index);
        let successor = tabs[index.min(tabs.len() - 1)].id.clone();
        self.commit(tabs);
        if &self.active == id {
            self.activate(successor);
        }
        debug!(tab = %id, count = self.tabs.len(), "Tab closed");
        true
    }

    /// Activates `id`; unknown ids are ignored.
    pub fn switch(&mut self, id: &TabId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.activate(id.clone());
        true
    }

    /// Activates the tab at `index` (0-based), if present.
    pub fn switch_index(&mut self, index: usize) -> bool {
        match self.tabs.get(index) {
            Some(tab) => {
                let id = tab.id.clone();
                self.activate(id);
                true
            }
            None => false,
        }
    }

    /// Activates the next tab, wrapping to the first.
    pub fn next(&mut self) {
        let index = (self.active_index() + 1) % self.tabs.len();
        self.switch_index(index);
    }

    /// Activates the previous tab, wrapping to the last.
    pub fn previous(&mut self) {
        let current = self.active_index();
        let index = if current == 0 {
            self.tabs.len() - 1
        } else {
            current - 1
        };
        self.switch_index(index);
    }

    fn update(&mut self, id: &TabId, apply: impl FnOnce(&mut Tab)) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut tabs = self.tabs.as_ref().clone();
        apply(&mut tabs[index]);
        self.commit(tabs);
        true
    }

    /// Replaces the scrollback of `id`.
    pub fn update_history(&mut self, id: &TabId, history: Vec<CommandEntry>) -> bool {
        self.update(id, |tab| tab.history = history)
    }

    /// Appends one entry to the scrollback of `id`.
    pub fn append(&mut self, id: &TabId, entry: CommandEntry) -> bool {
        self.update(id, |tab| tab.history.push(entry))
    }

    /// Replaces the pending input buffer of `id`.
    pub fn update_input(&mut self, id: &TabId, input: impl Into<String>) -> bool {
        let input = input.into();
        if self.get(id).is_some_and(|tab| tab.current_input == input) {
            return true;
        }
        self.update(id, |tab| tab.current_input = input)
    }

    pub fn rename(&mut self, id: &TabId, title: impl Into<String>) -> bool {
        let title = title.into();
        self.update(id, |tab| tab.title = title)
    }

    /// Replaces all tabs with a stored snapshot.
    ///
    /// The stored active id wins when it names a restored tab; otherwise the
    /// last tab becomes active. An empty snapshot is ignored.
    pub fn restore(&mut self, record: TabsRecord) -> bool {
        let TabsRecord {
            tabs,
            active_tab_id,
            ..
        } = record;
        let tabs: Vec<Tab> = tabs.into_iter().map(Tab::from).collect();
        let Some(last) = tabs.last() else {
            return false;
        };

        let active = active_tab_id
            .filter(|id| tabs.iter().any(|tab| &tab.id == id))
            .unwrap_or_else(|| last.id.clone());
        self.commit(tabs);
        self.active = active;
        debug!(count = self.tabs.len(), active = %self.active, "Tabs restored");
        true
    }

    /// Tabs in their persisted shape.
    pub fn to_stored(&self) -> Vec<StoredTab> {
        let timestamp = now_millis();
        self.tabs.iter().map(|tab| tab.to_stored(timestamp)).collect()
    }
}
