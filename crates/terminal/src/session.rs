//! The visitor's whole terminal state: tabs, recall buffer, settings, theme,
//! and the commands still running on each tab.

use std::collections::HashMap;

use proto::{CommandEntry, Settings, SettingsPatch, StorageError, StoredTab, TabId};
use store::PortfolioStore;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::content::ThemePreset;
use crate::history::CommandHistory;
use crate::pending::Completion;
use crate::settings::SettingsManager;
use crate::tabs::TabManager;

#[derive(Debug)]
struct Running {
    id: u64,
    abort: AbortHandle,
}

#[derive(Debug, Default)]
pub struct Session {
    tabs: TabManager,
    recall: CommandHistory,
    settings: SettingsManager,
    settings_visible: bool,
    active_theme: Option<String>,
    running: HashMap<TabId, Running>,
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session from the store. Every failed read is logged and
    /// leaves that part at its default.
    pub async fn restore(store: &PortfolioStore) -> Self {
        let mut session = Self::new();
        session.settings.load(store).await;

        match store.load_tabs().await {
            Ok(Some(record)) => {
                session.tabs.restore(record);
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to load tabs: {e}"),
        }

        match store.load_command_history().await {
            Ok(Some(commands)) => session.recall = CommandHistory::from_commands(commands),
            Ok(None) => {}
            Err(e) => warn!("Failed to load command history: {e}"),
        }

        match store.load_active_theme().await {
            Ok(theme) => session.active_theme = theme,
            Err(e) => warn!("Failed to load theme: {e}"),
        }

        debug!(
            tabs = session.tabs.len(),
            commands = session.recall.len(),
            "Session restored"
        );
        session
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Changes whenever anything persisted changes.
    pub fn revision(&self) -> u64 {
        self.tabs.revision() + self.revision
    }

    /// Swaps in `other` while keeping [`Session::revision`] ahead of its
    /// current value, so change detection still sees the replacement.
    pub fn replace(&mut self, mut other: Session) {
        self.cancel_all_pending();
        other.revision = other.revision.max(self.revision() + 1);
        *self = other;
    }

    // ── Tabs ─────────────────────────────────────────────────

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager {
        &mut self.tabs
    }

    pub fn active_tab_id(&self) -> TabId {
        self.tabs.active_id().clone()
    }

    /// Closes a tab and cancels whatever it was still running.
    pub fn close_tab(&mut self, id: &TabId) -> bool {
        let closed = self.tabs.close(id);
        if closed {
            self.cancel_pending(id);
        }
        closed
    }

    // ── Recall buffer ────────────────────────────────────────

    pub fn recall(&self) -> &CommandHistory {
        &self.recall
    }

    /// Cursor-only access for Up/Down navigation.
    pub fn recall_mut(&mut self) -> &mut CommandHistory {
        &mut self.recall
    }

    pub fn record_command(&mut self, command: impl Into<String>) {
        self.recall.add(command);
        self.touch();
    }

    // ── Settings & theme ─────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    pub fn settings_manager(&self) -> &SettingsManager {
        &self.settings
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> bool {
        let changed = self.settings.update(patch);
        if changed {
            self.touch();
        }
        changed
    }

    /// Restores default settings and forgets the active preset.
    pub fn reset_settings(&mut self) -> bool {
        let changed = self.settings.reset() | self.active_theme.take().is_some();
        if changed {
            self.touch();
        }
        changed
    }

    pub fn adjust_font_size(&mut self, delta: i32) -> bool {
        let changed = self.settings.adjust_font_size(delta);
        if changed {
            self.touch();
        }
        changed
    }

    pub fn settings_visible(&self) -> bool {
        self.settings_visible
    }

    /// Flips the dialog flag and returns the new value.
    pub fn toggle_settings(&mut self) -> bool {
        self.settings_visible = !self.settings_visible;
        self.settings_visible
    }

    pub fn set_settings_visible(&mut self, visible: bool) {
        self.settings_visible = visible;
    }

    pub fn active_theme(&self) -> Option<&str> {
        self.active_theme.as_deref()
    }

    /// Applies a preset's colors and records it as the active theme.
    pub fn apply_theme(&mut self, preset: &ThemePreset) {
        self.settings.update(&SettingsPatch::colors(
            preset.background_color,
            preset.font_color,
        ));
        self.active_theme = Some(preset.name.to_string());
        self.touch();
    }

    // ── Running commands ─────────────────────────────────────

    /// Remembers the command now running on `tab_id`, replacing any earlier
    /// one without cancelling it.
    pub fn track_pending(&mut self, tab_id: TabId, id: u64, abort: AbortHandle) {
        self.running.insert(tab_id, Running { id, abort });
    }

    pub fn has_pending(&self, tab_id: &TabId) -> bool {
        self.running
            .get(tab_id)
            .is_some_and(|running| !running.abort.is_finished())
    }

    /// Aborts the command running on `tab_id`, if any.
    pub fn cancel_pending(&mut self, tab_id: &TabId) -> bool {
        match self.running.remove(tab_id) {
            Some(running) => {
                running.abort.abort();
                debug!(tab = %tab_id, id = running.id, "Pending command cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all_pending(&mut self) {
        for (_, running) in self.running.drain() {
            running.abort.abort();
        }
    }

    /// Appends a finished command's entry to the tab that issued it, if that
    /// tab still exists.
    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        if self
            .running
            .get(&completion.tab_id)
            .is_some_and(|running| running.id == completion.id)
        {
            self.running.remove(&completion.tab_id);
        }
        self.tabs.append(&completion.tab_id, completion.entry)
    }

    /// Appends to the active tab.
    pub fn push_entry(&mut self, entry: CommandEntry) {
        let id = self.active_tab_id();
        self.tabs.append(&id, entry);
    }

    // ── Persistence ──────────────────────────────────────────

    /// Owned copy of everything that gets persisted.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tabs: self.tabs.to_stored(),
            active_tab_id: self.tabs.active_id().clone(),
            commands: self.recall.commands().to_vec(),
            settings: self.settings.persistable().cloned(),
            theme: self.active_theme.clone(),
        }
    }
}

/// Point-in-time copy of a [`Session`] that can be written from another task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub tabs: Vec<StoredTab>,
    pub active_tab_id: TabId,
    pub commands: Vec<String>,
    pub settings: Option<Settings>,
    pub theme: Option<String>,
}

impl SessionSnapshot {
    /// Writes every collection. Per-tab history records of closed tabs are
    /// removed.
    pub async fn persist(&self, store: &PortfolioStore) -> Result<(), StorageError> {
        if let Some(settings) = &self.settings {
            store.save_settings(settings).await?;
        }

        store.save_tabs(&self.tabs, Some(&self.active_tab_id)).await?;
        for tab in &self.tabs {
            store.save_tab_history(&tab.id, &tab.history).await?;
        }
        for record in store.load_all_tab_histories().await? {
            if !self.tabs.iter().any(|tab| tab.id == record.tab_id) {
                store.delete_tab_history(&record.tab_id).await?;
            }
        }

        if !self.commands.is_empty() {
            store.save_command_history(&self.commands).await?;
        }
        match &self.theme {
            Some(theme) => store.save_active_theme(theme).await?,
            // Settings are only present after a load, so no theme means cleared.
            None if self.settings.is_some() => store.clear_active_theme().await?,
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::content::find_preset;

    #[tokio::test]
    async fn snapshot_persists_and_restores() {
        let store = PortfolioStore::in_memory();
        let mut session = Session::restore(&store).await;
        let first = session.active_tab_id();
        let second = session.tabs_mut().add();
        session
            .tabs_mut()
            .append(&second, CommandEntry::new("about", ["hi"]));
        session.tabs_mut().switch(&first);
        session.record_command("about");
        session.apply_theme(find_preset("Nord").expect("preset"));

        session.snapshot().persist(&store).await.expect("persist");

        let restored = Session::restore(&store).await;
        assert_eq!(restored.tabs().len(), 2);
        assert_eq!(restored.active_tab_id(), first);
        assert_eq!(restored.recall().commands(), ["about".to_string()]);
        assert_eq!(restored.active_theme(), Some("Nord"));
        assert_eq!(restored.settings().background_color, "#2e3440");
        assert_eq!(
            store
                .load_tab_history(&second)
                .await
                .expect("load")
                .map(|h| h.len()),
            Some(2)
        );
    }

    #[tokio::test]
    async fn persist_drops_history_of_closed_tabs() {
        let store = PortfolioStore::in_memory();
        let mut session = Session::restore(&store).await;
        let extra = session.tabs_mut().add();
        session.snapshot().persist(&store).await.expect("persist");
        assert!(store.load_tab_history(&extra).await.expect("load").is_some());

        assert!(session.close_tab(&extra));
        session.snapshot().persist(&store).await.expect("persist");
        assert!(store.load_tab_history(&extra).await.expect("load").is_none());
    }

    #[tokio::test]
    async fn reset_settings_forgets_active_theme() {
        let store = PortfolioStore::in_memory();
        let mut session = Session::restore(&store).await;
        session.apply_theme(find_preset("Dracula").expect("preset"));
        session.snapshot().persist(&store).await.expect("persist");
        assert_eq!(store.load_active_theme().await.expect("load").as_deref(), Some("Dracula"));

        let before = session.revision();
        assert!(session.reset_settings());
        assert!(session.revision() > before);
        assert_eq!(session.active_theme(), None);
        assert_eq!(session.settings(), &Settings::default());

        session.snapshot().persist(&store).await.expect("persist");
        assert_eq!(store.load_active_theme().await.expect("load"), None);
        assert_eq!(Session::restore(&store).await.active_theme(), None);
    }

    #[tokio::test]
    async fn replace_keeps_revision_increasing() {
        let store = PortfolioStore::in_memory();
        let mut session = Session::restore(&store).await;
        for command in ["help", "about", "projects"] {
            session.record_command(command);
            session.push_entry(CommandEntry::new(command, ["..."]));
        }
        let before = session.revision();

        session.replace(Session::restore(&store).await);
        assert!(session.revision() > before);
        assert!(session.recall().is_empty());
    }

    #[test]
    fn snapshot_omits_settings_before_load() {
        let session = Session::new();
        assert!(session.snapshot().settings.is_none());
    }

    #[test]
    fn revision_tracks_persisted_changes_only() {
        let mut session = Session::new();
        let start = session.revision();
        session.toggle_settings();
        assert_eq!(session.revision(), start);

        session.record_command("help");
        let after_record = session.revision();
        assert!(after_record > start);

        session.recall_mut().navigate(crate::history::Direction::Up);
        assert_eq!(session.revision(), after_record);

        session.push_entry(CommandEntry::empty_prompt());
        assert!(session.revision() > after_record);
    }

    #[tokio::test]
    async fn completion_for_closed_tab_is_dropped() {
        let mut session = Session::new();
        let extra = session.tabs_mut().add();
        session.close_tab(&extra);
        assert!(!session.apply_completion(Completion {
            id: 1,
            tab_id: extra,
            entry: CommandEntry::output_only(["late"]),
        }));
    }

    #[tokio::test]
    async fn cancel_pending_aborts_running_task() {
        let mut session = Session::new();
        let tab = session.active_tab_id();
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        session.track_pending(tab.clone(), 7, handle.abort_handle());
        assert!(session.has_pending(&tab));

        assert!(session.cancel_pending(&tab));
        assert!(handle.await.expect_err("aborted").is_cancelled());
        assert!(!session.has_pending(&tab));
        assert!(!session.cancel_pending(&tab));
    }
}
