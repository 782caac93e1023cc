//! Typed helpers over the raw collections: one function per record shape,
//! plus backup export and import.

use std::sync::Arc;

use proto::{
    BackupData, CommandEntry, CommandHistoryRecord, ImportError, Settings, SettingsPatch,
    StorageError, StoredTab, TabHistoryRecord, TabId, TabsRecord, ThemeRecord, now_millis,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{info, warn};

use crate::backend::{Collection, KvStore, Write};
use crate::memory::MemoryStore;
use crate::sqlite::SqliteStore;

const SETTINGS_KEY: &str = "current";
const ALL_KEY: &str = "all";
const THEME_KEY: &str = "active";

/// Typed access to the terminal's persisted collections.
#[derive(Clone)]
pub struct PortfolioStore {
    backend: Arc<dyn KvStore>,
}

impl PortfolioStore {
    /// Wraps an existing backend.
    pub fn new(backend: Arc<dyn KvStore>) -> Self {
        Self { backend }
    }

    /// Store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Opens the SQLite file at `db_url`.
    pub async fn open(db_url: &str) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(SqliteStore::open(db_url).await?)))
    }

    /// Opens the SQLite file, falling back to memory when it is unavailable.
    pub async fn open_or_memory(db_url: &str) -> Self {
        match Self::open(db_url).await {
            Ok(store) => store,
            Err(e) => {
                warn!("Persistent store unavailable ({e}); state will not survive restart");
                Self::in_memory()
            }
        }
    }

    /// Underlying collection store.
    pub fn backend(&self) -> &Arc<dyn KvStore> {
        &self.backend
    }

    async fn get_record<T: DeserializeOwned>(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        match self.backend.get(collection, key).await? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    async fn set_record<T: Serialize>(
        &self,
        collection: Collection,
        key: &str,
        record: &T,
    ) -> Result<(), StorageError> {
        self.backend
            .set(collection, key, serde_json::to_value(record)?)
            .await
    }

    // ── Settings ─────────────────────────────────────────────

    /// Persists the full settings record.
    pub async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        self.set_record(Collection::Settings, SETTINGS_KEY, settings)
            .await
    }

    /// Loads the stored settings record; fields may be missing.
    pub async fn load_settings(&self) -> Result<Option<SettingsPatch>, StorageError> {
        self.get_record(Collection::Settings, SETTINGS_KEY).await
    }

    // ── Per-tab history ──────────────────────────────────────

    /// Persists one tab's scrollback.
    pub async fn save_tab_history(
        &self,
        tab_id: &TabId,
        history: &[CommandEntry],
    ) -> Result<(), StorageError> {
        let record = TabHistoryRecord {
            tab_id: tab_id.clone(),
            history: history.to_vec(),
            timestamp: now_millis(),
        };
        self.set_record(Collection::History, tab_id.as_str(), &record)
            .await
    }

    /// Loads one tab's scrollback.
    pub async fn load_tab_history(
        &self,
        tab_id: &TabId,
    ) -> Result<Option<Vec<CommandEntry>>, StorageError> {
        Ok(self
            .get_record::<TabHistoryRecord>(Collection::History, tab_id.as_str())
            .await?
            .map(|record| record.history))
    }

    /// Removes one tab's scrollback.
    pub async fn delete_tab_history(&self, tab_id: &TabId) -> Result<(), StorageError> {
        self.backend
            .delete(Collection::History, tab_id.as_str())
            .await
    }

    /// Loads every stored per-tab scrollback record.
    pub async fn load_all_tab_histories(&self) -> Result<Vec<TabHistoryRecord>, StorageError> {
        self.backend
            .get_all(Collection::History)
            .await?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(StorageError::from))
            .collect()
    }

    // ── Tabs ─────────────────────────────────────────────────

    /// Persists the all-tabs snapshot.
    pub async fn save_tabs(
        &self,
        tabs: &[StoredTab],
        active_tab_id: Option<&TabId>,
    ) -> Result<(), StorageError> {
        self.set_record(Collection::Tabs, ALL_KEY, &tabs_record(tabs, active_tab_id))
            .await
    }

    /// Loads the all-tabs snapshot.
    pub async fn load_tabs(&self) -> Result<Option<TabsRecord>, StorageError> {
        self.get_record(Collection::Tabs, ALL_KEY).await
    }

    // ── Recall buffer ────────────────────────────────────────

    /// Persists the recall buffer.
    pub async fn save_command_history(&self, commands: &[String]) -> Result<(), StorageError> {
        self.set_record(
            Collection::CommandHistory,
            ALL_KEY,
            &command_history_record(commands),
        )
        .await
    }

    /// Loads the recall buffer.
    pub async fn load_command_history(&self) -> Result<Option<Vec<String>>, StorageError> {
        Ok(self
            .get_record::<CommandHistoryRecord>(Collection::CommandHistory, ALL_KEY)
            .await?
            .map(|record| record.commands))
    }

    // ── Theme ────────────────────────────────────────────────

    /// Records the active theme preset name.
    pub async fn save_active_theme(&self, name: &str) -> Result<(), StorageError> {
        self.set_record(Collection::Theme, THEME_KEY, &theme_record(name))
            .await
    }

    /// Loads the active theme preset name.
    pub async fn load_active_theme(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .get_record::<ThemeRecord>(Collection::Theme, THEME_KEY)
            .await?
            .map(|record| record.name))
    }

    pub async fn clear_active_theme(&self) -> Result<(), StorageError> {
        self.backend.delete(Collection::Theme, THEME_KEY).await
    }

    // ── Whole-store operations ───────────────────────────────

    /// Empties every collection.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        for collection in Collection::ALL {
            self.backend.clear(collection).await?;
        }
        info!("All collections cleared");
        Ok(())
    }

    /// Gathers every collection into one backup document.
    pub async fn export_all(&self) -> Result<BackupData, StorageError> {
        let settings = self
            .load_settings()
            .await?
            .map(|patch| Settings::default().merged(&patch));
        let tabs = self.load_tabs().await?.map(|record| record.tabs);
        let command_history = self.load_command_history().await?;
        let theme = self.load_active_theme().await?;

        Ok(BackupData {
            settings,
            tabs,
            command_history,
            theme,
            export_date: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Writes every present key of `data` back in one atomic batch.
    ///
    /// Absent keys leave their collection untouched. Returns the number of
    /// collections written.
    pub async fn import_all(&self, data: &BackupData) -> Result<usize, ImportError> {
        let mut writes = Vec::new();
        if let Some(settings) = &data.settings {
            writes.push(Write::new(
                Collection::Settings,
                SETTINGS_KEY,
                to_value(settings)?,
            ));
        }
        if let Some(tabs) = &data.tabs {
            writes.push(Write::new(
                Collection::Tabs,
                ALL_KEY,
                to_value(&tabs_record(tabs, None))?,
            ));
        }
        if let Some(commands) = &data.command_history {
            writes.push(Write::new(
                Collection::CommandHistory,
                ALL_KEY,
                to_value(&command_history_record(commands))?,
            ));
        }
        if let Some(theme) = &data.theme {
            writes.push(Write::new(
                Collection::Theme,
                THEME_KEY,
                to_value(&theme_record(theme))?,
            ));
        }

        let count = writes.len();
        if count > 0 {
            self.backend.set_many(writes).await?;
        }
        info!(collections = count, "Backup imported");
        Ok(count)
    }

    /// Parses a backup document.
    pub fn parse_backup(text: &str) -> Result<BackupData, ImportError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ImportError::Parse(e.to_string()))?;
        if !value.is_object() {
            return Err(ImportError::Parse("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| ImportError::Parse(e.to_string()))
    }
}

fn to_value<T: Serialize>(record: &T) -> Result<Value, ImportError> {
    serde_json::to_value(record).map_err(|e| ImportError::Storage(e.into()))
}

fn tabs_record(tabs: &[StoredTab], active_tab_id: Option<&TabId>) -> TabsRecord {
    TabsRecord {
        tabs: tabs.to_vec(),
        active_tab_id: active_tab_id.cloned(),
        timestamp: now_millis(),
    }
}

fn command_history_record(commands: &[String]) -> CommandHistoryRecord {
    CommandHistoryRecord {
        commands: commands.to_vec(),
        timestamp: now_millis(),
    }
}

fn theme_record(name: &str) -> ThemeRecord {
    ThemeRecord {
        name: name.to_string(),
        timestamp: now_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tab(id: &str) -> StoredTab {
        StoredTab {
            id: TabId::from(id),
            title: format!("Terminal {id}"),
            history: vec![CommandEntry::new("help", ["Available commands:"])],
            current_input: "ab".to_string(),
            timestamp: 42,
        }
    }

    #[tokio::test]
    async fn missing_records_load_as_none() {
        let store = PortfolioStore::in_memory();
        assert!(store.load_settings().await.expect("settings").is_none());
        assert!(store.load_tabs().await.expect("tabs").is_none());
        assert!(store.load_command_history().await.expect("cmds").is_none());
        assert!(store.load_active_theme().await.expect("theme").is_none());
    }

    #[tokio::test]
    async fn tabs_record_keeps_active_id() {
        let store = PortfolioStore::in_memory();
        let tabs = vec![sample_tab("1"), sample_tab("2")];
        store
            .save_tabs(&tabs, Some(&TabId::from("1")))
            .await
            .expect("save");
        let record = store.load_tabs().await.expect("load").expect("present");
        assert_eq!(record.tabs, tabs);
        assert_eq!(record.active_tab_id, Some(TabId::from("1")));
    }

    #[tokio::test]
    async fn tab_history_round_trips_and_deletes() {
        let store = PortfolioStore::in_memory();
        let id = TabId::from("7");
        let history = vec![CommandEntry::new("about", ["hello"])];
        store.save_tab_history(&id, &history).await.expect("save");
        assert_eq!(
            store.load_tab_history(&id).await.expect("load"),
            Some(history)
        );
        assert_eq!(store.load_all_tab_histories().await.expect("all").len(), 1);

        store.delete_tab_history(&id).await.expect("delete");
        assert_eq!(store.load_tab_history(&id).await.expect("load"), None);
    }

    #[tokio::test]
    async fn export_then_import_restores_identical_values() {
        let source = PortfolioStore::in_memory();
        let settings = Settings {
            font_size: 18,
            background_color: "#000000".to_string(),
            font_color: "#00ff00".to_string(),
        };
        let tabs = vec![sample_tab("1"), sample_tab("2")];
        let commands = vec!["help".to_string(), "about".to_string()];
        source.save_settings(&settings).await.expect("settings");
        source.save_tabs(&tabs, None).await.expect("tabs");
        source
            .save_command_history(&commands)
            .await
            .expect("commands");
        source.save_active_theme("Matrix").await.expect("theme");

        let backup = source.export_all().await.expect("export");
        let text = serde_json::to_string_pretty(&backup).expect("serialize");

        let target = PortfolioStore::in_memory();
        let parsed = PortfolioStore::parse_backup(&text).expect("parse");
        assert_eq!(target.import_all(&parsed).await.expect("import"), 4);

        let restored = target.export_all().await.expect("re-export");
        assert_eq!(restored.settings, Some(settings));
        assert_eq!(restored.tabs, Some(tabs));
        assert_eq!(restored.command_history, Some(commands));
        assert_eq!(restored.theme.as_deref(), Some("Matrix"));
    }

    #[tokio::test]
    async fn import_leaves_absent_keys_untouched() {
        let store = PortfolioStore::in_memory();
        store
            .save_command_history(&["projects".to_string()])
            .await
            .expect("seed");

        let backup = PortfolioStore::parse_backup(r#"{"theme":"Nord"}"#).expect("parse");
        assert_eq!(store.import_all(&backup).await.expect("import"), 1);

        assert_eq!(
            store.load_command_history().await.expect("load"),
            Some(vec!["projects".to_string()])
        );
        assert_eq!(
            store.load_active_theme().await.expect("theme").as_deref(),
            Some("Nord")
        );
    }

    #[test]
    fn parse_backup_rejects_malformed_documents() {
        let err = PortfolioStore::parse_backup("{not json").expect_err("must fail");
        assert!(matches!(err, ImportError::Parse(_)));

        let err = PortfolioStore::parse_backup("[1, 2]").expect_err("must fail");
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[tokio::test]
    async fn clear_all_empties_every_collection() {
        let store = PortfolioStore::in_memory();
        store
            .save_settings(&Settings::default())
            .await
            .expect("settings");
        store.save_active_theme("Nord").await.expect("theme");
        store
            .save_tab_history(&TabId::from("1"), &[])
            .await
            .expect("history");

        store.clear_all().await.expect("clear");

        let backup = store.export_all().await.expect("export");
        assert!(backup.settings.is_none());
        assert!(backup.theme.is_none());
        assert!(store.load_all_tab_histories().await.expect("all").is_empty());
    }
}
