//! Record shapes stored in the persisted collections and in backup files.

use serde::{Deserialize, Serialize};

use crate::{CommandEntry, Settings, TabId};

/// Milliseconds since the Unix epoch, used for record timestamps.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A tab as written to the `tabs` collection and to backups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTab {
    pub id: TabId,
    pub title: String,
    pub history: Vec<CommandEntry>,
    #[serde(default)]
    pub current_input: String,
    pub timestamp: i64,
}

/// Value under `tabs/all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsRecord {
    pub tabs: Vec<StoredTab>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab_id: Option<TabId>,
    pub timestamp: i64,
}

/// Value under `history/<tabId>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabHistoryRecord {
    pub tab_id: TabId,
    pub history: Vec<CommandEntry>,
    pub timestamp: i64,
}

/// Value under `commandHistory/all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandHistoryRecord {
    pub commands: Vec<String>,
    pub timestamp: i64,
}

/// Value under `theme/active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub name: String,
    pub timestamp: i64,
}

/// Backup document written by `export-data` and read by `import-data`.
///
/// Every key is optional on import; absent keys leave the corresponding
/// collection untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub tabs: Option<Vec<StoredTab>>,
    #[serde(default)]
    pub command_history: Option<Vec<String>>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub export_date: String,
}

impl BackupData {
    /// File name used when exporting at `millis`.
    pub fn file_name(millis: i64) -> String {
        format!("terminal-backup-{millis}.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_file_name_embeds_epoch_millis() {
        assert_eq!(
            BackupData::file_name(1_700_000_000_123),
            "terminal-backup-1700000000123.json"
        );
    }

    #[test]
    fn backup_serializes_with_documented_keys() {
        let backup = BackupData {
            settings: Some(Settings::default()),
            tabs: Some(Vec::new()),
            command_history: Some(vec!["help".to_string()]),
            theme: Some("Dracula".to_string()),
            export_date: "2026-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&backup).expect("serialize");
        let keys: Vec<_> = json.as_object().expect("object").keys().cloned().collect();
        for key in ["settings", "tabs", "commandHistory", "theme", "exportDate"] {
            assert!(keys.iter().any(|k| k == key), "missing {key}");
        }
    }

    #[test]
    fn backup_accepts_partial_documents() {
        let backup: BackupData =
            serde_json::from_str(r#"{"theme":"Matrix"}"#).expect("deserialize");
        assert_eq!(backup.theme.as_deref(), Some("Matrix"));
        assert!(backup.settings.is_none());
        assert!(backup.tabs.is_none());
        assert!(backup.command_history.is_none());
    }

    #[test]
    fn backup_treats_null_values_as_absent() {
        let backup: BackupData =
            serde_json::from_str(r#"{"settings":null,"tabs":null,"commandHistory":null,"theme":null,"exportDate":"x"}"#)
                .expect("deserialize");
        assert_eq!(backup.settings, None);
        assert_eq!(backup.export_date, "x");
    }

    #[test]
    fn stored_tab_defaults_missing_current_input() {
        let tab: StoredTab = serde_json::from_str(
            r#"{"id":"1","title":"Terminal 1","history":[],"timestamp":5}"#,
        )
        .expect("deserialize");
        assert_eq!(tab.current_input, "");
        assert_eq!(tab.id.as_str(), "1");
    }
}
