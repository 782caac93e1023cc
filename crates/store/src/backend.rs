use async_trait::async_trait;
use proto::StorageError;
use serde_json::Value;

/// Named, independently addressable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    /// Terminal settings (`current`).
    Settings,
    /// Per-tab scrollback (`<tabId>`).
    History,
    /// All-tabs snapshot (`all`).
    Tabs,
    /// Recall buffer snapshot (`all`).
    CommandHistory,
    /// Active theme pointer (`active`).
    Theme,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Collection; 5] = [
        Self::Settings,
        Self::History,
        Self::Tabs,
        Self::CommandHistory,
        Self::Theme,
    ];

    /// Collection name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::History => "history",
            Self::Tabs => "tabs",
            Self::CommandHistory => "commandHistory",
            Self::Theme => "theme",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pending write in an atomic batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub collection: Collection,
    pub key: String,
    pub value: Value,
}

impl Write {
    /// Creates a write of `value` under `collection/key`.
    pub fn new(collection: Collection, key: impl Into<String>, value: Value) -> Self {
        Self {
            collection,
            key: key.into(),
            value,
        }
    }
}

/// Key-value storage with named collections.
///
/// Each call is independently fallible. `set` overwrites; `get_all` returns
/// values in key order.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads one record.
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StorageError>;

    /// Writes one record, replacing any previous value.
    async fn set(&self, collection: Collection, key: &str, value: Value)
    -> Result<(), StorageError>;

    /// Reads every record in a collection.
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StorageError>;

    /// Removes one record. Missing keys are not an error.
    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StorageError>;

    /// Removes every record in a collection.
    async fn clear(&self, collection: Collection) -> Result<(), StorageError>;

    /// Applies all writes or none of them.
    async fn set_many(&self, writes: Vec<Write>) -> Result<(), StorageError>;
}
