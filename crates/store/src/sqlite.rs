use async_trait::async_trait;
use proto::StorageError;
use serde_json::Value;
use sqlx::{Row, sqlite::SqlitePool};
use tracing::{debug, info};

use crate::backend::{Collection, KvStore, Write};

/// SQLite-backed collection store
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database and run migrations
    pub async fn open(db_url: &str) -> Result<Self, StorageError> {
        // Expand ~ in path
        let url = if db_url.starts_with('~') {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            db_url.replacen('~', &home, 1)
        } else {
            db_url.to_string()
        };

        // Ensure parent directory exists
        if let Some(parent) = std::path::Path::new(&url).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }

        let pool = SqlitePool::connect(&format!("sqlite:{url}?mode=rwc"))
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let migrations_dir =
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
        let migrator = sqlx::migrate::Migrator::new(migrations_dir.as_path())
            .await
            .map_err(|e| StorageError::Unavailable(format!("migrations: {e}")))?;

        migrator
            .run(&pool)
            .await
            .map_err(|e| StorageError::Unavailable(format!("migrations: {e}")))?;

        info!("SQLite store opened: {url}");
        Ok(Self { pool })
    }
}

fn encode(value: &Value) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(StorageError::from)
}

fn decode(raw: &str) -> Result<Value, StorageError> {
    serde_json::from_str(raw).map_err(StorageError::from)
}

fn op_failed(e: sqlx::Error) -> StorageError {
    StorageError::OperationFailed(e.to_string())
}

const UPSERT: &str = "INSERT OR REPLACE INTO records (collection, key, value, updated_at) VALUES (?, ?, ?, ?)";

#[async_trait]
impl KvStore for SqliteStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StorageError> {
        let row = sqlx::query("SELECT value FROM records WHERE collection = ? AND key = ?")
            .bind(collection.as_str())
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(op_failed)?;

        row.map(|row| decode(&row.get::<String, _>("value")))
            .transpose()
    }

    async fn set(
        &self,
        collection: Collection,
        key: &str,
        value: Value,
    ) -> Result<(), StorageError> {
        sqlx::query(UPSERT)
            .bind(collection.as_str())
            .bind(key)
            .bind(encode(&value)?)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(op_failed)?;

        debug!(%collection, key, "Record saved");
        Ok(())
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        let rows = sqlx::query("SELECT value FROM records WHERE collection = ? ORDER BY key ASC")
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(op_failed)?;

        rows.into_iter()
            .map(|row| decode(&row.get::<String, _>("value")))
            .collect()
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM records WHERE collection = ? AND key = ?")
            .bind(collection.as_str())
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(op_failed)?;
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM records WHERE collection = ?")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await
            .map_err(op_failed)?;
        debug!(%collection, removed = result.rows_affected(), "Collection cleared");
        Ok(())
    }

    async fn set_many(&self, writes: Vec<Write>) -> Result<(), StorageError> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.map_err(op_failed)?;
        for write in &writes {
            sqlx::query(UPSERT)
                .bind(write.collection.as_str())
                .bind(&write.key)
                .bind(encode(&write.value)?)
                .bind(&now)
                .execute(&mut *tx)
                .await
                .map_err(op_failed)?;
        }
        tx.commit().await.map_err(op_failed)?;

        debug!(count = writes.len(), "Batch committed");
        Ok(())
    }
}
