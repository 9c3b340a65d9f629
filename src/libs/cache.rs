use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use crate::libs::errors::CacheError;
use crate::libs::models::Message;

/// The single well-known cache slot. One conversation, one entry.
pub const CACHE_KEY: &str = "cached_messages";

/// Point-in-time snapshot cache for the message list. The live sync path
/// is the only writer; reads happen only when falling back to cached mode.
pub trait CacheStore: Send + Sync {
    /// Persists the full ordered list, replacing any prior value. Atomic
    /// from the caller's perspective: a failed save leaves the previous
    /// snapshot intact.
    fn save(&self, messages: &[Message]) -> Result<(), CacheError>;

    /// Returns the last saved list, `None` if nothing was ever cached.
    /// A stored payload that fails to parse is a [`CacheError::Corrupt`],
    /// not a silent empty list.
    fn load(&self) -> Result<Option<Vec<Message>>, CacheError>;
}

pub struct SqliteCacheStore {
    conn_pool: Pool<SqliteConnectionManager>,
}

impl SqliteCacheStore {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::new(manager)?;
        let store = Self { conn_pool: pool };
        store.migrate()?;
        Ok(store)
    }

    fn new_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, CacheError> {
        Ok(self.conn_pool.get()?)
    }

    fn migrate(&self) -> Result<(), CacheError> {
        let conn = self.new_connection()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS message_cache (
                cache_key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            );",
        )?;
        Ok(())
    }
}

impl CacheStore for SqliteCacheStore {
    fn save(&self, messages: &[Message]) -> Result<(), CacheError> {
        let payload =
            serde_json::to_string(messages).map_err(|e| CacheError::Storage(e.to_string()))?;

        let mut conn = self.new_connection()?;
        // The upsert runs inside a transaction so a failure cannot leave
        // the slot half-written.
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO message_cache (cache_key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now'))
             ON CONFLICT(cache_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at",
            params![CACHE_KEY, payload],
        )?;
        tx.commit()?;

        debug!(count = messages.len(), "cached message snapshot");
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<Message>>, CacheError> {
        let conn = self.new_connection()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM message_cache WHERE cache_key = ?1",
                params![CACHE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            None => Ok(None),
            Some(payload) => {
                let messages: Vec<Message> = serde_json::from_str(&payload)
                    .map_err(|e| CacheError::Corrupt(e.to_string()))?;
                Ok(Some(messages))
            }
        }
    }
}
