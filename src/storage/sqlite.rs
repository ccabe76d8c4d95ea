use super::{KeyValueBackend, StorageError};
use crate::config;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed key-value storage
pub struct SqliteBackend {
    conn: Connection,
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend").finish_non_exhaustive()
    }
}

impl SqliteBackend {
    /// Create or open the store database in the given data directory
    pub fn new(data_dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join(config::STORE_DB);
        let conn = Connection::open(&db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            ",
        )?;

        log::info!("Local storage opened at {:?}", db_path);

        Ok(Self { conn })
    }

    /// Number of stored keys
    pub fn count(&self) -> Result<i64, StorageError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl KeyValueBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        log::debug!("Stored '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }
}
