//! SQLite-backed key-value storage.
//!
//! One `kv_store` table holds every persisted key. The engine's
//! [`ScopedStore`](wird_engine::ScopedStore) layers namespacing and
//! failure tolerance on top; this module only provides durable raw
//! access, WAL setup and schema migrations.

pub mod migrations;

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

use wird_engine::storage::{StorageBackend, StorageError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("lock poisoned: {0}")]
    Lock(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable key-value backend over a single SQLite database.
///
/// The connection is shared behind a mutex so the backend can be cloned
/// into the content client's cache path while the state container owns
/// the primary handle.
#[derive(Clone)]
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
}

impl SqliteBackend {
    /// Opens (creating if needed) the database at `db_path`, enables WAL
    /// and runs pending migrations.
    pub fn open<P: AsRef<Path>>(db_path: P) -> StoreResult<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Migration(format!("create data dir: {e}")))?;
            }
        }

        let path_str = db_path.as_ref().to_string_lossy().to_string();
        let connection = Connection::open(&db_path)?;

        connection.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;",
        )?;

        let backend = Self {
            conn: Arc::new(Mutex::new(connection)),
            db_path: path_str,
        };
        backend.initialize()?;
        Ok(backend)
    }

    /// In-memory database for tests.
    pub fn in_memory() -> StoreResult<Self> {
        let connection = Connection::open_in_memory()?;
        connection.execute_batch("PRAGMA foreign_keys=ON;")?;

        let backend = Self {
            conn: Arc::new(Mutex::new(connection)),
            db_path: ":memory:".to_string(),
        };
        backend.initialize()?;
        Ok(backend)
    }

    fn initialize(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        migrations::run_migrations(&conn)?;
        Ok(())
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| StoreError::Lock(e.to_string()))
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))",
            [key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// Number of stored keys, used by tests and diagnostics.
    pub fn len(&self) -> StoreResult<i64> {
        let conn = self.lock()?;
        let count = conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl StorageBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read(key).map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(key, value)
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.delete(key)
            .map(|_| ())
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}
