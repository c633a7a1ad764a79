//! SQLite-backed key-value storage.
//!
//! The task collection lives in a single `kv` row whose value is the whole
//! JSON document, overwritten on every mutation.

use rusqlite::{params, Connection};
use std::path::Path;

use super::{data_dir, TaskStorage};
use crate::error::{DatabaseError, Result};

/// SQLite database holding application state as key-value pairs.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open `file_name` inside the data directory (see [`data_dir`]).
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(file_name: &str) -> Result<Self> {
        let path = data_dir()?.join(file_name);
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Bind this database to the record named `key`.
    pub fn record(self, key: impl Into<String>) -> DatabaseRecord {
        DatabaseRecord {
            db: self,
            key: key.into(),
        }
    }
}

/// One keyed row of a [`Database`], used as [`TaskStorage`].
pub struct DatabaseRecord {
    db: Database,
    key: String,
}

impl DatabaseRecord {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl TaskStorage for DatabaseRecord {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.db.kv_get(&self.key)?)
    }

    fn write(&mut self, document: &str) -> Result<()> {
        Ok(self.db.kv_set(&self.key, document)?)
    }
}
