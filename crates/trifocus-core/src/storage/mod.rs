mod config;
pub mod database;

pub use config::{AdvisoryConfig, Config, StorageConfig};
pub use database::{Database, DatabaseRecord};

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Durable home of the whole task collection.
///
/// Implementations store one opaque document and overwrite it wholesale on
/// every write; the store handles encoding.
pub trait TaskStorage {
    /// Return the persisted document, or `None` if nothing was saved yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the persisted document.
    fn write(&mut self, document: &str) -> Result<()>;
}

impl<T: TaskStorage + ?Sized> TaskStorage for Box<T> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&mut self, document: &str) -> Result<()> {
        (**self).write(document)
    }
}

/// Process-local storage, used for ephemeral sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Option<String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing document, as if a previous session saved it.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    /// Make every subsequent write fail.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TaskStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<()> {
        if self.fail_writes {
            return Err(CoreError::Custom("storage is read-only".into()));
        }
        self.document = Some(document.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Returns the TriFocus data directory.
///
/// `TRIFOCUS_DATA_DIR` wins when set. Otherwise `~/.config/trifocus[-dev]/`,
/// with the `-dev` suffix when `TRIFOCUS_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TRIFOCUS_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TRIFOCUS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("trifocus-dev")
            } else {
                base_dir.join("trifocus")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
