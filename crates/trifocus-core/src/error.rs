//! Core error types for trifocus-core.
//!
//! Only `ValidationError` ever reaches the caller of a task mutation as an
//! `Err`. Persistence and advisory failures are absorbed by the store and the
//! advisory client and handed back as values (`PersistenceWarning`,
//! `AdvisoryOutcome::Unavailable`) so the running session keeps working.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for trifocus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors raised before a mutation touches the collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty or whitespace
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// What the store was doing when durable storage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOp {
    /// Reading the persisted record at startup
    Read,
    /// Decoding the persisted document
    Decode,
    /// Writing the collection after a mutation
    Write,
}

impl fmt::Display for PersistenceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            PersistenceOp::Read => "read",
            PersistenceOp::Decode => "decode",
            PersistenceOp::Write => "write",
        };
        f.write_str(verb)
    }
}

/// Non-fatal durable-storage failure.
///
/// In-memory state stays authoritative; the warning only tells the caller
/// that the persisted copy may be stale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not {op} task collection: {message}")]
pub struct PersistenceWarning {
    pub op: PersistenceOp,
    pub message: String,
}

impl PersistenceWarning {
    pub fn new(op: PersistenceOp, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }
}

/// Reasons the advisory service could not produce a usable answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryError {
    /// No API credential configured
    #[error("advisory service credential not configured")]
    MissingCredential,

    /// Connection failure, timeout or client construction failure
    #[error("advisory service unreachable: {0}")]
    Transport(String),

    /// Non-2xx HTTP status
    #[error("advisory service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The service answered without any text
    #[error("advisory service returned no text")]
    EmptyResponse,

    /// The response body or payload could not be decoded
    #[error("malformed advisory response: {0}")]
    MalformedResponse(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Custom(format!("TOML parse error: {err}"))
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Custom(format!("TOML serialize error: {err}"))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_warning_display_names_operation() {
        let warning = PersistenceWarning::new(PersistenceOp::Write, "disk full");
        assert_eq!(
            warning.to_string(),
            "could not write task collection: disk full"
        );
    }

    #[test]
    fn locked_sqlite_error_maps_to_locked() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
            None,
        );
        assert!(matches!(DatabaseError::from(err), DatabaseError::Locked));
    }
}
