//! Storage and configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record exists with the requested id
    #[error("{entity} not found with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Connectivity, constraint or unexpected query failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Store mutex poisoned by a panicking holder
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Not-found error for a student id.
    pub fn student_not_found(id: i64) -> Self {
        StoreError::NotFound {
            entity: "student",
            id: id.to_string(),
        }
    }

    /// Not-found error for a todo id.
    pub fn todo_not_found(id: &str) -> Self {
        StoreError::NotFound {
            entity: "todo",
            id: id.to_string(),
        }
    }

    /// Returns true for the not-found variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither the environment variable nor the CLI flag named a file
    #[error("config path is not provided")]
    MissingPath,

    /// Config path does not exist
    #[error("config file does not exist at path: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Config file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field is present but unusable
    #[error("invalid config field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}
