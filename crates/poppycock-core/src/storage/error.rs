//! Storage error handling
//!
//! Provides typed errors for sentence store operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during sentence store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store has not been opened, or has been closed
    #[error("Sentence store is not open")]
    Unavailable,

    /// SQLite could not open the database file
    #[error("Failed to open sentence database '{path}': {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Database was written by a different schema version
    #[error("Unsupported schema version {found} (expected {expected})")]
    UnsupportedSchema { found: String, expected: i32 },

    /// Record rejected by a write operation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Whether this error means the store could not be used at all
    ///
    /// Covers a closed store and every way `open()` can fail, including a
    /// database refused for its schema version. Callers treat these as
    /// "data temporarily unavailable".
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable
                | StoreError::OpenFailed { .. }
                | StoreError::CreateDirectory { .. }
                | StoreError::UnsupportedSchema { .. }
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::OpenFailed { .. } => {
                Some("Check that the data directory is writable and the disk is not full.")
            }
            StoreError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StoreError::UnsupportedSchema { .. } => {
                Some("The database was created by another version. Point data_dir elsewhere or remove it.")
            }
            _ => None,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
