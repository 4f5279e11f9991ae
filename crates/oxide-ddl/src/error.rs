//! Error types for schema execution.

use std::path::PathBuf;

use oxide_ddl_core::DdlError;

/// Errors that can occur while loading, compiling or executing a schema.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// The schema could not be compiled.
    #[error(transparent)]
    Compile(#[from] DdlError),

    /// Database error during statement execution.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (reading schema files, writing statements).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a schema file.
    #[error("Failed to parse schema file '{path}': {message}")]
    ParseError {
        /// Path to the schema file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Execution was requested without a database connection.
    #[error("No database connection; only dry runs are possible")]
    NoDatabase,
}

/// Result type for schema execution.
pub type Result<T> = std::result::Result<T, ExecuteError>;
