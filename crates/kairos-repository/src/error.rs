//! Error types for the repository layer

use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database error (when the sqlite feature is enabled)
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned back into a record
    #[error("Corrupt record in {table}: {message}")]
    CorruptRecord { table: String, message: String },

    /// Configuration problem
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The configured backend was not compiled in
    #[error("Unsupported repository source: {0}")]
    Unsupported(String),

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}

impl RepositoryError {
    pub(crate) fn corrupt(table: &str, message: impl Into<String>) -> Self {
        RepositoryError::CorruptRecord {
            table: table.to_string(),
            message: message.into(),
        }
    }
}
