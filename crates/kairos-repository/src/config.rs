//! Repository configuration types
//!
//! Selects the storage backend: an in-process memory store or SQLite.

use crate::error::RepositoryResult;
use crate::memory::MemoryRepository;
use crate::traits::WritableRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Repository source type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySource {
    /// In-memory store (tests, demos, throwaway servers)
    #[default]
    Memory,
    /// SQLite database
    Sqlite,
}

/// Repository configuration
///
/// # Examples
///
/// ```rust
/// use kairos_repository::RepositoryConfig;
///
/// // Memory repository
/// let config = RepositoryConfig::memory();
///
/// // SQLite repository
/// let config = RepositoryConfig::sqlite("sqlite://events.db");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Configuration source type
    #[serde(default)]
    pub source: RepositorySource,

    /// Database connection URL (required for Sqlite source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Pool size override; in-memory SQLite always uses one connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

impl RepositoryConfig {
    /// Create a memory repository configuration
    pub fn memory() -> Self {
        Self {
            source: RepositorySource::Memory,
            database_url: None,
            max_connections: None,
        }
    }

    /// Create a SQLite repository configuration
    ///
    /// # Example
    /// ```rust
    /// use kairos_repository::RepositoryConfig;
    ///
    /// let config = RepositoryConfig::sqlite("sqlite::memory:");
    /// ```
    pub fn sqlite(url: impl Into<String>) -> Self {
        Self {
            source: RepositorySource::Sqlite,
            database_url: Some(url.into()),
            max_connections: None,
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error if required fields are missing for the selected source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            RepositorySource::Sqlite => {
                if self.database_url.as_deref().map_or(true, str::is_empty) {
                    return Err(ConfigError::MissingField {
                        backend: "Sqlite".to_string(),
                        field: "database_url".to_string(),
                    });
                }
            }
            RepositorySource::Memory => {}
        }
        Ok(())
    }

    /// Open the configured backend
    pub async fn open(&self) -> RepositoryResult<Arc<dyn WritableRepository>> {
        self.validate()?;
        match self.source {
            RepositorySource::Memory => {
                tracing::info!("Using in-memory repository");
                Ok(Arc::new(MemoryRepository::new()))
            }
            RepositorySource::Sqlite => self.open_sqlite().await,
        }
    }

    #[cfg(feature = "sqlite")]
    async fn open_sqlite(&self) -> RepositoryResult<Arc<dyn WritableRepository>> {
        let url = self.database_url.as_deref().unwrap_or_default();
        let repo = crate::sqlite::SqliteRepository::connect(url, self.max_connections).await?;
        Ok(Arc::new(repo))
    }

    #[cfg(not(feature = "sqlite"))]
    async fn open_sqlite(&self) -> RepositoryResult<Arc<dyn WritableRepository>> {
        Err(crate::error::RepositoryError::Unsupported(
            "sqlite (build with the `sqlite` feature)".to_string(),
        ))
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required field is missing for the selected source
    #[error("{backend} source requires {field} to be set")]
    MissingField { backend: String, field: String },
}
