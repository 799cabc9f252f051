//! Builder pattern for SchedulingEngine

use crate::config::EngineConfig;
use crate::error::Result;
use crate::scheduling_engine::SchedulingEngine;
use kairos_repository::{RepositoryConfig, WritableRepository};
use kairos_validator::{RulesPolicy, SchedulingPolicy};
use std::sync::Arc;

/// Builder for SchedulingEngine
///
/// # Example
///
/// ```rust,ignore
/// use kairos_sdk::{EngineBuilder, RepositoryConfig};
///
/// // Durable storage
/// let engine = EngineBuilder::new()
///     .with_repository(RepositoryConfig::sqlite("sqlite://events.db"))
///     .build()
///     .await?;
///
/// // In-memory storage with a shorter minimum duration
/// let engine = EngineBuilder::new()
///     .with_min_duration_minutes(30)
///     .build()
///     .await?;
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    repository_config: Option<RepositoryConfig>,
    repository: Option<Arc<dyn WritableRepository>>,
}

impl EngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            repository_config: None,
            repository: None,
        }
    }

    /// Replace the whole engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Open storage from a repository configuration at build time
    pub fn with_repository(mut self, config: RepositoryConfig) -> Self {
        self.repository_config = Some(config);
        self
    }

    /// Use an already opened repository; takes precedence over `with_repository`
    pub fn with_storage(mut self, repository: Arc<dyn WritableRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_rules_policy(mut self, policy: RulesPolicy) -> Self {
        self.config.rules = policy;
        self
    }

    pub fn with_scheduling_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.config.scheduling = policy;
        self
    }

    /// Set the minimum event duration
    pub fn with_min_duration_minutes(mut self, minutes: u32) -> Self {
        self.config.scheduling.min_duration_minutes = minutes;
        self
    }

    /// Accept any requester type on single-event creation
    pub fn allow_any_requester_type(mut self) -> Self {
        self.config.rules.restrict_requester_types = false;
        self
    }

    /// Build the engine
    ///
    /// Without any storage configured, the engine runs on an in-memory repository.
    pub async fn build(self) -> Result<SchedulingEngine> {
        let repository = match (self.repository, self.repository_config) {
            (Some(repository), _) => repository,
            (None, Some(config)) => config.open().await?,
            (None, None) => RepositoryConfig::memory().open().await?,
        };

        SchedulingEngine::new(self.config, repository)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
