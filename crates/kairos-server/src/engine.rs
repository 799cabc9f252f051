//! Scheduling engine initialization
//!
//! Converts the server configuration into an SDK engine.

use crate::config::ServerConfig;
use anyhow::Result;
use kairos_repository::RepositorySource;
use kairos_sdk::{EngineBuilder, SchedulingEngine};
use tracing::{info, warn};

/// Initialize the scheduling engine
pub async fn init_engine(config: &ServerConfig) -> Result<SchedulingEngine> {
    match config.repository.source {
        RepositorySource::Memory => {
            warn!("Using in-memory storage; events and rules are lost on shutdown")
        }
        RepositorySource::Sqlite => info!(
            "Using SQLite storage at {}",
            config.repository.database_url.as_deref().unwrap_or("<unset>")
        ),
    }

    let engine = EngineBuilder::new()
        .with_config(config.engine.clone())
        .with_repository(config.repository.clone())
        .build()
        .await?;

    Ok(engine)
}
