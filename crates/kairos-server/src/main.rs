//! Kairos HTTP Server
//!
//! Serves form configuration, event creation and DSL ingestion over REST.

use anyhow::Result;
use kairos_server::{api, config::ServerConfig, engine, logging};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    logging::init_tracing(&config.log_level, config.log_format)?;
    info!("Loaded configuration: {:?}", config);

    // Initialize scheduling engine
    let engine = engine::init_engine(&config).await?;
    info!("Scheduling engine initialized");

    let app = api::create_router_with_cors(Arc::new(engine), &config.cors_origins);

    // Start server
    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Form config:  http://{}/form-config?requester_type=Students", addr);
    info!("  Events:       http://{}/events", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
