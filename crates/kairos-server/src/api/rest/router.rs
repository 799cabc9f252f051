//! Router creation and configuration
//!
//! Creates Axum routers for REST API endpoints.

use super::handlers::*;
use super::types::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use kairos_sdk::SchedulingEngine;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create REST API router with permissive CORS
pub fn create_router(engine: Arc<SchedulingEngine>) -> Router {
    routes(AppState { engine })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Create REST API router allowing only the given origins
///
/// An empty origin list falls back to permissive CORS.
pub fn create_router_with_cors(engine: Arc<SchedulingEngine>, origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    routes(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/form-config", get(form_config))
        .route("/events", get(list_events).post(create_event))
        .route("/events/batch", post(ingest_events))
        .route("/rules", get(list_rules).post(ingest_rules))
        .route("/rules-ast", post(rules_ast))
        .route("/events-ast", post(events_ast))
        .with_state(state)
}
