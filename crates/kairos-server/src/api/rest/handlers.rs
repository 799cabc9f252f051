//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use kairos_sdk::{Event, EventDraft, FormConfig, StoredFieldRule};
use tracing::{info, warn};

const ENDPOINTS: [&str; 9] = [
    "GET /health",
    "GET /form-config?requester_type=",
    "GET /events",
    "POST /events",
    "POST /events/batch",
    "GET /rules",
    "POST /rules",
    "POST /rules-ast",
    "POST /events-ast",
];

/// Service index
pub(super) async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "kairos".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Visible form fields of a requester type
pub(super) async fn form_config(
    State(state): State<AppState>,
    Query(query): Query<FormConfigQuery>,
) -> Result<Json<FormConfigResponse>, ServerError> {
    let requester_type = query
        .requester_type
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            ServerError::InvalidRequest("Missing query parameter 'requester_type'".to_string())
        })?;

    match state.engine.form_config(&requester_type).await? {
        FormConfig::NotConfigured => Err(ServerError::NotFound(format!(
            "No form configured for requester type '{}'",
            requester_type
        ))),
        FormConfig::Configured(fields) => Ok(Json(FormConfigResponse {
            requester_type,
            fields,
        })),
    }
}

/// All stored events
pub(super) async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ServerError> {
    Ok(Json(state.engine.list_events().await?))
}

/// Validate and store a single event
#[axum::debug_handler]
pub(super) async fn create_event(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<CreateEventPayload>,
) -> Result<(StatusCode, Json<Event>), ServerError> {
    let draft = EventDraft::from(payload);
    info!("Creating event {}", draft.describe());

    match state.engine.create_event(draft).await {
        Ok(event) => {
            info!("Event stored with id {}", event.id);
            Ok((StatusCode::CREATED, Json(event)))
        }
        Err(err) => {
            warn!("Event rejected: {}", err);
            Err(err.into())
        }
    }
}

/// Ingest an events DSL document
pub(super) async fn ingest_events(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<DslPayload>,
) -> Result<Json<BatchIngestResponse>, ServerError> {
    let events = state.engine.ingest_events_source(&payload.source).await?;
    info!("Ingested {} events", events);
    Ok(Json(BatchIngestResponse { events }))
}

/// All stored field rules
pub(super) async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredFieldRule>>, ServerError> {
    Ok(Json(state.engine.list_field_rules().await?))
}

/// Ingest a rules DSL document, replacing the stored rule set
pub(super) async fn ingest_rules(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<DslPayload>,
) -> Result<Json<RulesIngestResponse>, ServerError> {
    let forms = state.engine.ingest_rules(&payload.source).await?;
    info!("Ingested rules for {} forms", forms);
    Ok(Json(RulesIngestResponse { forms }))
}

/// JSON tree of a rules document
pub(super) async fn rules_ast(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<DslPayload>,
) -> Result<Json<AstResponse>, ServerError> {
    let ast = state.engine.rules_ast(&payload.source)?;
    Ok(Json(AstResponse { ast }))
}

/// JSON tree of an events document
pub(super) async fn events_ast(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<DslPayload>,
) -> Result<Json<AstResponse>, ServerError> {
    let ast = state.engine.events_ast(&payload.source)?;
    Ok(Json(AstResponse { ast }))
}
