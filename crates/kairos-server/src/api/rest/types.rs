//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use chrono::NaiveDate;
use kairos_sdk::{EventDraft, FormField, SchedulingEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SchedulingEngine>,
}

/// Service index response
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query of `GET /form-config`
#[derive(Debug, Deserialize)]
pub struct FormConfigQuery {
    #[serde(default)]
    pub requester_type: Option<String>,
}

/// Visible form fields of a requester type
#[derive(Debug, Serialize, Deserialize)]
pub struct FormConfigResponse {
    pub requester_type: String,
    pub fields: Vec<FormField>,
}

/// Body of `POST /events`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventPayload {
    pub name: String,
    pub requester_type: String,

    /// ISO `YYYY-MM-DD`
    pub date: NaiveDate,

    /// `HH:MM`
    pub start_time: String,

    /// `HH:MM`
    pub end_time: String,

    pub location: String,

    #[serde(default)]
    pub requester_unit: Option<String>,
}

impl From<CreateEventPayload> for EventDraft {
    fn from(payload: CreateEventPayload) -> Self {
        let draft = EventDraft::new(
            payload.name,
            payload.requester_type,
            payload.date,
            payload.start_time,
            payload.end_time,
            payload.location,
        );
        match payload.requester_unit.filter(|unit| !unit.trim().is_empty()) {
            Some(unit) => draft.with_requester_unit(unit),
            None => draft,
        }
    }
}

/// DSL source text
#[derive(Debug, Deserialize)]
pub struct DslPayload {
    pub source: String,
}

/// JSON tree of a parsed document
#[derive(Debug, Serialize)]
pub struct AstResponse {
    pub ast: serde_json::Value,
}

/// Result of `POST /rules`
#[derive(Debug, Serialize, Deserialize)]
pub struct RulesIngestResponse {
    /// Number of forms stored
    pub forms: usize,
}

/// Result of `POST /events/batch`
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchIngestResponse {
    /// Number of events stored
    pub events: usize,
}
