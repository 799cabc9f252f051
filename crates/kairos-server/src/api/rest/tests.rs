//! Tests for REST API components

#![cfg(test)]

use super::extractors::JsonExtractor;
use super::types::*;
use axum::{body::Body, extract::FromRequest, http::Request};
use kairos_sdk::EventDraft;

fn payload(unit: Option<&str>) -> CreateEventPayload {
    serde_json::from_value(serde_json::json!({
        "name": "Kickoff",
        "requester_type": "Students",
        "date": "2025-03-01",
        "start_time": "09:00",
        "end_time": "10:00",
        "location": "REC",
        "requester_unit": unit,
    }))
    .unwrap()
}

#[test]
fn test_payload_into_draft() {
    let draft = EventDraft::from(payload(Some("Physics")));
    assert_eq!(draft.name, "Kickoff");
    assert_eq!(draft.date.to_string(), "2025-03-01");
    assert_eq!(draft.requester_unit.as_deref(), Some("Physics"));
}

#[test]
fn test_blank_unit_is_dropped() {
    let draft = EventDraft::from(payload(Some("  ")));
    assert!(draft.requester_unit.is_none());

    let draft = EventDraft::from(payload(None));
    assert!(draft.requester_unit.is_none());
}

#[test]
fn test_payload_rejects_bad_date() {
    let result: Result<CreateEventPayload, _> = serde_json::from_value(serde_json::json!({
        "name": "Kickoff",
        "requester_type": "Students",
        "date": "01/03/2025",
        "start_time": "09:00",
        "end_time": "10:00",
        "location": "REC",
    }));
    assert!(result.is_err());
}

#[test]
fn test_ingest_responses_serialize() {
    let value = serde_json::to_value(RulesIngestResponse { forms: 2 }).unwrap();
    assert_eq!(value, serde_json::json!({"forms": 2}));

    let value = serde_json::to_value(BatchIngestResponse { events: 3 }).unwrap();
    assert_eq!(value, serde_json::json!({"events": 3}));
}

#[tokio::test]
async fn test_json_extractor_accepts_valid_body() {
    let request = Request::builder()
        .header("content-type", "application/json")
        .body(Body::from(r#"{"source": "initialize_runtime = yes"}"#))
        .unwrap();

    let JsonExtractor(payload) = JsonExtractor::<DslPayload>::from_request(request, &())
        .await
        .unwrap();
    assert_eq!(payload.source, "initialize_runtime = yes");
}

#[tokio::test]
async fn test_json_extractor_rejects_missing_content_type() {
    let request = Request::builder()
        .body(Body::from(r#"{"source": ""}"#))
        .unwrap();

    let err = JsonExtractor::<DslPayload>::from_request(request, &())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), "invalid_request");
    assert!(err.to_string().contains("Content-Type"));
}

#[tokio::test]
async fn test_json_extractor_rejects_syntax_error() {
    let request = Request::builder()
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let err = JsonExtractor::<DslPayload>::from_request(request, &())
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("JSON syntax error"));
}
