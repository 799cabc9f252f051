//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kairos_sdk::SdkError;
use serde_json::json;
use thiserror::Error;

/// Server error type
#[derive(Debug, Error)]
pub enum ServerError {
    /// Engine rejected the request or failed
    #[error(transparent)]
    Engine(#[from] SdkError),

    /// Malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requester type has no form configuration
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Engine(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ServerError::Engine(_) | ServerError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Machine-readable category for clients
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Engine(err) => err.kind().as_str(),
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::NotFound(_) => "not_configured",
            ServerError::InternalError(_) => "internal",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let mut body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "status": status.as_u16(),
        });

        if let ServerError::Engine(err) = &self {
            let conflicts = err.scheduling_error().map(|e| e.conflicts()).unwrap_or_default();
            if !conflicts.is_empty() {
                body["conflicts"] = json!(conflicts);
            }
        }

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_repository::RepositoryError;
    use kairos_sdk::SchedulingError;

    #[test]
    fn test_invalid_request_display() {
        let err = ServerError::InvalidRequest("missing requester_type".to_string());
        assert_eq!(err.to_string(), "Invalid request: missing requester_type");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_client_engine_error_is_bad_request() {
        let err: ServerError = SdkError::from(SchedulingError::InvalidTimeFormat("9".to_string())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "scheduling");
        assert_eq!(err.to_string(), "Invalid time format '9'. Expected HH:MM in 24-hour format.");
    }

    #[test]
    fn test_storage_error_is_internal() {
        let err: ServerError = SdkError::from(RepositoryError::Other("locked".to_string())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "storage");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_response() {
        let err = ServerError::NotFound("Students".to_string());
        assert_eq!(err.kind(), "not_configured");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
