//! REST API
//!
//! Form configuration, event submission and DSL ingestion routes. Every
//! failure is answered with `{error, kind, status}`.

mod extractors;
mod handlers;
mod router;
mod tests;
pub mod types;

pub use extractors::JsonExtractor;
pub use router::{create_router, create_router_with_cors};
pub use types::{
    AppState, AstResponse, BatchIngestResponse, CreateEventPayload, DslPayload, FormConfigQuery,
    FormConfigResponse, HealthResponse, RulesIngestResponse, ServiceInfo,
};
