//! SchedulingEngine - Main API for rules ingestion and event scheduling
//!
//! The module is organized into:
//! - `types`: Form configuration projections returned to clients
//! - `engine`: Core SchedulingEngine implementation

mod engine;
mod types;

pub use engine::SchedulingEngine;
pub use types::{FormConfig, FormField};
