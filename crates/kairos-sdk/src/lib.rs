//! Kairos SDK
//!
//! High-level API for ingesting rules documents, scheduling events and
//! serving form configuration.

pub mod builder;
pub mod config;
pub mod error;
pub mod scheduling_engine;
pub mod validator;

// Re-export main types
pub use builder::EngineBuilder;
pub use config::{AstOptions, EngineConfig};
pub use error::{ErrorKind, Result, SdkError};
pub use scheduling_engine::{FormConfig, FormField, SchedulingEngine};

// Re-export commonly used types from dependencies
pub use kairos_core::{Event, EventDraft, EventsDocument, RulesDocument, StoredFieldRule};
pub use kairos_repository::{RepositoryConfig, RepositorySource};
pub use kairos_validator::{RulesPolicy, SchedulingError, SchedulingPolicy};
