//! Kairos Core - Core types and definitions for the Kairos scheduling DSLs
//!
//! This crate provides the fundamental types used across the Kairos ecosystem:
//! - AST (Abstract Syntax Tree) definitions for the rules and events DSLs
//! - A generic tree view of the AST for inspection tooling
//! - Time-of-day arithmetic used by the scheduling checks
//! - Persisted record types (events, field rules)
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{
    AstNode, EventDraft, EventsDocument, FieldSpec, FormSpec, RulesDocument, TreeConverter,
};
pub use error::CoreError;
pub use types::{Event, EventId, StoredFieldRule, TimeOfDay, TimeRange};
