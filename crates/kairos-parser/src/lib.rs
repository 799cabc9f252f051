//! Kairos Parser - DSL text to AST
//!
//! This crate provides the parsers for the two Kairos authoring languages:
//! - the rules DSL (`.evrules`), producing a [`RulesDocument`](kairos_core::RulesDocument)
//! - the events DSL (`.evdsl`), producing an [`EventsDocument`](kairos_core::EventsDocument)
//!
//! Parsers are plain values: build one at startup and share it.

pub mod error;
pub mod events;
mod lexer;
pub mod rules;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use events::EventsParser;
pub use rules::RulesParser;

/// A parser for one of the Kairos DSLs
pub trait DslParser: Send + Sync {
    /// Root AST type produced by this grammar
    type Document;

    /// Parse source text, failing with a positioned syntax error
    fn parse(&self, source: &str) -> Result<Self::Document>;
}
