//! Abstract Syntax Tree (AST) definitions for Kairos
//!
//! This module contains:
//! - Typed AST nodes for the rules DSL (document, form, field)
//! - Typed AST nodes for the events DSL (document, event draft)
//! - A generic, grammar-independent node tree built from the typed AST by a visitor
//! - A JSON converter over the generic tree with cycle and depth guards

pub mod events;
pub mod node;
pub mod rules;
pub mod tree;
pub mod visitor;

pub use events::{EventDraft, EventsDocument};
pub use node::{AstNode, AstObject};
pub use rules::{FieldSpec, FormSpec, RulesDocument};
pub use tree::{TreeConverter, DEFAULT_MAX_DEPTH};
pub use visitor::{AstVisitor, EventsNode, NodeCounter, RulesNode, TreeBuilder};
