//! Kairos Validator - semantic and scheduling checks
//!
//! This crate validates parsed documents and candidate events before
//! anything reaches storage:
//! - [`RulesValidator`]: business constraints on rules documents
//! - [`SchedulingValidator`]: time format, ordering, duration and conflicts
//! - [`SubmissionValidator`]: form-driven checks on single submissions
//! - [`DslChecker`]: diagnostics for source text, without storage

pub mod checker;
pub mod error;
pub mod policy;
pub mod rules;
pub mod scheduling;
pub mod submission;

// Re-export main types
pub use checker::{Diagnostic, DiagnosticSeverity, DocumentMetadata, DslChecker, DslType, ValidationResult};
pub use error::{RulesError, SchedulingError, SubmissionError};
pub use policy::{RulesPolicy, SchedulingPolicy};
pub use rules::RulesValidator;
pub use scheduling::SchedulingValidator;
pub use submission::SubmissionValidator;
