//! DSL validation helpers
//!
//! Storage-free diagnostics for authoring tools: every semantic violation of
//! a rules document, and the time checks of an events document.
//!
//! # Example
//!
//! ```rust
//! use kairos_sdk::validator;
//!
//! let result = validator::validate_rules("initialize_runtime = no\nevent_form Students { event_name {} }");
//! assert!(!result.valid);
//! for error in &result.errors {
//!     println!("{}: {}", error.code, error.message);
//! }
//! ```

pub use kairos_validator::{
    Diagnostic, DiagnosticSeverity, DocumentMetadata, DslChecker, DslType, ValidationResult,
};

/// Validate DSL content, detecting its type
pub fn validate(content: &str) -> ValidationResult {
    DslChecker::default().check(content, DslType::Auto)
}

/// Validate a rules document with the default policy
pub fn validate_rules(content: &str) -> ValidationResult {
    DslChecker::default().check_rules(content)
}

/// Validate an events document with the default policy
pub fn validate_events(content: &str) -> ValidationResult {
    DslChecker::default().check_events(content)
}
