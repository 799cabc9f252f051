//! Validation error types
//!
//! Three families, one per validator. All of them describe bad input and
//! leave stored state untouched.

use kairos_core::Event;
use thiserror::Error;

/// A rules document violates a business constraint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("initialize_runtime must be 'yes' to enable rules. Set: initialize_runtime = yes")]
    RuntimeDisabled,

    #[error(
        "Duplicate event_form for requester_type '{requester_type}'. \
         Each requester_type must be defined only once."
    )]
    DuplicateRequester { requester_type: String },

    #[error(
        "Duplicate field '{field}' in event_form {requester_type}. \
         Remove the duplicate definition."
    )]
    DuplicateField {
        requester_type: String,
        field: String,
    },

    #[error(
        "Field '{field}' in event_form {requester_type} defines 'options', \
         but only these fields can define options: {}.",
        .allowed.join(", ")
    )]
    OptionsNotAllowed {
        requester_type: String,
        field: String,
        allowed: Vec<String>,
    },

    #[error(
        "Field '{field}' in event_form {requester_type} must have \
         'required = yes' because it is a mandatory field."
    )]
    MandatoryFieldNotRequired {
        requester_type: String,
        field: String,
    },

    #[error(
        "event_form {requester_type} is missing mandatory fields: {}. \
         All of them must be defined in the form.",
        .missing.join(", ")
    )]
    MandatoryFieldsMissing {
        requester_type: String,
        missing: Vec<String>,
    },

    #[error(
        "Missing event_form definitions for: {}. \
         Define a form for each requester_type.",
        .missing.join(", ")
    )]
    MissingRequesterForms { missing: Vec<String> },
}

impl RulesError {
    /// Requester type the error points at, if any
    pub fn requester_type(&self) -> Option<&str> {
        match self {
            RulesError::DuplicateRequester { requester_type }
            | RulesError::DuplicateField { requester_type, .. }
            | RulesError::OptionsNotAllowed { requester_type, .. }
            | RulesError::MandatoryFieldNotRequired { requester_type, .. }
            | RulesError::MandatoryFieldsMissing { requester_type, .. } => Some(requester_type),
            RulesError::RuntimeDisabled | RulesError::MissingRequesterForms { .. } => None,
        }
    }
}

/// A candidate event cannot be placed on the calendar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Invalid time format '{0}'. Expected HH:MM in 24-hour format.")]
    InvalidTimeFormat(String),

    #[error("Start time '{start}' must be earlier than end time '{end}'.")]
    StartNotBeforeEnd { start: String, end: String },

    #[error(
        "Event duration must be at least {minimum} minutes. \
         Current duration: {minutes} minutes."
    )]
    DurationTooShort { minutes: i32, minimum: u32 },

    #[error(
        "Cannot schedule event due to time conflict with existing events:\n{}",
        conflict_lines(.conflicts)
    )]
    Conflict { conflicts: Vec<Event> },
}

impl SchedulingError {
    /// Events that block the candidate; empty for format and duration errors
    pub fn conflicts(&self) -> &[Event] {
        match self {
            SchedulingError::Conflict { conflicts } => conflicts,
            _ => &[],
        }
    }
}

fn conflict_lines(conflicts: &[Event]) -> String {
    conflicts
        .iter()
        .map(|event| format!("- {}", event))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Submitted form values do not satisfy the requester's form configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please fill all required fields:\n- {}", .fields.join("\n- "))]
    MissingRequired { fields: Vec<String> },

    #[error(
        "'{value}' is not a valid option for {field}. Choose one of: {}.",
        .options.join(", ")
    )]
    NotAnOption {
        field: String,
        value: String,
        options: Vec<String>,
    },

    #[error("Invalid requester_type '{0}'")]
    UnknownRequesterType(String),
}
