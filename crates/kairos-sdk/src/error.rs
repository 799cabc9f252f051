//! SDK error types

use chrono::NaiveDate;
use kairos_core::EventDraft;
use kairos_parser::ParseError;
use kairos_repository::RepositoryError;
use kairos_validator::{RulesError, SchedulingError, SubmissionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// SDK error type
///
/// Validation failures keep the message of the component that raised them,
/// so callers can show it to users as is.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Source text does not match its grammar
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Rules document violates a business constraint
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// Candidate event cannot be placed
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    /// Submitted values do not satisfy the requester's form
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// One draft of a batch failed scheduling; nothing was stored
    #[error(
        "Error in event '{name}' on {date} {start_time}-{end_time} \
         ({requester_type} @ {location}):\n{source}"
    )]
    EventRejected {
        name: String,
        date: NaiveDate,
        start_time: String,
        end_time: String,
        requester_type: String,
        location: String,
        source: SchedulingError,
    },

    /// Storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Broad category of an [`SdkError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Scheduling,
    Submission,
    Storage,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::Semantic => "semantic",
            ErrorKind::Scheduling => "scheduling",
            ErrorKind::Submission => "submission",
            ErrorKind::Storage => "storage",
            ErrorKind::Config => "config",
        }
    }
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::ConfigError(_) => ErrorKind::Config,
            SdkError::Parse(_) => ErrorKind::Syntax,
            SdkError::Rules(_) => ErrorKind::Semantic,
            SdkError::Scheduling(_) | SdkError::EventRejected { .. } => ErrorKind::Scheduling,
            SdkError::Submission(_) => ErrorKind::Submission,
            SdkError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Whether the caller's input caused the failure (as opposed to the system)
    pub fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Storage | ErrorKind::Config)
    }

    /// The scheduling failure behind this error, if any
    pub fn scheduling_error(&self) -> Option<&SchedulingError> {
        match self {
            SdkError::Scheduling(err) | SdkError::EventRejected { source: err, .. } => Some(err),
            _ => None,
        }
    }

    pub(crate) fn event_rejected(draft: &EventDraft, source: SchedulingError) -> Self {
        SdkError::EventRejected {
            name: draft.name.clone(),
            date: draft.date,
            start_time: draft.start_time.clone(),
            end_time: draft.end_time.clone(),
            requester_type: draft.requester_type.clone(),
            location: draft.location.clone(),
            source,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
