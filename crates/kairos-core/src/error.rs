//! Error types for Kairos Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid time format '{0}'. Expected HH:MM in 24-hour format.")]
    InvalidTime(String),

    #[error("Invalid date '{0}'. Expected an ISO calendar date (YYYY-MM-DD).")]
    InvalidDate(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
