//! Error types for jcal.

use thiserror::Error;

/// Errors that can occur while fetching, aggregating and rendering a calendar.
#[derive(Error, Debug)]
pub enum JcalError {
    #[error("Feed could not be fetched: {0}")]
    Fetch(String),

    #[error("Feed is not an iCalendar document: {0}")]
    Validation(String),

    #[error("ICS parse error: {0}")]
    Parse(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for JcalError {
    fn from(err: lopdf::Error) -> Self {
        JcalError::Render(err.to_string())
    }
}

/// Result type alias for jcal operations.
pub type JcalResult<T> = Result<T, JcalError>;
