//! Error types for the collaborator form.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use crate::validation::ValidationReport;
use thiserror::Error;

/// Generic text shown when a remote call fails without a usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Algo de errado aconteceu, tente novamente mais tarde!";

/// Errors that can occur when interacting with the collaborator API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The API rejected the submitted record
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

impl ApiError {
    /// Text suitable for a user-facing notification.
    ///
    /// Uses the API's own message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { message } | ApiError::ApiError { message, .. }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors surfaced by form page operations.
#[derive(Error, Debug)]
pub enum FormError {
    /// One or more fields failed validation; shown inline
    #[error("{} field(s) failed validation", .0.errors().count())]
    Invalid(ValidationReport),

    /// The page was opened with unusable route parameters
    #[error("Invalid route: {0}")]
    Route(#[from] ValidationError),

    /// Fetching the record for view mode failed
    #[error("Failed to load collaborator: {0}")]
    Fetch(#[source] ApiError),

    /// The create call failed; the form stays editable
    #[error("Failed to create collaborator: {0}")]
    Submit(#[source] ApiError),

    /// A create call is already in flight
    #[error("A submission is already in progress")]
    SubmitInProgress,

    /// The page is in a state that does not accept input
    #[error("The form is read-only")]
    ReadOnly,

    /// The page was torn down before the call resolved; result discarded
    #[error("The form was closed before the request completed")]
    Detached,
}

/// Convenience type alias for Results with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with FormError
pub type FormResult<T> = Result<T, FormError>;
