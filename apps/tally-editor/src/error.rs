//! # API Error Type
//!
//! Unified error type for editor commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Screen calls prepare_submission()                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Not logged in? ──── CoreError::NotLoggedIn ──────────┐                 │
//! │         │                                             │                 │
//! │         ▼                                             ▼                 │
//! │  Form invalid? ───── Vec<ValidationError> ─────────► ApiError ──► UI   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  SubmitRequest ─────────────────────────────────────► transport        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The screen receives `{ "code": "VALIDATION_ERROR", "message": "...",
//! "fields": [...] }` and can mark each failing input.

use serde::Serialize;
use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Error returned from editor commands.
#[derive(Debug, Clone, Serialize, Error)]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field failures, filled for validation errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// One failing input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(err: &ValidationError) -> Self {
        FieldError {
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form validation failed
    ValidationError,

    /// No session; the screen should send the user to login
    Unauthorized,

    /// A line index does not exist
    LineNotFound,

    /// Operation does not apply to this document
    BusinessLogic,

    /// Malformed input document
    InvalidInput,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// A validation error carrying every failing field.
    pub fn validation(errors: &[ValidationError]) -> Self {
        let message = match errors {
            [only] => only.to_string(),
            _ => format!("{} fields are invalid", errors.len()),
        };
        ApiError {
            code: ErrorCode::ValidationError,
            message,
            fields: errors.iter().map(FieldError::from).collect(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LineOutOfRange { .. } => ApiError::new(ErrorCode::LineNotFound, err.to_string()),
            CoreError::NotLoggedIn => ApiError::new(ErrorCode::Unauthorized, "Please log in again"),
            CoreError::TemplateNotApplicable { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(std::slice::from_ref(&e)),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            return ApiError::new(ErrorCode::InvalidInput, format!("Invalid document: {}", err));
        }
        tracing::error!("JSON serialization failed: {}", err);
        ApiError::internal("Could not serialize document")
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::new(ErrorCode::InvalidInput, format!("Could not read document: {}", err))
    }
}
