//! # Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal App                       │
//! │                                                                         │
//! │  key press / script token                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<DisplayResponse, ApiError>                               │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  CalcError::DivisionByZero ─────────────────────► ApiError ─────►│  │
//! │  │  CalcError::Validation(..) ─────────────────────► ApiError ─────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Screen flashes `message`, then re-renders the unchanged state         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ApiError` is per-action and recoverable. `AppError` is for startup and
//! terminal failures that end the program.

use std::path::PathBuf;

use calc_core::{CalcError, ValidationError};
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from a command.
///
/// ## Serialization
/// Script mode with `--json` prints this shape:
/// ```json
/// {
///   "code": "DIVISION_BY_ZERO",
///   "message": "Cannot divide by zero"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message, shown as the transient flash
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Divide with a zero divisor
    DivisionByZero,

    /// Square root of a negative number
    NegativeSqrt,

    /// Malformed token (unknown action, unit, ...)
    ValidationError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts engine errors to API errors.
impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::DivisionByZero => ApiError::new(ErrorCode::DivisionByZero, err.to_string()),
            CalcError::NegativeSqrt => ApiError::new(ErrorCode::NegativeSqrt, err.to_string()),
            CalcError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// App Error
// =============================================================================

/// Fatal application errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O failure (terminal, log file, config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::state::ConfigState`].
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config values out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `--show-config` could not encode the configuration.
    #[error("Failed to encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    /// Script mode could not encode its output.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// A script token was rejected before anything ran.
    #[error("Invalid script: {0}")]
    Script(#[from] ApiError),
}

/// Convenience type alias for fatal results.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_errors_map_to_codes() {
        let err = ApiError::from(CalcError::DivisionByZero);
        assert_eq!(err.code, ErrorCode::DivisionByZero);
        assert_eq!(err.message, "Cannot divide by zero");

        let err = ApiError::from(CalcError::NegativeSqrt);
        assert_eq!(err.code, ErrorCode::NegativeSqrt);
    }

    #[test]
    fn test_validation_errors_map_to_validation_code() {
        let err = ApiError::from(CalcError::from(ValidationError::UnknownUnit(
            "parsec".to_string(),
        )));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Unknown unit: 'parsec'");
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(ApiError::from(CalcError::DivisionByZero)).unwrap();
        assert_eq!(json["code"], "DIVISION_BY_ZERO");
        assert_eq!(json["message"], "Cannot divide by zero");
    }

    #[test]
    fn test_display() {
        let err = ApiError::from(CalcError::NegativeSqrt);
        assert_eq!(
            err.to_string(),
            "[NegativeSqrt] Cannot take the square root of a negative number"
        );
    }
}
