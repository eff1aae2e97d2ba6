//! # Error Types
//!
//! Domain-specific error types for calc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  calc-core errors (this file)                                          │
//! │  ├── CalcError        - Arithmetic failures (recoverable)              │
//! │  └── ValidationError  - Malformed tokens from an adapter               │
//! │                                                                         │
//! │  calc-terminal errors (app)                                            │
//! │  └── ApiError         - What the screen shows (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CalcError → ApiError → transient message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recoverability
//! Every error here is local to one user action. The engine state is left
//! exactly as it was before the failing call; the presentation layer shows
//! the message for a moment and then re-renders the unchanged state.

use thiserror::Error;

// =============================================================================
// Calc Error
// =============================================================================

/// Errors raised by calculator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// `calculate()` with a pending divide and a right operand of zero.
    ///
    /// ## State After
    /// - History unchanged
    /// - Pending operation and left operand kept, so the user can fix the
    ///   divisor and press `=` again
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// `sqrt()` on a negative operand.
    #[error("Cannot take the square root of a negative number")]
    NegativeSqrt,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The engine's own typed API cannot produce these; they come from adapters
/// that translate text (action tags, unit names, digit keys) into calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Token is not one of "0"-"9" or ".".
    #[error("'{0}' is not a digit or decimal point")]
    InvalidDigit(String),

    /// Unknown operator name.
    #[error("Unknown operation: '{0}'")]
    UnknownOperation(String),

    /// Unknown action tag.
    #[error("Unknown action: '{0}'")]
    UnknownAction(String),

    /// Unknown unit kind.
    #[error("Unknown unit kind: '{0}'")]
    UnknownUnitKind(String),

    /// Unknown unit symbol.
    #[error("Unknown unit: '{0}'")]
    UnknownUnit(String),

    /// Unit does not belong to the active unit kind.
    #[error("Unit {unit} is not a {kind} unit")]
    UnitKindMismatch { unit: String, kind: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CalcError.
pub type CalcResult<T> = Result<T, CalcError>;

// =============================================================================
// Unit Tests
// =============================================================================
