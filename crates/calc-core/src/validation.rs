//! # Validation Module
//!
//! Input validation for text coming from adapters.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input adapter                                                │
//! │  └── Key map only produces known actions                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands / script mode (text)                                │
//! │  └── THIS MODULE: tags, unit names, unit-vs-kind checks                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine (typed)                                               │
//! │  └── Same unit-vs-kind check before a selection is recorded            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use calc_core::validation::parse_script;
//!
//! let actions = parse_script("5 add 3 calculate").unwrap();
//! assert_eq!(actions.len(), 4);
//! assert!(parse_script("5 explode").is_err());
//! ```

use crate::action::Action;
use crate::error::ValidationError;
use crate::types::{Unit, UnitKind};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses whitespace-separated action tags.
///
/// Fails on the first unknown tag without returning a partial list.
pub fn parse_script(script: &str) -> ValidationResult<Vec<Action>> {
    script.split_whitespace().map(str::parse).collect()
}

/// Checks that a unit slot fits the active table.
///
/// The "base" placeholder (`None`) always fits.
pub fn validate_unit_slot(kind: UnitKind, unit: Option<Unit>) -> ValidationResult<()> {
    match unit {
        Some(u) if u.kind() != kind => Err(ValidationError::UnitKindMismatch {
            unit: u.symbol().to_string(),
            kind: kind.name().to_string(),
        }),
        _ => Ok(()),
    }
}
