//! # calc-core: Pure Calculator Engine
//!
//! This crate is the **heart** of the desk calculator. It contains all state
//! transitions and arithmetic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Desk Calculator Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Input Adapter (calc-terminal)                   │   │
//! │  │        keys ──► Action        script tokens ──► Action          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ engine.apply(action)                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ calc-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  engine   │  │  buffer   │  │  units    │  │  history  │  │   │
//! │  │   │ Calculator│  │ InputBuf  │  │  tables   │  │  entries  │  │   │
//! │  │   │  Engine   │  │ DigitTok  │  │  convert  │  │  window   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO LOGGING SINKS • SYNCHRONOUS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ engine.snapshot()                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Presentation Adapter (calc-terminal)               │   │
//! │  │        display · expression · history · memory indicator        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - `CalculatorEngine`, every user operation
//! - [`action`] - Closed `Action` enum and tag parsing
//! - [`buffer`] - `InputBuffer`, the number being typed
//! - [`number`] - Display text for `f64` values
//! - [`types`] - Operations, units, the display snapshot
//! - [`units`] - Conversion tables
//! - [`history`] - Calculation records
//! - [`validation`] - Checks for adapter-supplied text
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use calc_core::{Action, CalculatorEngine, DigitToken, Operation};
//!
//! let mut engine = CalculatorEngine::new();
//! engine.append_digit(DigitToken::Digit(5));
//! engine.set_operation(Operation::Add).unwrap();
//! engine.append_digit(DigitToken::Digit(3));
//! engine.apply(Action::Calculate).unwrap();
//!
//! assert_eq!(engine.current(), "8");
//! assert_eq!(engine.snapshot().history, vec!["5 + 3 = 8"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod action;
pub mod buffer;
pub mod engine;
pub mod error;
pub mod history;
pub mod number;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use action::Action;
pub use buffer::{DigitToken, InputBuffer};
pub use engine::CalculatorEngine;
pub use error::{CalcError, CalcResult, ValidationError};
pub use history::{History, HistoryEntry, HISTORY_WINDOW};
pub use types::*;
