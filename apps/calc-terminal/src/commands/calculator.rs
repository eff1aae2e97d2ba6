//! # Calculator Commands
//!
//! Commands that drive the engine through [`Action`]s.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Key '5' ─► Action::Digit(5) ─► dispatch() ─► engine.apply() ─► Ok(snap)│
//! │                                                                         │
//! │  Token "divide" ─► run_tag() ─► parse ─► dispatch() ─► ...              │
//! │                                                                         │
//! │  Err(CalcError) ─► ApiError ─► screen flash; engine state unchanged     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use calc_core::validation::parse_script;
use calc_core::Action;
use tracing::debug;

use super::DisplayResponse;
use crate::error::ApiError;
use crate::state::EngineState;

/// Gets the current display state.
pub fn get_display(engine: &EngineState) -> DisplayResponse {
    debug!("get_display command");
    engine.with_engine(|e| e.snapshot())
}

/// Performs one action and returns the new display state.
///
/// ## Errors
/// - `DIVISION_BY_ZERO` / `NEGATIVE_SQRT` from the engine
/// - `VALIDATION_ERROR` for a unit outside the active table
pub fn dispatch(engine: &EngineState, action: Action) -> Result<DisplayResponse, ApiError> {
    debug!(action = %action, "dispatch command");

    engine.with_engine_mut(|e| {
        e.apply(action)
            .map(|()| e.snapshot())
            .map_err(ApiError::from)
    })
}

/// Parses an action tag ("add", "m-plus", "7", "from:MB", ...) and performs it.
pub fn run_tag(engine: &EngineState, tag: &str) -> Result<DisplayResponse, ApiError> {
    debug!(tag = %tag, "run_tag command");

    let action: Action = tag.parse()?;
    dispatch(engine, action)
}

/// Outcome of one script step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub tag: String,
    pub result: Result<DisplayResponse, ApiError>,
}

/// Runs a whitespace-separated script of action tags.
///
/// The whole script is validated first; a malformed tag rejects it without
/// touching the engine. Engine errors do not stop the script: like a user
/// who sees the error flash and keeps typing, later steps still run.
pub fn run_script(engine: &EngineState, script: &str) -> Result<Vec<StepOutcome>, ApiError> {
    debug!(script = %script, "run_script command");

    let actions = parse_script(script)?;
    let outcomes = actions
        .into_iter()
        .map(|action| StepOutcome {
            tag: action.to_string(),
            result: dispatch(engine, action),
        })
        .collect();
    Ok(outcomes)
}
