//! # Engine State
//!
//! The session's single `CalculatorEngine`.
//!
//! The engine sits behind `Arc<Mutex<T>>`. Every command holds the lock for
//! one engine call and the snapshot that follows it.

use std::sync::{Arc, Mutex};

use calc_core::CalculatorEngine;

/// Shared handle to the session's engine.
#[derive(Debug, Clone)]
pub struct EngineState {
    engine: Arc<Mutex<CalculatorEngine>>,
}

impl EngineState {
    /// Creates state holding a fresh engine.
    pub fn new() -> Self {
        EngineState {
            engine: Arc::new(Mutex::new(CalculatorEngine::new())),
        }
    }

    /// Executes a function with read access to the engine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = engine_state.with_engine(|engine| engine.snapshot());
    /// ```
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CalculatorEngine) -> R,
    {
        let engine = self.engine.lock().expect("Engine mutex poisoned");
        f(&engine)
    }

    /// Executes a function with write access to the engine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// engine_state.with_engine_mut(|engine| engine.apply(action))?;
    /// ```
    pub fn with_engine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CalculatorEngine) -> R,
    {
        let mut engine = self.engine.lock().expect("Engine mutex poisoned");
        f(&mut engine)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}
