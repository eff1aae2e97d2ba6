//! # State Module
//!
//! Manages application state for the terminal app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │       EngineState        │      │       ConfigState        │        │
//! │  │                          │      │                          │        │
//! │  │  Arc<Mutex<              │      │  error_display_ms        │        │
//! │  │    CalculatorEngine      │      │  show_history            │        │
//! │  │  >>                      │      │  log_filter              │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  • EngineState: one engine per session, exclusive access per command   │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod engine;

pub use config::ConfigState;
pub use engine::EngineState;
