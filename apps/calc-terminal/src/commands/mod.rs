//! # Commands Module
//!
//! Every operation the adapters can invoke on the engine.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports, DisplayResponse)
//! ├── calculator.rs  ◄─── Action dispatch, action tags, scripts
//! ├── units.rs       ◄─── Unit-panel stepping
//! └── config.rs      ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input adapter / script token                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn run_tag(                                                            │
//! │      engine: &EngineState,   ◄── session state                         │
//! │      tag: &str,              ◄── raw input                             │
//! │  ) -> Result<DisplayResponse, ApiError>                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Presentation adapter renders the snapshot (or flashes the error)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands hold no logic of their own: parse, call the engine, snapshot.

pub mod calculator;
pub mod config;
pub mod units;

/// What every successful command returns: the state to render.
pub type DisplayResponse = calc_core::DisplaySnapshot;
