//! # Desk Calculator (terminal)
//!
//! Terminal front end for `calc-core`: configuration, logging, the key and
//! screen adapters, and a non-interactive script mode.
//!
//! ## Module Organization
//! ```text
//! calc_terminal_lib/
//! ├── lib.rs          ◄─── You are here (CLI, logging, run loops)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── engine.rs   ◄─── Shared calculator engine
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── calculator.rs ◄─ Action dispatch and scripts
//! │   ├── units.rs    ◄─── Unit panel stepping
//! │   └── config.rs   ◄─── Config query
//! ├── input.rs        ◄─── Key events ──► commands
//! ├── render.rs       ◄─── Snapshot ──► screen, error flash
//! └── error.rs        ◄─── ApiError / AppError
//! ```
//!
//! ## Interactive Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reader thread ── crossterm::event::read() ──► mpsc ──┐                 │
//! │                                                        ▼                 │
//! │  tokio::select! {  key      ─► map_key ─► command ─► redraw             │
//! │                    deadline ─► flash expires       ─► redraw  }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod input;
pub mod render;
pub mod state;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use commands::calculator::{dispatch, get_display, run_script};
use commands::units::{cycle_unit, cycle_unit_kind};
use commands::DisplayResponse;
use error::{ApiError, AppResult};
use input::{map_key, KeyCommand};
use render::{render_lines, Screen};
use state::{ConfigState, EngineState};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "calc-terminal", version, about = "Desk calculator for the terminal")]
pub struct Cli {
    /// Config file (default: calc.toml in the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run whitespace-separated action tags instead of the interactive UI,
    /// e.g. "1 2 multiply 3 calculate"
    #[arg(short, long)]
    pub script: Option<String>,

    /// Print script results as JSON
    #[arg(long, requires = "script")]
    pub json: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration (file ──► CALC_* env ──► validate), logging      │
/// │     warnings to stderr before the terminal is taken over                │
/// │  2. Initialize logging (file when interactive, stderr for scripts)      │
/// │  3. Create EngineState                                                  │
/// │  4. Script mode: run tags, print result                                 │
/// │     Interactive: raw mode, key loop until quit                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = load_config(cli.config)?;

    if cli.show_config {
        let config = commands::config::get_config(&config);
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    init_tracing(&config, cli.script.is_none());
    info!(version = env!("CARGO_PKG_VERSION"), "Starting desk calculator");

    let engine = EngineState::new();

    match cli.script {
        Some(script) => {
            let mut out = io::stdout().lock();
            run_script_mode(&engine, &script, cli.json, &config, &mut out)
        }
        None => run_interactive(&engine, &config).await,
    }
}

/// Filter for the config load, before `log_filter` is known.
const STARTUP_LOG_FILTER: &str = "warn";

/// Loads the configuration under a stderr subscriber.
///
/// An explicit `--config` must load. The default location may be absent or
/// broken, which falls back to defaults with a warning.
fn load_config(path: Option<PathBuf>) -> AppResult<ConfigState> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(STARTUP_LOG_FILTER));
    let startup = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::with_default(startup, || match path {
        Some(path) => ConfigState::load(Some(path)),
        None => Ok(ConfigState::load_or_default(None)),
    })
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise `log_filter` from the config (default `info,calc=debug`)
///
/// The interactive UI owns the terminal, so its log goes to `log_path()`.
fn init_tracing(config: &ConfigState, interactive: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let writer = if interactive {
        match config.log_path().map(|path| open_log_file(&path)) {
            Some(Ok(file)) => BoxMakeWriter::new(Mutex::new(file)),
            _ => BoxMakeWriter::new(io::sink),
        }
    } else {
        BoxMakeWriter::new(io::stderr)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(!interactive)
        .init();
}

fn open_log_file(path: &std::path::Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

// =============================================================================
// Script Mode
// =============================================================================

/// A step that failed while the script kept running.
#[derive(Debug, Clone, Serialize)]
pub struct StepError {
    /// 1-based position of the tag in the script
    pub step: usize,
    pub tag: String,
    #[serde(flatten)]
    pub error: ApiError,
}

/// JSON output of script mode.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub snapshot: DisplayResponse,
    pub errors: Vec<StepError>,
}

/// Runs a script and writes the final state to `out`.
pub fn run_script_mode<W: Write>(
    engine: &EngineState,
    script: &str,
    json: bool,
    config: &ConfigState,
    out: &mut W,
) -> AppResult<()> {
    let outcomes = run_script(engine, script)?;

    let errors: Vec<StepError> = outcomes
        .into_iter()
        .enumerate()
        .filter_map(|(i, outcome)| {
            outcome.result.err().map(|error| StepError {
                step: i + 1,
                tag: outcome.tag,
                error,
            })
        })
        .collect();
    let snapshot = get_display(engine);
    debug!(errors = errors.len(), "script finished");

    if json {
        let report = ScriptReport { snapshot, errors };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    for err in &errors {
        writeln!(out, "step {} ({}): {}", err.step, err.tag, err.error.message)?;
    }
    for line in render_lines(&snapshot, None, config) {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

// =============================================================================
// Interactive Mode
// =============================================================================

/// Raw mode + alternate screen for the lifetime of the UI.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Forwards key events until the receiver goes away or input fails.
fn read_keys(tx: mpsc::UnboundedSender<KeyEvent>) {
    loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "Failed to read terminal event");
                break;
            }
        }
    }
}

fn run_command(engine: &EngineState, command: KeyCommand) -> Result<DisplayResponse, ApiError> {
    match command {
        KeyCommand::Action(action) => dispatch(engine, action),
        KeyCommand::CycleUnitKind => cycle_unit_kind(engine),
        KeyCommand::CycleUnit(slot) => cycle_unit(engine, slot),
        KeyCommand::Quit => Ok(get_display(engine)),
    }
}

async fn run_interactive(engine: &EngineState, config: &ConfigState) -> AppResult<()> {
    let _guard = TerminalGuard::enter()?;
    let mut out = io::stdout();
    let mut screen = Screen::new(config.error_display());

    let (tx, mut rx) = mpsc::unbounded_channel();
    // Blocking reads stay off the runtime; the thread ends with the process.
    std::thread::spawn(move || read_keys(tx));

    screen.draw(&mut out, &get_display(engine), config)?;

    loop {
        let deadline = screen.deadline();

        tokio::select! {
            key = rx.recv() => {
                let Some(key) = key else { break };
                let Some(command) = map_key(key) else { continue };
                if command == KeyCommand::Quit {
                    info!("Quit requested");
                    break;
                }

                match run_command(engine, command) {
                    Ok(_) => screen.dismiss(),
                    Err(err) => {
                        debug!(code = ?err.code, "Command failed");
                        screen.show_error(err.message);
                    }
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                screen.expire();
            }
        }

        screen.draw(&mut out, &get_display(engine), config)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_output(script: &str, json: bool) -> String {
        let engine = EngineState::new();
        let mut out = Vec::new();
        run_script_mode(&engine, script, json, &ConfigState::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_parses_script_flags() {
        let cli = Cli::parse_from(["calc-terminal", "--script", "5 add 3 =", "--json"]);
        assert_eq!(cli.script.as_deref(), Some("5 add 3 ="));
        assert!(cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_load_config_rejects_missing_explicit_file() {
        let path = std::env::temp_dir().join("desk-calc-test-no-such-config.toml");
        let result = load_config(Some(path));
        assert!(matches!(result, Err(error::AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_cli_json_requires_script() {
        assert!(Cli::try_parse_from(["calc-terminal", "--json"]).is_err());
    }

    #[test]
    fn test_script_plain_output() {
        let text = script_output("1 2 multiply 3 calculate", false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1].trim(), "36");
        assert_eq!(lines.last(), Some(&"12 × 3 = 36"));
    }

    #[test]
    fn test_script_reports_errors_and_continues() {
        let text = script_output("8 divide 0 = clear 2", false);
        assert!(text.starts_with("step 4 (calculate): Cannot divide by zero\n"));
        assert!(text.lines().any(|l| l.trim() == "2"));
    }

    #[test]
    fn test_script_json_output() {
        let text = script_output("9 toggle-sign sqrt ms", true);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["snapshot"]["display"], "-9");
        assert_eq!(value["snapshot"]["memoryIndicator"], "M");
        assert_eq!(value["errors"][0]["step"], 3);
        assert_eq!(value["errors"][0]["code"], "NEGATIVE_SQRT");
    }

    #[test]
    fn test_script_rejects_unknown_tag() {
        let engine = EngineState::new();
        let mut out = Vec::new();
        let result = run_script_mode(&engine, "5 percent", false, &ConfigState::default(), &mut out);

        assert!(matches!(result, Err(error::AppError::Script(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_command_quit_is_inert() {
        let engine = EngineState::new();
        let snapshot = run_command(&engine, KeyCommand::Quit).unwrap();
        assert_eq!(snapshot.display, "0");
    }
}
