//! # Screen Rendering
//!
//! Turns a [`DisplaySnapshot`] into terminal lines and owns the transient
//! error flash.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────┐
//! │                                  12 ×   │  expression
//! │                                    3    │  display (or error flash)
//! │  M                                      │  memory indicator
//! │  units: data   from MB   to KB          │  unit panel
//! │  ─────────────────────────────────────  │
//! │  5 + 3 = 8                              │  history (last three)
//! │  8 × 2 = 16                             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Error Flash
//! An error replaces the display line until its deadline passes or the next
//! successful command redraws. Engine state is never touched by the flash.

use std::io::{self, Write};

use calc_core::types::UNIT_PLACEHOLDER;
use calc_core::{DisplaySnapshot, Unit, UnitKind};
use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tokio::time::{Duration, Instant};

use crate::commands::units::unit_options;
use crate::state::ConfigState;

/// Inner width of the calculator face.
const WIDTH: usize = 40;

const KEY_HELP: &str = "0-9 . + - * / = | Bksp Esc n s | z r m p o | u f t | q";

// =============================================================================
// Pure Rendering
// =============================================================================

/// Builds the screen lines for a snapshot.
///
/// `flash` replaces the display line when present.
pub fn render_lines(
    snapshot: &DisplaySnapshot,
    flash: Option<&str>,
    config: &ConfigState,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);

    lines.push(format!("{:>WIDTH$}", snapshot.expression));
    lines.push(format!("{:>WIDTH$}", flash.unwrap_or(&snapshot.display)));
    lines.push(snapshot.memory_indicator.clone());
    lines.push(unit_line(snapshot));

    if config.show_history {
        lines.push("─".repeat(WIDTH));
        lines.extend(snapshot.history.iter().cloned());
    }

    lines
}

fn unit_line(snapshot: &DisplaySnapshot) -> String {
    let selection = snapshot.unit;
    if selection.kind == UnitKind::None {
        return "units: none".to_string();
    }

    let slot = |unit: Option<Unit>| unit.map_or(UNIT_PLACEHOLDER, Unit::symbol);
    format!(
        "units: {:<7} from {:<5} to {:<5} [{}]",
        selection.kind.name(),
        slot(selection.from),
        slot(selection.to),
        unit_options(selection.kind).join(" ")
    )
}

// =============================================================================
// Screen
// =============================================================================

#[derive(Debug, Clone)]
struct Flash {
    message: String,
    until: Instant,
}

/// Terminal screen with a transient error flash.
#[derive(Debug)]
pub struct Screen {
    flash: Option<Flash>,
    flash_duration: Duration,
}

impl Screen {
    pub fn new(flash_duration: Duration) -> Self {
        Screen {
            flash: None,
            flash_duration,
        }
    }

    /// Shows `message` in place of the display. A newer error replaces the
    /// current one and restarts the timer.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash {
            message: message.into(),
            until: Instant::now() + self.flash_duration,
        });
    }

    /// Drops the flash so the next draw shows the engine state.
    pub fn dismiss(&mut self) {
        self.flash = None;
    }

    /// When the current flash ends, if one is showing.
    pub fn deadline(&self) -> Option<Instant> {
        self.flash.as_ref().map(|f| f.until)
    }

    /// Clears the flash once its deadline has passed. Returns true if it did.
    pub fn expire(&mut self) -> bool {
        match &self.flash {
            Some(flash) if Instant::now() >= flash.until => {
                self.flash = None;
                true
            }
            _ => false,
        }
    }

    pub fn flash_message(&self) -> Option<&str> {
        self.flash.as_ref().map(|f| f.message.as_str())
    }

    /// Redraws the whole screen.
    pub fn draw<W: Write>(
        &self,
        out: &mut W,
        snapshot: &DisplaySnapshot,
        config: &ConfigState,
    ) -> io::Result<()> {
        queue!(out, Clear(ClearType::All))?;

        let lines = render_lines(snapshot, self.flash_message(), config);
        let mut row: u16 = 0;
        for line in &lines {
            queue!(out, MoveTo(0, row), Print(line))?;
            row = row.saturating_add(1);
        }
        queue!(out, MoveTo(0, row.saturating_add(1)), Print(KEY_HELP))?;

        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::{Action, CalculatorEngine, DigitToken, Operation};

    fn digit(d: u8) -> Action {
        Action::Digit(DigitToken::Digit(d))
    }

    fn snapshot_after(actions: &[Action]) -> DisplaySnapshot {
        let mut engine = CalculatorEngine::new();
        engine.apply_all(actions.iter().copied()).unwrap();
        engine.snapshot()
    }

    #[test]
    fn test_render_initial() {
        let lines = render_lines(&CalculatorEngine::new().snapshot(), None, &ConfigState::default());

        assert_eq!(lines[0].trim(), "");
        assert_eq!(lines[1].trim(), "0");
        assert_eq!(lines[1].len(), WIDTH);
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "units: none");
    }

    #[test]
    fn test_render_pending_and_memory() {
        let snapshot = snapshot_after(&[
            digit(1),
            digit(2),
            Action::MemoryStore,
            Action::Operation(Operation::Multiply),
        ]);
        let lines = render_lines(&snapshot, None, &ConfigState::default());

        assert_eq!(lines[0].trim(), "12 ×");
        assert_eq!(lines[2], "M");
    }

    #[test]
    fn test_render_flash_replaces_display() {
        let snapshot = snapshot_after(&[digit(7)]);
        let lines = render_lines(&snapshot, Some("Cannot divide by zero"), &ConfigState::default());
        assert_eq!(lines[1].trim(), "Cannot divide by zero");
    }

    #[test]
    fn test_render_history_toggle() {
        let snapshot = snapshot_after(&[
            digit(2),
            Action::Operation(Operation::Add),
            digit(2),
            Action::Calculate,
        ]);

        let lines = render_lines(&snapshot, None, &ConfigState::default());
        assert_eq!(lines.last().unwrap(), "2 + 2 = 4");

        let config = ConfigState {
            show_history: false,
            ..ConfigState::default()
        };
        assert_eq!(render_lines(&snapshot, None, &config).len(), 4);
    }

    #[test]
    fn test_render_unit_panel() {
        let snapshot = snapshot_after(&[
            Action::SetUnitKind(UnitKind::Weight),
            Action::SetUnitFrom(Some(Unit::Kilogram)),
        ]);
        let lines = render_lines(&snapshot, None, &ConfigState::default());

        assert!(lines[3].starts_with("units: weight"));
        assert!(lines[3].contains("from kg"));
        assert!(lines[3].contains("to mg"));
        assert!(lines[3].ends_with("[mg g kg t]"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flash_expires_after_duration() {
        let mut screen = Screen::new(Duration::from_millis(2000));
        screen.show_error("Cannot divide by zero");

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(!screen.expire());
        assert_eq!(screen.flash_message(), Some("Cannot divide by zero"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(screen.expire());
        assert_eq!(screen.flash_message(), None);
        assert_eq!(screen.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_error_restarts_timer() {
        let mut screen = Screen::new(Duration::from_millis(2000));
        screen.show_error("first");
        tokio::time::advance(Duration::from_millis(1500)).await;

        screen.show_error("second");
        tokio::time::advance(Duration::from_millis(1500)).await;

        assert!(!screen.expire());
        assert_eq!(screen.flash_message(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_writes_lines() {
        let mut screen = Screen::new(Duration::from_secs(2));
        screen.show_error("oops");
        let mut out = Vec::new();

        screen
            .draw(&mut out, &CalculatorEngine::new().snapshot(), &ConfigState::default())
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("oops"));
        assert!(text.contains(KEY_HELP));
    }
}
