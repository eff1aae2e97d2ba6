//! # Keyboard Input
//!
//! Maps terminal key events to calculator commands. No decision logic lives
//! here: every key becomes one [`Action`] or one unit-panel step.
//!
//! ## Key Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0-9 .        digit / decimal point      Enter =     calculate          │
//! │  + - * x /    operation                  Backspace   erase last char    │
//! │  Esc c        clear                      n           toggle sign        │
//! │  s            square root                                               │
//! │                                                                         │
//! │  z  MC    r  MR    m  MS    p  M+    o  M-                              │
//! │                                                                         │
//! │  u  next unit kind    f  next "from" unit    t  next "to" unit          │
//! │  q  Ctrl-C            quit                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use calc_core::{Action, DigitToken, Operation};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::commands::units::UnitSlot;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    /// Run an engine action.
    Action(Action),
    /// Step the unit kind selector.
    CycleUnitKind,
    /// Step one of the unit selectors.
    CycleUnit(UnitSlot),
    Quit,
}

/// Translates a key event. Returns `None` for keys with no binding.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    // Some platforms report releases and repeats too.
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(KeyCommand::Quit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    let action = match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            Action::Digit(DigitToken::try_from(c).ok()?)
        }
        KeyCode::Char('+') => Action::Operation(Operation::Add),
        KeyCode::Char('-') => Action::Operation(Operation::Subtract),
        KeyCode::Char('*') | KeyCode::Char('x') => Action::Operation(Operation::Multiply),
        KeyCode::Char('/') => Action::Operation(Operation::Divide),
        KeyCode::Enter | KeyCode::Char('=') => Action::Calculate,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Esc | KeyCode::Char('c') => Action::Clear,
        KeyCode::Char('n') => Action::ToggleSign,
        KeyCode::Char('s') => Action::Sqrt,
        KeyCode::Char('z') => Action::MemoryClear,
        KeyCode::Char('r') => Action::MemoryRecall,
        KeyCode::Char('m') => Action::MemoryStore,
        KeyCode::Char('p') => Action::MemoryAdd,
        KeyCode::Char('o') => Action::MemorySubtract,
        KeyCode::Char('u') => return Some(KeyCommand::CycleUnitKind),
        KeyCode::Char('f') => return Some(KeyCommand::CycleUnit(UnitSlot::From)),
        KeyCode::Char('t') => return Some(KeyCommand::CycleUnit(UnitSlot::To)),
        KeyCode::Char('q') => return Some(KeyCommand::Quit),
        _ => return None,
    };

    Some(KeyCommand::Action(action))
}
