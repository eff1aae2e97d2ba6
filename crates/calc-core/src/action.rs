//! # Actions
//!
//! The closed set of things a user can do to the calculator.
//!
//! Input adapters translate keys, buttons or script tokens into an
//! [`Action`] and hand it to [`CalculatorEngine::apply`]. There is no
//! open-ended dispatch: adding an action means adding a variant here.
//!
//! ## Action Tags
//! ```text
//! ┌──────────────┬──────────────────────┬──────────────────────────────────┐
//! │ tag          │ action               │ engine call                      │
//! ├──────────────┼──────────────────────┼──────────────────────────────────┤
//! │ 0-9, .       │ Digit                │ append_digit                     │
//! │ add ...      │ Operation            │ set_operation                    │
//! │ calculate    │ Calculate            │ calculate                        │
//! │ clear        │ Clear                │ clear                            │
//! │ backspace    │ Backspace            │ backspace                        │
//! │ toggle-sign  │ ToggleSign           │ toggle_sign                      │
//! │ sqrt         │ Sqrt                 │ sqrt                             │
//! │ mc mr ms     │ Memory*              │ memory_clear/recall/store        │
//! │ m-plus       │ MemoryAdd            │ memory_add                       │
//! │ m-minus      │ MemorySubtract       │ memory_subtract                  │
//! │ unit:<kind>  │ SetUnitKind          │ set_unit_kind                    │
//! │ from:<unit>  │ SetUnitFrom          │ set_unit_from                    │
//! │ to:<unit>    │ SetUnitTo            │ set_unit_to                      │
//! └──────────────┴──────────────────────┴──────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use crate::buffer::DigitToken;
use crate::engine::CalculatorEngine;
use crate::error::{CalcResult, ValidationError};
use crate::types::{parse_unit_slot, Operation, Unit, UnitKind, UNIT_PLACEHOLDER};

/// A single user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(DigitToken),
    Operation(Operation),
    Calculate,
    Clear,
    Backspace,
    ToggleSign,
    Sqrt,
    MemoryClear,
    MemoryRecall,
    MemoryStore,
    MemoryAdd,
    MemorySubtract,
    SetUnitKind(UnitKind),
    /// `None` selects the "base" placeholder.
    SetUnitFrom(Option<Unit>),
    /// `None` selects the "base" placeholder.
    SetUnitTo(Option<Unit>),
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = s.strip_prefix("unit:") {
            return Ok(Action::SetUnitKind(kind.parse()?));
        }
        if let Some(unit) = s.strip_prefix("from:") {
            return Ok(Action::SetUnitFrom(parse_unit_slot(unit)?));
        }
        if let Some(unit) = s.strip_prefix("to:") {
            return Ok(Action::SetUnitTo(parse_unit_slot(unit)?));
        }

        let action = match s {
            "calculate" | "=" => Action::Calculate,
            "clear" => Action::Clear,
            "backspace" => Action::Backspace,
            "toggle-sign" => Action::ToggleSign,
            "sqrt" => Action::Sqrt,
            "mc" => Action::MemoryClear,
            "mr" => Action::MemoryRecall,
            "ms" => Action::MemoryStore,
            "m-plus" => Action::MemoryAdd,
            "m-minus" => Action::MemorySubtract,
            _ => {
                if let Ok(token) = s.parse::<DigitToken>() {
                    Action::Digit(token)
                } else if let Ok(op) = s.parse::<Operation>() {
                    Action::Operation(op)
                } else {
                    return Err(ValidationError::UnknownAction(s.to_string()));
                }
            }
        };
        Ok(action)
    }
}

impl fmt::Display for Action {
    /// Writes the action tag, so `tag.parse::<Action>()` round-trips.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |unit: &Option<Unit>| unit.map_or(UNIT_PLACEHOLDER, Unit::symbol);
        match self {
            Action::Digit(token) => write!(f, "{}", token),
            Action::Operation(op) => f.write_str(op.tag()),
            Action::Calculate => f.write_str("calculate"),
            Action::Clear => f.write_str("clear"),
            Action::Backspace => f.write_str("backspace"),
            Action::ToggleSign => f.write_str("toggle-sign"),
            Action::Sqrt => f.write_str("sqrt"),
            Action::MemoryClear => f.write_str("mc"),
            Action::MemoryRecall => f.write_str("mr"),
            Action::MemoryStore => f.write_str("ms"),
            Action::MemoryAdd => f.write_str("m-plus"),
            Action::MemorySubtract => f.write_str("m-minus"),
            Action::SetUnitKind(kind) => write!(f, "unit:{}", kind),
            Action::SetUnitFrom(unit) => write!(f, "from:{}", slot(unit)),
            Action::SetUnitTo(unit) => write!(f, "to:{}", slot(unit)),
        }
    }
}

impl CalculatorEngine {
    /// Performs one action.
    ///
    /// ## Errors
    /// Whatever the underlying operation returns; state is unchanged on error.
    pub fn apply(&mut self, action: Action) -> CalcResult<()> {
        match action {
            Action::Digit(token) => self.append_digit(token),
            Action::Operation(op) => self.set_operation(op)?,
            Action::Calculate => {
                self.calculate()?;
            }
            Action::Clear => self.clear(),
            Action::Backspace => self.backspace(),
            Action::ToggleSign => self.toggle_sign(),
            Action::Sqrt => self.sqrt()?,
            Action::MemoryClear => self.memory_clear(),
            Action::MemoryRecall => self.memory_recall(),
            Action::MemoryStore => self.memory_store(),
            Action::MemoryAdd => self.memory_add(),
            Action::MemorySubtract => self.memory_subtract(),
            Action::SetUnitKind(kind) => self.set_unit_kind(kind),
            Action::SetUnitFrom(unit) => {
                self.set_unit_from(unit)?;
            }
            Action::SetUnitTo(unit) => {
                self.set_unit_to(unit)?;
            }
        }
        Ok(())
    }

    /// Performs a sequence of actions, stopping at the first error.
    pub fn apply_all<I>(&mut self, actions: I) -> CalcResult<()>
    where
        I: IntoIterator<Item = Action>,
    {
        actions.into_iter().try_for_each(|a| self.apply(a))
    }
}
