//! # Unit Panel Commands
//!
//! The terminal has no drop-downs, so each slot is stepped through its
//! options with a key. Every step goes through the same engine calls a
//! drop-down change would make, including the conversion it triggers.

use calc_core::units::UnitTable;
use calc_core::{Action, UnitKind};
use tracing::debug;

use super::calculator::dispatch;
use super::DisplayResponse;
use crate::error::ApiError;
use crate::state::EngineState;

/// Which side of the conversion a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSlot {
    From,
    To,
}

/// Steps to the next unit kind (none → data → length → weight → none).
pub fn cycle_unit_kind(engine: &EngineState) -> Result<DisplayResponse, ApiError> {
    let next = engine.with_engine(|e| e.unit_selection().kind.next());
    debug!(kind = %next, "cycle_unit_kind command");
    dispatch(engine, Action::SetUnitKind(next))
}

/// Steps a slot to the next unit of the active table.
///
/// ## Errors
/// `VALIDATION_ERROR` when no table is active.
pub fn cycle_unit(engine: &EngineState, slot: UnitSlot) -> Result<DisplayResponse, ApiError> {
    let selection = engine.with_engine(|e| e.unit_selection());
    let table = UnitTable::for_kind(selection.kind)
        .ok_or_else(|| ApiError::validation("Select a unit kind first"))?;

    let action = match slot {
        UnitSlot::From => Action::SetUnitFrom(Some(table.next_unit(selection.from))),
        UnitSlot::To => Action::SetUnitTo(Some(table.next_unit(selection.to))),
    };
    debug!(?slot, action = %action, "cycle_unit command");
    dispatch(engine, action)
}

/// Unit symbols offered for a kind ("-" when conversion is off).
pub fn unit_options(kind: UnitKind) -> Vec<&'static str> {
    match UnitTable::for_kind(kind) {
        Some(table) => table.units.iter().map(|u| u.symbol()).collect(),
        None => vec!["-"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::calculator::run_tag;
    use calc_core::Unit;
    use crate::error::ErrorCode;

    #[test]
    fn test_cycle_kind() {
        let engine = EngineState::new();
        let snapshot = cycle_unit_kind(&engine).unwrap();
        assert_eq!(snapshot.unit.kind, UnitKind::Data);
    }

    #[test]
    fn test_cycle_unit_requires_kind() {
        let engine = EngineState::new();
        let err = cycle_unit(&engine, UnitSlot::From).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_cycle_kind_does_not_convert() {
        let engine = EngineState::new();
        run_tag(&engine, "3").unwrap();
        let snapshot = cycle_unit_kind(&engine).unwrap();

        assert_eq!(snapshot.display, "3");
        assert_eq!(snapshot.unit.from, Some(Unit::Byte));
        assert_eq!(snapshot.unit.to, Some(Unit::Byte));
    }

    #[test]
    fn test_cycle_units_converts() {
        let engine = EngineState::new();
        run_tag(&engine, "2").unwrap();
        cycle_unit_kind(&engine).unwrap(); // data, B → B

        // from: B → KB, converts KB → B
        let snapshot = cycle_unit(&engine, UnitSlot::From).unwrap();
        assert_eq!(snapshot.display, "2048");

        // to: B → KB, KB → KB leaves the value alone
        let snapshot = cycle_unit(&engine, UnitSlot::To).unwrap();
        assert_eq!(snapshot.display, "2048");
        assert_eq!(snapshot.unit.to, Some(Unit::Kilobyte));
    }

    #[test]
    fn test_unit_options() {
        assert_eq!(unit_options(UnitKind::Weight), vec!["mg", "g", "kg", "t"]);
        assert_eq!(unit_options(UnitKind::None), vec!["-"]);
    }
}
