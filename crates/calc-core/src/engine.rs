//! # Calculator Engine
//!
//! Owns all calculator state and implements every user operation.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pending-Operation Flow                               │
//! │                                                                         │
//! │   ┌──────────┐  set_operation(op)  ┌──────────────┐                     │
//! │   │  Entry   │────────────────────►│   Pending    │                     │
//! │   │ (no op)  │                     │ left, op     │──┐ set_operation    │
//! │   └──────────┘◄────────────────────└──────────────┘◄─┘ (chains via      │
//! │        ▲         calculate() ok         │              calculate first) │
//! │        │                                │ calculate() DivisionByZero    │
//! │        │ clear()                        ▼                               │
//! │        └──────────────────────── state unchanged                        │
//! │                                                                         │
//! │  Memory, history and the unit panel live beside this flow and are      │
//! │  never touched by clear().                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Policy
//! A failing call returns `Err` and leaves every field as it was. Showing the
//! message (and taking it down again) is the presentation layer's job.

use crate::buffer::{DigitToken, InputBuffer};
use crate::error::{CalcError, CalcResult};
use crate::history::{History, HistoryEntry};
use crate::number::parse_number;
use crate::types::{DisplaySnapshot, Operation, Unit, UnitKind, UnitSelection};
use crate::units::{self, UnitTable};
use crate::validation::validate_unit_slot;

/// Text shown in the memory indicator while memory is non-zero.
pub const MEMORY_INDICATOR: &str = "M";

/// Left operand and operator waiting for the right operand.
///
/// Holding both in one `Option` makes "operation set iff left operand set"
/// impossible to violate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingOperation {
    /// Left operand text, exactly as it was displayed.
    left: String,
    operation: Operation,
}

/// The calculator.
///
/// One instance per session. Every method runs to completion synchronously.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorEngine {
    current: InputBuffer,
    pending: Option<PendingOperation>,
    memory: f64,
    history: History,
    units: UnitSelection,
}

impl CalculatorEngine {
    /// Creates an engine showing "0" with empty memory and history.
    pub fn new() -> Self {
        CalculatorEngine {
            current: InputBuffer::new(),
            pending: None,
            memory: 0.0,
            history: History::new(),
            units: UnitSelection::default(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The number on the display.
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// Whether the current number contains a decimal point.
    pub fn has_decimal(&self) -> bool {
        self.current.has_decimal()
    }

    /// Left operand text, or "" when nothing is pending.
    pub fn previous(&self) -> &str {
        self.pending.as_ref().map_or("", |p| p.left.as_str())
    }

    /// The pending operator, if any.
    pub fn operation(&self) -> Option<Operation> {
        self.pending.as_ref().map(|p| p.operation)
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn unit_selection(&self) -> UnitSelection {
        self.units
    }

    /// `"<previous> <symbol>"` while an operation is pending, else "".
    pub fn expression(&self) -> String {
        match &self.pending {
            Some(p) => format!("{} {}", p.left, p.operation.symbol()),
            None => String::new(),
        }
    }

    /// "M" while memory is non-zero, else "".
    pub fn memory_indicator(&self) -> &'static str {
        if self.memory != 0.0 {
            MEMORY_INDICATOR
        } else {
            ""
        }
    }

    /// Everything the presentation adapter renders.
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            display: self.current.as_str().to_string(),
            expression: self.expression(),
            history: self.history.visible_lines(),
            memory_indicator: self.memory_indicator().to_string(),
            unit: self.units,
        }
    }

    // =========================================================================
    // Entry
    // =========================================================================

    /// Appends a digit or decimal point to the current number.
    pub fn append_digit(&mut self, token: DigitToken) {
        self.current.push(token);
    }

    /// Removes the last character of the current number.
    pub fn backspace(&mut self) {
        self.current.pop();
    }

    /// Resets entry and any pending operation. Memory and history survive.
    pub fn clear(&mut self) {
        self.current.reset();
        self.pending = None;
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Chooses the operator for the next calculation.
    ///
    /// If an operation is already pending it is calculated first, so
    /// `5 + 3 ×` evaluates `5 + 3 = 8` before starting the multiply.
    ///
    /// ## Errors
    /// `DivisionByZero` from the chained calculation; state is unchanged.
    pub fn set_operation(&mut self, operation: Operation) -> CalcResult<()> {
        if self.pending.is_some() {
            self.calculate()?;
        }

        let left = std::mem::take(&mut self.current);
        self.pending = Some(PendingOperation {
            left: left.as_str().to_string(),
            operation,
        });
        Ok(())
    }

    /// Applies the pending operation to the left and current operands.
    ///
    /// ## Behavior
    /// - Nothing pending: no-op, returns `Ok(None)`
    /// - Success: history gains `"<left> <symbol> <right> = <result>"`, the
    ///   result becomes the current number, nothing stays pending
    ///
    /// ## Errors
    /// `DivisionByZero` when dividing by zero; history, the pending operation
    /// and both operands are unchanged.
    pub fn calculate(&mut self) -> CalcResult<Option<HistoryEntry>> {
        let Some(pending) = &self.pending else {
            return Ok(None);
        };
        if pending.left.is_empty() {
            return Ok(None);
        }

        let left = parse_number(&pending.left);
        let right = self.current.value();
        let result = pending.operation.apply(left, right)?;

        let entry = HistoryEntry {
            left,
            operation: pending.operation,
            right,
            result,
        };
        self.history.push(entry);
        self.current.set_value(result);
        self.pending = None;
        Ok(Some(entry))
    }

    /// Negates the current number.
    pub fn toggle_sign(&mut self) {
        let value = self.current.value();
        self.current.set_value(-value);
    }

    /// Replaces the current number with its square root.
    ///
    /// ## Errors
    /// `NegativeSqrt` when the number is below zero; state is unchanged.
    pub fn sqrt(&mut self) -> CalcResult<()> {
        let value = self.current.value();
        if value < 0.0 {
            return Err(CalcError::NegativeSqrt);
        }
        self.current.set_value(value.sqrt());
        Ok(())
    }

    // =========================================================================
    // Memory Register
    // =========================================================================

    /// MC: memory = 0.
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// MR: current number = memory.
    pub fn memory_recall(&mut self) {
        self.current.set_value(self.memory);
    }

    /// MS: memory = current number.
    pub fn memory_store(&mut self) {
        self.memory = self.current.value();
    }

    /// M+: memory += current number.
    pub fn memory_add(&mut self) {
        self.memory += self.current.value();
    }

    /// M−: memory −= current number.
    pub fn memory_subtract(&mut self) {
        self.memory -= self.current.value();
    }

    // =========================================================================
    // Unit Conversion
    // =========================================================================

    /// Selects a conversion table without converting.
    ///
    /// Both slots move to the table's first unit, so a single later slot
    /// change already converts. With `UnitKind::None` both slots are "base".
    pub fn set_unit_kind(&mut self, kind: UnitKind) {
        let first = UnitTable::for_kind(kind).and_then(|table| table.units.first().copied());
        self.units = UnitSelection {
            kind,
            from: first,
            to: first,
        };
    }

    /// Selects the source unit (`None` = "base") and converts.
    ///
    /// ## Errors
    /// `UnitKindMismatch` if the unit is not in the active table.
    pub fn set_unit_from(&mut self, unit: Option<Unit>) -> CalcResult<Option<f64>> {
        self.check_unit(unit)?;
        self.units.from = unit;
        Ok(self.convert_unit())
    }

    /// Selects the target unit (`None` = "base") and converts.
    ///
    /// ## Errors
    /// `UnitKindMismatch` if the unit is not in the active table.
    pub fn set_unit_to(&mut self, unit: Option<Unit>) -> CalcResult<Option<f64>> {
        self.check_unit(unit)?;
        self.units.to = unit;
        Ok(self.convert_unit())
    }

    /// Converts the current number from the selected unit to the target unit.
    ///
    /// Does nothing (returns `None`) unless a table is active and both slots
    /// hold concrete units.
    pub fn convert_unit(&mut self) -> Option<f64> {
        let (from, to) = self.units.concrete()?;
        let result = units::convert(self.current.value(), from, to)?;
        self.current.set_value(result);
        Some(result)
    }

    fn check_unit(&self, unit: Option<Unit>) -> CalcResult<()> {
        validate_unit_slot(self.units.kind, unit)?;
        Ok(())
    }
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        CalculatorEngine::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn engine_showing(keys: &str) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        type_keys(&mut engine, keys);
        engine
    }

    fn type_keys(engine: &mut CalculatorEngine, keys: &str) {
        for c in keys.chars() {
            engine.append_digit(DigitToken::try_from(c).unwrap());
        }
    }

    #[test]
    fn test_initial_state() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.current(), "0");
        assert_eq!(engine.previous(), "");
        assert_eq!(engine.operation(), None);
        assert_eq!(engine.memory(), 0.0);
        assert!(engine.history().is_empty());
        assert!(!engine.has_decimal());
        assert_eq!(engine.unit_selection().kind, UnitKind::None);
    }

    #[test]
    fn test_set_operation_moves_current_to_previous() {
        let mut engine = engine_showing("12.5");
        engine.set_operation(Operation::Add).unwrap();

        assert_eq!(engine.previous(), "12.5");
        assert_eq!(engine.current(), "0");
        assert!(!engine.has_decimal());
        assert_eq!(engine.operation(), Some(Operation::Add));
        assert_eq!(engine.expression(), "12.5 +");
    }

    #[test]
    fn test_calculate_add() {
        let mut engine = engine_showing("5");
        engine.set_operation(Operation::Add).unwrap();
        type_keys(&mut engine, "3");

        let entry = engine.calculate().unwrap().unwrap();

        assert_eq!(entry.result, 8.0);
        assert_eq!(engine.current(), "8");
        assert_eq!(engine.history().visible_lines(), vec!["5 + 3 = 8"]);
        assert_eq!(engine.operation(), None);
        assert_eq!(engine.previous(), "");
        assert_eq!(engine.expression(), "");
    }

    #[test]
    fn test_calculate_without_pending_is_noop() {
        let mut engine = engine_showing("42");
        let before = engine.clone();

        assert_eq!(engine.calculate().unwrap(), None);
        assert_eq!(engine, before);
    }

    #[test]
    fn test_divide_by_zero_leaves_state() {
        let mut engine = engine_showing("9");
        engine.set_operation(Operation::Divide).unwrap();
        let before = engine.clone();

        assert_eq!(engine.calculate(), Err(CalcError::DivisionByZero));

        assert_eq!(engine, before);
        assert!(engine.history().is_empty());
        assert_eq!(engine.operation(), Some(Operation::Divide));
        assert_eq!(engine.previous(), "9");
    }

    #[test]
    fn test_divide_recovers_after_fixing_divisor() {
        let mut engine = engine_showing("9");
        engine.set_operation(Operation::Divide).unwrap();
        assert!(engine.calculate().is_err());

        type_keys(&mut engine, "3");
        engine.calculate().unwrap();
        assert_eq!(engine.current(), "3");
        assert_eq!(engine.history().visible_lines(), vec!["9 ÷ 3 = 3"]);
    }

    #[test]
    fn test_operator_chaining() {
        let mut engine = CalculatorEngine::new();
        type_keys(&mut engine, "5");
        engine.set_operation(Operation::Add).unwrap();
        type_keys(&mut engine, "3");
        engine.set_operation(Operation::Multiply).unwrap();

        assert_eq!(engine.previous(), "8");
        assert_eq!(engine.operation(), Some(Operation::Multiply));

        type_keys(&mut engine, "2");
        engine.calculate().unwrap();

        assert_eq!(engine.current(), "16");
        assert_eq!(
            engine.history().visible_lines(),
            vec!["5 + 3 = 8", "8 × 2 = 16"]
        );
    }

    #[test]
    fn test_chaining_through_division_by_zero_fails_cleanly() {
        let mut engine = engine_showing("4");
        engine.set_operation(Operation::Divide).unwrap();
        let before = engine.clone();

        assert_eq!(
            engine.set_operation(Operation::Add),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn test_result_decimal_tracking() {
        let mut engine = engine_showing("1");
        engine.set_operation(Operation::Divide).unwrap();
        type_keys(&mut engine, "4");
        engine.calculate().unwrap();

        assert_eq!(engine.current(), "0.25");
        assert!(engine.has_decimal());

        // A second point is refused because the result already has one.
        engine.append_digit(DigitToken::Point);
        assert_eq!(engine.current(), "0.25");
    }

    #[test]
    fn test_history_uses_parsed_operands() {
        let mut engine = engine_showing("5.");
        engine.set_operation(Operation::Subtract).unwrap();
        assert_eq!(engine.expression(), "5. −");
        type_keys(&mut engine, "2.50");
        engine.calculate().unwrap();

        assert_eq!(engine.history().visible_lines(), vec!["5 − 2.5 = 2.5"]);
    }

    #[test]
    fn test_clear_keeps_memory_and_history() {
        let mut engine = engine_showing("5");
        engine.memory_store();
        engine.set_operation(Operation::Add).unwrap();
        type_keys(&mut engine, "1");
        engine.calculate().unwrap();
        engine.set_operation(Operation::Multiply).unwrap();
        type_keys(&mut engine, "7.");

        engine.clear();

        assert_eq!(engine.current(), "0");
        assert_eq!(engine.previous(), "");
        assert_eq!(engine.operation(), None);
        assert!(!engine.has_decimal());
        assert_eq!(engine.memory(), 5.0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_backspace() {
        let mut engine = engine_showing("12.");
        engine.backspace();
        assert_eq!(engine.current(), "12");
        assert!(!engine.has_decimal());
        engine.backspace();
        engine.backspace();
        assert_eq!(engine.current(), "0");
    }

    #[test]
    fn test_toggle_sign() {
        let mut engine = engine_showing("4.5");
        engine.toggle_sign();
        assert_eq!(engine.current(), "-4.5");
        engine.toggle_sign();
        assert_eq!(engine.current(), "4.5");

        let mut engine = engine_showing("0.");
        engine.toggle_sign();
        assert_eq!(engine.current(), "0");
        assert!(!engine.has_decimal());
    }

    #[test]
    fn test_sqrt() {
        let mut engine = engine_showing("16");
        engine.sqrt().unwrap();
        assert_eq!(engine.current(), "4");

        let mut engine = engine_showing("2");
        engine.sqrt().unwrap();
        assert_eq!(engine.current(), "1.4142135623730951");
    }

    #[test]
    fn test_sqrt_negative() {
        let mut engine = engine_showing("4");
        engine.toggle_sign();
        let before = engine.clone();

        assert_eq!(engine.sqrt(), Err(CalcError::NegativeSqrt));
        assert_eq!(engine.current(), "-4");
        assert_eq!(engine, before);
    }

    #[test]
    fn test_memory_accumulation() {
        let mut engine = engine_showing("4");
        engine.memory_add();
        engine.clear();
        type_keys(&mut engine, "6");
        engine.memory_add();

        assert_eq!(engine.memory(), 10.0);
        assert_eq!(engine.memory_indicator(), "M");

        engine.memory_clear();
        assert_eq!(engine.memory(), 0.0);
        assert_eq!(engine.memory_indicator(), "");
    }

    #[test]
    fn test_memory_store_recall_subtract() {
        let mut engine = engine_showing("2.5");
        engine.memory_store();
        engine.memory_subtract();
        assert_eq!(engine.memory(), 0.0);
        assert_eq!(engine.memory_indicator(), "");

        engine.memory_subtract();
        engine.clear();
        engine.memory_recall();
        assert_eq!(engine.current(), "-2.5");
    }

    #[test]
    fn test_memory_does_not_touch_pending() {
        let mut engine = engine_showing("3");
        engine.set_operation(Operation::Add).unwrap();
        engine.memory_store();
        engine.memory_recall();
        assert_eq!(engine.operation(), Some(Operation::Add));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_set_unit_kind_selects_first_unit_without_converting() {
        let mut engine = engine_showing("2");
        engine.set_unit_kind(UnitKind::Data);

        let selection = engine.unit_selection();
        assert_eq!(selection.from, Some(Unit::Byte));
        assert_eq!(selection.to, Some(Unit::Byte));
        assert_eq!(engine.current(), "2");
    }

    #[test]
    fn test_single_slot_change_after_kind_converts() {
        let mut engine = engine_showing("2");
        engine.set_unit_kind(UnitKind::Length);

        // mm → cm
        assert_eq!(engine.set_unit_to(Some(Unit::Centimeter)).unwrap(), Some(0.2));
        assert_eq!(engine.current(), "0.2");
    }

    #[test]
    fn test_unit_conversion_data() {
        let mut engine = engine_showing("2");
        engine.set_unit_kind(UnitKind::Data);
        engine.set_unit_to(None).unwrap();

        assert_eq!(engine.set_unit_from(Some(Unit::Megabyte)).unwrap(), None);
        assert_eq!(engine.current(), "2");

        assert_eq!(engine.set_unit_to(Some(Unit::Kilobyte)).unwrap(), Some(2048.0));
        assert_eq!(engine.current(), "2048");
    }

    #[test]
    fn test_unit_conversion_compounds_on_each_selection() {
        let mut engine = engine_showing("1");
        engine.set_unit_kind(UnitKind::Length);

        // km → mm
        engine.set_unit_from(Some(Unit::Kilometer)).unwrap();
        assert_eq!(engine.current(), "1000");

        // km → m, applied to the already converted value
        engine.set_unit_to(Some(Unit::Meter)).unwrap();
        assert_eq!(engine.current(), "10000");
    }

    #[test]
    fn test_unit_conversion_noop_cases() {
        let mut engine = engine_showing("5");
        assert_eq!(engine.convert_unit(), None);

        engine.set_unit_kind(UnitKind::Weight);
        engine.set_unit_from(None).unwrap();
        engine.set_unit_to(Some(Unit::Gram)).unwrap();
        assert_eq!(engine.current(), "5");

        engine.set_unit_from(Some(Unit::Kilogram)).unwrap();
        assert_eq!(engine.current(), "5000");

        engine.set_unit_kind(UnitKind::None);
        assert_eq!(engine.unit_selection().from, None);
        assert_eq!(engine.unit_selection().to, None);
        assert_eq!(engine.convert_unit(), None);
    }

    #[test]
    fn test_unit_from_other_kind_rejected() {
        let mut engine = engine_showing("5");
        engine.set_unit_kind(UnitKind::Data);

        let err = engine.set_unit_from(Some(Unit::Kilogram)).unwrap_err();
        assert!(matches!(
            err,
            CalcError::Validation(ValidationError::UnitKindMismatch { .. })
        ));
        assert_eq!(engine.unit_selection().from, Some(Unit::Byte));
        assert_eq!(engine.current(), "5");
    }

    #[test]
    fn test_snapshot() {
        let mut engine = CalculatorEngine::new();
        for i in 1..=5 {
            type_keys(&mut engine, &i.to_string());
            engine.set_operation(Operation::Add).unwrap();
            type_keys(&mut engine, "1");
            engine.calculate().unwrap();
            engine.clear();
        }
        type_keys(&mut engine, "7");
        engine.memory_store();
        engine.set_operation(Operation::Multiply).unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.display, "0");
        assert_eq!(snapshot.expression, "7 ×");
        assert_eq!(snapshot.history, vec!["3 + 1 = 4", "4 + 1 = 5", "5 + 1 = 6"]);
        assert_eq!(snapshot.memory_indicator, "M");
        assert_eq!(engine.history().len(), 5);
    }
}
