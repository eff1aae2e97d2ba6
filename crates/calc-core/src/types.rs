//! # Domain Types
//!
//! Core types used throughout the calculator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Operation     │   │    UnitKind     │   │      Unit       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Add      +     │   │  None           │   │  B KB MB GB TB  │       │
//! │  │  Subtract −     │   │  Data   ×1024   │   │  mm cm m km     │       │
//! │  │  Multiply ×     │   │  Length ×10     │   │  mg g kg t      │       │
//! │  │  Divide   ÷     │   │  Weight ×1000   │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │  DisplaySnapshot  (what the presentation adapter pulls)       │     │
//! │  │  display · expression · history[..3] · memory_indicator      │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CalcError, CalcResult, ValidationError};

// =============================================================================
// Operation
// =============================================================================

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All operations, in keypad order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Returns the symbol shown in history and the expression label.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "\u{2212}",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    /// Returns the action tag ("add", "subtract", ...).
    pub const fn tag(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Applies the operator to two operands.
    ///
    /// ## Errors
    /// `DivisionByZero` when dividing by `0` (or `-0`).
    pub fn apply(self, left: f64, right: f64) -> CalcResult<f64> {
        match self {
            Operation::Add => Ok(left + right),
            Operation::Subtract => Ok(left - right),
            Operation::Multiply => Ok(left * right),
            Operation::Divide => {
                if right == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(left / right)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = ValidationError;

    /// Accepts action tags and keyboard symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "subtract" | "-" | "\u{2212}" => Ok(Operation::Subtract),
            "multiply" | "*" | "×" | "x" => Ok(Operation::Multiply),
            "divide" | "/" | "÷" => Ok(Operation::Divide),
            _ => Err(ValidationError::UnknownOperation(s.to_string())),
        }
    }
}

// =============================================================================
// Unit Kind
// =============================================================================

/// Which conversion table is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Unit conversion disabled.
    #[default]
    None,
    /// B, KB, MB, GB, TB (×1024 per step).
    Data,
    /// mm, cm, m, km (×10 per step).
    Length,
    /// mg, g, kg, t (×1000 per step).
    Weight,
}

impl UnitKind {
    /// Every selectable kind, including `None`.
    pub const ALL: [UnitKind; 4] = [
        UnitKind::None,
        UnitKind::Data,
        UnitKind::Length,
        UnitKind::Weight,
    ];

    /// Returns the lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            UnitKind::None => "none",
            UnitKind::Data => "data",
            UnitKind::Length => "length",
            UnitKind::Weight => "weight",
        }
    }

    /// Returns the kind after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = UnitKind::ALL.iter().position(|k| *k == self).unwrap_or(0);
        UnitKind::ALL[(index + 1) % UnitKind::ALL.len()]
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(UnitKind::None),
            "data" => Ok(UnitKind::Data),
            "length" => Ok(UnitKind::Length),
            "weight" => Ok(UnitKind::Weight),
            _ => Err(ValidationError::UnknownUnitKind(s.to_string())),
        }
    }
}

// =============================================================================
// Unit
// =============================================================================

/// A concrete unit from one of the conversion tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Unit {
    #[serde(rename = "B")]
    Byte,
    #[serde(rename = "KB")]
    Kilobyte,
    #[serde(rename = "MB")]
    Megabyte,
    #[serde(rename = "GB")]
    Gigabyte,
    #[serde(rename = "TB")]
    Terabyte,
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "km")]
    Kilometer,
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "t")]
    Tonne,
}

impl Unit {
    /// Returns the display symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Unit::Byte => "B",
            Unit::Kilobyte => "KB",
            Unit::Megabyte => "MB",
            Unit::Gigabyte => "GB",
            Unit::Terabyte => "TB",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Meter => "m",
            Unit::Kilometer => "km",
            Unit::Milligram => "mg",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Tonne => "t",
        }
    }

    /// Returns the table this unit belongs to.
    pub const fn kind(self) -> UnitKind {
        match self {
            Unit::Byte | Unit::Kilobyte | Unit::Megabyte | Unit::Gigabyte | Unit::Terabyte => {
                UnitKind::Data
            }
            Unit::Millimeter | Unit::Centimeter | Unit::Meter | Unit::Kilometer => UnitKind::Length,
            Unit::Milligram | Unit::Gram | Unit::Kilogram | Unit::Tonne => UnitKind::Weight,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    /// Symbols are case-sensitive: "m" is a meter, "M" is nothing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s {
            "B" => Unit::Byte,
            "KB" => Unit::Kilobyte,
            "MB" => Unit::Megabyte,
            "GB" => Unit::Gigabyte,
            "TB" => Unit::Terabyte,
            "mm" => Unit::Millimeter,
            "cm" => Unit::Centimeter,
            "m" => Unit::Meter,
            "km" => Unit::Kilometer,
            "mg" => Unit::Milligram,
            "g" => Unit::Gram,
            "kg" => Unit::Kilogram,
            "t" => Unit::Tonne,
            _ => return Err(ValidationError::UnknownUnit(s.to_string())),
        };
        Ok(unit)
    }
}

/// Placeholder name for an unselected unit slot.
pub const UNIT_PLACEHOLDER: &str = "base";

/// Parses a unit slot: a unit symbol, or "base" for no selection.
pub fn parse_unit_slot(s: &str) -> Result<Option<Unit>, ValidationError> {
    if s == UNIT_PLACEHOLDER {
        return Ok(None);
    }
    s.parse().map(Some)
}

// =============================================================================
// Unit Selection
// =============================================================================

/// The unit-conversion panel's current selection.
///
/// `None` in `from`/`to` is the "base" placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnitSelection {
    pub kind: UnitKind,
    pub from: Option<Unit>,
    pub to: Option<Unit>,
}

impl UnitSelection {
    /// Returns both units when a conversion can run.
    pub fn concrete(&self) -> Option<(Unit, Unit)> {
        if self.kind == UnitKind::None {
            return None;
        }
        Some((self.from?, self.to?))
    }
}

// =============================================================================
// Display Snapshot
// =============================================================================

/// Everything the presentation adapter needs after a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySnapshot {
    /// The current number, exactly as typed or computed.
    pub display: String,

    /// `"<previous> <symbol>"` while an operation is pending, else empty.
    pub expression: String,

    /// The most recent history lines, oldest first (at most three).
    pub history: Vec<String>,

    /// "M" when memory holds a non-zero value, else empty.
    pub memory_indicator: String,

    /// Unit-conversion panel selection.
    pub unit: UnitSelection,
}

// =============================================================================
// Unit Tests
// =============================================================================
