//! # Unit Conversion
//!
//! Fixed conversion tables for the unit panel.
//!
//! ## Scaling Scheme
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  result = value × multiplier ^ (index(from) − index(to))                │
//! │                                                                         │
//! │  data    ×1024   B ─ KB ─ MB ─ GB ─ TB                                  │
//! │  length  ×10     mm ─ cm ─ m ─ km                                       │
//! │  weight  ×1000   mg ─ g ─ kg ─ t                                        │
//! │                                                                         │
//! │  Every adjacent pair uses the same ratio, so 1 km = 10 m and            │
//! │  1 m = 10 cm here. Results must stay identical to this scheme.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{Unit, UnitKind};

/// One conversion table: a per-step multiplier over an ordered unit list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTable {
    pub multiplier: f64,
    pub units: &'static [Unit],
}

const DATA: UnitTable = UnitTable {
    multiplier: 1024.0,
    units: &[
        Unit::Byte,
        Unit::Kilobyte,
        Unit::Megabyte,
        Unit::Gigabyte,
        Unit::Terabyte,
    ],
};

const LENGTH: UnitTable = UnitTable {
    multiplier: 10.0,
    units: &[Unit::Millimeter, Unit::Centimeter, Unit::Meter, Unit::Kilometer],
};

const WEIGHT: UnitTable = UnitTable {
    multiplier: 1000.0,
    units: &[Unit::Milligram, Unit::Gram, Unit::Kilogram, Unit::Tonne],
};

impl UnitTable {
    /// Returns the table for a kind, or `None` when conversion is off.
    pub fn for_kind(kind: UnitKind) -> Option<&'static UnitTable> {
        match kind {
            UnitKind::None => None,
            UnitKind::Data => Some(&DATA),
            UnitKind::Length => Some(&LENGTH),
            UnitKind::Weight => Some(&WEIGHT),
        }
    }

    /// Position of a unit in this table.
    pub fn index_of(&self, unit: Unit) -> Option<usize> {
        self.units.iter().position(|u| *u == unit)
    }

    /// Returns the unit after `current` in this table, wrapping around.
    /// `None` (the placeholder) advances to the first unit.
    pub fn next_unit(&self, current: Option<Unit>) -> Unit {
        let next = current
            .and_then(|u| self.index_of(u))
            .map_or(0, |i| (i + 1) % self.units.len());
        self.units[next]
    }
}

/// Converts `value` between two units of the same table.
///
/// Returns `None` if the units belong to different tables.
pub fn convert(value: f64, from: Unit, to: Unit) -> Option<f64> {
    if from.kind() != to.kind() {
        return None;
    }
    let table = UnitTable::for_kind(from.kind())?;
    let from_index = table.index_of(from)? as i32;
    let to_index = table.index_of(to)? as i32;
    let difference = from_index - to_index;

    Some(value * table.multiplier.powf(f64::from(difference)))
}

// =============================================================================
// Unit Tests
// =============================================================================
