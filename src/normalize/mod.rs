//! # Concentration Scaling
//!
//! Sources do not all report in the same unit. A [`ScaleMode`] is attached to
//! each source and applied exactly once to every record of that source while
//! the baseline is built:
//!
//! - [`ScaleMode::Multiplier`] multiplies every concentration by a constant
//!   (one batch was reported in ppm instead of ppb, hence `x1000`).
//! - [`ScaleMode::Molar`] converts ppb (µg/L) to millimolar with
//!   `mM = ppb / molar_mass / 1000`. Elements missing from the
//!   [`MolarMassTable`] pass through unchanged.
//!
//! Records do not remember whether they were scaled, so calling
//! [`normalize_records`] twice scales twice.

mod molar_mass;

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::record::MeasurementRecord;

pub use molar_mass::MolarMassTable;

/// Concentration transform applied to one source batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "factor", rename_all = "snake_case")]
pub enum ScaleMode {
    /// Values are used as reported
    #[default]
    Identity,
    /// Every value is multiplied by the factor
    Multiplier(f64),
    /// ppb → mM through the molar mass of each element
    Molar,
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMode::Identity => write!(f, "as reported"),
            ScaleMode::Multiplier(factor) => write!(f, "x{}", factor),
            ScaleMode::Molar => write!(f, "ppb -> mM"),
        }
    }
}

/// Convert a ppb concentration to millimolar
pub fn ppb_to_millimolar(concentration: f64, molar_mass: f64) -> f64 {
    concentration / molar_mass / 1000.0
}

impl ScaleMode {
    /// Scale a single concentration. Pure in (mode, element, concentration).
    pub fn apply(&self, element: &str, concentration: f64, masses: &MolarMassTable) -> f64 {
        match self {
            ScaleMode::Identity => concentration,
            ScaleMode::Multiplier(factor) => concentration * factor,
            ScaleMode::Molar => match masses.get(element) {
                Some(mass) => ppb_to_millimolar(concentration, mass),
                None => concentration,
            },
        }
    }
}

/// Apply a scale mode to every record of a batch in place.
///
/// Records whose scaled concentration is no longer finite (an overflowing
/// multiplier, a zero molar mass) are removed. Returns how many were removed.
pub fn normalize_records(
    records: &mut Vec<MeasurementRecord>,
    mode: ScaleMode,
    masses: &MolarMassTable,
) -> usize {
    if mode == ScaleMode::Identity {
        return 0;
    }
    if mode == ScaleMode::Molar {
        let unconverted = records
            .iter()
            .filter(|r| masses.get(&r.element).is_none())
            .count();
        if unconverted > 0 {
            debug!("{} records have no molar mass and keep their units", unconverted);
        }
    }
    for record in records.iter_mut() {
        record.concentration = mode.apply(&record.element, record.concentration, masses);
    }

    let before = records.len();
    records.retain(|r| r.concentration.is_finite());
    let dropped = before - records.len();
    if dropped > 0 {
        warn!("{} records became non-finite under {} and were dropped", dropped, mode);
    }
    dropped
}
