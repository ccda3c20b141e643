//! O2/CO2 exposure conditions derived from the treatment group
//!
//! | group | O2 | CO2 | label |
//! |-------|----|-----|-------|
//! | A | yes | yes | `O2 + CO2` |
//! | B | no | yes | `CO2` |
//! | D | yes | no | `O2` |
//! | C | no | no | `None` |
//! | other | no | no | `Unknown` |
//!
//! The booleans of the `Unknown` row are a convention so that every record has a
//! defined condition; they make no physical claim about the incubation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::Group;

/// Condition label shown in legends and exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionLabel {
    /// Both gases present
    O2AndCo2,
    /// CO2 only
    Co2,
    /// O2 only
    O2,
    /// Neither gas
    Neither,
    /// Group code not recognized
    Unknown,
}

impl ConditionLabel {
    /// Text form of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionLabel::O2AndCo2 => "O2 + CO2",
            ConditionLabel::Co2 => "CO2",
            ConditionLabel::O2 => "O2",
            ConditionLabel::Neither => "None",
            ConditionLabel::Unknown => "Unknown",
        }
    }

    /// Parse an exported label. Unrecognized text maps to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "O2 + CO2" => ConditionLabel::O2AndCo2,
            "CO2" => ConditionLabel::Co2,
            "O2" => ConditionLabel::O2,
            "None" => ConditionLabel::Neither,
            _ => ConditionLabel::Unknown,
        }
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gas exposure of an incubation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// O2 present in the headspace
    pub o2: bool,
    /// CO2 present in the headspace
    pub co2: bool,
    /// Combined label
    pub label: ConditionLabel,
}

impl Condition {
    const fn new(o2: bool, co2: bool, label: ConditionLabel) -> Self {
        Self { o2, co2, label }
    }

    /// Condition for a treatment group. Total over all groups.
    pub fn for_group(group: Group) -> Self {
        match group {
            Group::A => Self::new(true, true, ConditionLabel::O2AndCo2),
            Group::B => Self::new(false, true, ConditionLabel::Co2),
            Group::D => Self::new(true, false, ConditionLabel::O2),
            Group::C => Self::new(false, false, ConditionLabel::Neither),
            Group::Unknown => Self::unknown(),
        }
    }

    /// Condition for a record whose group may not have been parsed
    pub fn for_optional_group(group: Option<Group>) -> Self {
        group.map(Self::for_group).unwrap_or_else(Self::unknown)
    }

    /// Default arm: no recognizable group
    pub fn unknown() -> Self {
        Self::new(false, false, ConditionLabel::Unknown)
    }
}
