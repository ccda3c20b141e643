//! # Sample Identifier Parsing
//!
//! Instrument exports label every row with a free-text sample identifier such as
//! `64Dt7.5`, `Disk 60A t14` or `dust_63B_t0`. This module extracts the structured
//! fields carried by those strings.
//!
//! ## Extraction Rules
//!
//! Each field is produced by its own rule and evaluated independently, so a
//! miss in one rule never disturbs another:
//!
//! | Field | Rule | Example |
//! |-------|------|---------|
//! | time | first `t<number>` with an optional decimal part | `t7.5` → `7.5` |
//! | sample type | lower-cased substring `disk`, then `dust` | `Dust64A` → `Dust` |
//! | sample number + group | first two digits followed by one of `A`-`D` | `64D` → `64`, `D` |
//!
//! A rule that does not match leaves its field unset. Parsing never fails.

mod rules;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use rules::{extract_sample_group, extract_sample_type, extract_time, is_blank};

/// Physical form of an incubated shale sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SampleType {
    /// Intact rock disk
    Disk,
    /// Crushed rock dust
    Dust,
    /// Neither marker present in the identifier
    Unknown,
}

impl SampleType {
    /// Label used in exports and selections
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::Disk => "Disk",
            SampleType::Dust => "Dust",
            SampleType::Unknown => "Unknown",
        }
    }

    /// Map an exported label back to a sample type. Anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "disk" => SampleType::Disk,
            "dust" => SampleType::Dust,
            _ => SampleType::Unknown,
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disk" => Ok(SampleType::Disk),
            "dust" => Ok(SampleType::Dust),
            "unknown" => Ok(SampleType::Unknown),
            _ => Err(format!(
                "Unknown sample type '{}'. Valid options: disk, dust, unknown",
                s
            )),
        }
    }
}

/// Treatment group code. Determines the O2/CO2 exposure of an incubation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    /// O2 and CO2
    A,
    /// CO2 only
    B,
    /// Neither gas
    C,
    /// O2 only
    D,
    /// Any code outside `A`-`D`
    Unknown,
}

impl Group {
    /// Map a single letter to a group
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'A' => Group::A,
            'B' => Group::B,
            'C' => Group::C,
            'D' => Group::D,
            _ => Group::Unknown,
        }
    }

    /// Map a textual group code (as found in exported tables) to a group
    pub fn from_code(code: &str) -> Self {
        let mut chars = code.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => Group::Unknown,
        }
    }

    /// Code used in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::A => "A",
            Group::B => "B",
            Group::C => "C",
            Group::D => "D",
            Group::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fields parsed from a raw sample identifier
///
/// Every field is a pure function of `raw`; identical identifiers always parse
/// to identical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleIdentifier {
    /// The identifier exactly as it appeared in the source table
    pub raw: String,

    /// Incubation time in days
    pub time: Option<f64>,

    /// Disk or dust
    pub sample_type: Option<SampleType>,

    /// Two-digit shale sample number
    pub sample_number: Option<String>,

    /// Treatment group letter
    pub group: Option<Group>,

    /// `sample_number` followed by the group letter, e.g. `64D`
    pub sample_combo: Option<String>,
}

impl SampleIdentifier {
    /// Parse an identifier string. Fields whose rule does not match are left unset.
    pub fn parse(raw: &str) -> Self {
        let time = extract_time(raw);
        let sample_type = extract_sample_type(raw);
        let (sample_number, group) = match extract_sample_group(raw) {
            Some((number, group)) => (Some(number), Some(group)),
            None => (None, None),
        };
        let sample_combo = match (&sample_number, group) {
            (Some(number), Some(group)) => Some(format!("{}{}", number, group)),
            _ => None,
        };

        Self {
            raw: raw.to_string(),
            time,
            sample_type,
            sample_number,
            group,
            sample_combo,
        }
    }

    /// Shale identity for a given experiment batch suffix (e.g. `-BIS`).
    ///
    /// Absent when the identifier carries no sample number.
    pub fn shale_id(&self, suffix: &str) -> Option<String> {
        self.sample_number
            .as_ref()
            .map(|number| format!("{}{}", number, suffix))
    }
}
