//! The long-form measurement record: one reading of one element in one sample

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::identifier::{Group, SampleIdentifier, SampleType};

/// One (sample, element) concentration reading with its derived sample metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Raw sample identifier
    pub sample_id: String,
    /// Incubation time in days
    pub time: Option<f64>,
    /// Disk, dust or unknown
    pub sample_type: SampleType,
    /// Treatment group
    pub group: Option<Group>,
    /// Two-digit sample number
    pub sample_number: Option<String>,
    /// Series key: sample number + group
    pub sample_combo: Option<String>,
    /// Shale specimen / batch identity
    pub shale_id: Option<String>,
    /// Source batch label (e.g. `Exp1`, `BIS`)
    pub experiment: String,
    /// Element symbol (e.g. `Fe`)
    pub element: String,
    /// Concentration, always finite
    pub concentration: f64,
    /// Exposure condition, present when condition derivation is enabled
    pub condition: Option<Condition>,
}

impl MeasurementRecord {
    /// Build a record from a parsed identifier
    pub fn from_identifier(
        identifier: &SampleIdentifier,
        shale_suffix: &str,
        experiment: &str,
        element: &str,
        concentration: f64,
    ) -> Self {
        Self {
            sample_id: identifier.raw.clone(),
            time: identifier.time,
            sample_type: identifier.sample_type.unwrap_or(SampleType::Unknown),
            group: identifier.group,
            sample_number: identifier.sample_number.clone(),
            sample_combo: identifier.sample_combo.clone(),
            shale_id: identifier.shale_id(shale_suffix),
            experiment: experiment.to_string(),
            element: element.to_string(),
            concentration,
            condition: None,
        }
    }
}

/// Key identifying the readings hit by a point-removal action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordKey {
    /// Raw sample identifier of the clicked point
    pub sample_id: String,
    /// Time of the clicked point
    pub time: f64,
    /// Element currently plotted
    pub element: String,
}

impl RecordKey {
    /// Create a key
    pub fn new(sample_id: impl Into<String>, time: f64, element: impl Into<String>) -> Self {
        Self {
            sample_id: sample_id.into(),
            time,
            element: element.into(),
        }
    }

    /// Exact match on all three fields. Records without a time never match.
    pub fn matches(&self, record: &MeasurementRecord) -> bool {
        record.sample_id == self.sample_id
            && record.time == Some(self.time)
            && record.element == self.element
    }
}
